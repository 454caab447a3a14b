use actix_web::{web, HttpResponse, Result as ActixResult};
use extractors::CashflowSummaryExtractor;
use serde::Deserialize;
use shared_types::ExtractionError;
use tracing::info;

#[derive(Deserialize)]
pub struct ProcessExcelQuery {
    pub project_id: i64,
}

/// Normalize an uploaded cash-flow summary workbook into flat records.
/// The request body carries the raw `.xlsx` bytes; the response is the
/// JSON array of records in sheet order.
pub async fn process_excel(
    query: web::Query<ProcessExcelQuery>,
    payload: web::Bytes,
) -> ActixResult<HttpResponse> {
    info!(
        "Processing cash-flow workbook: project_id={}, size={} bytes",
        query.project_id,
        payload.len()
    );

    let extractor = CashflowSummaryExtractor::with_defaults();

    match extractor.process_workbook(&payload, query.project_id) {
        Ok(records) => {
            info!(
                "Extracted {} cash-flow records for project {}",
                records.len(),
                query.project_id
            );
            Ok(HttpResponse::Ok().json(records))
        }
        // A malformed or undersized sheet is a client problem, not ours.
        Err(err @ (ExtractionError::Structural(_) | ExtractionError::Workbook(_))) => {
            Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": err.to_string()
            })))
        }
        Err(err) => Err(actix_web::error::ErrorInternalServerError(err.to_string())),
    }
}
