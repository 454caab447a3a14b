use shared_types::{CashflowRecord, ExtractionError};

use super::date_parser;
use super::table::{CellValue, CleanedTable};
use super::SummaryLayout;

/// Walk the cleaned table top to bottom and emit one record per
/// (row, column) data cell.
///
/// Category rows set the type label inherited by the tower rows below
/// them; tower rows keep the inherited type and carry their own label
/// as the tower name. Output order is (row, then column), matching the
/// sheet layout.
pub fn flatten_rows(
    table: &CleanedTable,
    project_id: i64,
    layout: &SummaryLayout,
) -> Result<Vec<CashflowRecord>, ExtractionError> {
    if table.headers.is_empty() {
        return Err(ExtractionError::Structural(
            "No usable columns after extraction".to_string(),
        ));
    }

    let label_header = &table.headers[0];
    let mut records = Vec::new();
    // Forward-fill accumulator, local to this walk.
    let mut current_type = String::new();

    for row in &table.rows {
        let label = match row.get(label_header).and_then(CellValue::as_label) {
            Some(label) => label,
            None => continue,
        };

        if layout.is_excluded_label(&label) {
            continue;
        }

        let tower_name = if layout.is_tower_label(&label) {
            label
        } else {
            current_type = label;
            String::new()
        };

        for header in &table.headers[1..] {
            // Headers can collide with the aggregate label set too.
            if layout.is_excluded_label(header) {
                continue;
            }

            let value = row.get(header).map_or(0.0, CellValue::as_number);
            let (range, kind) = date_parser::classify_header(header);

            records.push(CashflowRecord {
                tower_name: tower_name.clone(),
                project_id,
                record_type: current_type.clone(),
                start_date: range.start,
                end_date: range.end,
                financial_type: kind,
                value,
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::PeriodKind;
    use std::collections::HashMap;

    fn table(headers: Vec<&str>, rows: Vec<Vec<CellValue>>) -> CleanedTable {
        let headers: Vec<String> = headers.into_iter().map(String::from).collect();
        let rows = rows
            .into_iter()
            .map(|cells| {
                headers
                    .iter()
                    .cloned()
                    .zip(cells)
                    .collect::<HashMap<_, _>>()
            })
            .collect();
        CleanedTable { headers, rows }
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn number(value: f64) -> CellValue {
        CellValue::Number(value)
    }

    #[test]
    fn test_category_rows_set_type() {
        let table = table(
            vec!["Particulars", "Apr-23"],
            vec![
                vec![text("Construction Cost"), number(10.0)],
                vec![text("Collections"), number(20.0)],
            ],
        );

        let records = flatten_rows(&table, 7, &SummaryLayout::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_type, "Construction Cost");
        assert_eq!(records[0].tower_name, "");
        assert_eq!(records[0].project_id, 7);
        assert_eq!(records[1].record_type, "Collections");
    }

    #[test]
    fn test_tower_rows_inherit_type() {
        let table = table(
            vec!["Particulars", "Apr 23 to September 23"],
            vec![
                vec![text("Construction Cost"), number(10.0)],
                vec![text("Tower A"), CellValue::Empty],
                vec![text("Tower B"), number(5.5)],
                vec![text("Collections"), number(20.0)],
                vec![text("Tower A"), number(1.0)],
            ],
        );

        let records = flatten_rows(&table, 1, &SummaryLayout::default()).unwrap();
        assert_eq!(records.len(), 5);

        assert_eq!(records[1].tower_name, "Tower A");
        assert_eq!(records[1].record_type, "Construction Cost");
        assert_eq!(records[1].value, 0.0);
        assert_eq!(records[1].start_date, "2023-04-01");
        assert_eq!(records[1].end_date, "2023-09-30");
        assert_eq!(records[1].financial_type, PeriodKind::SemiAnnual);

        assert_eq!(records[2].tower_name, "Tower B");
        assert_eq!(records[2].record_type, "Construction Cost");
        assert_eq!(records[2].value, 5.5);

        // The later category row resets the inherited type.
        assert_eq!(records[4].tower_name, "Tower A");
        assert_eq!(records[4].record_type, "Collections");
    }

    #[test]
    fn test_tower_before_any_category_has_empty_type() {
        let table = table(
            vec!["Particulars", "Apr-23"],
            vec![vec![text("Tower C"), number(3.0)]],
        );

        let records = flatten_rows(&table, 1, &SummaryLayout::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tower_name, "Tower C");
        assert_eq!(records[0].record_type, "");
    }

    #[test]
    fn test_aggregate_label_rows_skipped() {
        let table = table(
            vec!["Particulars", "Apr-23"],
            vec![
                vec![text("Construction Cost"), number(10.0)],
                vec![text("Collection Efficiency"), number(0.95)],
                vec![text("Sales (# Units)"), number(12.0)],
                vec![text("Tower A"), number(1.0)],
            ],
        );

        let records = flatten_rows(&table, 1, &SummaryLayout::default()).unwrap();
        assert_eq!(records.len(), 2);
        // The skipped rows neither emit records nor disturb the type.
        assert_eq!(records[1].tower_name, "Tower A");
        assert_eq!(records[1].record_type, "Construction Cost");
    }

    #[test]
    fn test_blank_label_rows_skipped() {
        let table = table(
            vec!["Particulars", "Apr-23"],
            vec![
                vec![CellValue::Empty, number(10.0)],
                vec![text("   "), number(20.0)],
                vec![text("Collections"), number(30.0)],
            ],
        );

        let records = flatten_rows(&table, 1, &SummaryLayout::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, 30.0);
    }

    #[test]
    fn test_aggregate_headers_skipped_as_columns() {
        let table = table(
            vec!["Particulars", "Sales (in Cr.)", "Apr-23"],
            vec![vec![text("Collections"), number(9.0), number(1.0)]],
        );

        let records = flatten_rows(&table, 1, &SummaryLayout::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, 1.0);
        assert_eq!(records[0].start_date, "2023-04-01");
    }

    #[test]
    fn test_non_numeric_cells_coerce_to_zero() {
        let table = table(
            vec!["Particulars", "Apr-23"],
            vec![vec![text("Collections"), text("n/a")]],
        );

        let records = flatten_rows(&table, 1, &SummaryLayout::default()).unwrap();
        assert_eq!(records[0].value, 0.0);
    }

    #[test]
    fn test_output_order_is_row_then_column() {
        let table = table(
            vec!["Particulars", "Apr-23", "May-23"],
            vec![
                vec![text("Collections"), number(1.0), number(2.0)],
                vec![text("Tower A"), number(3.0), number(4.0)],
            ],
        );

        let records = flatten_rows(&table, 1, &SummaryLayout::default()).unwrap();
        let values: Vec<_> = records.iter().map(|record| record.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let table = table(
            vec!["Particulars", "Apr-23", "FY 23-24"],
            vec![
                vec![text("Collections"), number(1.0), number(2.0)],
                vec![text("Tower A"), number(3.0), number(4.0)],
            ],
        );

        let layout = SummaryLayout::default();
        let first = flatten_rows(&table, 1, &layout).unwrap();
        let second = flatten_rows(&table, 1, &layout).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_columns_is_structural() {
        let table = CleanedTable {
            headers: vec![],
            rows: vec![],
        };
        let result = flatten_rows(&table, 1, &SummaryLayout::default());
        assert!(matches!(result, Err(ExtractionError::Structural(_))));
    }
}
