use serde::{Deserialize, Serialize};

/// Time-span shape encoded by a column header. Classification is purely
/// lexical: a header keeps its kind even when its exact dates could not
/// be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodKind {
    Monthly,
    #[serde(rename = "Semi-Annual")]
    SemiAnnual,
    Annual,
}

/// One normalized cash-flow observation, emitted per (row, column) cell
/// of the cleaned summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowRecord {
    /// Label of the originating tower row; empty for category rows.
    pub tower_name: String,
    pub project_id: i64,
    /// Most recent category label above this row (forward-filled).
    #[serde(rename = "type")]
    pub record_type: String,
    /// `YYYY-MM-DD`, or empty when the header's dates were unresolvable.
    pub start_date: String,
    /// `YYYY-MM-DD`, or empty when the header's dates were unresolvable.
    pub end_date: String,
    pub financial_type: PeriodKind,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_kind_serialization() {
        let json = serde_json::to_string(&PeriodKind::SemiAnnual).unwrap();
        assert_eq!(json, "\"Semi-Annual\"");

        let json = serde_json::to_string(&PeriodKind::Monthly).unwrap();
        assert_eq!(json, "\"Monthly\"");

        let deserialized: PeriodKind = serde_json::from_str("\"Annual\"").unwrap();
        assert_eq!(deserialized, PeriodKind::Annual);
    }

    #[test]
    fn test_record_serialization_field_names() {
        let record = CashflowRecord {
            tower_name: "Tower A".to_string(),
            project_id: 42,
            record_type: "Construction Cost".to_string(),
            start_date: "2023-04-01".to_string(),
            end_date: "2023-09-30".to_string(),
            financial_type: PeriodKind::SemiAnnual,
            value: 12.5,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["towerName"], "Tower A");
        assert_eq!(json["projectId"], 42);
        assert_eq!(json["type"], "Construction Cost");
        assert_eq!(json["startDate"], "2023-04-01");
        assert_eq!(json["endDate"], "2023-09-30");
        assert_eq!(json["financialType"], "Semi-Annual");
        assert_eq!(json["value"], 12.5);

        let roundtrip: CashflowRecord = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, record);
    }
}
