use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::format_number;
use crate::error::LoaderError;

/// One row of an API response: a flat mapping of field names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricRecord(Map<String, Value>);

impl MetricRecord {
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Numeric value of `field`.
    ///
    /// The backend serializes SQL `NUMERIC` columns as decimal strings, so
    /// numeric strings are accepted. Missing, null and non-numeric values
    /// read as zero.
    pub fn number(&self, field: &str) -> f64 {
        let value = match self.0.get(field) {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|value| value.is_finite()).unwrap_or(0.0)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn integer(&self, field: &str) -> i64 {
        self.number(field).round() as i64
    }

    /// Display text of `field`; whole numbers lose their fraction.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.as_f64().map(format_number).unwrap_or_default(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }
}

/// Parses a response body into records, rejecting anything that is not an
/// array of objects.
pub fn parse_records(body: &str) -> Result<Vec<MetricRecord>, LoaderError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Array(rows) = value else {
        return Err(LoaderError::Shape("expected a JSON array"));
    };

    rows.into_iter()
        .map(|row| match row {
            Value::Object(fields) => Ok(MetricRecord(fields)),
            _ => Err(LoaderError::Shape("expected an array of objects")),
        })
        .collect()
}

/// Records from an in-memory JSON array; non-object rows are skipped.
pub fn records_from_value(value: Value) -> Vec<MetricRecord> {
    match value {
        Value::Array(rows) => rows
            .into_iter()
            .filter_map(|row| match row {
                Value::Object(fields) => Some(MetricRecord(fields)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MetricRecord {
        records_from_value(json!([value])).remove(0)
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let row = record(json!({"total_production": "1523.75", "year": 2021}));
        assert!((row.number("total_production") - 1523.75).abs() < f64::EPSILON);
        assert_eq!(row.integer("year"), 2021);
    }

    #[test]
    fn missing_and_null_numbers_read_zero() {
        let row = record(json!({"production_mw": null, "label": "n/a", "ratio": "NaN"}));
        assert!(row.number("production_mw").abs() < f64::EPSILON);
        assert!(row.number("capacity_mw").abs() < f64::EPSILON);
        assert!(row.number("label").abs() < f64::EPSILON);
        assert!(row.number("ratio").abs() < f64::EPSILON);
    }

    #[test]
    fn text_renders_whole_numbers_without_fraction() {
        let row = record(json!({"year": 2020.0, "city": "Lyon", "month": "3"}));
        assert_eq!(row.text("year"), "2020");
        assert_eq!(row.text("city"), "Lyon");
        assert_eq!(row.text("month"), "3");
        assert_eq!(row.text("missing"), "");
    }

    #[test]
    fn parse_records_rejects_non_arrays() {
        assert!(matches!(
            parse_records(r#"{"error": "boom"}"#),
            Err(LoaderError::Shape(_))
        ));
        assert!(matches!(parse_records("[1, 2]"), Err(LoaderError::Shape(_))));
        assert!(matches!(
            parse_records("<html>oops</html>"),
            Err(LoaderError::Parse(_))
        ));
    }

    #[test]
    fn parse_records_keeps_row_order() -> Result<(), Box<dyn std::error::Error>> {
        let rows = parse_records(r#"[{"region": "X"}, {"region": "Y"}]"#)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("region"), "X");
        assert_eq!(rows[1].text("region"), "Y");
        Ok(())
    }
}
