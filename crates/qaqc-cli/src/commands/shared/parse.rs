use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use qaqc_core::values::PropertyValues;

/// Parse a catalog label (`"Not Started"`, `not-started`, `SV_Sampling`, `>`).
pub fn parse_label<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>()
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse every entry of a repeated or comma-separated label flag.
pub fn parse_labels<T>(raw: &[String], field: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    raw.iter().map(|value| parse_label(value, field)).collect()
}

pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}' (expected YYYY-MM-DD): {error}"))
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, with `T` or a space as separator.
pub fn parse_datetime(raw: &str, field: &str) -> anyhow::Result<NaiveDateTime> {
    let trimmed = raw.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            anyhow::anyhow!("invalid {field} '{raw}' (expected YYYY-MM-DDTHH:MM[:SS])")
        })
}

/// Parse a JSON object of extracted property values.
pub fn parse_values(raw: &str) -> anyhow::Result<PropertyValues> {
    serde_json::from_str(raw).map_err(|error| {
        anyhow::anyhow!("invalid values: expected a JSON object of scalars: {error}")
    })
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;
    use qaqc_core::enums::{EventType, ProjectStatus, Relation};
    use qaqc_core::values::PropertyValue;

    use super::{parse_date, parse_datetime, parse_label, parse_labels, parse_values};

    #[test]
    fn parses_hyphenated_label() {
        let status: ProjectStatus =
            parse_label("in-progress", "status").expect("status should parse");
        assert_eq!(status, ProjectStatus::InProgress);
    }

    #[test]
    fn parses_relation_symbols() {
        let relation: Relation = parse_label(">", "relation").expect("relation should parse");
        assert_eq!(relation, Relation::GreaterThan);
    }

    #[test]
    fn parses_label_lists() {
        let types: Vec<EventType> = parse_labels(&["drilling".into(), "GWMS".into()], "event type")
            .expect("types should parse");
        assert_eq!(types, vec![EventType::Drilling, EventType::Gwms]);
    }

    #[test]
    fn errors_on_invalid_label() {
        let err = parse_label::<ProjectStatus>("done", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'done'"));
    }

    #[test]
    fn datetime_seconds_are_optional() {
        let parsed = parse_datetime("2024-03-01T08:30", "start").expect("should parse");
        assert_eq!(parsed.hour(), 8);
        assert_eq!(parsed.minute(), 30);
        assert!(parse_datetime("2024-03-01 08:30:15", "start").is_ok());
        assert!(parse_datetime("March 1st", "start").is_err());
    }

    #[test]
    fn date_requires_iso_form() {
        assert!(parse_date("2024-03-01", "start_date").is_ok());
        assert!(parse_date("01/03/2024", "start_date").is_err());
    }

    #[test]
    fn values_keep_scalar_types() {
        let values = parse_values(r#"{"Depth": 12.5, "Sample ID": "S-1", "Note": null}"#)
            .expect("values should parse");
        assert_eq!(values["Depth"], PropertyValue::Number(12.5));
        assert_eq!(values["Sample ID"], PropertyValue::Text("S-1".into()));
        assert!(values["Note"].is_null());
        assert!(parse_values("[1, 2]").is_err());
    }
}
