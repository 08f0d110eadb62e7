//! Lifecycle records as supplied by lifecycle data providers.
//!
//! Providers disagree on field shapes: `eol` may be a date string or a
//! boolean sentinel, `lts` may be a flag or the date LTS started, and cycle
//! identifiers occasionally arrive as bare JSON numbers. The types here accept
//! all of those and expose the shapes the classifiers need.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A field that is either a boolean sentinel or a date string.
///
/// For `eol`: `Flag(true)` means "already end-of-life, date unknown",
/// `Flag(false)` means "no known end-of-life", `Date(..)` is a scheduled date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateOrFlag {
    Flag(bool),
    Date(String),
}

impl Default for DateOrFlag {
    fn default() -> Self {
        DateOrFlag::Flag(false)
    }
}

impl DateOrFlag {
    /// `true` only for the boolean sentinel `true`.
    pub fn is_true_flag(&self) -> bool {
        matches!(self, DateOrFlag::Flag(true))
    }

    /// The raw date string, if this is a date.
    pub fn date_str(&self) -> Option<&str> {
        match self {
            DateOrFlag::Date(raw) => Some(raw.as_str()),
            DateOrFlag::Flag(_) => None,
        }
    }

    /// Interpret the value as a calendar date.
    pub fn as_date(&self) -> DateValue<'_> {
        match self {
            DateOrFlag::Flag(_) => DateValue::Absent,
            DateOrFlag::Date(raw) => match parse_date(raw) {
                Some(date) => DateValue::Valid(date, raw),
                None => DateValue::Invalid(raw),
            },
        }
    }
}

impl std::fmt::Display for DateOrFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateOrFlag::Flag(flag) => write!(f, "{}", flag),
            DateOrFlag::Date(raw) => f.write_str(raw),
        }
    }
}

/// Result of reading a [`DateOrFlag`] as a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue<'a> {
    /// The field is a boolean, not a date.
    Absent,
    /// A parsed date plus the original text.
    Valid(NaiveDate, &'a str),
    /// A string that is not a recognizable date.
    Invalid(&'a str),
}

/// Parse `YYYY-MM-DD`, falling back to a full RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_utc().date())
        })
}

/// Anything carrying a lifecycle cycle identifier.
pub trait CycleId {
    fn cycle_id(&self) -> &str;
}

/// One release line of a general product (runtime, OS, library, service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleCycle {
    #[serde(deserialize_with = "string_or_number")]
    pub cycle: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub eol: DateOrFlag,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub lts: DateOrFlag,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub support: DateOrFlag,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub discontinued: DateOrFlag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl LifecycleCycle {
    /// A record with only an identifier and an `eol` value.
    pub fn new(cycle: impl Into<String>, eol: DateOrFlag) -> Self {
        Self {
            cycle: cycle.into(),
            release_date: None,
            eol,
            lts: DateOrFlag::default(),
            support: DateOrFlag::default(),
            discontinued: DateOrFlag::default(),
            latest: None,
            link: None,
        }
    }

    /// Shorthand for a record with a scheduled end-of-life date.
    pub fn with_eol_date(cycle: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(cycle, DateOrFlag::Date(date.into()))
    }
}

impl CycleId for LifecycleCycle {
    fn cycle_id(&self) -> &str {
        &self.cycle
    }
}

/// One version/variant of a generative AI model.
///
/// `deprecated` is independent of `eol`: a model can be soft-deprecated
/// while `eol` is still `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModelCycle {
    #[serde(deserialize_with = "string_or_number")]
    pub cycle: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub eol: DateOrFlag,
    #[serde(default)]
    pub lts: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl AiModelCycle {
    pub fn new(cycle: impl Into<String>, eol: DateOrFlag) -> Self {
        Self {
            cycle: cycle.into(),
            release_date: None,
            eol,
            lts: false,
            deprecated: false,
            replacement: None,
        }
    }

    pub fn lts(mut self, lts: bool) -> Self {
        self.lts = lts;
        self
    }

    /// Mark deprecated, optionally naming a successor.
    pub fn deprecated(mut self, replacement: Option<&str>) -> Self {
        self.deprecated = true;
        self.replacement = replacement.map(str::to_string);
        self
    }

    pub fn replacement(mut self, replacement: &str) -> Self {
        self.replacement = Some(replacement.to_string());
        self
    }
}

impl CycleId for AiModelCycle {
    fn cycle_id(&self) -> &str {
        &self.cycle
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

/// endoflife.date sends `null` for fields it has no data on.
fn flag_or_null<'de, D>(deserializer: D) -> Result<DateOrFlag, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateOrFlag>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endoflife_payload() {
        let raw = r#"[
            {"cycle":"22","releaseDate":"2024-04-24","eol":"2027-04-30","latest":"22.11.0","lts":"2024-10-29","support":"2025-10-21","discontinued":false},
            {"cycle":"16","releaseDate":"2021-04-20","eol":true,"lts":true,"support":true}
        ]"#;
        let cycles: Vec<LifecycleCycle> = serde_json::from_str(raw).unwrap();
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].eol, DateOrFlag::Date("2027-04-30".to_string()));
        assert_eq!(cycles[0].latest.as_deref(), Some("22.11.0"));
        assert!(cycles[1].eol.is_true_flag());
        assert_eq!(cycles[1].discontinued, DateOrFlag::Flag(false));
    }

    #[test]
    fn numeric_cycle_reads_as_string() {
        let raw = r#"{"cycle": 3.9, "eol": false}"#;
        let cycle: LifecycleCycle = serde_json::from_str(raw).unwrap();
        assert_eq!(cycle.cycle, "3.9");

        let raw = r#"{"cycle": 18}"#;
        let cycle: LifecycleCycle = serde_json::from_str(raw).unwrap();
        assert_eq!(cycle.cycle, "18");
        assert_eq!(cycle.eol, DateOrFlag::Flag(false));
    }

    #[test]
    fn null_fields_read_as_unset() {
        let raw = r#"[{"cycle":"1","eol":null,"lts":null,"support":null,"discontinued":null}]"#;
        let cycles: Vec<LifecycleCycle> = serde_json::from_str(raw).unwrap();
        assert_eq!(cycles[0].eol, DateOrFlag::Flag(false));
        assert_eq!(cycles[0].lts, DateOrFlag::Flag(false));
        assert_eq!(cycles[0].support, DateOrFlag::Flag(false));
        assert_eq!(cycles[0].discontinued, DateOrFlag::Flag(false));

        let ai: AiModelCycle = serde_json::from_str(r#"{"cycle":"0125","eol":null}"#).unwrap();
        assert_eq!(ai.eol, DateOrFlag::Flag(false));
    }

    #[test]
    fn ai_cycle_defaults() {
        let raw = r#"{"cycle":"0613","releaseDate":"2023-06-13","eol":"2024-06-13","lts":false}"#;
        let cycle: AiModelCycle = serde_json::from_str(raw).unwrap();
        assert!(!cycle.deprecated);
        assert!(cycle.replacement.is_none());
    }

    #[test]
    fn date_value_classification() {
        assert_eq!(DateOrFlag::Flag(true).as_date(), DateValue::Absent);
        assert_eq!(
            DateOrFlag::Date("2026-01-31".into()).as_date(),
            DateValue::Valid(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(), "2026-01-31")
        );
        assert_eq!(
            DateOrFlag::Date("soon".into()).as_date(),
            DateValue::Invalid("soon")
        );
        assert_eq!(
            parse_date("2026-03-01T12:00:00Z"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
    }
}
