//! AI model lifecycle matching and classification.
//!
//! Differs from the general path in two ways: identifiers are provider
//! date-stamps or variant tags (`20240620`, `0613`, `latest`), and a record
//! can carry a soft `deprecated` flag plus a suggested `replacement`.
//! Deprecation is checked first and short-circuits, so a deprecated record
//! is always WARN even if its `eol` is `true` or already past.

use chrono::{DateTime, Utc};

use crate::classify::{eol_phase, EolPhase};
use crate::domain::{AiModelCycle, DateValue, Status, Verdict};

/// Token that selects a provider's floating alias.
pub const LATEST: &str = "latest";

/// Find the record for a model version.
///
/// Exact identifier first; the `latest` token selects the `latest` record;
/// otherwise the first record whose identifier prefixes the version.
pub fn match_model_cycle<'a>(version: &str, cycles: &'a [AiModelCycle]) -> Option<&'a AiModelCycle> {
    let mut found = cycles.iter().find(|c| c.cycle == version);

    if version == LATEST {
        found = cycles.iter().find(|c| c.cycle == LATEST);
    }

    found.or_else(|| cycles.iter().find(|c| version.starts_with(c.cycle.as_str())))
}

/// Classify a matched model record.
pub fn classify_model(cycle: &AiModelCycle, now: DateTime<Utc>) -> Verdict {
    let eol = cycle.eol.as_date();

    if cycle.deprecated {
        let mut message = String::from("Model is deprecated");
        if let Some(replacement) = &cycle.replacement {
            message.push_str(&format!(". Use {} instead", replacement));
        }
        if let Some(raw) = cycle.eol.date_str() {
            message.push_str(&format!(" (EOL {})", raw));
        }
        return Verdict::new(Status::Warn, message);
    }

    let upgrade = cycle
        .replacement
        .as_ref()
        .map(|r| format!(". Upgrade to {}", r))
        .unwrap_or_default();

    if cycle.eol.is_true_flag() {
        return Verdict::new(Status::Err, format!("Model is EOL{}", upgrade));
    }

    match eol {
        DateValue::Valid(date, raw) => match eol_phase(now, date) {
            EolPhase::Ended => Verdict::new(
                Status::Err,
                format!("Model is EOL (ended {}){}", raw, upgrade),
            ),
            EolPhase::Approaching => Verdict::new(
                Status::Warn,
                format!("Model is approaching EOL (ends {})", raw),
            ),
            EolPhase::Distant => Verdict::new(Status::Ok, supported_message(cycle.lts, Some(raw))),
        },
        DateValue::Invalid(raw) => Verdict::new(
            Status::Warn,
            format!("Model has an unrecognized EOL date ({})", raw),
        ),
        DateValue::Absent => Verdict::new(Status::Ok, supported_message(cycle.lts, None)),
    }
}

fn supported_message(lts: bool, ends: Option<&str>) -> String {
    let mut message = String::from("Model is supported");
    if lts {
        message.push_str(" (LTS)");
    }
    if let Some(raw) = ends {
        message.push_str(&format!(" (ends {})", raw));
    }
    message
}

/// Verdict for a model version no record matched.
pub fn unmatched_model(version: &str, hint: &str) -> Verdict {
    Verdict::new(
        Status::Warn,
        format!(
            "Model version {} not found in EOL data. Known versions: {}",
            version, hint
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateOrFlag;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 15, 9, 0, 0).unwrap()
    }

    fn date(id: &str, eol: &str) -> AiModelCycle {
        AiModelCycle::new(id, DateOrFlag::Date(eol.to_string()))
    }

    #[test]
    fn exact_then_prefix_match() {
        let cycles = vec![
            date("0314", "2026-03-26"),
            date("0613", "2024-06-13"),
            AiModelCycle::new("turbo", DateOrFlag::Flag(false)),
        ];
        assert_eq!(match_model_cycle("0613", &cycles).unwrap().cycle, "0613");
        assert_eq!(
            match_model_cycle("turbo-preview", &cycles).unwrap().cycle,
            "turbo"
        );
        assert!(match_model_cycle("1106", &cycles).is_none());
    }

    #[test]
    fn latest_token_selects_latest_record() {
        let cycles = vec![
            date("20240229", "2026-01-01"),
            AiModelCycle::new("latest", DateOrFlag::Flag(false)).lts(true),
        ];
        assert_eq!(match_model_cycle("latest", &cycles).unwrap().cycle, "latest");
    }

    #[test]
    fn date_stamp_prefix_matches_longer_input() {
        let cycles = vec![date("20240620", "2025-10-22")];
        assert_eq!(
            match_model_cycle("20240620-v2", &cycles).unwrap().cycle,
            "20240620"
        );
    }

    #[test]
    fn deprecation_wins_over_boolean_eol() {
        let cycle = AiModelCycle::new("x", DateOrFlag::Flag(true)).deprecated(Some("y"));
        let verdict = classify_model(&cycle, now());
        assert_eq!(verdict.status, Status::Warn);
        assert_eq!(verdict.message, "Model is deprecated. Use y instead");
    }

    #[test]
    fn deprecation_mentions_eol_date() {
        let cycle = date("x", "2024-01-01").deprecated(None);
        let verdict = classify_model(&cycle, now());
        assert_eq!(verdict.status, Status::Warn);
        assert_eq!(verdict.message, "Model is deprecated (EOL 2024-01-01)");
    }

    #[test]
    fn boolean_eol_suggests_upgrade() {
        let cycle = AiModelCycle::new("x", DateOrFlag::Flag(true)).replacement("gpt-4o");
        let verdict = classify_model(&cycle, now());
        assert_eq!(verdict.status, Status::Err);
        assert_eq!(verdict.message, "Model is EOL. Upgrade to gpt-4o");
    }

    #[test]
    fn past_eol_date() {
        let verdict = classify_model(&date("0613", "2024-06-13"), now());
        assert_eq!(verdict.status, Status::Err);
        assert_eq!(verdict.message, "Model is EOL (ended 2024-06-13)");
    }

    #[test]
    fn approaching_eol_date() {
        let verdict = classify_model(&date("0314", "2026-03-26"), now());
        assert_eq!(verdict.status, Status::Warn);
        assert_eq!(verdict.message, "Model is approaching EOL (ends 2026-03-26)");
    }

    #[test]
    fn supported_with_lts_and_date() {
        let verdict = classify_model(&date("1106", "2027-09-28").lts(true), now());
        assert_eq!(verdict.status, Status::Ok);
        assert_eq!(verdict.message, "Model is supported (LTS) (ends 2027-09-28)");

        let plain = AiModelCycle::new("latest", DateOrFlag::Flag(false));
        assert_eq!(classify_model(&plain, now()).message, "Model is supported");
    }
}
