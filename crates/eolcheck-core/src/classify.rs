//! Status classification for general lifecycle records.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::domain::{DateValue, LifecycleCycle, Status, Verdict};

/// An EOL this many calendar months away (or fewer) is "approaching".
pub const APPROACHING_WINDOW_MONTHS: i32 = 6;

/// Whole calendar months from `now` to `eol`, ignoring day-of-month.
///
/// Dec 31 to Jan 1 counts as one month. This is a calendar-field difference,
/// not a day count, and classification boundaries depend on it.
pub fn months_until(now: DateTime<Utc>, eol: NaiveDate) -> i32 {
    (eol.year() - now.year()) * 12 + (eol.month() as i32 - now.month() as i32)
}

/// Whether `eol` (taken as midnight UTC) is already behind `now`.
pub fn has_passed(now: DateTime<Utc>, eol: NaiveDate) -> bool {
    match eol.and_hms_opt(0, 0, 0) {
        Some(start) => now > start.and_utc(),
        None => false,
    }
}

/// Where an EOL date sits relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolPhase {
    Ended,
    Approaching,
    Distant,
}

pub fn eol_phase(now: DateTime<Utc>, eol: NaiveDate) -> EolPhase {
    if has_passed(now, eol) {
        EolPhase::Ended
    } else if months_until(now, eol) <= APPROACHING_WINDOW_MONTHS {
        EolPhase::Approaching
    } else {
        EolPhase::Distant
    }
}

/// Classify a matched record.
pub fn classify_cycle(cycle: &LifecycleCycle, now: DateTime<Utc>) -> Verdict {
    let id = &cycle.cycle;

    if cycle.eol.is_true_flag() {
        return Verdict::new(Status::Err, format!("Version {} is EOL", id));
    }

    match cycle.eol.as_date() {
        DateValue::Valid(date, raw) => match eol_phase(now, date) {
            EolPhase::Ended => {
                Verdict::new(Status::Err, format!("Version {} is EOL (ended {})", id, raw))
            }
            EolPhase::Approaching => Verdict::new(
                Status::Warn,
                format!("Version {} is approaching EOL (ends {})", id, raw),
            ),
            EolPhase::Distant => Verdict::new(
                Status::Ok,
                format!("Version {} is supported (ends {})", id, raw),
            ),
        },
        DateValue::Invalid(raw) => Verdict::new(
            Status::Warn,
            format!("Version {} has an unrecognized EOL date ({})", id, raw),
        ),
        DateValue::Absent => Verdict::new(
            Status::Ok,
            format!("Version {} is supported (ends unknown)", id),
        ),
    }
}

/// Verdict for a version no record matched.
pub fn unmatched(version: &str, hint: &str) -> Verdict {
    Verdict::new(
        Status::Warn,
        format!(
            "Version {} not found. Available versions include: {}",
            version, hint
        ),
    )
}
