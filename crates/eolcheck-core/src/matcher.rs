//! Cycle matching: pick the lifecycle record that covers a version.
//!
//! Providers track release lines at different granularities (Node.js by
//! major, Ubuntu by `major.minor`, some products by point release). The
//! matcher walks a fixed fallback chain and the first rule that finds a
//! record wins:
//!
//! 1. [`MatchRule::Exact`]: identifier equals the full version.
//! 2. [`MatchRule::MajorMinor`]: identifier equals `major.minor`.
//! 3. [`MatchRule::Major`]: identifier equals `major`.
//! 4. [`MatchRule::MajorBridge`]: input has no dot; identifier is `major.0`
//!    or starts with `major.`.
//! 5. [`MatchRule::PrefixBridge`]: the version starts with `identifier.` or
//!    equals the identifier.

use crate::domain::CycleId;
use crate::normalize::NormalizedVersion;

/// How many identifiers an unmatched message lists.
pub const HINT_LIMIT: usize = 5;

/// Which fallback rule selected the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    MajorMinor,
    Major,
    MajorBridge,
    PrefixBridge,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Exact => "exact",
            MatchRule::MajorMinor => "major_minor",
            MatchRule::Major => "major",
            MatchRule::MajorBridge => "major_bridge",
            MatchRule::PrefixBridge => "prefix_bridge",
        }
    }
}

/// Find the best record for `version`, reporting the rule that matched.
pub fn match_cycle<'a, C: CycleId>(
    version: &NormalizedVersion,
    cycles: &'a [C],
) -> Option<(&'a C, MatchRule)> {
    let full = version.full();

    if let Some(c) = find_by(cycles, |id| id == full) {
        return Some((c, MatchRule::Exact));
    }

    if let Some(major_minor) = version.major_minor() {
        if let Some(c) = find_by(cycles, |id| id == major_minor) {
            return Some((c, MatchRule::MajorMinor));
        }
    }

    let major = version.major();
    if let Some(c) = find_by(cycles, |id| id == major) {
        return Some((c, MatchRule::Major));
    }

    if version.is_major_only() {
        let zero = format!("{}.0", major);
        let dotted = format!("{}.", major);
        if let Some(c) = find_by(cycles, |id| id == zero || id.starts_with(&dotted)) {
            return Some((c, MatchRule::MajorBridge));
        }
    }

    find_by(cycles, |id| full == id || full.starts_with(&format!("{}.", id)))
        .map(|c| (c, MatchRule::PrefixBridge))
}

fn find_by<'a, C: CycleId>(cycles: &'a [C], pred: impl Fn(&str) -> bool) -> Option<&'a C> {
    cycles.iter().find(|c| pred(c.cycle_id()))
}

/// First [`HINT_LIMIT`] identifiers, comma-separated, with `, ...` appended
/// when more exist.
pub fn available_hint<C: CycleId>(cycles: &[C]) -> String {
    let listed = cycles
        .iter()
        .take(HINT_LIMIT)
        .map(|c| c.cycle_id())
        .collect::<Vec<_>>()
        .join(", ");
    if cycles.len() > HINT_LIMIT {
        format!("{}, ...", listed)
    } else {
        listed
    }
}
