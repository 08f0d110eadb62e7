//! Version normalization: raw version string to ordered match keys.

/// A raw version reduced to the keys the cycle matcher tries.
///
/// Unparsable input is never rejected; it simply yields no numeric prefixes
/// beyond the literal string and is matched as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVersion {
    full: String,
    major: String,
    major_minor: Option<String>,
}

impl NormalizedVersion {
    /// Strip one leading `v` and derive the `major` / `major.minor` prefixes.
    pub fn parse(raw: &str) -> Self {
        let full = raw.strip_prefix('v').unwrap_or(raw).to_string();

        let mut parts = full.split('.');
        let major = parts.next().unwrap_or_default().to_string();
        let major_minor = parts.next().map(|minor| format!("{}.{}", major, minor));

        Self {
            full,
            major,
            major_minor,
        }
    }

    /// The version with any leading `v` removed.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Text before the first `.` (the whole version when there is no dot).
    pub fn major(&self) -> &str {
        &self.major
    }

    /// `major.minor`, present when the version has at least two dot-separated parts.
    pub fn major_minor(&self) -> Option<&str> {
        self.major_minor.as_deref()
    }

    /// Whether the input carried no `.` at all (e.g. `"18"`).
    pub fn is_major_only(&self) -> bool {
        !self.full.contains('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_v() {
        let v = NormalizedVersion::parse("v18.16.0");
        assert_eq!(v.full(), "18.16.0");
        assert_eq!(v.major(), "18");
        assert_eq!(v.major_minor(), Some("18.16"));
        assert!(!v.is_major_only());
    }

    #[test]
    fn only_one_v_is_stripped() {
        let v = NormalizedVersion::parse("vv1");
        assert_eq!(v.full(), "v1");
    }

    #[test]
    fn major_only() {
        let v = NormalizedVersion::parse("18");
        assert_eq!(v.major(), "18");
        assert_eq!(v.major_minor(), None);
        assert!(v.is_major_only());
    }

    #[test]
    fn two_part_version() {
        let v = NormalizedVersion::parse("22.04");
        assert_eq!(v.major_minor(), Some("22.04"));
        assert_eq!(v.major(), "22");
    }

    #[test]
    fn non_numeric_passes_through() {
        let v = NormalizedVersion::parse("latest");
        assert_eq!(v.full(), "latest");
        assert_eq!(v.major(), "latest");
        assert!(v.is_major_only());
    }

    #[test]
    fn empty_input() {
        let v = NormalizedVersion::parse("");
        assert_eq!(v.full(), "");
        assert_eq!(v.major(), "");
        assert_eq!(v.major_minor(), None);
    }
}
