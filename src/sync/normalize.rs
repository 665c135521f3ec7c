//! Canonical form of pair annotation values.

/// Rendering of an absent value in change-log notes.
pub const NONE_LABEL: &str = "none";

/// Map `"none"` (any case), blank and absent to `None`; trim everything else.
///
/// Stored and proposed values are both passed through this before comparing,
/// so representation differences never trigger a write.
pub fn normalize(value: Option<&str>) -> Option<String> {
    let v = value?.trim();
    if v.is_empty() || v.eq_ignore_ascii_case(NONE_LABEL) {
        None
    } else {
        Some(v.to_string())
    }
}

/// Display form for notes: the value itself, or `none`.
pub fn display_value(value: Option<&str>) -> &str {
    value.unwrap_or(NONE_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_blank_and_null_are_equal() {
        assert_eq!(normalize(Some("none")), normalize(None));
        assert_eq!(normalize(Some("")), normalize(None));
        assert_eq!(normalize(Some("None")), normalize(Some("")));
        assert_eq!(normalize(Some("   ")), None);
    }

    #[test]
    fn real_values_are_kept() {
        assert_eq!(normalize(Some("1A")), Some("1A".to_string()));
        assert_eq!(
            normalize(Some("Actionable PGx")),
            Some("Actionable PGx".to_string())
        );
        assert_ne!(normalize(Some("1A")), normalize(Some("1B")));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(normalize(Some(" 1A ")), Some("1A".to_string()));
        assert_eq!(normalize(Some("1A")), normalize(Some(" 1A")));
        assert_eq!(normalize(Some(" none\n")), None);
    }

    #[test]
    fn display_renders_absent_as_none() {
        assert_eq!(display_value(None), "none");
        assert_eq!(display_value(Some("3")), "3");
    }
}
