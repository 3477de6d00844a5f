//! Request handlers, grouped by resource.

pub mod health;
pub mod restaurants;
pub mod social;
pub mod users;

use serde::Deserialize;

/// `?person=` style lookup used by several read endpoints.
#[derive(Debug, Deserialize)]
pub struct PersonQuery {
    pub person: Option<String>,
}

/// Treats a missing or blank parameter as "not filtered".
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a comma-separated person parameter; blank entries are dropped and
/// a missing parameter yields an empty list (no person filtering).
pub(crate) fn person_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parses the `max` flag from a query-string value.
pub(crate) fn flag(value: Option<String>) -> bool {
    value
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_parameters_are_wildcards() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" thai ".into())), Some("thai".into()));
    }

    #[test]
    fn person_list_splits_and_drops_blanks() {
        assert_eq!(person_list(None), Vec::<String>::new());
        assert_eq!(person_list(Some("".into())), Vec::<String>::new());
        assert_eq!(
            person_list(Some("ann, bob,,cid".into())),
            vec!["ann", "bob", "cid"]
        );
    }

    #[test]
    fn max_flag_accepts_true_and_one() {
        assert!(flag(Some("true".into())));
        assert!(flag(Some("1".into())));
        assert!(!flag(Some("false".into())));
        assert!(!flag(None));
    }
}
