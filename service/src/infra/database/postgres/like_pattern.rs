//! [`LikePattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL `LIKE` pattern matching the given input literally as a substring.
///
/// Must be used with the `ESCAPE '\'` clause.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct LikePattern(String);

impl LikePattern {
    /// Creates a new [`LikePattern`] out of the given `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::LikePattern;

    #[test]
    fn wraps_input_as_substring() {
        assert_eq!(LikePattern::new("loft").to_string(), "%loft%");
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(
            LikePattern::new(r"50%_off\").to_string(),
            r"%50\%\_off\\%",
        );
    }
}
