use std::{fmt, sync::Arc};

use regex::Regex;

use crate::errors::SpecError;

/**
A check applied to every string value an option receives, whether from the
command line or from defaults. Either a regular expression, which must match
somewhere in the value, or an arbitrary predicate.
*/
#[derive(Clone)]
pub enum Validator {
    Pattern(Regex),
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Validator {
    /// Compile `pattern` into a validator. Anchor it with `^...$` if the
    /// whole value must match.
    pub fn pattern(pattern: &str) -> Result<Self, SpecError> {
        Regex::new(pattern)
            .map(Validator::Pattern)
            .map_err(|error| SpecError::InvalidPattern {
                pattern: pattern.to_owned(),
                message: error.to_string(),
            })
    }

    pub fn predicate(check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Validator::Predicate(Arc::new(check))
    }

    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Validator::Pattern(regex) => regex.is_match(value),
            Validator::Predicate(check) => check(value),
        }
    }
}

impl From<Regex> for Validator {
    fn from(regex: Regex) -> Self {
        Validator::Pattern(regex)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Validator::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
