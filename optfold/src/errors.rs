/*!
Error types for [`optfold`][crate]. Errors are split into three categories, so
that callers can react differently to each:

- [`SpecError`]: the option declarations themselves are invalid. These are bugs
  in the program, raised when options are registered (or when defaults fail
  their own validators).
- [`ArgumentError`]: the command line doesn't satisfy an otherwise valid
  specification. These are the user's fault.
- [`UsageError`]: the library itself was called incorrectly, such as asking
  for an option that was never declared.

[`Error`] wraps all three, for callers that want a single error type.
 */

use std::fmt;

use crate::value::Kind;

/// The option declarations are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpecError {
    /// A name isn't an identifier with up to two leading dashes
    #[error("invalid option name {name:?}")]
    InvalidName { name: String },

    /// Two names, in the same option or different ones, are the same once
    /// their leading dashes are removed
    #[error("option name {name:?} is already used by option {existing:?}")]
    DuplicateName { name: String, existing: String },

    /// A dependency doesn't name any option in the set
    #[error("option {option:?} depends on unknown option {dependency:?}")]
    UnknownDependency { option: String, dependency: String },

    /// A default value is the wrong kind for its option
    #[error("default for {kind} option {option:?} is a {found}")]
    DefaultKind {
        option: String,
        kind: Kind,
        found: Kind,
    },

    /// A default value failed the option's own validator
    #[error("default value {value:?} for option {option:?} is invalid")]
    InvalidDefault { option: String, value: String },

    /// Validators were attached to an option that never receives a value
    #[error("{kind} option {option:?} can't have a {which}")]
    ValidatorNotAllowed {
        option: String,
        kind: Kind,
        which: &'static str,
    },

    /// A validator pattern failed to compile
    #[error("invalid validator pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// The command line arguments don't satisfy the option specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ArgumentError {
    /// A dash-prefixed argument didn't match any option
    #[error("unrecognized option {argument:?}")]
    Unrecognized { argument: String },

    /// A switch or counter got a value, or a negated parameter got one
    #[error("option {option:?} doesn't take a value (got {value:?})")]
    UnexpectedValue { option: String, value: String },

    /// An option needed a value and the arguments ran out
    #[error("option {option:?} requires a value")]
    MissingValue { option: String },

    /// The would-be value for an option looks like another option
    #[error("value {value:?} for option {option:?} looks like an option")]
    AmbiguousValue { option: String, value: String },

    /// A switch or parameter appeared more than once
    #[error("option {option:?} appeared more than once")]
    Repeated { option: String },

    /// A value failed the option's validator
    #[error("invalid value {value:?} for option {option:?}")]
    InvalidValue { option: String, value: String },

    /// A keypair option got a value that isn't `key=value`
    #[error("option {option:?} expects key=value, got {value:?}")]
    MalformedPair { option: String, value: String },

    /// A required option never appeared
    #[error("required option {option:?} is missing")]
    MissingRequired { option: String },

    /// An option appeared without one of the options it depends on
    #[error("option {option:?} requires option {dependency:?}")]
    MissingDependency { option: String, dependency: String },
}

impl ArgumentError {
    /// The canonical identifier of the option this error is about, if any
    #[must_use]
    pub fn option(&self) -> Option<&str> {
        match self {
            ArgumentError::Unrecognized { .. } => None,
            ArgumentError::UnexpectedValue { option, .. }
            | ArgumentError::MissingValue { option }
            | ArgumentError::AmbiguousValue { option, .. }
            | ArgumentError::Repeated { option }
            | ArgumentError::InvalidValue { option, .. }
            | ArgumentError::MalformedPair { option, .. }
            | ArgumentError::MissingRequired { option }
            | ArgumentError::MissingDependency { option, .. } => Some(option.as_str()),
        }
    }
}

/// The library was used incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UsageError {
    /// There's no option with this identifier
    #[error("no option named {name:?} was declared")]
    UnknownOption { name: String },

    /// The option exists but holds a different kind of value
    #[error("option {option:?} is a {kind}, not a {requested}")]
    WrongKind {
        option: String,
        kind: Kind,
        requested: Kind,
    },
}

/// Which of the three error categories an [`Error`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Specification,
    Argument,
    Usage,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Specification => "invalid option specification",
            Category::Argument => "invalid arguments",
            Category::Usage => "incorrect use of optfold",
        })
    }
}

/// Any error from [`optfold`][crate].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl Error {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Error::Spec(_) => Category::Specification,
            Error::Argument(_) => Category::Argument,
            Error::Usage(_) => Category::Usage,
        }
    }
}
