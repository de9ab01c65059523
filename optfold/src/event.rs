use crate::set::OptionId;

/// The raw value carried by a single occurrence of an option on the command
/// line, before it's folded into a [`Value`][crate::Value].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /**
    No value. Used by switches and counters, and by negations that clear an
    option entirely (`--no-lib`).
    */
    Unit,

    /**
    A single string: a parameter's value, a list element, or, for a negated
    keypair such as `--no-define=mode`, the key to remove.
    */
    Text(String),

    /// A `key=value` pair for a keypair option
    Pair { key: String, value: String },
}

/**
A single matched occurrence of an option in the argument list. The ordered
sequence of these is the record of what the command line said, independent of
any defaults; replaying it over a different set of defaults always reproduces
the command line's intent.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEvent {
    option: OptionId,
    value: RawValue,
    negated: bool,
}

impl ParseEvent {
    pub(crate) fn new(option: OptionId, value: RawValue, negated: bool) -> Self {
        Self {
            option,
            value,
            negated,
        }
    }

    #[inline]
    #[must_use]
    pub fn option(&self) -> OptionId {
        self.option
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &RawValue {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn negated(&self) -> bool {
        self.negated
    }
}
