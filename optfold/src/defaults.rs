/*!
Default values, and the policies for layering externally sourced defaults
(from a config file, the environment, or anywhere else) over them.
 */

use indexmap::IndexMap;
use tracing::trace;

use crate::{
    errors::{Error, SpecError, UsageError},
    set::OptionSet,
    value::Value,
};

/// How an incoming set of defaults is combined with the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Policy {
    /// Incoming values overwrite matching options
    Merge,

    /// Incoming values are accumulated onto matching options: counters add,
    /// lists concatenate, keypairs merge, switches and parameters overwrite
    Append,

    /// Every option starts over from its zero value before incoming values
    /// are applied
    Replace,
}

/**
The value each option has before the command line is applied, keyed by
canonical identifier in declaration order. Every declared option always has
exactly one entry, of the right kind.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    values: IndexMap<String, Value>,
}

impl Defaults {
    /// The defaults each option was declared with
    #[must_use]
    pub fn declared(set: &OptionSet) -> Self {
        Self {
            values: set
                .iter()
                .map(|(_, spec)| (spec.identifier().to_owned(), spec.default_value()))
                .collect(),
        }
    }

    /// Every option at its kind's zero value
    #[must_use]
    pub fn zeroed(set: &OptionSet) -> Self {
        Self {
            values: set
                .iter()
                .map(|(_, spec)| (spec.identifier().to_owned(), spec.kind().zero()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Value> {
        self.values.get(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(identifier, value)| (identifier.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /**
    Produce a new set of defaults by layering `incoming` over this one
    according to `policy`. Keys may be written with or without leading dashes
    but must be canonical identifiers; keys that don't name a declared option
    are skipped. `self` is never modified, so a failure part way through
    leaves nothing half applied.
    */
    pub(crate) fn layered<K: AsRef<str>>(
        &self,
        set: &OptionSet,
        policy: Policy,
        incoming: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<Self, Error> {
        let mut layered = match policy {
            Policy::Merge | Policy::Append => self.clone(),
            Policy::Replace => Self::zeroed(set),
        };

        for (key, value) in incoming {
            let key = key.as_ref();

            let Some(id) = set.find_identifier(key) else {
                trace!(key, "ignoring default for undeclared option");
                continue;
            };

            let spec = set.spec(id);

            if value.kind() != spec.kind() {
                return Err(UsageError::WrongKind {
                    option: spec.identifier().to_owned(),
                    kind: spec.kind(),
                    requested: value.kind(),
                }
                .into());
            }

            spec.check(&value)
                .map_err(|rejected| SpecError::InvalidDefault {
                    option: spec.identifier().to_owned(),
                    value: rejected,
                })?;

            let Some((_, slot)) = layered.values.get_index_mut(id.index()) else {
                continue;
            };

            match policy {
                Policy::Merge | Policy::Replace => *slot = value,
                Policy::Append => slot.accumulate(value),
            }
        }

        Ok(layered)
    }
}
