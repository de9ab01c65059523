/*!
Option values. Every declared option holds exactly one [`Value`], whose
variant always matches the option's [`Kind`].
 */

use std::{collections::BTreeMap, fmt};

use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::event::{ParseEvent, RawValue};

/// The five kinds of option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A flag that is either on or off, like `--force`
    Switch,

    /// A flag that counts how many times it appeared, like `-vvv`
    Counter,

    /// An option that takes exactly one value, like `--output out.txt`
    Parameter,

    /// An option that collects a value each time it appears, like
    /// `--lib /tmp --lib /var`
    List,

    /// An option that collects `key=value` pairs, like `--define mode=fast`
    Keypair,
}

impl Kind {
    /// The value an option of this kind holds when nothing has set it
    #[must_use]
    pub fn zero(self) -> Value {
        match self {
            Kind::Switch => Value::Switch(false),
            Kind::Counter => Value::Counter(0),
            Kind::Parameter => Value::Parameter(None),
            Kind::List => Value::List(Vec::new()),
            Kind::Keypair => Value::Keypair(BTreeMap::new()),
        }
    }

    /// True for kinds that consume a value from the command line
    #[must_use]
    pub const fn takes_value(self) -> bool {
        matches!(self, Kind::Parameter | Kind::List | Kind::Keypair)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Switch => "switch",
            Kind::Counter => "counter",
            Kind::Parameter => "parameter",
            Kind::List => "list",
            Kind::Keypair => "keypair",
        })
    }
}

/// The resolved value of a single option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Switch(bool),
    Counter(u64),
    Parameter(Option<String>),
    List(Vec<String>),
    Keypair(BTreeMap<String, String>),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Switch(_) => Kind::Switch,
            Value::Counter(_) => Kind::Counter,
            Value::Parameter(_) => Kind::Parameter,
            Value::List(_) => Kind::List,
            Value::Keypair(_) => Kind::Keypair,
        }
    }

    #[must_use]
    pub const fn as_switch(&self) -> Option<bool> {
        match *self {
            Value::Switch(on) => Some(on),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_counter(&self) -> Option<u64> {
        match *self {
            Value::Counter(count) => Some(count),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_parameter(&self) -> Option<Option<&str>> {
        match self {
            Value::Parameter(value) => Some(value.as_deref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_keypair(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Value::Keypair(pairs) => Some(pairs),
            _ => None,
        }
    }

    /**
    Every string this value carries that a validator should see: a
    parameter's value, each list element, each keypair value. Keypair keys are
    checked separately, by [`keys`][Value::keys].
    */
    pub(crate) fn texts(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Value::Switch(_) | Value::Counter(_) => Box::new(std::iter::empty()),
            Value::Parameter(value) => Box::new(value.as_deref().into_iter()),
            Value::List(items) => Box::new(items.iter().map(String::as_str)),
            Value::Keypair(pairs) => Box::new(pairs.values().map(String::as_str)),
        }
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_keypair()
            .into_iter()
            .flat_map(|pairs| pairs.keys().map(String::as_str))
    }

    /**
    Apply a single command line occurrence to this value. This is one step of
    the fold from defaults and events to final options. The event must belong
    to an option of the same kind as this value.
    */
    pub(crate) fn apply(&mut self, event: &ParseEvent) {
        debug_assert!(
            !matches!(self, Value::Switch(_) | Value::Counter(_))
                || matches!(event.value(), RawValue::Unit)
        );

        match (self, event.value(), event.negated()) {
            (Value::Switch(on), _, negated) => *on = !negated,

            (Value::Counter(count), _, false) => *count = count.saturating_add(1),
            (Value::Counter(count), _, true) => *count = 0,

            (Value::Parameter(current), RawValue::Text(value), false) => {
                *current = Some(value.clone())
            }
            (Value::Parameter(current), _, _) => *current = None,

            (Value::List(items), RawValue::Text(item), false) => items.push(item.clone()),
            (Value::List(items), RawValue::Text(item), true) => {
                items.retain(|existing| existing != item)
            }
            (Value::List(items), _, _) => items.clear(),

            (Value::Keypair(pairs), RawValue::Pair { key, value }, false) => {
                pairs.insert(key.clone(), value.clone());
            }
            (Value::Keypair(pairs), RawValue::Text(key), true) => {
                pairs.remove(key);
            }
            (Value::Keypair(pairs), _, _) => pairs.clear(),
        }
    }

    /**
    Layer `incoming` on top of this value the way appended defaults are:
    counters add, lists concatenate, keypairs merge, and everything else is
    simply overwritten. `incoming` must be the same kind as `self`.
    */
    pub(crate) fn accumulate(&mut self, incoming: Value) {
        match (self, incoming) {
            (Value::Counter(count), Value::Counter(more)) => *count = count.saturating_add(more),
            (Value::List(items), Value::List(more)) => items.extend(more),
            (Value::Keypair(pairs), Value::Keypair(more)) => pairs.extend(more),
            (slot, incoming) => *slot = incoming,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Switch(on) => write!(f, "{on}"),
            Value::Counter(count) => write!(f, "{count}"),
            Value::Parameter(Some(value)) => write!(f, "{value:?}"),
            Value::Parameter(None) => f.write_str("(none)"),
            Value::List(items) => write!(
                f,
                "[{}]",
                items.iter().map(|item| lazy_format!("{item:?}")).join_with(", ")
            ),
            Value::Keypair(pairs) => write!(
                f,
                "{{{}}}",
                pairs
                    .iter()
                    .map(|(key, value)| lazy_format!("{key}={value:?}"))
                    .join_with(", ")
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(on: bool) -> Self {
        Value::Switch(on)
    }
}

impl From<u64> for Value {
    fn from(count: u64) -> Self {
        Value::Counter(count)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Parameter(Some(value.to_owned()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Parameter(Some(value))
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        Value::Parameter(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(items: [&str; N]) -> Self {
        Value::List(items.into_iter().map(str::to_owned).collect())
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(pairs: BTreeMap<String, String>) -> Self {
        Value::Keypair(pairs)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Value {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Value::Keypair(
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        )
    }
}
