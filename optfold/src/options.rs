use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{
    defaults::Defaults,
    event::ParseEvent,
    value::Value,
};

/**
The resolved value of every declared option, keyed by canonical identifier in
declaration order.

`Options` is always computed, never edited: it's the [`Defaults`] with every
[`ParseEvent`] from the command line replayed on top, in order. See
[`recompute`].
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    values: IndexMap<String, Value>,
}

impl Options {
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Value> {
        self.values.get(identifier)
    }

    #[must_use]
    pub fn switch(&self, identifier: &str) -> Option<bool> {
        self.get(identifier).and_then(Value::as_switch)
    }

    #[must_use]
    pub fn counter(&self, identifier: &str) -> Option<u64> {
        self.get(identifier).and_then(Value::as_counter)
    }

    #[must_use]
    pub fn parameter(&self, identifier: &str) -> Option<&str> {
        self.get(identifier)
            .and_then(Value::as_parameter)
            .flatten()
    }

    #[must_use]
    pub fn list(&self, identifier: &str) -> Option<&[String]> {
        self.get(identifier).and_then(Value::as_list)
    }

    #[must_use]
    pub fn keypair(&self, identifier: &str) -> Option<&BTreeMap<String, String>> {
        self.get(identifier).and_then(Value::as_keypair)
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

    pub(crate) fn get_mut(&mut self, identifier: &str) -> Option<&mut Value> {
        self.values.get_mut(identifier)
    }
}

impl IntoIterator for Options {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Options compare equal to the defaults they hold exactly, which is what
/// parsing an empty command line produces.
impl PartialEq<Defaults> for Options {
    fn eq(&self, defaults: &Defaults) -> bool {
        self.iter().eq(defaults.iter())
    }
}

/**
Fold a list of events over a set of defaults: start from a copy of the
defaults, then apply each event in order. This is a pure function; the same
defaults and events always produce the same options, which is what allows
defaults to be swapped out after parsing without losing anything the command
line said.
*/
#[must_use]
pub fn recompute(defaults: &Defaults, events: &[ParseEvent]) -> Options {
    let mut values = defaults.values().clone();

    for event in events {
        match values.get_index_mut(event.option().index()) {
            Some((_, value)) => value.apply(event),
            None => debug_assert!(false, "event for an option that doesn't exist"),
        }
    }

    Options { values }
}
