use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    collect::{Collected, Collector},
    defaults::{Defaults, Policy},
    errors::{ArgumentError, Error, SpecError, UsageError},
    event::ParseEvent,
    options::{Options, recompute},
    resolve::Mode,
    set::{OptionId, OptionSet},
    spec::OptionSpec,
    value::{Kind, Value},
};

/// Settings for a [`Parser`], fixed when it's created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
}

impl Config {
    #[must_use]
    pub const fn strict() -> Self {
        Self { mode: Mode::Strict }
    }
}

/**
A parsing session. A `Parser` owns an [`OptionSet`] along with everything
derived from it: the current [`Defaults`], the events from the most recent
successful parse, the pass-through arguments, and the resulting [`Options`].

The options are always exactly the defaults with the events replayed on top,
so changing the defaults after parsing (say, after loading a config file whose
location was itself given on the command line) keeps everything the command
line said:

```
use optfold::{OptionSpec, Parser, Value};

let mut parser = Parser::from_specs([
    OptionSpec::counter("verbose|v"),
    OptionSpec::list("lib|L").default(["/usr/lib"]),
])
.unwrap();

parser.parse(["-vv", "--lib", "/opt/lib"]).unwrap();
assert_eq!(parser.list("lib").unwrap(), ["/usr/lib", "/opt/lib"]);

parser
    .replace_defaults([("lib", Value::from(["/srv/lib"]))])
    .unwrap();
assert_eq!(parser.list("lib").unwrap(), ["/srv/lib", "/opt/lib"]);
assert_eq!(parser.counter("verbose").unwrap(), 2);
```
*/
#[derive(Debug, Clone)]
pub struct Parser {
    set: OptionSet,
    config: Config,
    defaults: Defaults,
    events: Vec<ParseEvent>,
    arguments: Vec<String>,
    values: Options,
}

impl Parser {
    /// Create a parser in [magic mode][Mode::Magic]
    #[must_use]
    pub fn new(set: OptionSet) -> Self {
        Self::with_config(set, Config::default())
    }

    #[must_use]
    pub fn with_config(set: OptionSet, config: Config) -> Self {
        let defaults = Defaults::declared(&set);
        let values = recompute(&defaults, &[]);

        Self {
            set,
            config,
            defaults,
            events: Vec::new(),
            arguments: Vec::new(),
            values,
        }
    }

    /// Register `specs` and create a parser for them in magic mode
    pub fn from_specs(specs: impl IntoIterator<Item = OptionSpec>) -> Result<Self, SpecError> {
        OptionSet::new(specs).map(Self::new)
    }

    /**
    Parse a command line, not including the program name. On success, the
    events from this command line replace those from any previous parse, and
    the pass-through arguments (barewords that aren't options, and everything
    after `--`) are returned. On failure the parser is left exactly as it was.
    */
    pub fn parse<I, S>(&mut self, args: I) -> Result<Vec<String>, ArgumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Collected { events, arguments } =
            Collector::new(&self.set, self.config.mode).run(args.into_iter().map(Into::into))?;

        debug!(
            events = events.len(),
            arguments = arguments.len(),
            "parsed command line"
        );

        self.events = events;
        self.arguments = arguments;
        self.recompute();

        Ok(self.arguments.clone())
    }

    #[must_use]
    pub fn option_set(&self) -> &OptionSet {
        &self.set
    }

    #[must_use]
    pub fn config(&self) -> Config {
        self.config
    }

    /// A copy of every option's current value
    #[must_use]
    pub fn options(&self) -> Options {
        self.values.clone()
    }

    #[must_use]
    pub fn defaults(&self) -> Defaults {
        self.defaults.clone()
    }

    /// The pass-through arguments from the most recent successful parse
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        self.arguments.clone()
    }

    /// Every option's canonical identifier, in declaration order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.set.identifiers().map(str::to_owned).collect()
    }

    /// The option occurrences from the most recent successful parse, in
    /// command line order
    #[must_use]
    pub fn events(&self) -> Vec<ParseEvent> {
        self.events.clone()
    }

    fn lookup(&self, name: &str) -> Result<OptionId, UsageError> {
        self.set
            .find_identifier(name)
            .ok_or_else(|| UsageError::UnknownOption {
                name: name.to_owned(),
            })
    }

    /// Get the current value of an option, by canonical identifier
    pub fn get(&self, name: &str) -> Result<Value, UsageError> {
        let id = self.lookup(name)?;

        self.values
            .get(self.set.identifier(id))
            .cloned()
            .ok_or_else(|| UsageError::UnknownOption {
                name: name.to_owned(),
            })
    }

    fn typed<T>(
        &self,
        name: &str,
        requested: Kind,
        extract: impl FnOnce(Value) -> Option<T>,
    ) -> Result<T, UsageError> {
        let value = self.get(name)?;
        let kind = value.kind();

        extract(value).ok_or_else(|| UsageError::WrongKind {
            option: name.trim_start_matches('-').to_owned(),
            kind,
            requested,
        })
    }

    pub fn switch(&self, name: &str) -> Result<bool, UsageError> {
        self.typed(name, Kind::Switch, |value| value.as_switch())
    }

    pub fn counter(&self, name: &str) -> Result<u64, UsageError> {
        self.typed(name, Kind::Counter, |value| value.as_counter())
    }

    pub fn parameter(&self, name: &str) -> Result<Option<String>, UsageError> {
        self.typed(name, Kind::Parameter, |value| match value {
            Value::Parameter(value) => Some(value),
            _ => None,
        })
    }

    pub fn list(&self, name: &str) -> Result<Vec<String>, UsageError> {
        self.typed(name, Kind::List, |value| match value {
            Value::List(items) => Some(items),
            _ => None,
        })
    }

    pub fn keypair(&self, name: &str) -> Result<BTreeMap<String, String>, UsageError> {
        self.typed(name, Kind::Keypair, |value| match value {
            Value::Keypair(pairs) => Some(pairs),
            _ => None,
        })
    }

    /**
    Overwrite the current value of an option. This is advisory only: the
    value isn't validated, and it's lost the next time the options are
    recomputed (by parsing, or by any change to the defaults). Use the
    defaults methods for changes that should stick.
    */
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), UsageError> {
        let value = value.into();
        let id = self.lookup(name)?;
        let spec = self.set.spec(id);

        if value.kind() != spec.kind() {
            return Err(UsageError::WrongKind {
                option: spec.identifier().to_owned(),
                kind: spec.kind(),
                requested: value.kind(),
            });
        }

        if let Some(slot) = self.values.get_mut(spec.identifier()) {
            *slot = value;
        }

        Ok(())
    }

    fn layer<K: AsRef<str>>(
        &mut self,
        policy: Policy,
        incoming: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<(), Error> {
        self.defaults = self.defaults.layered(&self.set, policy, incoming)?;
        debug!(?policy, "updated defaults");
        self.recompute();
        Ok(())
    }

    /// Overwrite the defaults of the named options. Keys are canonical
    /// identifiers; unknown keys are ignored.
    pub fn merge_defaults<K: AsRef<str>>(
        &mut self,
        incoming: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<(), Error> {
        self.layer(Policy::Merge, incoming)
    }

    /// Add to the defaults of the named options: counters add, lists and
    /// keypairs extend, switches and parameters are overwritten.
    pub fn append_defaults<K: AsRef<str>>(
        &mut self,
        incoming: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<(), Error> {
        self.layer(Policy::Append, incoming)
    }

    /// Discard every default, including the declared ones, and use
    /// `incoming` instead. Options it doesn't mention default to nothing.
    pub fn replace_defaults<K: AsRef<str>>(
        &mut self,
        incoming: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<(), Error> {
        self.layer(Policy::Replace, incoming)
    }

    /// Go back to the defaults the options were declared with
    pub fn reset_defaults(&mut self) {
        self.defaults = Defaults::declared(&self.set);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.values = recompute(&self.defaults, &self.events);
    }
}
