/*!
The value collector: turns each option occurrence found by the tokenizer into
a [`ParseEvent`], pulling in values and checking them as it goes, and then
runs the post-pass checks for required options and dependencies.
 */

use std::mem;

use optfold_parser::{ArgAccess, ArgumentsParser, Dashes, Flag, Visitor};
use tracing::trace;

use crate::{
    errors::ArgumentError,
    event::{ParseEvent, RawValue},
    resolve::Mode,
    set::{OptionId, OptionSet},
    value::Kind,
};

/// Everything a successful pass over the arguments produced
#[derive(Debug, Clone, Default)]
pub(crate) struct Collected {
    pub events: Vec<ParseEvent>,
    pub arguments: Vec<String>,
}

pub(crate) struct Collector<'a> {
    set: &'a OptionSet,
    mode: Mode,
    collected: Collected,

    /// Per option, whether a non-negated occurrence has been seen since the
    /// last negation. Only used for switches and parameters.
    seen: Vec<bool>,

    /// Per option, whether it appeared at all
    matched: Vec<bool>,
}

impl<'a> Collector<'a> {
    pub fn new(set: &'a OptionSet, mode: Mode) -> Self {
        Self {
            set,
            mode,
            collected: Collected::default(),
            seen: vec![false; set.len()],
            matched: vec![false; set.len()],
        }
    }

    /// Consume every argument, then check that required options and
    /// dependencies are present. Stops at the first error.
    pub fn run<I>(mut self, args: I) -> Result<Collected, ArgumentError>
    where
        I: Iterator<Item = String>,
    {
        let mut parser = ArgumentsParser::new(args);

        while let Some(result) = parser.next_arg(&mut self) {
            result?;
        }

        self.finish()
    }

    fn resolve(&self, flag: &Flag<'_>) -> Option<OptionId> {
        self.set.resolve(flag.name(), self.mode)
    }

    /**
    Check if a would-be value is written like an option that exists, either
    whole or as the start of a bundle of short flags. Barewords count, since
    they name options too, except for a bare `key=value`, which is how every
    keypair value is written.
    */
    fn looks_like_option(&self, token: &str) -> bool {
        Flag::parse(token)
            .filter(|flag| flag.name().dashes() != Dashes::None || flag.value().is_none())
            .is_some_and(|flag| {
                self.resolve(&flag).is_some()
                    || (flag.is_bundle()
                        && self.set.resolve(flag.bundle_head(), self.mode).is_some())
            })
    }

    /// Get the value for an option, either from its inline `=value` or from
    /// the next argument.
    fn take_value(
        &self,
        option: &str,
        inline: Option<&str>,
        argument: impl ArgAccess,
    ) -> Result<String, ArgumentError> {
        if let Some(value) = inline {
            return Ok(value.to_owned());
        }

        let value = argument.take().ok_or_else(|| ArgumentError::MissingValue {
            option: option.to_owned(),
        })?;

        match self.looks_like_option(&value) {
            true => Err(ArgumentError::AmbiguousValue {
                option: option.to_owned(),
                value,
            }),
            false => Ok(value),
        }
    }

    fn occurrence(
        &mut self,
        id: OptionId,
        flag: Flag<'_>,
        argument: impl ArgAccess,
    ) -> Result<(), ArgumentError> {
        let set = self.set;
        let spec = set.spec(id);
        let option = spec.identifier();
        let negated = flag.negated();

        self.matched[id.index()] = true;

        if matches!(spec.kind(), Kind::Switch | Kind::Parameter) {
            let seen = &mut self.seen[id.index()];

            if negated {
                *seen = false;
            } else if mem::replace(seen, true) {
                return Err(ArgumentError::Repeated {
                    option: option.to_owned(),
                });
            }
        }

        let invalid = |value: &str| ArgumentError::InvalidValue {
            option: option.to_owned(),
            value: value.to_owned(),
        };

        let value = match (spec.kind(), negated, flag.value()) {
            (Kind::Switch | Kind::Counter, _, Some(value)) | (Kind::Parameter, true, Some(value)) => {
                return Err(ArgumentError::UnexpectedValue {
                    option: option.to_owned(),
                    value: value.to_owned(),
                });
            }

            (Kind::Switch | Kind::Counter, _, None) | (_, true, None) => RawValue::Unit,

            // Removals aren't validated
            (Kind::List, true, Some(value)) => RawValue::Text(value.to_owned()),
            (Kind::Keypair, true, Some(value)) => RawValue::Text(
                value
                    .split_once('=')
                    .map_or(value, |(key, _)| key)
                    .to_owned(),
            ),

            (Kind::Parameter | Kind::List, false, inline) => {
                let value = self.take_value(option, inline, argument)?;

                match spec.accepts(&value) {
                    true => RawValue::Text(value),
                    false => return Err(invalid(&value)),
                }
            }

            (Kind::Keypair, false, inline) => {
                let pair = self.take_value(option, inline, argument)?;

                let (key, value) = pair
                    .split_once('=')
                    .filter(|(key, _)| !key.is_empty())
                    .ok_or_else(|| ArgumentError::MalformedPair {
                        option: option.to_owned(),
                        value: pair.clone(),
                    })?;

                if !spec.accepts_key(key) {
                    return Err(invalid(key));
                }

                if !spec.accepts(value) {
                    return Err(invalid(value));
                }

                RawValue::Pair {
                    key: key.to_owned(),
                    value: value.to_owned(),
                }
            }
        };

        trace!(option, negated, ?value, "matched option");

        self.collected
            .events
            .push(ParseEvent::new(id, value, negated));

        Ok(())
    }

    /// Checks that can only happen once every argument has been seen
    fn finish(self) -> Result<Collected, ArgumentError> {
        let set = self.set;
        let matched = |id: OptionId| self.matched[id.index()];

        if let Some((_, spec)) = set
            .iter()
            .find(|&(id, spec)| spec.is_required() && !matched(id))
        {
            return Err(ArgumentError::MissingRequired {
                option: spec.identifier().to_owned(),
            });
        }

        for (id, spec) in set.iter().filter(|&(id, _)| matched(id)) {
            if let Some(&dependency) = set
                .dependencies(id)
                .iter()
                .find(|&&dependency| !matched(dependency))
            {
                return Err(ArgumentError::MissingDependency {
                    option: spec.identifier().to_owned(),
                    dependency: set.identifier(dependency).to_owned(),
                });
            }
        }

        Ok(self.collected)
    }
}

impl Visitor for &mut Collector<'_> {
    type Value = Result<(), ArgumentError>;

    fn recognizes(&self, flag: &Flag<'_>) -> bool {
        self.resolve(flag).is_some()
    }

    fn visit_positional(self, argument: String) -> Self::Value {
        trace!(%argument, "pass-through argument");
        self.collected.arguments.push(argument);
        Ok(())
    }

    fn visit_flag(self, flag: Flag<'_>, argument: impl ArgAccess) -> Self::Value {
        match self.resolve(&flag) {
            Some(id) => self.occurrence(id, flag, argument),

            // Barewords that aren't options are ordinary arguments
            None if flag.name().dashes() == Dashes::None => {
                self.visit_positional(flag.raw().to_owned())
            }

            None => Err(ArgumentError::Unrecognized {
                argument: flag.raw().to_owned(),
            }),
        }
    }

    fn visit_malformed(self, argument: String) -> Self::Value {
        Err(ArgumentError::Unrecognized { argument })
    }
}
