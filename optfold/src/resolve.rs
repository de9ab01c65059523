/*!
Name resolution: mapping an option-shaped token from the command line to the
option it names.
 */

use std::collections::HashMap;

use optfold_parser::{Dashes, Name};

use crate::set::OptionId;

/// How strictly the dashes on the command line must match the declared names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /**
    Ignore how names were declared. Single character names match with zero,
    one or two dashes (`v`, `-v`, `--v`); longer names match with zero or two
    (`verbose`, `--verbose`), but never one, since `-verbose` is a bundle of
    short flags.
    */
    #[default]
    Magic,

    /// The dashes on the command line must be exactly the declared dashes.
    Strict,
}

impl Mode {
    /// Check that `name` is written with a dash prefix this mode could ever
    /// accept, regardless of which option it might name.
    #[inline]
    fn permits(self, name: Name<'_>) -> bool {
        match self {
            Mode::Magic => name.is_single_char() || name.dashes() != Dashes::Single,
            Mode::Strict => true,
        }
    }

    #[inline]
    fn accepts(self, declared: Dashes, given: Dashes) -> bool {
        match self {
            Mode::Magic => true,
            Mode::Strict => declared == given,
        }
    }
}

/// A declared name is already taken by another option (or the same one).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Collision(pub OptionId);

#[derive(Debug, Clone)]
struct Entry {
    dashes: Dashes,
    option: OptionId,
}

/**
Lookup tables for every declared name. Names are keyed by their body (the name
with dashes stripped), which is unique across a whole option set, so the same
table serves both magic and strict mode.
*/
#[derive(Debug, Clone, Default)]
pub(crate) struct Resolver {
    exact: HashMap<String, Entry>,

    /// Names of case insensitive options, in declaration order
    anycase: Vec<(String, Entry)>,
}

impl Resolver {
    pub fn insert(
        &mut self,
        name: Name<'_>,
        option: OptionId,
        case_insensitive: bool,
    ) -> Result<(), Collision> {
        let entry = Entry {
            dashes: name.dashes(),
            option,
        };

        if let Some(existing) = self.exact.get(name.body()) {
            return Err(Collision(existing.option));
        }

        if case_insensitive {
            self.anycase.push((name.body().to_owned(), entry.clone()));
        }

        self.exact.insert(name.body().to_owned(), entry);
        Ok(())
    }

    /// Look up a name by its body alone, ignoring dashes and case rules. Used
    /// for dependency references and default keys.
    pub fn find(&self, body: &str) -> Option<OptionId> {
        self.exact.get(body).map(|entry| entry.option)
    }

    /**
    Resolve a name from the command line. An exact, case-sensitive match
    always wins; only if there isn't one are the case insensitive names
    scanned, in declaration order.
    */
    pub fn resolve(&self, name: Name<'_>, mode: Mode) -> Option<OptionId> {
        if !mode.permits(name) {
            return None;
        }

        if let Some(entry) = self.exact.get(name.body()) {
            if mode.accepts(entry.dashes, name.dashes()) {
                return Some(entry.option);
            }
        }

        self.anycase
            .iter()
            .find(|(body, entry)| {
                mode.accepts(entry.dashes, name.dashes()) && body.eq_ignore_ascii_case(name.body())
            })
            .map(|(_, entry)| entry.option)
    }
}
