#![no_std]

/*!
Low-level tokenizing of command-line arguments. Takes care of distinguishing
option-shaped tokens from positionals, inline `=values`, `no-` negation,
expanding bundles of short flags, and the `--` terminator. No name resolution
or type handling happens here; that's left to the [`Visitor`]. Usually this is
too low level to use directly.
*/

extern crate alloc;

mod flag;

use alloc::{collections::VecDeque, format, string::String};

pub use flag::{Dashes, Flag, Name, is_identifier};

/**
The [`ArgumentsParser`] type operates by passing arguments it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor {
    type Value;

    /**
    Check if a bundle-shaped flag, such as `-xzf`, is itself the name of an
    option. If it isn't, the parser expands it into `-x -z -f` rather than
    visiting it.
    */
    fn recognizes(&self, flag: &Flag<'_>) -> bool;

    /// A positional argument, or any argument after a `--`.
    fn visit_positional(self, argument: String) -> Self::Value;

    /**
    A token shaped like an option: `--name`, `-n`, `name`, optionally negated
    and optionally with an inline `=value`. If the option needs a value and
    didn't get one inline, it can get one from `argument`.
    */
    fn visit_flag(self, flag: Flag<'_>, argument: impl ArgAccess) -> Self::Value;

    /// A token that starts with a dash, but isn't a well formed option name,
    /// such as `---x` or `--foo-bar`.
    fn visit_malformed(self, argument: String) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given flag needs an argument,
based on the identity of the option.

Consider `--foo bar`. Is this a pair of parameters (the switch `--foo` and the
positional parameter `bar`) or a single option `--foo bar` that takes an
argument? The [`ArgumentsParser`] can't independently classify a given
argument, so instead, a visitor can request an argument via this trait only for
options that need them.
*/
pub trait ArgAccess: Sized {
    /**
    Get the next argument from the parser. This should only be called by
    options that need it; switches should simply ignore it, to ensure that the
    next command line argument can correctly be parsed independently.

    This returns [`None`] if all of the arguments have been exhausted, or if
    the next argument is a `--`, in which case only positional arguments
    remain.
    */
    fn take(self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    PositionalOnly,
}

/**
An `ArgumentsParser` is the main entry point into `optfold_parser`. It parses
arguments in each call to [`next_arg`][ArgumentsParser::next_arg], sending
those arguments to the given [`Visitor`].

Arguments are consumed front to back. When a bundle of short flags like `-xzf`
is expanded, the individual flags are put back at the front of the queue, in
order, so that they're handled exactly as though they'd been written
separately as `-x -z -f`.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<I> {
    state: State,
    pending: VecDeque<String>,
    args: I,
}

impl<I> ArgumentsParser<I>
where
    I: Iterator<Item = String>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of strings, where each
    string is a single argument received from the command line. This list
    should *exclude* the name of the program, which is commonly passed as the
    first argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            pending: VecDeque::new(),
            args: args.into_iter(),
        }
    }

    #[inline]
    fn next_raw(&mut self) -> Option<String> {
        self.pending.pop_front().or_else(|| self.args.next())
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor,
    {
        self.state = State::PositionalOnly;
        self.next_raw().map(|arg| visitor.visit_positional(arg))
    }

    /// Put each short flag in `bundle` back at the front of the queue, in
    /// order. An inline value belongs to the last flag.
    fn unbundle(&mut self, bundle: &Flag<'_>) {
        let body = bundle.name().body();

        if let Some(value) = bundle.value() {
            let (rest, last) = body.split_at(body.len() - 1);
            self.pending.push_front(format!("-{last}={value}"));
            rest.chars()
                .rev()
                .for_each(|short| self.pending.push_front(format!("-{short}")));
        } else {
            body.chars()
                .rev()
                .for_each(|short| self.pending.push_front(format!("-{short}")));
        }
    }

    /// Parse the next argument, passing it to `visitor`. Returns [`None`] when
    /// the arguments are exhausted.
    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor,
    {
        if self.state == State::PositionalOnly {
            return self.positional_only_arg(visitor);
        }

        loop {
            let argument = self.next_raw()?;

            if argument == "--" {
                return self.positional_only_arg(visitor);
            }

            return Some(match Flag::parse(&argument) {
                Some(flag) if flag.is_bundle() && !visitor.recognizes(&flag) => {
                    self.unbundle(&flag);
                    continue;
                }
                Some(flag) => visitor.visit_flag(flag, StandardArgAccess { parent: self }),
                None if is_option_like(&argument) => visitor.visit_malformed(argument),
                None => visitor.visit_positional(argument),
            });
        }
    }

    /// Drain every remaining argument, unparsed, including any flags left over
    /// from a partially expanded bundle.
    pub fn into_remaining(self) -> impl Iterator<Item = String> {
        self.pending.into_iter().chain(self.args)
    }
}

/// A lone `-` is conventionally a positional (meaning stdin or stdout).
#[inline]
fn is_option_like(argument: &str) -> bool {
    argument.starts_with('-') && argument != "-"
}

/// ArgAccess implementation that gets the next argument from the queue.
/// Handles logic around `--` PositionalOnly parameters.
struct StandardArgAccess<'a, I> {
    parent: &'a mut ArgumentsParser<I>,
}

impl<I> ArgAccess for StandardArgAccess<'_, I>
where
    I: Iterator<Item = String>,
{
    fn take(self) -> Option<String> {
        match self.parent.next_raw()? {
            arg if arg == "--" => {
                self.parent.state = State::PositionalOnly;
                None
            }
            arg => Some(arg),
        }
    }
}
