/*!
Human readable output for binaries: errors with their category and a hint
about how to fix them, and listings of resolved option values.
 */

use std::{
    fmt::Display,
    io::{self, Write as _},
};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{
    errors::{ArgumentError, Error, SpecError},
    options::Options,
};

/// A short suggestion for the user, for the errors where there's something
/// more useful to say than the message itself.
pub fn hint(error: &Error) -> Option<impl Display + '_> {
    let hinted = matches!(
        error,
        Error::Argument(
            ArgumentError::AmbiguousValue { .. }
                | ArgumentError::MalformedPair { .. }
                | ArgumentError::Unrecognized { .. }
        ) | Error::Spec(SpecError::InvalidName { .. })
    );

    hinted.then(|| {
        lazy_format! {
            match (error) {
                Error::Argument(ArgumentError::AmbiguousValue { option, value }) =>
                    "if {value:?} really is the value, write it as --{option}={value}",
                Error::Argument(ArgumentError::MalformedPair { option, .. }) =>
                    "write each --{option} value as key=value",
                Error::Argument(ArgumentError::Unrecognized { .. }) =>
                    "use -- to pass the remaining arguments through unparsed",
                Error::Spec(SpecError::InvalidName { .. }) =>
                    "names are letters, digits and underscores, with up to two leading dashes",
                _ => "",
            }
        }
    })
}

/// Write a `header`, followed by an indented `body`
fn section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: impl Display,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "{header}:")?;
    body(IndentWriter::new("  ", out))
}

/**
Write an error as its category, then the indented message and hint:

```text
invalid arguments:
  option "output" requires a value
```
*/
pub fn write_error(out: &mut (impl io::Write + ?Sized), error: &Error) -> io::Result<()> {
    section(out, error.category(), |mut out| {
        writeln!(out, "{error}")?;

        match hint(error) {
            Some(hint) => writeln!(out, "hint: {hint}"),
            None => Ok(()),
        }
    })
}

/// Write each option and its value, one per line, in declaration order
pub fn write_options(out: &mut (impl io::Write + ?Sized), options: &Options) -> io::Result<()> {
    options
        .iter()
        .try_for_each(|(identifier, value)| writeln!(out, "{identifier} = {value}"))
}

/// Write the pass-through arguments, if there are any
pub fn write_arguments(
    out: &mut (impl io::Write + ?Sized),
    arguments: &[String],
) -> io::Result<()> {
    if arguments.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "arguments: {}",
        arguments
            .iter()
            .map(|argument| lazy_format!("{argument:?}"))
            .join_with(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OptionSpec, Parser};

    #[test]
    fn error_output() {
        let error = Error::from(ArgumentError::AmbiguousValue {
            option: "output".to_owned(),
            value: "-v".to_owned(),
        });

        let mut out = Vec::new();
        write_error(&mut out, &error).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "invalid arguments:\n  \
             value \"-v\" for option \"output\" looks like an option\n  \
             hint: if \"-v\" really is the value, write it as --output=-v\n"
        );
    }

    #[test]
    fn options_output() {
        let mut parser = Parser::from_specs([
            OptionSpec::counter("verbose|v"),
            OptionSpec::list("lib"),
        ])
        .unwrap();

        parser.parse(["-vv", "--lib=/opt", "file"]).unwrap();

        let mut out = Vec::new();
        write_options(&mut out, &parser.options()).unwrap();
        write_arguments(&mut out, &parser.arguments()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "verbose = 2\nlib = [\"/opt\"]\narguments: \"file\"\n"
        );
    }
}
