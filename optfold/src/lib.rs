/*!
A specification-driven command line option parser. Declare your options as a
list of [`OptionSpec`]s, each one of five [kinds][Kind] (switches, counters,
parameters, lists and key pairs), and `optfold` turns an argument list into a
value for each of them.

```
use optfold::{OptionSpec, Parser};

let mut parser = Parser::from_specs([
    OptionSpec::switch("force|f"),
    OptionSpec::counter("verbose|v").anycase(),
    OptionSpec::parameter("output|o").default("a.out"),
    OptionSpec::list("lib|L"),
    OptionSpec::keypair("define|D"),
])
.unwrap();

let rest = parser
    .parse(["-fvv", "--lib=/usr/lib", "--define", "mode=fast", "main.c", "--", "-x"])
    .unwrap();

assert_eq!(rest, ["main.c", "-x"]);
assert!(parser.switch("force").unwrap());
assert_eq!(parser.counter("verbose").unwrap(), 2);
assert_eq!(parser.parameter("output").unwrap().as_deref(), Some("a.out"));
assert_eq!(parser.list("lib").unwrap(), ["/usr/lib"]);
```

Every option can be written as `--name`, `-n` (for single character names)
or a bare `name`, negated with `no-` (`--no-force`), and given an inline value
with `=`. Short flags can be bundled, as in `-fvv`.

Parsing doesn't produce values directly. It records a [`ParseEvent`] for each
occurrence of an option, and the final [`Options`] are computed by folding
those events over the current [`Defaults`]. This means defaults can be
changed after parsing, with [`Parser::merge_defaults`] and friends, without
losing anything from the command line.
*/

mod collect;
mod defaults;
pub mod errors;
mod event;
mod options;
mod parser;
pub mod printers;
mod resolve;
mod set;
mod spec;
mod validator;
mod value;

pub use defaults::Defaults;
pub use errors::{ArgumentError, Category, Error, SpecError, UsageError};
pub use event::{ParseEvent, RawValue};
pub use options::{Options, recompute};
pub use parser::{Config, Parser};
pub use resolve::Mode;
pub use set::{OptionId, OptionSet};
pub use spec::OptionSpec;
pub use validator::Validator;
pub use value::{Kind, Value};
