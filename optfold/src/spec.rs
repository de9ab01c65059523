/*!
Declarations for individual options.

An [`OptionSpec`] is created with one of five constructors, one for each
[`Kind`], and then customized with chainable modifiers:

```
use optfold::{OptionSpec, Validator};

let verbose = OptionSpec::counter("verbose|v").anycase();
let output = OptionSpec::parameter("output|o")
    .validator(Validator::pattern(r"\.txt$").unwrap())
    .default("out.txt");
let lib = OptionSpec::list("lib|L").needs("output");
```

Nothing is checked until the specs are registered together in an
[`OptionSet`][crate::OptionSet]; that's where malformed names, collisions,
bad defaults and unknown dependencies are reported.
*/

use std::fmt;

use joinery::JoinableIterator;

use crate::{
    validator::Validator,
    value::{Kind, Value},
};

/// A single declared option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    kind: Kind,
    names: Vec<String>,
    default: Option<Value>,
    required: bool,
    case_insensitive: bool,
    validator: Option<Validator>,
    key_validator: Option<Validator>,
    dependencies: Vec<String>,
}

impl OptionSpec {
    /**
    Create a new spec. `names` is a `|` separated list of names, such as
    `"verbose|v"`; the first name is the canonical one. Each name may be
    written with zero, one or two leading dashes.
    */
    #[must_use]
    pub fn new(kind: Kind, names: &str) -> Self {
        Self {
            kind,
            names: names.split('|').map(str::to_owned).collect(),
            default: None,
            required: false,
            case_insensitive: false,
            validator: None,
            key_validator: None,
            dependencies: Vec::new(),
        }
    }

    /// An on/off flag, like `--force`
    #[must_use]
    pub fn switch(names: &str) -> Self {
        Self::new(Kind::Switch, names)
    }

    /// A flag that counts its occurrences, like `-vvv`
    #[must_use]
    pub fn counter(names: &str) -> Self {
        Self::new(Kind::Counter, names)
    }

    /// An option with exactly one value, like `--output out.txt`
    #[must_use]
    pub fn parameter(names: &str) -> Self {
        Self::new(Kind::Parameter, names)
    }

    /// An option that collects a value every time it appears
    #[must_use]
    pub fn list(names: &str) -> Self {
        Self::new(Kind::List, names)
    }

    /// An option that collects `key=value` pairs
    #[must_use]
    pub fn keypair(names: &str) -> Self {
        Self::new(Kind::Keypair, names)
    }

    /// Set the value this option has when it doesn't appear on the command
    /// line. It must be the same kind as the option, and pass its validators.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Fail parsing if this option never appears
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow this option's names to match regardless of ASCII case. Exact
    /// matches against any option always win over case-insensitive ones.
    #[must_use]
    pub fn anycase(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Whenever this option appears, the option named `name` must also appear
    #[must_use]
    pub fn needs(mut self, name: &str) -> Self {
        self.dependencies.push(name.to_owned());
        self
    }

    /// Check every value of a parameter, every list element, or every
    /// keypair value with this validator
    #[must_use]
    pub fn validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    /// Check every keypair key with this validator
    #[must_use]
    pub fn key_validator(mut self, validator: impl Into<Validator>) -> Self {
        self.key_validator = Some(validator.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// All of the names for this option, exactly as declared
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The canonical identifier: the first name, without leading dashes
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.names
            .first()
            .map(|name| name.trim_start_matches('-'))
            .unwrap_or_default()
    }

    /// The declared default, or the zero value for this option's kind
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default.clone().unwrap_or_else(|| self.kind.zero())
    }

    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[inline]
    #[must_use]
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// The names of the options this one depends on, as declared
    #[inline]
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub(crate) fn validators(&self) -> (Option<&Validator>, Option<&Validator>) {
        (self.validator.as_ref(), self.key_validator.as_ref())
    }

    /// Check a single value, list element, or keypair value
    pub(crate) fn accepts(&self, value: &str) -> bool {
        self.validator
            .as_ref()
            .is_none_or(|validator| validator.accepts(value))
    }

    /// Check a single keypair key
    pub(crate) fn accepts_key(&self, key: &str) -> bool {
        self.key_validator
            .as_ref()
            .is_none_or(|validator| validator.accepts(key))
    }

    /**
    Check a whole value against this option's validators. On failure,
    returns the specific string (element, key, or value) that was rejected.
    The value must already be known to be the right kind.
    */
    pub(crate) fn check(&self, value: &Value) -> Result<(), String> {
        match value.keys().find(|key| !self.accepts_key(key)) {
            Some(key) => Err(key.to_owned()),
            None => match value.texts().find(|text| !self.accepts(text)) {
                Some(text) => Err(text.to_owned()),
                None => Ok(()),
            },
        }
    }
}

/// Displays as the declared names and kind, like `verbose|v (counter)`
impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.names.iter().join_with("|"), self.kind)
    }
}
