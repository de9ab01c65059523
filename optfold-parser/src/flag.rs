use core::fmt;

/// How many leading dashes an option name was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dashes {
    /// A bareword, like `verbose`
    None,

    /// A short style option, like `-v`
    Single,

    /// A long style option, like `--verbose`
    Double,
}

impl Dashes {
    #[inline]
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Dashes::None => "",
            Dashes::Single => "-",
            Dashes::Double => "--",
        }
    }

    /// Split the dash prefix off of `input`. At most two dashes are removed;
    /// anything beyond that is left in the remainder.
    #[inline]
    fn split(input: &str) -> (Self, &str) {
        if let Some(rest) = input.strip_prefix("--") {
            (Dashes::Double, rest)
        } else if let Some(rest) = input.strip_prefix('-') {
            (Dashes::Single, rest)
        } else {
            (Dashes::None, input)
        }
    }
}

/// True if `body` is a non-empty run of ASCII letters, digits and underscores.
#[inline]
#[must_use]
pub fn is_identifier(body: &str) -> bool {
    !body.is_empty()
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/**
An option name: a dash prefix and an identifier body. Names like `--verbose`,
`-v` and `verbose` all have the body `verbose` or `v`; the dash prefix is what
distinguishes the three surface syntaxes.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name<'a> {
    dashes: Dashes,
    body: &'a str,
}

impl<'a> Name<'a> {
    /// Build a name from its parts. `body` must be an identifier.
    #[inline]
    #[must_use]
    pub fn new(dashes: Dashes, body: &'a str) -> Self {
        debug_assert!(is_identifier(body));
        Self { dashes, body }
    }

    /**
    Parse a declared option name, such as `--verbose`, `-v`, or `v`. Returns
    [`None`] if the name has more than two leading dashes, or if what's left
    after the dashes isn't an identifier.
    */
    #[must_use]
    pub fn parse(name: &'a str) -> Option<Self> {
        let (dashes, body) = Dashes::split(name);
        is_identifier(body).then_some(Self { dashes, body })
    }

    #[inline]
    #[must_use]
    pub const fn dashes(&self) -> Dashes {
        self.dashes
    }

    #[inline]
    #[must_use]
    pub const fn body(&self) -> &'a str {
        self.body
    }

    /// True if the body is exactly one character long
    #[inline]
    #[must_use]
    pub const fn is_single_char(&self) -> bool {
        self.body.len() == 1
    }
}

/// Identifiers never need escaping, so this is just the quoted name.
impl fmt::Debug for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.dashes.prefix(), self.body)
    }
}

/**
A single command line token that is shaped like an option: an optional dash
prefix, an optional `no-` negation, an identifier, and optionally an `=value`.

Being shaped like an option doesn't make a token an option. `verbose` and
`output=out.txt` are both [`Flag`]s, and it's up to whoever resolves the name
to decide whether they're actually options or plain positional arguments.
*/
#[derive(Debug, Clone, Copy)]
pub struct Flag<'a> {
    raw: &'a str,
    name: Name<'a>,
    negated: bool,
    value: Option<&'a str>,
}

impl<'a> Flag<'a> {
    /**
    Classify a raw token. The token is split on its first `=` only if the left
    side is itself a valid (possibly negated) name; otherwise the whole token
    is the name. Returns [`None`] if the token isn't shaped like an option.
    */
    #[must_use]
    pub fn parse(raw: &'a str) -> Option<Self> {
        if let Some((option, value)) = split_once(raw, b'=') {
            if let Some((name, negated)) = parse_negatable(option) {
                return Some(Self {
                    raw,
                    name,
                    negated,
                    value: Some(value),
                });
            }
        }

        parse_negatable(raw).map(|(name, negated)| Self {
            raw,
            name,
            negated,
            value: None,
        })
    }

    /// The token exactly as it appeared on the command line
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> Name<'a> {
        self.name
    }

    /// True if the token was written as `--no-name`, `-no-n` or `no-name`
    #[inline]
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }

    /// The inline `=value`, if there was one
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<&'a str> {
        self.value
    }

    /// True if this is a bundle of short flags, like `-xzf`
    #[inline]
    #[must_use]
    pub const fn is_bundle(&self) -> bool {
        matches!(self.name.dashes, Dashes::Single) && !self.negated && self.name.body.len() >= 2
    }

    /// The first short flag in a bundle; for `-xzf`, this is `-x`.
    #[inline]
    #[must_use]
    pub fn bundle_head(&self) -> Name<'a> {
        // Identifiers are ascii, so the first byte is a whole character
        Name::new(Dashes::Single, &self.name.body[..1])
    }
}

fn parse_negatable(option: &str) -> Option<(Name<'_>, bool)> {
    let (dashes, rest) = Dashes::split(option);
    let (negated, body) = match rest.strip_prefix("no-") {
        Some(body) => (true, body),
        None => (false, rest),
    };

    is_identifier(body).then_some((Name { dashes, body }, negated))
}

/// `delimiter` must be ascii, so that both halves are still valid `str`s.
fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    debug_assert!(delimiter.is_ascii());
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}
