use std::collections::BTreeMap;

use optfold::{
    ArgumentError, Config, Kind, OptionSet, OptionSpec, Parser, RawValue, Validator, Value,
};

fn parser(specs: impl IntoIterator<Item = OptionSpec>) -> Parser {
    Parser::from_specs(specs).unwrap()
}

fn compiler() -> Parser {
    parser([
        OptionSpec::switch("x"),
        OptionSpec::switch("z"),
        OptionSpec::parameter("f"),
        OptionSpec::counter("verbose|v"),
        OptionSpec::list("lib|L"),
        OptionSpec::keypair("define|D"),
        OptionSpec::parameter("output|o"),
    ])
}

#[test]
fn empty_command_line_gives_declared_defaults() {
    let mut parser = parser([
        OptionSpec::counter("verbose").default(3u64),
        OptionSpec::list("lib").default(["/usr/lib"]),
        OptionSpec::switch("force"),
    ]);

    let rest = parser.parse(Vec::<String>::new()).unwrap();

    assert!(rest.is_empty());
    assert!(parser.events().is_empty());
    assert_eq!(parser.options(), parser.defaults());
    assert_eq!(parser.counter("verbose").unwrap(), 3);
    assert_eq!(parser.list("lib").unwrap(), ["/usr/lib"]);
    assert!(!parser.switch("force").unwrap());
}

#[test]
fn list_preserves_order() {
    let mut parser = compiler();

    parser.parse(["--lib", "/tmp", "--lib", "/var"]).unwrap();
    assert_eq!(parser.list("lib").unwrap(), ["/tmp", "/var"]);

    parser.parse(["--lib", "/var", "--lib", "/tmp"]).unwrap();
    assert_eq!(parser.list("lib").unwrap(), ["/var", "/tmp"]);
}

#[test]
fn counter_negation_resets() {
    let mut parser = compiler();

    parser
        .parse(["--verbose", "--no-verbose", "--verbose"])
        .unwrap();
    assert_eq!(parser.counter("verbose").unwrap(), 1);

    parser.parse(["-vvv", "-no-v", "-v", "v"]).unwrap();
    assert_eq!(parser.counter("verbose").unwrap(), 2);
}

#[test]
fn bundles_expand() {
    let mut parser = compiler();

    parser.parse(["-xzf", "value"]).unwrap();

    assert!(parser.switch("x").unwrap());
    assert!(parser.switch("z").unwrap());
    assert_eq!(parser.parameter("f").unwrap().as_deref(), Some("value"));
}

#[test]
fn bundle_inline_value_goes_to_last_flag() {
    let mut parser = compiler();

    parser.parse(["-xzf=value", "-vD=a=1"]).unwrap();

    assert!(parser.switch("x").unwrap());
    assert_eq!(parser.parameter("f").unwrap().as_deref(), Some("value"));
    assert_eq!(parser.counter("verbose").unwrap(), 1);
    assert_eq!(
        parser.keypair("define").unwrap(),
        BTreeMap::from([("a".to_owned(), "1".to_owned())])
    );
}

#[test]
fn exact_match_beats_case_insensitive() {
    let mut parser = parser([
        OptionSpec::counter("verbose|v").anycase(),
        OptionSpec::switch("version|V").anycase(),
    ]);

    parser.parse(["-v", "-V"]).unwrap();
    assert_eq!(parser.counter("verbose").unwrap(), 1);
    assert!(parser.switch("version").unwrap());

    parser.parse(["--VERBOSE", "--Verbose"]).unwrap();
    assert_eq!(parser.counter("verbose").unwrap(), 2);
    assert!(!parser.switch("version").unwrap());
}

#[test]
fn three_surface_syntaxes() {
    let mut parser = compiler();

    parser
        .parse(["--output", "a", "--no-output", "o", "b", "lib=/opt"])
        .unwrap();

    assert_eq!(parser.parameter("output").unwrap().as_deref(), Some("b"));
    assert_eq!(parser.list("lib").unwrap(), ["/opt"]);
}

#[test]
fn terminator_passes_everything_through() {
    let mut parser = compiler();

    let rest = parser
        .parse(["-v", "file", "--", "--lib", "-x", "--", "lib=/opt"])
        .unwrap();

    assert_eq!(rest, ["file", "--lib", "-x", "--", "lib=/opt"]);
    assert_eq!(parser.arguments(), rest);
    assert_eq!(parser.counter("verbose").unwrap(), 1);
    assert!(parser.list("lib").unwrap().is_empty());
    assert!(!parser.switch("x").unwrap());
}

#[test]
fn keypair_upserts_and_removes() {
    let mut parser = compiler();

    parser
        .parse([
            "--define",
            "mode=slow",
            "-D",
            "level=2",
            "--define=mode=fast",
            "--no-define=level",
            "-D",
            "empty=",
        ])
        .unwrap();

    assert_eq!(
        parser.keypair("define").unwrap(),
        BTreeMap::from([
            ("empty".to_owned(), String::new()),
            ("mode".to_owned(), "fast".to_owned()),
        ])
    );

    parser.parse(["-D", "a=1", "--no-define"]).unwrap();
    assert!(parser.keypair("define").unwrap().is_empty());
}

#[test]
fn list_negation() {
    let mut parser = compiler();

    parser
        .parse(["-L", "/a", "-L", "/b", "-L", "/a", "--no-lib=/a"])
        .unwrap();
    assert_eq!(parser.list("lib").unwrap(), ["/b"]);

    parser.parse(["-L", "/a", "--no-lib", "-L", "/c"]).unwrap();
    assert_eq!(parser.list("lib").unwrap(), ["/c"]);
}

#[test]
fn parameter_rules() {
    let mut parser = compiler();

    assert_eq!(
        parser.parse(["-o", "a", "-o", "a"]).unwrap_err(),
        ArgumentError::Repeated {
            option: "output".to_owned()
        }
    );

    assert_eq!(
        parser.parse(["--no-output=a"]).unwrap_err(),
        ArgumentError::UnexpectedValue {
            option: "output".to_owned(),
            value: "a".to_owned(),
        }
    );

    assert_eq!(
        parser.parse(["--output", "-v"]).unwrap_err(),
        ArgumentError::AmbiguousValue {
            option: "output".to_owned(),
            value: "-v".to_owned(),
        }
    );

    assert_eq!(
        parser.parse(["--output", "-xz"]).unwrap_err(),
        ArgumentError::AmbiguousValue {
            option: "output".to_owned(),
            value: "-xz".to_owned(),
        }
    );

    parser.parse(["--output=-v"]).unwrap();
    assert_eq!(parser.parameter("output").unwrap().as_deref(), Some("-v"));
}

#[test]
fn bareword_option_names_are_not_values() {
    let mut parser = parser([
        OptionSpec::switch("force"),
        OptionSpec::parameter("output"),
        OptionSpec::keypair("define"),
    ]);

    assert_eq!(
        parser.parse(["--output", "force"]).unwrap_err(),
        ArgumentError::AmbiguousValue {
            option: "output".to_owned(),
            value: "force".to_owned(),
        }
    );
    assert!(!parser.switch("force").unwrap());

    parser.parse(["--output=force"]).unwrap();
    assert_eq!(parser.parameter("output").unwrap().as_deref(), Some("force"));

    // A bare key=value is a keypair value, even when the key names an option
    parser.parse(["--define", "output=a.out"]).unwrap();
    assert_eq!(
        parser.keypair("define").unwrap(),
        BTreeMap::from([("output".to_owned(), "a.out".to_owned())])
    );
}

#[test]
fn flags_reject_inline_values() {
    let mut parser = compiler();

    assert_eq!(
        parser.parse(["--verbose=3"]).unwrap_err(),
        ArgumentError::UnexpectedValue {
            option: "verbose".to_owned(),
            value: "3".to_owned(),
        }
    );

    assert_eq!(
        parser.parse(["-vv=2"]).unwrap_err(),
        ArgumentError::UnexpectedValue {
            option: "verbose".to_owned(),
            value: "2".to_owned(),
        }
    );

    assert_eq!(
        parser.parse(["--no-x=1"]).unwrap_err(),
        ArgumentError::UnexpectedValue {
            option: "x".to_owned(),
            value: "1".to_owned(),
        }
    );
}

#[test]
fn validators_run_on_values() {
    let mut parser = parser([
        OptionSpec::list("lib").validator(Validator::pattern("^/").unwrap()),
        OptionSpec::keypair("define")
            .key_validator(Validator::pattern("^[a-z]+$").unwrap())
            .validator(Validator::predicate(|value| value.parse::<u32>().is_ok())),
    ]);

    assert_eq!(
        parser.parse(["--lib", "/ok", "--lib", "relative"]).unwrap_err(),
        ArgumentError::InvalidValue {
            option: "lib".to_owned(),
            value: "relative".to_owned(),
        }
    );

    assert_eq!(
        parser.parse(["--define", "Mode=1"]).unwrap_err(),
        ArgumentError::InvalidValue {
            option: "define".to_owned(),
            value: "Mode".to_owned(),
        }
    );

    assert_eq!(
        parser.parse(["--define", "mode=fast"]).unwrap_err(),
        ArgumentError::InvalidValue {
            option: "define".to_owned(),
            value: "fast".to_owned(),
        }
    );

    assert_eq!(
        parser.parse(["--define", "mode"]).unwrap_err(),
        ArgumentError::MalformedPair {
            option: "define".to_owned(),
            value: "mode".to_owned(),
        }
    );

    // Removals aren't checked
    parser
        .parse(["--lib", "/ok", "--no-lib=relative", "--define=level=3"])
        .unwrap();
    assert_eq!(parser.list("lib").unwrap(), ["/ok"]);
}

#[test]
fn required_and_dependencies() {
    let mut parser = parser([
        OptionSpec::parameter("input").required(),
        OptionSpec::switch("compress").needs("output"),
        OptionSpec::parameter("output"),
    ]);

    assert_eq!(
        parser.parse(["--compress"]).unwrap_err(),
        ArgumentError::MissingRequired {
            option: "input".to_owned()
        }
    );

    assert_eq!(
        parser.parse(["--input", "a", "--compress"]).unwrap_err(),
        ArgumentError::MissingDependency {
            option: "compress".to_owned(),
            dependency: "output".to_owned(),
        }
    );

    parser
        .parse(["--input", "a", "--compress", "--output", "b"])
        .unwrap();
    parser.parse(["--input", "a"]).unwrap();

    // A negated occurrence still counts as present
    parser.parse(["--no-input"]).unwrap();
    assert_eq!(parser.parameter("input").unwrap(), None);
}

#[test]
fn strict_mode_requires_declared_dashes() {
    let set = OptionSet::new([
        OptionSpec::switch("--force|-f"),
        OptionSpec::switch("-all"),
        OptionSpec::parameter("name"),
    ])
    .unwrap();
    let mut parser = Parser::with_config(set, Config::strict());

    parser.parse(["--force", "-all", "name", "x"]).unwrap();
    assert!(parser.switch("all").unwrap());
    assert_eq!(parser.parameter("name").unwrap().as_deref(), Some("x"));

    // -force isn't a declared name, so it's a bundle: -f -o -r -c -e
    assert_eq!(
        parser.parse(["-force"]).unwrap_err(),
        ArgumentError::Unrecognized {
            argument: "-o".to_owned()
        }
    );

    assert_eq!(
        parser.parse(["--name=y"]).unwrap_err(),
        ArgumentError::Unrecognized {
            argument: "--name=y".to_owned()
        }
    );

    // Barewords that don't match a bareword declaration pass through
    let rest = parser.parse(["force", "name", "z"]).unwrap();
    assert_eq!(rest, ["force"]);
    assert!(!parser.switch("force").unwrap());
}

#[test]
fn strict_mode_with_case_insensitive_names() {
    let set = OptionSet::new([
        OptionSpec::counter("--verbose|-v").anycase(),
        OptionSpec::switch("quiet").anycase(),
    ])
    .unwrap();
    let mut parser = Parser::with_config(set, Config::strict());

    parser.parse(["--VERBOSE", "-V", "QUIET"]).unwrap();
    assert_eq!(parser.counter("verbose").unwrap(), 2);
    assert!(parser.switch("quiet").unwrap());

    // Case is ignored, dashes still aren't
    for argument in ["--V", "--Quiet"] {
        assert_eq!(
            parser.parse([argument]).unwrap_err(),
            ArgumentError::Unrecognized {
                argument: argument.to_owned()
            },
        );
    }

    // Not a declared name, so it's a bundle; -V matches, -E doesn't
    assert_eq!(
        parser.parse(["-VERBOSE"]).unwrap_err(),
        ArgumentError::Unrecognized {
            argument: "-E".to_owned()
        },
    );

    let rest = parser.parse(["Verbose"]).unwrap();
    assert_eq!(rest, ["Verbose"]);
    assert_eq!(parser.counter("verbose").unwrap(), 0);
}

#[test]
fn unrecognized_options() {
    let mut parser = compiler();

    for argument in ["--bogus", "-q", "--no-bogus=3", "---v", "--with-dash"] {
        assert_eq!(
            parser.parse([argument]).unwrap_err(),
            ArgumentError::Unrecognized {
                argument: argument.to_owned()
            },
        );
    }

    // Only the bad flag from a bundle is reported
    assert_eq!(
        parser.parse(["-xqz"]).unwrap_err(),
        ArgumentError::Unrecognized {
            argument: "-q".to_owned()
        }
    );
}

#[test]
fn events_record_the_command_line() {
    let mut parser = compiler();
    parser.parse(["-v", "--lib=/a", "--no-lib"]).unwrap();

    let events = parser.events();
    let set = parser.option_set();

    assert_eq!(
        events
            .iter()
            .map(|event| (
                set.identifier(event.option()),
                event.value().clone(),
                event.negated()
            ))
            .collect::<Vec<_>>(),
        [
            ("verbose", RawValue::Unit, false),
            ("lib", RawValue::Text("/a".to_owned()), false),
            ("lib", RawValue::Unit, true),
        ]
    );
}

#[test]
fn accessors_return_copies() {
    let mut parser = compiler();
    parser.parse(["--lib", "/a"]).unwrap();

    let options = parser.options();
    let mut lib = parser.list("lib").unwrap();
    lib.push("/b".to_owned());

    assert_eq!(options.list("lib"), Some(["/a".to_owned()].as_slice()));
    assert_eq!(parser.get("lib").unwrap(), Value::from(["/a"]));
    assert_eq!(parser.get("lib").unwrap().kind(), Kind::List);
    assert_eq!(
        parser.names(),
        ["x", "z", "f", "verbose", "lib", "define", "output"]
    );
}
