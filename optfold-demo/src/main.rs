use std::{
    env,
    ffi::OsString,
    io::{self, Write as _},
    process::ExitCode,
};

use anyhow::{Context as _, anyhow};
use optfold::{
    Error, OptionSpec, Parser, Validator, Value,
    printers::{write_arguments, write_error, write_options},
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Colon separated library directories, added to the `--lib` defaults
const LIB_PATH_VAR: &str = "OPTFOLD_DEMO_LIB";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn specs() -> anyhow::Result<Vec<OptionSpec>> {
    Ok(vec![
        OptionSpec::switch("force|f"),
        OptionSpec::counter("verbose|v").anycase(),
        OptionSpec::switch("version|V").anycase(),
        OptionSpec::parameter("output|o")
            .validator(Validator::pattern(r"^[^-]")?)
            .default("a.out"),
        OptionSpec::list("lib|L").validator(Validator::pattern("^/")?),
        OptionSpec::keypair("define|D").key_validator(Validator::pattern("^[A-Za-z_]+$")?),
        OptionSpec::switch("compress|z").needs("output"),
    ])
}

/// Defaults from the environment, the way a config file would supply them
fn environment_defaults() -> Vec<(&'static str, Value)> {
    env::var(LIB_PATH_VAR)
        .ok()
        .map(|path| {
            let dirs: Vec<String> = path
                .split(':')
                .filter(|dir| !dir.is_empty())
                .map(str::to_owned)
                .collect();

            vec![("lib", Value::from(dirs))]
        })
        .unwrap_or_default()
}

/// Command line arguments must be UTF-8 to be matched against option names
fn utf8_arguments(args: impl IntoIterator<Item = OsString>) -> anyhow::Result<Vec<String>> {
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument {arg:?} isn't valid UTF-8"))
        })
        .collect()
}

fn run(out: &mut impl io::Write) -> anyhow::Result<Result<(), Error>> {
    let mut parser = Parser::from_specs(specs()?).context("declaring options")?;

    let defaults = environment_defaults();
    debug!(count = defaults.len(), "defaults from the environment");

    if let Err(error) = parser.append_defaults(defaults) {
        return Ok(Err(error));
    }

    let args = utf8_arguments(env::args_os().skip(1))?;

    if let Err(error) = parser.parse(args) {
        return Ok(Err(error.into()));
    }

    write_options(out, &parser.options()).context("writing options")?;
    write_arguments(out, &parser.arguments()).context("writing arguments")?;

    Ok(Ok(()))
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    match run(&mut stdout)? {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            let stderr = io::stderr();
            let mut stderr = stderr.lock();

            write_error(&mut stderr, &error).context("writing error")?;
            stderr.flush()?;

            Ok(ExitCode::FAILURE)
        }
    }
}
