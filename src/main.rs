//! usagegen: turn the `main` package doc comment into a Go usage constant.
//!
//! Run inside a directory holding a Go command. The package doc comment is
//! reflowed to 80 columns and written to a generated file, either as a bare
//! `usage` constant or, with `-autohelp`, as an `init` function that wires
//! the text into `flag.Usage`. Typical use is through `go generate`:
//!
//! ```text
//! //go:generate usagegen -autohelp
//! ```

mod error;
mod extract;
mod model;
mod parser;
mod reflow;
mod render;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use error::Error;
use model::{OutputPath, RenderMode, DEFAULT_OUTPUT};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "usagegen",
    about = "Generate a Go usage constant from the main package documentation"
)]
struct Cli {
    /// Generated file name; must end with .go
    #[arg(short = 'f', value_name = "file", default_value = DEFAULT_OUTPUT)]
    file: String,

    /// Generate an init() that sets flag.Usage instead of a bare constant
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "bool"
    )]
    autohelp: bool,
}

/// Accept Go flag spelling: `-autohelp` for the long flag and `--f` for the
/// short one. Arguments after `--` are left alone.
fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        if arg == "-autohelp" || arg.starts_with("-autohelp=") {
            out.push(format!("-{arg}"));
        } else if arg == "--f" || arg.starts_with("--f=") {
            out.push(arg[1..].to_string());
        } else {
            out.push(arg);
        }
    }
    out
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args()));
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let output = OutputPath::parse(&cli.file)?;
    let mode = RenderMode::from(cli.autohelp);
    debug!(output = %output.as_path().display(), ?mode, "starting");

    let doc = extract::extract(Path::new("."))?;
    let generated = render::render(&doc, mode);
    write_output(output.as_path(), generated.as_bytes())?;

    info!(
        output = %output.as_path().display(),
        bytes = generated.len(),
        "wrote usage file"
    );
    Ok(())
}

/// Create or truncate `path` and write `contents`. New files get mode
/// 0666 before umask.
fn write_output(path: &Path, contents: &[u8]) -> error::Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    let mut file = options.open(path).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;
    Ok(())
}
