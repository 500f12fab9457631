mod args;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use single_header_packer::{parse_files, Amalgamation, Layout};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error("Option --macro <macro> is mandatory")]
    MissingMacro,
    #[error("Cannot create {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Pack(#[from] single_header_packer::Error),
}

fn layout(args: &args::Args) -> Result<Layout, CliError> {
    let files = |arg: &Option<String>| arg.as_deref().map_or(Ok(Vec::new()), parse_files);

    let intro = files(&args.intro)?;
    let public = files(&args.public)?;
    let private = files(&args.private)?;
    let outro = files(&args.outro)?;

    let macro_name = args
        .macro_name
        .clone()
        .filter(|m| !m.is_empty())
        .ok_or(CliError::MissingMacro)?;

    Ok(Layout { macro_name, intro, public, private, outro })
}

fn run(args: &args::Args, out: &mut impl Write) -> Result<(), CliError> {
    let layout = layout(args)?;
    tracing::debug!(?layout);

    let packed = Amalgamation::load(&layout)?;
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Create {
                path: path.clone(),
                source,
            })?;
            packed.write_to(&mut BufWriter::new(file))?;
        }
        None => packed.write_to(out)?,
    }

    Ok(())
}

/// Everything the command prints goes to `out`: diagnostics, help, and the
/// packed file itself unless `--output` is given. Only a failure to write to
/// `out` is returned as an error.
fn cli(raw: Vec<OsString>, out: &mut impl Write) -> io::Result<ExitCode> {
    if raw.is_empty() {
        write!(out, "{}", args::Args::command().render_help())?;
        return Ok(ExitCode::SUCCESS);
    }

    let (known, unknown) = args::sift(raw);
    for token in unknown {
        writeln!(out, "Unknown argument {}", token.to_string_lossy())?;
    }

    let argv = std::iter::once(OsString::from("single-header-packer")).chain(known);
    let args = match args::Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) => {
            write!(out, "{e}")?;
            return Ok(if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS });
        }
    };

    match run(&args, out) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let raw = std::env::args_os().skip(1).collect::<Vec<_>>();
    match cli(raw, &mut io::stdout().lock()) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(%e, "stdout closed");
            ExitCode::FAILURE
        }
    }
}
