//! Runtime source patcher.
//!
//! Computes the literal patches a Ruby source tree needs before it can be
//! built statically for a target, and optionally applies them.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use patcher::exit_codes;
use patcher::logging;
use patcher::request::{Overrides, PatchRequest};

#[derive(Parser)]
#[command(
    name = "patcher",
    version,
    about = "Select and apply static-build patches to a Ruby source tree"
)]
struct Cli {
    /// Configuration file; missing file means built-in defaults.
    #[arg(long, global = true, default_value = patcher::io::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Default)]
struct TargetArgs {
    /// OS identifier, e.g. `linux-gnu`, `x86_64-linux-musl`, `msys`.
    #[arg(long = "os")]
    ostype: Option<String>,

    /// Directory with the static dependency libraries.
    #[arg(long)]
    deps_lib_dir: Option<PathBuf>,

    /// Runtime version, `MAJOR.MINOR[.PATCH]`.
    #[arg(long = "ruby")]
    ruby_version: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the composed patch set as JSON.
    Show {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Print the files the patch set touches, one per line.
    Files {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Apply the patch set to a runtime source tree.
    Apply {
        #[command(flatten)]
        target: TargetArgs,

        /// Root of the extracted runtime sources.
        #[arg(long)]
        source_dir: Option<PathBuf>,
    },
}

impl TargetArgs {
    fn into_overrides(self, source_dir: Option<PathBuf>) -> Overrides {
        Overrides {
            ostype: self.ostype,
            deps_lib_dir: self.deps_lib_dir,
            ruby_version: self.ruby_version,
            source_dir,
        }
    }
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    let code = run(cli);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: Cli) -> i32 {
    let (overrides, action) = match cli.command {
        Command::Show { target } => (target.into_overrides(None), Action::Show),
        Command::Files { target } => (target.into_overrides(None), Action::Files),
        Command::Apply { target, source_dir } => {
            (target.into_overrides(source_dir), Action::Apply)
        }
    };

    let request = match PatchRequest::load(&cli.config, overrides) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{:#}", err);
            return exit_codes::INVALID;
        }
    };

    let (result, failure_code) = match action {
        Action::Show => (cmd_show(&request), exit_codes::INVALID),
        Action::Files => (cmd_files(&request), exit_codes::INVALID),
        Action::Apply => (cmd_apply(&request), exit_codes::PATCH_FAILED),
    };

    match result {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            failure_code
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Show,
    Files,
    Apply,
}

fn cmd_show(request: &PatchRequest) -> Result<()> {
    let payload =
        serde_json::to_string_pretty(&request.patch_set()).context("serialize patch set")?;
    println!("{}", payload);
    Ok(())
}

fn cmd_files(request: &PatchRequest) -> Result<()> {
    for file in request.patch_set().files() {
        println!("{}", file);
    }
    Ok(())
}

fn cmd_apply(request: &PatchRequest) -> Result<()> {
    let report = request.apply()?;
    for file in &report.files {
        println!("patched {} ({} edits)", file.file, file.edits);
    }
    Ok(())
}
