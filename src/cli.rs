use clap::{
    ArgAction, Parser,
    error::{ContextKind, ErrorKind},
};
use core::num::NonZeroUsize;
use std::ffi::OsString;

pub(crate) const USAGE: &str = "**Usage: work [-?] [-t NumThreads] [-n Vertices] [-s Seed]";

/// Command-line options of the `work` binary.
#[derive(Debug, Parser)]
#[command(
    name = "work",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub(crate) struct Cli {
    /// Number of execution units; 1 runs sequentially.
    #[arg(short = 't', value_name = "NumThreads", default_value = "1")]
    pub(crate) threads: NonZeroUsize,
    /// Number of vertices in the generated graph.
    #[arg(short = 'n', value_name = "Vertices", default_value = "1000")]
    pub(crate) vertices: usize,
    /// Seed of the graph generator; random if omitted.
    #[arg(short = 's', value_name = "Seed")]
    pub(crate) seed: Option<u64>,
    /// Print usage.
    #[arg(short = '?', action = ArgAction::Help)]
    _help: Option<bool>,
}

/// What the command line asks for.
#[derive(Debug)]
pub(crate) enum Invocation {
    Run(Cli),
    Help,
    /// Unknown or malformed argument, with the message to show.
    Rejected(String),
}

pub(crate) fn parse_from<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let err = match Cli::try_parse_from(args) {
        Ok(cli) => return Invocation::Run(cli),
        Err(err) => err,
    };
    let context = |kind| err.get(kind).map(ToString::to_string).unwrap_or_default();
    // Clap renders the argument with its value name, e.g. `-t <NumThreads>`.
    let flag = context(ContextKind::InvalidArg)
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_owned();
    let value = context(ContextKind::InvalidValue);
    match err.kind() {
        ErrorKind::DisplayHelp => Invocation::Help,
        ErrorKind::InvalidValue | ErrorKind::ValueValidation if !value.is_empty() => {
            Invocation::Rejected(format!("Invalid value '{value}' for '{flag}'"))
        }
        _ => Invocation::Rejected(format!("Unknown argument: '{flag}'")),
    }
}
