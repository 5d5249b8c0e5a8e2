// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::env;
use std::ffi::OsString;
use tracing::warn;

pub const INPUT_PATH_ENV: &str = "INPUT_PATH";
const INPUT_PATH_FLAG: &str = "input-path";

/// Command line of the container.
///
/// Only `--input-path` is interpreted, wherever it appears and under any
/// unambiguous prefix (`--input`, `--inp=...`). Every other token is set
/// aside in [`Args::ignored`], so the job can be launched with arguments
/// meant for other tools. Tokens after a bare `--` are never interpreted.
#[derive(Debug, Default, Parser)]
#[command(
    name = "container-entrypoint",
    disable_help_flag = true,
    infer_long_args = true,
    args_override_self = true
)]
pub struct Args {
    #[arg(long = "input-path", env = "INPUT_PATH")]
    input_path: Option<String>,

    #[arg(skip)]
    ignored: Vec<String>,
}

impl Args {
    pub fn from_env() -> Self {
        Self::parse_lenient(env::args_os())
    }

    /// Parses the given arguments, falling back to the environment alone if
    /// the recognized ones cannot be parsed (for example `--input-path` with
    /// no value).
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let (known, ignored) = split_known(args.into_iter().map(Into::into));
        let mut parsed = match Self::try_parse_from(known) {
            Ok(args) => args,
            Err(e) => {
                warn!("Ignoring unparsable arguments: {}", e.kind());
                Self::default()
            }
        };
        parsed.ignored = ignored;
        parsed
    }

    /// The input path, from `--input-path` or else `INPUT_PATH`. Empty values count as unset.
    #[must_use]
    pub fn input_path(&self) -> Option<String> {
        self.input_path
            .clone()
            .filter(|path| !path.is_empty())
            .or_else(|| env::var(INPUT_PATH_ENV).ok().filter(|path| !path.is_empty()))
    }

    #[must_use]
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }
}

/// Splits the command line into the tokens clap should see (program name and
/// `--input-path` occurrences with their values) and everything else.
fn split_known(args: impl Iterator<Item = OsString>) -> (Vec<OsString>, Vec<String>) {
    let mut args = args;
    let mut known: Vec<OsString> = args.next().into_iter().collect();
    let mut ignored = Vec::new();

    while let Some(arg) = args.next() {
        let Some(token) = arg.to_str() else {
            ignored.push(arg.to_string_lossy().into_owned());
            continue;
        };
        if token == "--" {
            ignored.extend(args.by_ref().map(|rest| rest.to_string_lossy().into_owned()));
            break;
        }
        let (name, inline_value) = match token.strip_prefix("--") {
            Some(flag) => match flag.split_once('=') {
                Some((name, _)) => (name, true),
                None => (flag, false),
            },
            None => ("", false),
        };
        if !is_input_path_flag(name) {
            ignored.push(token.to_string());
            continue;
        }
        known.push(arg);
        if !inline_value {
            known.extend(args.next());
        }
    }
    (known, ignored)
}

fn is_input_path_flag(name: &str) -> bool {
    !name.is_empty() && INPUT_PATH_FLAG.starts_with(name)
}
