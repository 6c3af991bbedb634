//! Runs the page generator and the two lily documentation generators, one
//! after another.

use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::PathBuf,
    process::{Command, ExitStatus},
};

use envconfig::Envconfig;

/// The docgen stage only makes sense for the core package source.
pub const CORE_FILE_NAME: &str = "lily_pkg_core.c";

pub const USAGE: &str = "Usage: sitegen <path to lily_pkg_core.c>";

#[derive(Debug, Clone, Envconfig)]
pub struct Config {
    /// The page generator binary.
    #[envconfig(from = "SITEGEN_GENERATOR", default = "gen-basic")]
    pub generator: String,
    /// The lily interpreter used by both documentation stages.
    #[envconfig(from = "SITEGEN_LILY", default = "lily")]
    pub lily: String,
    #[envconfig(from = "SITEGEN_SANDBOX_SCRIPT", default = "./gen_sandbox/gen_sandbox.lily")]
    pub sandbox_script: PathBuf,
    #[envconfig(from = "SITEGEN_DOCGEN_SCRIPT", default = "./gen_core/docgen.lily")]
    pub docgen_script: PathBuf,
}

/// A validated command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    core_path: String,
}

impl Invocation {
    /// `args` excludes the program name. Exactly one argument ending in
    /// [`CORE_FILE_NAME`] is accepted.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut args = args.into_iter();
        let core_path = args.next()?;

        if args.next().is_some() || !core_path.ends_with(CORE_FILE_NAME) {
            return None;
        }

        Some(Self { core_path })
    }

    pub fn core_path(&self) -> &str {
        &self.core_path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub program: OsString,
    pub args: Vec<OsString>,
}

#[derive(Debug)]
pub enum Outcome {
    Exited(ExitStatus),
    SpawnFailed(std::io::Error),
}

impl Outcome {
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(status) if status.success())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(status) => write!(f, "{status}"),
            Self::SpawnFailed(err) => write!(f, "failed to start: {err}"),
        }
    }
}

impl Stage {
    pub fn new(name: &'static str, program: impl Into<OsString>) -> Self {
        Self {
            name,
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Run to completion with inherited stdio. There is no timeout.
    pub fn run(&self) -> Outcome {
        match Command::new(&self.program).args(&self.args).status() {
            Ok(status) => Outcome::Exited(status),
            Err(err) => Outcome::SpawnFailed(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(config: &Config, invocation: &Invocation) -> Self {
        let stages = vec![
            Stage::new("basic", &config.generator),
            Stage::new("sandbox", &config.lily).arg(&config.sandbox_script),
            Stage::new("core", &config.lily)
                .arg(&config.docgen_script)
                .arg(invocation.core_path()),
        ];

        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage in order. A failing stage is logged but never stops
    /// the ones after it.
    pub fn run(&self) -> Vec<Outcome> {
        self.stages
            .iter()
            .map(|stage| {
                tracing::info!(stage = stage.name, program = ?stage.program, args = ?stage.args, "run stage");

                let outcome = stage.run();
                if outcome.success() {
                    tracing::debug!(stage = stage.name, "stage finished");
                } else {
                    tracing::warn!(stage = stage.name, %outcome, "stage did not succeed");
                }

                outcome
            })
            .collect()
    }
}
