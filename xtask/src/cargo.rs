// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cargo invocations.

use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use color_eyre::{eyre::Context, Result};
use duct::cmd;

/// A single cargo run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CargoTask {
    Build,
    Check,
    Clippy,
    ClippyFix,
    Format,
    FormatCheck,
    Tests,
    DocTests,
}

impl CargoTask {
    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Build => &["build", "--all-targets", "--all-features"],
            Self::Check => &["check", "--all-targets", "--all-features"],
            Self::Clippy => &[
                "clippy",
                "--all-targets",
                "--all-features",
                "--",
                "-D",
                "warnings",
            ],
            Self::ClippyFix => &[
                "clippy",
                "--all-targets",
                "--all-features",
                "--fix",
                "--allow-dirty",
                "--allow-staged",
                "--",
                "-D",
                "warnings",
            ],
            Self::Format => &["fmt", "--all"],
            Self::FormatCheck => &["fmt", "--all", "--check"],
            Self::Tests => &["test", "--all-targets", "--all-features"],
            Self::DocTests => &["test", "--doc", "--all-features"],
        }
    }

    /// Formatting always runs on the nightly toolchain.
    const fn needs_nightly(self) -> bool {
        matches!(self, Self::Format | Self::FormatCheck)
    }

    pub fn run(self) -> Result<()> {
        let expression = cmd("cargo", self.args().iter().copied());
        let expression = if self.needs_nightly() {
            nightly(expression)
        } else {
            expression
        };
        expression
            .run_with_trace()
            .wrap_err_with(|| format!("cargo {}", self.args().join(" ")))?;
        Ok(())
    }
}

/// Cargo sets `CARGO` for subcommands; it has to go for rustup to pick the
/// nightly toolchain.
fn nightly(expression: duct::Expression) -> duct::Expression {
    expression
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
}

/// Builds each workspace package's docs the way docs.rs would.
pub fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        nightly(cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        ))
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()
        .wrap_err_with(|| format!("docs for {}", package.name))?;
    }

    Ok(())
}

trait ExpressionExt {
    /// Logs the command, runs it, and repeats it on failure since the first
    /// line may have scrolled away.
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
