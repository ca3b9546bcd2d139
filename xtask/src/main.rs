// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Workspace automation for the calendar engine.
//!
//! `cargo xtask ci` lints, builds and tests the workspace, then runs
//! `verify-migrations`, which applies the embedded `SQLite` migrations to a
//! scratch database and checks the schema still enforces the calendar's
//! storage rules. Nothing here needs a database server.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod cargo;
mod schema;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use tracing_log::AsTrace;

use crate::cargo::CargoTask;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.log_level_filter().as_trace())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Copy, Debug, Subcommand)]
enum Command {
    /// Lint, build, test, then verify migrations
    CI,

    #[command(visible_alias = "b")]
    Build,

    #[command(visible_alias = "c")]
    Check,

    /// Clippy, rustdoc and rustfmt checks
    #[command(visible_alias = "l")]
    Lint,

    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build docs with docs.rs flags, warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    #[command(visible_alias = "lf")]
    LintFormatting,

    #[command(visible_alias = "fc")]
    FixClippy,

    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Unit tests, then doc tests
    #[command(visible_alias = "t")]
    Test,

    #[command(visible_alias = "td")]
    TestDocs,

    #[command(visible_alias = "tl")]
    TestLibs,

    /// Check the `SQLite` migrations build the calendar schema and revert cleanly
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    /// The commands this one expands to, in order.
    const fn steps(self) -> &'static [Self] {
        match self {
            Self::CI => &[Self::Lint, Self::Build, Self::Test, Self::VerifyMigrations],
            Self::Lint => &[Self::LintClippy, Self::LintDocs, Self::LintFormatting],
            // doc tests last, they are the slow part
            Self::Test => &[Self::TestLibs, Self::TestDocs],
            _ => &[],
        }
    }

    const fn cargo_task(self) -> Option<CargoTask> {
        match self {
            Self::Build => Some(CargoTask::Build),
            Self::Check => Some(CargoTask::Check),
            Self::LintClippy => Some(CargoTask::Clippy),
            Self::LintFormatting => Some(CargoTask::FormatCheck),
            Self::FixClippy => Some(CargoTask::ClippyFix),
            Self::FixFormatting => Some(CargoTask::Format),
            Self::TestDocs => Some(CargoTask::DocTests),
            Self::TestLibs => Some(CargoTask::Tests),
            _ => None,
        }
    }

    fn run(self) -> Result<()> {
        if let Some(task) = self.cargo_task() {
            return task.run();
        }
        match self {
            Self::LintDocs => cargo::lint_docs(),
            Self::VerifyMigrations => schema::verify_migrations(),
            _ => self.steps().iter().try_for_each(|step| step.run()),
        }
    }
}
