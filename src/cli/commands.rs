//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{self, ExampleReport, RunContext};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, unescape, Settings};
use crate::domain::ExecutionMode;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::List) => cmd_list(),
        Some(Commands::Run {
            names,
            all,
            separator,
            sequential,
        }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            let settings = apply_run_overrides(settings, separator.as_deref(), *sequential);
            cmd_run(&settings, names, *all)
        }
        Some(Commands::Config { command }) => cmd_config(cli.config.as_deref(), command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::InvalidArgs(
            "no command given, try --help".into(),
        )),
    }
}

/// Command-line flags take precedence over every config layer.
pub fn apply_run_overrides(
    mut settings: Settings,
    separator: Option<&str>,
    sequential: bool,
) -> Settings {
    if let Some(sep) = separator {
        settings.separator = unescape(sep);
    }
    if sequential {
        settings.parallel = false;
    }
    settings
}

fn cmd_list() -> CliResult<()> {
    output::header("Examples");
    for example in application::catalog() {
        output::entry(example.name, example.summary);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_run(settings: &Settings, names: &[String], all: bool) -> CliResult<()> {
    let ctx = RunContext::from_settings(settings)?;
    debug!(
        "cmd_run: parallel={}",
        ctx.mode == ExecutionMode::Parallel
    );

    let reports: Vec<ExampleReport> = if all {
        application::run_all(&ctx)?
    } else {
        names
            .iter()
            .map(|name| application::run(name, &ctx))
            .collect::<Result<_, _>>()?
    };

    let show_headers = reports.len() > 1;
    for report in &reports {
        if show_headers {
            output::header(report.name);
        }
        for line in &report.lines {
            output::info(line);
        }
    }
    Ok(())
}

fn cmd_config(local: Option<&Path>, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(local)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info("no config directory available"),
        },
    }
    Ok(())
}
