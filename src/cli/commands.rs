//! Command dispatch: argv → descriptor → plan → execution → exit code

use std::ffi::OsString;
use std::io;
use std::path::Path;

use clap::builder::PossibleValuesParser;
use clap::error::ErrorKind;
use clap::{Command, CommandFactory, FromArgMatches};
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::BuildService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Action;
use crate::exitcode;
use crate::infrastructure::ServiceContainer;

/// Single entry point from raw arguments to an exit code.
///
/// Bad input never reaches the command runner. A failing external command's
/// exit code is returned verbatim.
pub struct Dispatcher<'a> {
    container: &'a ServiceContainer,
    service: BuildService,
}

impl<'a> Dispatcher<'a> {
    /// # Errors
    /// `Config` if the settings describe an invalid toolchain or variant set.
    pub fn new(container: &'a ServiceContainer) -> CliResult<Self> {
        Ok(Self {
            container,
            service: container.build_service()?,
        })
    }

    /// Parse `argv` (program name first), execute it and return the exit code.
    pub fn dispatch<I, T>(&self, argv: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.parse(argv) {
            Ok(cli) => self.complete(&cli),
            Err(e) => self.report(&e),
        }
    }

    /// Clap command whose `run --type` accepts exactly the configured variants.
    pub fn command(&self) -> Command {
        let catalog = self.service.catalog();
        let command = Cli::command();
        if catalog.is_empty() {
            return command;
        }

        let names: Vec<String> = catalog.names().into_iter().map(String::from).collect();
        let default = catalog.default_variant().map(|v| v.to_string());
        command
            .after_help(format!("Build variants for `run --type`: {}", names.join(", ")))
            .mut_subcommand("run", move |run| {
                run.mut_arg("variant", move |arg| {
                    let arg = arg.value_parser(PossibleValuesParser::new(names));
                    match default {
                        Some(default) => arg.default_value(default),
                        None => arg,
                    }
                })
            })
    }

    pub fn parse<I, T>(&self, argv: I) -> CliResult<Cli>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(argv)?;
        Ok(Cli::from_arg_matches(&matches)?)
    }

    /// Execute a parsed command line, reporting any failure; returns the exit code.
    pub fn complete(&self, cli: &Cli) -> i32 {
        match self.execute(cli) {
            Ok(()) => exitcode::OK,
            Err(e) => self.report(&e),
        }
    }

    #[instrument(skip(self))]
    pub fn execute(&self, cli: &Cli) -> CliResult<()> {
        match &cli.command {
            Commands::Build => self.run_action(Action::Build, None),
            Commands::Clean => self.run_action(Action::Clean, None),
            Commands::Run { variant } => self.run_action(Action::Run, variant.as_deref()),
            Commands::Config { command } => self.config(command),
            Commands::Completion { shell } => {
                let mut cmd = self.command();
                let name = cmd.get_name().to_string();
                generate(*shell, &mut cmd, name, &mut io::stdout());
                Ok(())
            }
        }
    }

    fn run_action(&self, action: Action, variant: Option<&str>) -> CliResult<()> {
        let descriptor = self.service.descriptor(action, variant)?;
        let plan = self.service.plan(&descriptor);
        output::action("Running command", &plan);
        self.service.execute(&plan)?;
        Ok(())
    }

    fn config(&self, command: &ConfigCommands) -> CliResult<()> {
        match command {
            ConfigCommands::Show => output::info(&self.container.settings.to_toml()?),
            ConfigCommands::Template => output::info(&Settings::template()),
            ConfigCommands::Path => {
                let global = global_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(unavailable)".to_string());
                output::detail(&format!("global: {global}"));
                output::detail(&format!(
                    "local:  {}",
                    local_config_path(Path::new(".")).display()
                ));
            }
        }
        Ok(())
    }

    /// Print an error for the user and return its exit code.
    ///
    /// Usage errors are followed by the help text listing valid commands.
    pub fn report(&self, error: &CliError) -> i32 {
        match error {
            CliError::Parse(e) => {
                let _ = e.print();
            }
            e => output::error(e),
        }
        if let Some(help) = self.usage_help(error) {
            eprintln!();
            eprint!("{help}");
        }
        debug!("exit code: {}", error.exit_code());
        error.exit_code()
    }

    /// Help text listing valid commands and variants, for usage errors only.
    ///
    /// `None` when clap already printed the full help itself.
    pub fn usage_help(&self, error: &CliError) -> Option<String> {
        match error {
            CliError::Parse(e)
                if e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand =>
            {
                None
            }
            e if e.is_usage() => Some(self.command().render_help().to_string()),
            _ => None,
        }
    }
}
