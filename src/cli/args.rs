//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

/// Build, clean and run helper for the Graphical Learning project
#[derive(Parser, Debug)]
#[command(name = "gl-helper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure and compile the project
    Build,

    /// Remove the build output directory
    Clean,

    /// Compile the project and launch the application
    Run {
        /// Build variant to launch
        #[arg(long = "type", value_name = "VARIANT")]
        variant: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show config paths
    Path,
}
