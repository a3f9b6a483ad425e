// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use eventful_core::{APP_NAME, Eventful};
use futures::{FutureExt, future::BoxFuture};

use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew, CmdEventShow};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_images::CmdImages;
use crate::cmd_tui::CmdTui;
use crate::config::parse_config;
use crate::logging::{self, LogTarget};

/// Run the Eventful command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Browse, create and edit events of an events backend.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to tui
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/eventful/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/eventful/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdTui::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventShow::command())
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command()),
            )
            .subcommand(CmdImages::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdTui::NAME, matches)) => Tui(CmdTui::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventShow::NAME, matches)) => EventShow(CmdEventShow::from(matches)),
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)?),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => {
                    EventDelete(CmdEventDelete::from(matches))
                }
                _ => unreachable!(),
            },
            Some((CmdImages::NAME, matches)) => Images(CmdImages::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Tui(CmdTui::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Start the terminal UI
    Tui(CmdTui),

    /// List or search events
    EventList(CmdEventList),

    /// Show an event
    EventShow(CmdEventShow),

    /// Create an event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// List the selectable images
    Images(CmdImages),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Where the command writes its logs, the terminal belongs to the TUI.
    pub fn log_target(&self) -> LogTarget {
        use Commands::*;
        match self {
            Tui(_) => LogTarget::File,
            EventNew(a) if a.draft.is_none() => LogTarget::File,
            EventEdit(a) if a.is_tui() => LogTarget::File,
            _ => LogTarget::Stderr,
        }
    }

    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        let target = self.log_target();
        match self {
            Tui(a)         => Self::run_with(config, target, |x| a.run(x).boxed()).await,
            EventList(a)   => Self::run_with(config, target, |x| a.run(x).boxed()).await,
            EventShow(a)   => Self::run_with(config, target, |x| a.run(x).boxed()).await,
            EventNew(a)    => Self::run_with(config, target, |x| a.run(x).boxed()).await,
            EventEdit(a)   => Self::run_with(config, target, |x| a.run(x).boxed()).await,
            EventDelete(a) => Self::run_with(config, target, |x| a.run(x).boxed()).await,
            Images(a)      => Self::run_with(config, target, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => {
                logging::init(LogTarget::Stderr, None);
                a.run()
            }
        }
    }

    async fn run_with<F>(
        config: Option<PathBuf>,
        target: LogTarget,
        f: F,
    ) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Eventful) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        let config = parse_config(config).await?;
        logging::init(target, config.state_dir.as_deref());
        tracing::debug!(base_url = %config.base_url, "configuration parsed");

        let app = Eventful::new(config)?;
        f(&app).await
    }
}
