// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use eventful_core::Eventful;
use eventful_core::router::Route;

use crate::tui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdTui {
    pub route: Route,
}

impl Default for CmdTui {
    fn default() -> Self {
        Self {
            route: Route::Events,
        }
    }
}

impl CmdTui {
    pub const NAME: &str = "tui";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Start the terminal UI, the default command")
            .arg(arg!(--route <PATH> "Path to open, e.g. /events/42").default_value("/events"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let route = matches
            .get_one::<String>("route")
            .map_or(Route::Events, |path| Route::parse(path));
        Self { route }
    }

    pub async fn run(self, app: &Eventful) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "starting tui...");
        tui::run_app(app.clone(), self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        let cmd = Command::new("test").subcommand(CmdTui::command());

        let matches = cmd
            .clone()
            .try_get_matches_from(["test", "tui", "--route", "/events/42/edit"])
            .unwrap();
        let parsed = CmdTui::from(matches.subcommand_matches("tui").unwrap());
        assert_eq!(parsed.route, Route::EditEvent("42".into()));

        let matches = cmd.try_get_matches_from(["test", "tui"]).unwrap();
        let parsed = CmdTui::from(matches.subcommand_matches("tui").unwrap());
        assert_eq!(parsed, CmdTui::default());
    }
}
