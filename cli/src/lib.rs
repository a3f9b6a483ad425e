// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface and terminal UI of Eventful.

mod cli;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_images;
mod cmd_tui;
mod config;
mod event_formatter;
mod image_formatter;
mod logging;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_event::{
    CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew, CmdEventShow, EventFields,
};
pub use crate::cmd_generate_completion::{CmdGenerateCompletion, Shell};
pub use crate::cmd_images::CmdImages;
pub use crate::cmd_tui::CmdTui;
pub use crate::config::parse_config;
pub use crate::util::ArgOutputFormat;
