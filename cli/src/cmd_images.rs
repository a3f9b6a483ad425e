// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use eventful_core::Eventful;
use eventful_core::views::Content;

use crate::image_formatter::ImageFormatter;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdImages {
    pub output_format: ArgOutputFormat,
}

impl CmdImages {
    pub const NAME: &str = "images";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the images selectable for events")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &Eventful) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing images...");
        let view = app.new_event_view();
        let images = match view.load_images().await {
            Ok(images) => images,
            Err(err) => {
                return Err(match view.image_picker(&Default::default()) {
                    Content::Error(block) => block.into(),
                    _ => err.into(),
                });
            }
        };

        let formatter = ImageFormatter::new(self.output_format);
        print!("{}", formatter.format(&images));
        Ok(())
    }
}
