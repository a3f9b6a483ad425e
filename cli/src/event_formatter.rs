// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use eventful_core::Event;
use eventful_core::datetime::human_date;
use eventful_core::views::EventDetails;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Id,
                EventColumn::Date,
                EventColumn::Title,
                EventColumn::Location,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            ArgOutputFormat::Table if self.events.is_empty() => writeln!(f, "No events found."),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Id,
    Date,
    Title,
    Location,
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id => "ID",
            EventColumn::Date => "Date",
            EventColumn::Title => "Title",
            EventColumn::Location => "Location",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Event) -> Cow<'a, str> {
        match self {
            EventColumn::Id => data.id.as_str().into(),
            EventColumn::Date => human_date(&data.date).into(),
            EventColumn::Title => data.title.as_str().into(),
            EventColumn::Location => data.location.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, _data: &Event) -> Option<Color> {
        match self {
            EventColumn::Id => Some(Color::BrightBlack),
            EventColumn::Date => Some(Color::Cyan),
            _ => None,
        }
    }
}

/// A single event, as shown by `event show`.
#[derive(Debug)]
pub struct EventDetailsDisplay<'a> {
    pub event: &'a Event,
    pub details: &'a EventDetails,
    pub format: ArgOutputFormat,
}

impl fmt::Display for EventDetailsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.format == ArgOutputFormat::Json {
            let json = serde_json::to_string_pretty(self.event).map_err(|_| fmt::Error)?;
            return writeln!(f, "{json}");
        }

        let rows = [
            ("ID", self.details.id.as_str()),
            ("Title", self.details.title.as_str()),
            ("When", self.details.when.as_str()),
            ("Location", self.details.location.as_str()),
            ("Image", self.details.image_url.as_deref().unwrap_or("")),
        ];
        for (key, value) in rows {
            writeln!(f, "{} {}", format!("{key:<9}").bold(), value)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.details.description)
    }
}
