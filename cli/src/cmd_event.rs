// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg};
use eventful_core::query::QueryError;
use eventful_core::router::Route;
use eventful_core::views::{Content, validate};
use eventful_core::{Event, EventDraft, EventId, Eventful};

use crate::event_formatter::{EventDetailsDisplay, EventFormatter};
use crate::tui;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub search: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List recently added events, or search them")
            .arg(arg!(-s --search <TERM> "Only show events matching the term"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            search: matches.get_one::<String>("search").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &Eventful) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let term = self.search.as_deref().map(str::trim).unwrap_or_default();
        let events = if term.is_empty() {
            let view = app.list_view();
            view.load().await.map_err(|e| read_error(e, view.content()))?
        } else {
            let mut view = app.search_view();
            view.submit(term);
            let load = view.load().ok_or("Search term must not be empty")?;
            load.await.map_err(|e| read_error(e, view.content()))?
        };

        let formatter = EventFormatter::new().with_output_format(self.output_format);
        print!("{}", formatter.format(&events));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventShow {
    pub id: EventId,
    pub output_format: ArgOutputFormat,
}

impl CmdEventShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the details of an event")
            .arg(arg_id())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &Eventful) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing event...");
        let view = app.detail_view(self.id);
        let event = view
            .load()
            .await
            .map_err(|e| read_error(e, view.content()))?;

        let Content::Ready(details) = view.content() else {
            return Err("Event is not loaded".into());
        };
        let display = EventDetailsDisplay {
            event: &event,
            details: &details,
            format: self.output_format,
        };
        print!("{display}");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    /// The event to create, `None` to open the form.
    pub draft: Option<EventDraft>,
    pub output_format: ArgOutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a new event, opens a form if no field is given")
            .args(EventFields::args())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let fields = EventFields::from(matches);
        let draft = match fields.is_empty() {
            true => None,
            false => {
                let missing = fields.missing_required();
                if !missing.is_empty() {
                    return Err(format!(
                        "Missing required fields for new event: {}",
                        missing.join(", ")
                    )
                    .into());
                }

                let mut draft = EventDraft::default();
                fields.apply(&mut draft);
                validate(&draft)?;
                Some(draft)
            }
        };

        Ok(Self {
            draft,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, app: &Eventful) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating event...");
        let event = match self.draft {
            Some(draft) => {
                let view = app.new_event_view();
                match view.submit(draft)?.await {
                    Some(_) => view.created(),
                    None => return Err(write_error(view.error())),
                }
            }
            None => tui::run_form(app.clone(), Route::NewEvent)?,
        };

        match event {
            Some(event) => print_event(&event, self.output_format),
            None => tracing::info!("user cancelled the event creation"),
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: EventId,
    pub fields: EventFields,
    pub output_format: ArgOutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event, opens a form if no field is given")
            .arg(arg_id())
            .args(EventFields::args())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            fields: EventFields::from(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn is_tui(&self) -> bool {
        self.fields.is_empty()
    }

    pub async fn run(self, app: &Eventful) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        if self.is_tui() {
            return match tui::run_form(app.clone(), Route::EditEvent(self.id.clone()))? {
                Some(event) => {
                    print_event(&event, self.output_format);
                    Ok(())
                }
                None => {
                    tracing::info!(id = %self.id, "user cancelled the event editing");
                    Ok(())
                }
            };
        }

        let view = app.edit_event_view(self.id);
        let event = view
            .load()
            .await
            .map_err(|e| read_error(e, view.content()))?;

        let mut draft = EventDraft::from(event.as_ref());
        self.fields.apply(&mut draft);
        match view.submit(draft)?.await {
            Some(_) => {
                if let Some(event) = view.updated() {
                    print_event(&event, self.output_format);
                }
                Ok(())
            }
            None => Err(write_error(view.error())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: EventId,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(arg_id())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
        }
    }

    pub async fn run(self, app: &Eventful) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        let view = app.detail_view(self.id.clone());
        match view.delete().await {
            Some(_) => {
                println!("Deleted event {}", self.id);
                Ok(())
            }
            None => Err(write_error(view.delete_error())),
        }
    }
}

/// Event fields given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

impl EventFields {
    const REQUIRED: [&str; 5] = ["title", "description", "date", "time", "location"];

    pub fn args() -> [Arg; 6] {
        [
            arg!(--title <TITLE> "Title of the event"),
            arg!(--description <DESCRIPTION> "Description of the event"),
            arg!(--date <DATE> "Date of the event, YYYY-MM-DD"),
            arg!(--time <TIME> "Time of the event, HH:MM"),
            arg!(--location <LOCATION> "Where the event takes place"),
            arg!(--image <PATH> "Image path, see `eventful images`"),
        ]
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let get = |name: &str| matches.get_one::<String>(name).cloned();
        Self {
            title: get("title"),
            description: get("description"),
            date: get("date"),
            time: get("time"),
            location: get("location"),
            image: get("image"),
        }
    }

    /// Whether no field was given.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Flags of the required fields that were not given.
    pub fn missing_required(&self) -> Vec<String> {
        let given = [
            &self.title,
            &self.description,
            &self.date,
            &self.time,
            &self.location,
        ];
        Self::REQUIRED
            .iter()
            .zip(given)
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| format!("--{name}"))
            .collect()
    }

    /// Overwrites the fields of `draft` that were given.
    pub fn apply(&self, draft: &mut EventDraft) {
        let pairs = [
            (&self.title, &mut draft.title),
            (&self.description, &mut draft.description),
            (&self.date, &mut draft.date),
            (&self.time, &mut draft.time),
            (&self.location, &mut draft.location),
            (&self.image, &mut draft.image),
        ];
        for (given, field) in pairs {
            if let Some(value) = given {
                *field = value.trim().to_string();
            }
        }
    }
}

fn arg_id() -> Arg {
    arg!(id: <ID> "The id of the event")
}

fn get_id(matches: &ArgMatches) -> EventId {
    matches
        .get_one::<String>("id")
        .map(|id| EventId::from(id.as_str()))
        .unwrap_or_else(|| EventId::from(""))
}

/// The error a view shows for a failed read.
fn read_error<T>(err: QueryError, content: Content<T>) -> Box<dyn Error> {
    match content {
        Content::Error(block) => block.into(),
        _ => err.into(),
    }
}

fn write_error(block: Option<eventful_core::views::ErrorBlock>) -> Box<dyn Error> {
    match block {
        Some(block) => block.into(),
        None => "Request failed".into(),
    }
}

fn print_event(event: &Event, output_format: ArgOutputFormat) {
    let formatter = EventFormatter::new().with_output_format(output_format);
    print!("{}", formatter.format(std::slice::from_ref(event)));
}
