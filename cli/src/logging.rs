// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EVENTFUL_LOG";
const LOG_FILE: &str = "eventful.log";
const DEFAULT_FILTER: &str = "warn";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// A file under the state directory, the terminal belongs to the TUI.
    File,
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(target: LogTarget, state_dir: Option<&Path>) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File => match state_dir.map(open_log_file) {
            Some(Ok(file)) => builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            // never write to the terminal while the TUI owns it
            Some(Err(_)) | None => builder.with_writer(io::sink).try_init(),
        },
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn open_log_file(state_dir: &Path) -> io::Result<File> {
    fs::create_dir_all(state_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(state_dir.join(LOG_FILE))
}
