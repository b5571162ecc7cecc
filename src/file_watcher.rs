// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Filesystem watcher for detecting external edits to a document.
//!
//! Uses the `notify` crate (OS-native events: FSEvents on macOS, inotify on
//! Linux). The parent directory is watched rather than the file itself,
//! because many editors save by writing a new file and renaming it over
//! the old one. A 1-second debounce window batches the bursts of events a
//! single save produces. Self-save suppression prevents reloading a file
//! we just wrote ourselves.

use anyhow::Context;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::settings;

/// Whether an event touches `target`
fn concerns(event: &Event, target: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|p| p.file_name() == target.file_name())
}

/// Watch `path` and call `on_change` after each burst of external
/// changes. Blocks until `on_change` returns false or the watcher stops.
///
/// Set `save_flag` just before writing the file while watching: the next
/// burst is then treated as our own write, swallowed, and the flag cleared.
pub fn watch_file(
    path: &Path,
    save_flag: Arc<AtomicBool>,
    on_change: impl FnMut() -> bool,
) -> anyhow::Result<()> {
    let target: PathBuf = path.to_path_buf();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let (tx, rx) = mpsc::channel::<Event>();
    let filter_target = target.clone();
    let mut watcher = notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
        match result {
            Ok(event) if concerns(&event, &filter_target) => {
                let _ = tx.send(event);
            }
            Ok(_) => {}
            Err(e) => tracing::error!("File watcher error: {}", e),
        }
    })
    .context("Failed to create file watcher")?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", dir.display()))?;
    tracing::info!("Watching for external changes: {}", target.display());

    let quiet = Duration::from_millis(settings::watch::DEBOUNCE_MS);
    dispatch(&rx, &target, quiet, &save_flag, on_change);
    Ok(())
}

/// Run `on_change` once per quiet-terminated burst of events on `rx`.
///
/// Writes made before watching began never produce events, so a flag
/// still set at that point is stale and is cleared first.
fn dispatch(
    rx: &Receiver<Event>,
    target: &Path,
    quiet: Duration,
    save_flag: &AtomicBool,
    mut on_change: impl FnMut() -> bool,
) {
    if save_flag.swap(false, Ordering::SeqCst) {
        tracing::debug!("Clearing save flag set before watching started");
    }
    // Wait for the first event of a burst
    while rx.recv().is_ok() {
        if !wait_for_quiet(rx, quiet) {
            break;
        }

        if save_flag.swap(false, Ordering::SeqCst) {
            tracing::debug!("Ignoring our own write to {}", target.display());
            continue;
        }

        tracing::info!("External changes detected, reloading");
        if !on_change() {
            break;
        }
    }
}

/// Drain events until none arrive for `quiet`. Returns false if the
/// channel closed.
fn wait_for_quiet(rx: &Receiver<Event>, quiet: Duration) -> bool {
    loop {
        match rx.recv_timeout(quiet) {
            Ok(_) => continue,
            Err(RecvTimeoutError::Timeout) => return true,
            Err(RecvTimeoutError::Disconnected) => return false,
        }
    }
}
