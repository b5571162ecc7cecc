// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Splinebender: an editor core for the spline points of density-function
//! JSON documents.
//!
//! The library locates the spline inside a nested document, turns pointer
//! gestures into point edits, and writes edited points back into the
//! document without disturbing anything else in it. Rendering and text
//! editing are left to the host; `EditSession` is the entry point.

pub mod cli;
pub mod config;
pub mod editing;
pub mod error;
pub mod file_watcher;
pub mod model;
pub mod path;
pub mod settings;

pub use config::EditorConfig;
pub use editing::EditSession;
pub use error::{EditorError, EditorResult};
pub use path::SplinePoint;

/// Entry point for the splinebender command line
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("splinebender=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse_ordered();
    cli::run(args)
}
