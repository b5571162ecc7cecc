// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end.
//!
//! `splinebender [OPTIONS] [FILE]` loads a density-function document (or
//! the default one), optionally applies point edits, and prints the
//! located points. With `--watch` it keeps running and reprints whenever
//! the file is changed by another program.

use crate::config::EditorConfig;
use crate::editing::{DEFAULT_SOURCE, EditSession};
use crate::file_watcher;
use crate::path::SplinePoint;
use crate::path::point_list::{insert_point, remove_point, set_slope};
use anyhow::{Context, anyhow, bail};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// A point edit requested on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointCommand {
    Insert(SplinePoint),
    Delete(usize),
    Slope(usize, f64),
}

/// Command-line arguments for splinebender.
///
/// Build with [`Args::try_parse_ordered`] or [`Args::parse_ordered`] so
/// that `commands` holds the point edits in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Parser)]
#[command(name = "splinebender")]
#[command(about = "Edit the spline points of a density-function document")]
#[command(version)]
pub struct Args {
    /// Document to load; the built-in example when absent
    pub file: Option<PathBuf>,

    /// TOML file overriding the editor defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print points as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Keep running and reprint when the file changes
    #[arg(long, requires = "file")]
    pub watch: bool,

    /// Write edits back to FILE instead of printing the document
    #[arg(long, requires = "file")]
    pub write: bool,

    /// Insert a point (slope defaults to 0)
    #[arg(
        long,
        value_name = "X,Y[,SLOPE]",
        value_parser = parse_insert,
        allow_hyphen_values = true
    )]
    insert: Vec<SplinePoint>,

    /// Delete the point at INDEX
    #[arg(long, value_name = "INDEX")]
    delete: Vec<usize>,

    /// Set the slope of the point at INDEX
    #[arg(
        long,
        value_name = "INDEX,VALUE",
        value_parser = parse_slope,
        allow_hyphen_values = true
    )]
    slope: Vec<(usize, f64)>,

    /// Point edits in command-line order
    #[arg(skip)]
    pub commands: Vec<PointCommand>,
}

fn parse_numbers(value: &str) -> Result<Vec<f64>, String> {
    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{part}' is not a number"))
        })
        .collect()
}

fn parse_insert(value: &str) -> Result<SplinePoint, String> {
    match parse_numbers(value)?.as_slice() {
        [x, y] => Ok(SplinePoint::new(*x, *y, 0.0)),
        [x, y, slope] => Ok(SplinePoint::new(*x, *y, *slope)),
        _ => Err("expected X,Y or X,Y,SLOPE".to_string()),
    }
}

fn parse_slope(value: &str) -> Result<(usize, f64), String> {
    let (index, slope) = value
        .split_once(',')
        .ok_or_else(|| "expected INDEX,VALUE".to_string())?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("'{index}' is not a point index"))?;
    match parse_numbers(slope)?.as_slice() {
        [slope] => Ok((index, *slope)),
        _ => Err("expected INDEX,VALUE".to_string()),
    }
}

/// Interleave the per-flag edit lists by their position on the command line
fn ordered_commands(matches: &ArgMatches, args: &Args) -> Vec<PointCommand> {
    let mut ordered: Vec<(usize, PointCommand)> = Vec::new();
    if let Some(indices) = matches.indices_of("insert") {
        let inserts = args.insert.iter().map(|p| PointCommand::Insert(*p));
        ordered.extend(indices.zip(inserts));
    }
    if let Some(indices) = matches.indices_of("delete") {
        let deletes = args.delete.iter().map(|d| PointCommand::Delete(*d));
        ordered.extend(indices.zip(deletes));
    }
    if let Some(indices) = matches.indices_of("slope") {
        let slopes = args.slope.iter().map(|(i, s)| PointCommand::Slope(*i, *s));
        ordered.extend(indices.zip(slopes));
    }
    ordered.sort_by_key(|(i, _)| *i);
    ordered.into_iter().map(|(_, command)| command).collect()
}

impl Args {
    /// Parse an argument list whose first item is the program name
    pub fn try_parse_ordered<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut parsed = Self::from_arg_matches(&matches)?;
        parsed.commands = ordered_commands(&matches, &parsed);
        Ok(parsed)
    }

    /// Parse the process arguments, exiting with usage on error or `--help`
    pub fn parse_ordered() -> Self {
        Self::try_parse_ordered(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }
}

/// Apply one command to a point list
pub fn apply_command(
    points: &[SplinePoint],
    command: PointCommand,
) -> anyhow::Result<Vec<SplinePoint>> {
    match command {
        PointCommand::Insert(point) => Ok(insert_point(points, point).0),
        PointCommand::Delete(index) => remove_point(points, index).ok_or_else(|| {
            anyhow!(
                "Cannot delete point {index}: {} points, at least {} must remain",
                points.len(),
                crate::settings::editing::MIN_POINTS
            )
        }),
        PointCommand::Slope(index, slope) => {
            if index >= points.len() {
                bail!("No point {index}; the spline has {} points", points.len());
            }
            Ok(set_slope(points, index, slope))
        }
    }
}

/// Text for printing the session's points
pub fn render_points(session: &EditSession, json: bool) -> anyhow::Result<String> {
    if json {
        return serde_json::to_string_pretty(session.points()).context("Failed to format points");
    }
    let mut out = format!(
        "{:>5}  {:>12}  {:>12}  {:>12}\n",
        "index", "location", "value", "derivative"
    );
    for (i, (p, editable)) in session
        .points()
        .iter()
        .zip(session.editable())
        .enumerate()
    {
        let value = if *editable {
            format!("{:>12}", p.y)
        } else {
            format!("{:>12}", "(nested)")
        };
        out.push_str(&format!("{i:>5}  {:>12}  {value}  {:>12}\n", p.x, p.slope));
    }
    Ok(out)
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_session(session: &EditSession, json: bool) -> anyhow::Result<()> {
    if session.is_editable() {
        print!("{}", render_points(session, json)?);
    } else {
        for error in session.errors() {
            tracing::error!("{}", error);
        }
    }
    Ok(())
}

/// Run the command line with already-parsed arguments
pub fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let source = match &args.file {
        Some(path) => {
            tracing::info!("Loading document from: {}", path.display());
            read_source(path)?
        }
        None => DEFAULT_SOURCE.to_string(),
    };

    let mut session = EditSession::new(source, config);
    if !args.commands.is_empty() {
        if let Some(error) = session.errors().first() {
            bail!("Cannot edit: {error}");
        }
        for command in &args.commands {
            let edited = apply_command(session.points(), *command)?;
            let before = session.source().to_string();
            if session.apply_edit(&edited) == before {
                tracing::warn!("Edit {:?} left the document unchanged", command);
            }
        }
        session.flush();
    }

    match (&args.file, args.write) {
        (Some(path), true) if !args.commands.is_empty() => {
            std::fs::write(path, session.source())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        _ if !args.commands.is_empty() => println!("{}", session.source()),
        _ => {}
    }

    print_session(&session, args.json)?;
    if !args.watch && !session.is_editable() {
        bail!("{}", session.errors().join("\n"));
    }

    if let (true, Some(path)) = (args.watch, &args.file) {
        // Nothing writes the file once watching starts
        let save_flag = Arc::new(AtomicBool::new(false));
        file_watcher::watch_file(path, save_flag, || {
            match read_source(path) {
                Ok(text) => {
                    session.set_source(text);
                    println!("-- {} --", chrono::Local::now().format("%H:%M:%S"));
                    if let Err(e) = print_session(&session, args.json) {
                        tracing::error!("{:#}", e);
                    }
                }
                Err(e) => tracing::error!("{:#}", e),
            }
            true
        })?;
    }
    Ok(())
}
