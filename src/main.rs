/*
strandcad, a toolkit for DNA origami strand design.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! Command line front-end: read a legacy design, auto-staple and auto-break it, then write the
//! design back along with its staple list.
//!
//! Usage: `strandcad <input.json> <output.json> [preferences.json]`

use std::env;
use std::path::{Path, PathBuf};

#[macro_use]
extern crate serde_derive;
extern crate serde;

mod preferences;
use preferences::Preferences;

use strandcad_autobreak::{break_staples, SettingsError};
use strandcad_design::ErrOperation;
use strandcad_formats::{export, load_legacy, FormatError, OutputFormat};

#[derive(Debug)]
enum AppError {
    IOError(std::io::Error),
    Preferences(serde_json::Error),
    Format(FormatError),
    Design(ErrOperation),
    Settings(SettingsError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IOError(e) => write!(f, "{}", e),
            Self::Preferences(e) => write!(f, "invalid preferences: {}", e),
            Self::Format(e) => write!(f, "{}", e),
            Self::Design(e) => write!(f, "{}", e),
            Self::Settings(e) => write!(f, "invalid autobreak settings: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl From<FormatError> for AppError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<ErrOperation> for AppError {
    fn from(e: ErrOperation) -> Self {
        Self::Design(e)
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

fn main() {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input.json> <output.json> [preferences.json]", args[0]);
        std::process::exit(2);
    }
    let input = PathBuf::from(&args[1]);
    let output = PathBuf::from(&args[2]);
    let preferences = match args.get(3).map(Preferences::load).transpose() {
        Ok(preferences) => preferences.unwrap_or_default(),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = run(&input, &output, &preferences) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(input: &Path, output: &Path, preferences: &Preferences) -> Result<(), AppError> {
    let mut part = load_legacy(input)?;
    log::info!(
        "{} helices, {} strands, {} oligos read from {}",
        part.helix_order().len(),
        part.strands().len(),
        part.oligos().len(),
        input.display()
    );
    if preferences.auto_staple {
        part.auto_staple()?;
    }
    let report = break_staples(&mut part, &preferences.autobreak)?;
    log::info!(
        "{} oligos broken, {} left untouched",
        report.broken.len(),
        report.skipped.len()
    );

    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    export(&part, &name, OutputFormat::LegacyJson, output)?;
    export(
        &part,
        &name,
        OutputFormat::StapleCsv,
        output.with_extension("csv"),
    )?;
    Ok(())
}
