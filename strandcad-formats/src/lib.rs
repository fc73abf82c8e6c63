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
//! Reading and writing designs in other file formats.

#[macro_use]
extern crate serde_derive;
extern crate serde;

use std::path::Path;
use strandcad_design::{ErrOperation, Part, StrandType};
use strum::Display;

pub mod legacy;
pub mod staple_csv;

pub use legacy::{FromLegacy, LegacyDesign, LegacyVStrand};


/// The file formats to which a part can be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OutputFormat {
    LegacyJson,
    StapleCsv,
}

#[derive(Debug)]
pub enum FormatError {
    Json(serde_json::Error),
    IOError(std::io::Error),
    /// The arrays of a helix do not all have the length of the helices.
    InconsistentLength {
        num: isize,
        expected: usize,
        found: usize,
    },
    InvalidHelixNumber(isize),
    /// A base refers to a neighbour that does not refer back to it, or that is not the end of a
    /// strand.
    DanglingConnection {
        num: usize,
        idx: isize,
        strand_type: StrandType,
    },
    Design(ErrOperation),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid json: {}", e),
            Self::IOError(e) => write!(f, "{}", e),
            Self::InconsistentLength {
                num,
                expected,
                found,
            } => write!(
                f,
                "helix {} has arrays of length {} instead of {}",
                num, found, expected
            ),
            Self::InvalidHelixNumber(n) => write!(f, "invalid helix number {}", n),
            Self::DanglingConnection {
                num,
                idx,
                strand_type,
            } => write!(
                f,
                "the {} base {} of helix {} has a dangling connection",
                strand_type, idx, num
            ),
            Self::Design(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for FormatError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl From<ErrOperation> for FormatError {
    fn from(e: ErrOperation) -> Self {
        Self::Design(e)
    }
}

/// Read a part from a legacy json file.
pub fn load_legacy<P: AsRef<Path>>(path: P) -> Result<Part, FormatError> {
    let json = std::fs::read_to_string(path)?;
    let design: LegacyDesign = serde_json::from_str(&json)?;
    Part::from_legacy(design)
}

/// Write `part` to `path` in `format`.
pub fn export<P: AsRef<Path>>(
    part: &Part,
    name: &str,
    format: OutputFormat,
    path: P,
) -> Result<(), FormatError> {
    let content = match format {
        OutputFormat::LegacyJson => serde_json::to_string(&LegacyDesign::from_part(part, name))?,
        OutputFormat::StapleCsv => staple_csv::staple_csv(part),
    };
    std::fs::write(path, content)?;
    log::info!("{} written", format);
    Ok(())
}
