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
//! Automatic breaking of long staples.
//!
//! Each staple oligo that is a loop or that is longer than the maximal staple length is cut into
//! staples whose lengths are as close as possible to a target length, without placing a break
//! closer than a minimal leg length to a cross-over.

#[macro_use]
extern crate serde_derive;
extern crate serde;

mod apply;
pub mod settings;
pub mod staple_graph;
pub mod tokenize;

pub use apply::{apply_breaks, plan_breaks, BreakAction};
pub use settings::{AutobreakSettings, SettingsError};
pub use tokenize::{tokenize_oligo, Tokens};

use strandcad_design::{utils::ERROR_COLOR, ErrOperation, OligoId, Part, StrandType};

#[cfg(test)]
mod tests;

/// The reason why an oligo was left unbroken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooShort { length: usize },
    /// The tokens do not add up to the length of the oligo. The oligo is recolored.
    LengthMismatch { expected: usize, tokens: usize },
    NoFeasibleSegmentation,
    ApplyFailed(ErrOperation),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort { length } => write!(f, "too short ({} bases)", length),
            Self::LengthMismatch { expected, tokens } => write!(
                f,
                "tokens add up to {} bases instead of {}",
                tokens, expected
            ),
            Self::NoFeasibleSegmentation => write!(f, "no segmentation satisfies the constraints"),
            Self::ApplyFailed(e) => write!(f, "could not apply breaks: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenOligo {
    pub oligo: OligoId,
    pub staple_lengths: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct BreakReport {
    pub broken: Vec<BrokenOligo>,
    pub skipped: Vec<(OligoId, SkipReason)>,
}

/// Break every staple oligo of `part` that is a loop or that is longer than the maximal staple
/// length. Each oligo is broken in its own macro, an oligo that cannot be broken is left
/// untouched and reported.
pub fn break_staples(
    part: &mut Part,
    settings: &AutobreakSettings,
) -> Result<BreakReport, SettingsError> {
    settings.validate()?;
    let mut report = BreakReport::default();
    let candidates: Vec<OligoId> = part
        .staple_oligos()
        .into_iter()
        .filter(|o| {
            part.oligo(*o)
                .map(|o| o.is_loop || o.length > settings.max_staple_len)
                .unwrap_or(false)
        })
        .collect();
    for oligo in candidates {
        match break_oligo(part, oligo, settings) {
            Ok(staple_lengths) => {
                log::info!("{} broken into {:?}", oligo, staple_lengths);
                report.broken.push(BrokenOligo {
                    oligo,
                    staple_lengths,
                })
            }
            Err(reason) => {
                log::warn!("{} was not broken: {}", oligo, reason);
                report.skipped.push((oligo, reason))
            }
        }
    }
    Ok(report)
}

/// Break one oligo and return the lengths of the resulting staples, from the first break.
pub fn break_oligo(
    part: &mut Part,
    oligo: OligoId,
    settings: &AutobreakSettings,
) -> Result<Vec<usize>, SkipReason> {
    let length = part.oligo_length(oligo).map_err(SkipReason::ApplyFailed)?;
    let strand_type = part
        .oligo(oligo)
        .map(|o| o.strand_type)
        .unwrap_or(StrandType::Staple);
    let tokens = tokenize_oligo(part, oligo, settings).map_err(SkipReason::ApplyFailed)?;
    if tokens.is_empty() {
        return Err(SkipReason::TooShort { length });
    }
    if tokens.total() != length {
        if let Err(e) = part.set_oligo_color(oligo, ERROR_COLOR) {
            log::error!("could not recolor {}: {}", oligo, e);
        }
        return Err(SkipReason::LengthMismatch {
            expected: length,
            tokens: tokens.total(),
        });
    }
    let boundaries = staple_graph::break_boundaries(&tokens, settings)
        .ok_or(SkipReason::NoFeasibleSegmentation)?;
    let offsets: Vec<usize> = boundaries
        .iter()
        .map(|k| tokens.boundary_offset(*k))
        .collect();
    let actions = plan_breaks(part, oligo, &offsets).map_err(SkipReason::ApplyFailed)?;
    apply_breaks(part, strand_type, &actions).map_err(SkipReason::ApplyFailed)?;
    Ok(staple_lengths(&offsets, length, tokens.is_loop))
}

/// The lengths of the segments delimited by `offsets`, in the order of the offsets.
fn staple_lengths(offsets: &[usize], length: usize, is_loop: bool) -> Vec<usize> {
    if is_loop {
        let n = offsets.len();
        (0..n)
            .map(|i| (offsets[(i + 1) % n] + length - offsets[i] - 1) % length + 1)
            .collect()
    } else {
        let mut bounds = vec![0];
        bounds.extend_from_slice(offsets);
        bounds.push(length);
        bounds.windows(2).map(|w| w[1] - w[0]).collect()
    }
}
