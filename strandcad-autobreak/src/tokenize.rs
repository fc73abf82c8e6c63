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
//! Decomposition of an oligo into indivisible segments.
//!
//! A break can only be placed at the boundary between two tokens. Strands that carry an insertion
//! or that are too short to keep a leg on both sides of a break form a single token. Other strands
//! keep a leg at each end and are cut into single bases in between.

use super::AutobreakSettings;
use strandcad_design::{ErrOperation, OligoId, Part};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens {
    pub lengths: Vec<usize>,
    /// For a loop, the length of the last token that was merged into the first one. The first
    /// token then starts `loop_shift` bases before the 5' end of the oligo.
    pub loop_shift: usize,
    pub is_loop: bool,
}

impl Tokens {
    pub fn total(&self) -> usize {
        self.lengths.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// The position in the oligo, counted in bases from the 5' end, of the boundary that precedes
    /// token `k`.
    pub fn boundary_offset(&self, k: usize) -> usize {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let prefix: usize = self.lengths[..k].iter().sum();
        (prefix + total - self.loop_shift % total) % total
    }
}

/// The tokens of a strand of `total_length` bases.
pub fn tokenize_strand(
    total_length: usize,
    has_insertion: bool,
    settings: &AutobreakSettings,
) -> Vec<usize> {
    let leg = settings.min_staple_leg_len;
    if total_length + 1 > 2 * leg && !has_insertion {
        let mut ret = Vec::with_capacity(total_length - 2 * leg + 2);
        ret.push(leg);
        ret.extend(std::iter::repeat(1).take(total_length - 2 * leg));
        ret.push(leg);
        ret
    } else {
        vec![total_length]
    }
}

/// Tokenize oligo `oligo`. Returns empty tokens if the oligo is too short to be broken.
pub fn tokenize_oligo(
    part: &Part,
    oligo: OligoId,
    settings: &AutobreakSettings,
) -> Result<Tokens, ErrOperation> {
    let is_loop = part.oligo_is_loop(oligo)?;
    let mut lengths = Vec::new();
    for id in part.oligo_strands(oligo)? {
        let strand = part
            .strand(id)
            .ok_or(ErrOperation::StrandDoesNotExist(id))?;
        lengths.extend(tokenize_strand(
            strand.total_length(),
            strand.has_insertion(),
            settings,
        ));
    }
    let total: usize = lengths.iter().sum();
    if total < settings.min_oligo_len() {
        return Ok(Tokens::default());
    }
    let mut loop_shift = 0;
    if is_loop && lengths.len() > 1 {
        if let Some(last) = lengths.pop() {
            lengths[0] += last;
            loop_shift = last;
        }
    }
    Ok(Tokens {
        lengths,
        loop_shift,
        is_loop,
    })
}
