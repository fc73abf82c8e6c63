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
//! Realisation of the breaks on the part.

use strandcad_design::{ErrOperation, OligoId, Part, Strand, StrandId, StrandType};

/// A modification that breaks an oligo. Strands are designated by positions because every split
/// replaces strands by new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakAction {
    /// Split the strand covering `idx` so that `idx` becomes a 3' end.
    Split { helix: usize, idx: isize },
    /// Remove the connection from the 3' end `idx5p` on `helix5p` to the 5' end `idx3p` on
    /// `helix3p`.
    Junction {
        helix5p: usize,
        idx5p: isize,
        helix3p: usize,
        idx3p: isize,
    },
}

/// Translate break offsets, counted in bases from the 5' end of the oligo, into actions.
pub fn plan_breaks(
    part: &Part,
    oligo: OligoId,
    offsets: &[usize],
) -> Result<Vec<BreakAction>, ErrOperation> {
    let chain = part.oligo_strands(oligo)?;
    let is_loop = part.oligo_is_loop(oligo)?;
    let mut starts = Vec::with_capacity(chain.len());
    let mut acc = 0;
    for id in chain.iter() {
        starts.push(acc);
        acc += part.total_length(*id)?;
    }

    let mut ret = Vec::with_capacity(offsets.len());
    for offset in offsets.iter().cloned() {
        let i = starts.partition_point(|s| *s <= offset) - 1;
        if starts[i] == offset {
            let previous = if i > 0 {
                chain[i - 1]
            } else if is_loop {
                chain[chain.len() - 1]
            } else {
                return Err(ErrOperation::IllegalSplit {
                    strand: chain[0],
                    idx: strand(part, chain[0])?.idx5p(),
                });
            };
            let (prime5, prime3) = (strand(part, previous)?, strand(part, chain[i])?);
            ret.push(BreakAction::Junction {
                helix5p: prime5.helix,
                idx5p: prime5.idx3p(),
                helix3p: prime3.helix,
                idx3p: prime3.idx5p(),
            });
        } else {
            let s = strand(part, chain[i])?;
            let illegal = ErrOperation::IllegalSplit {
                strand: s.id,
                idx: s.idx5p(),
            };
            let (idx, rank) = s.idx_of_offset(offset - starts[i] - 1).ok_or(illegal.clone())?;
            let nb_bases = 1 + s.insertions.get(&idx).cloned().unwrap_or(0);
            if rank as isize + 1 != nb_bases {
                return Err(illegal);
            }
            ret.push(BreakAction::Split { helix: s.helix, idx });
        }
    }
    Ok(ret)
}

fn strand(part: &Part, id: StrandId) -> Result<&Strand, ErrOperation> {
    part.strand(id).ok_or(ErrOperation::StrandDoesNotExist(id))
}

fn find_strand(
    part: &Part,
    helix: usize,
    strand_type: StrandType,
    idx: isize,
) -> Result<StrandId, ErrOperation> {
    part.strand_at(helix, strand_type, idx)
        .ok_or(ErrOperation::InvalidRange {
            low: idx,
            high: idx,
        })
}

/// Apply `actions` as one macro. Either every action succeeds or the part is left unchanged.
pub fn apply_breaks(
    part: &mut Part,
    strand_type: StrandType,
    actions: &[BreakAction],
) -> Result<(), ErrOperation> {
    part.transaction("autobreak", |part| {
        for action in actions.iter() {
            match *action {
                BreakAction::Split { helix, idx } => {
                    let id = find_strand(part, helix, strand_type, idx)?;
                    part.split_strand(id, idx)?;
                }
                BreakAction::Junction {
                    helix5p,
                    idx5p,
                    helix3p,
                    idx3p,
                } => {
                    let prime5 = find_strand(part, helix5p, strand_type, idx5p)?;
                    let prime3 = find_strand(part, helix3p, strand_type, idx3p)?;
                    part.remove_xover(prime5, prime3)?;
                }
            }
        }
        Ok(())
    })
}
