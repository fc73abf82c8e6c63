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
//! Cross-overs between strands.

use super::*;

/// A position at which a cross-over between two neighbouring helices can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotentialXover {
    pub neighbour: usize,
    pub index: isize,
    pub strand_type: StrandType,
    /// True if the cross-over leaves from the low end of a strand on the helix that was queried.
    pub is_low_idx: bool,
}

impl Part {
    /// The positions at which a cross-over can be created between `helix` and one of its
    /// neighbours.
    ///
    /// A position is listed if neither strand set has a cross-over leaving from that index. If
    /// `idx` is given, only the lattice period containing `idx` is considered.
    pub fn potential_crossover_list(
        &self,
        helix: usize,
        idx: Option<isize>,
    ) -> Result<Vec<PotentialXover>, ErrOperation> {
        let step = self.lattice.step() as isize;
        let period_starts: Vec<isize> = match idx {
            Some(idx) => vec![idx.div_euclid(step) * step],
            None => (0..self.max_base).step_by(step as usize).collect(),
        };
        let neighbours = self.neighbour_helices(helix)?;
        let this = self.get_helix(helix)?;
        let mut ret = Vec::new();
        for (sites, neighbour) in self.lattice.crossover_sites().iter().zip(neighbours) {
            let neighbour = match neighbour.and_then(|n| self.helices.get(&n)) {
                Some(n) => n,
                None => continue,
            };
            for strand_type in StrandType::ALL {
                let set = this.strand_set(strand_type);
                let other_set = neighbour.strand_set(strand_type);
                for is_low_idx in [true, false] {
                    for start in period_starts.iter() {
                        for offset in sites.sites(strand_type, is_low_idx) {
                            let index = start + offset;
                            if index < 0 || index >= self.max_base {
                                continue;
                            }
                            if set.has_no_strand_at_or_no_xover(&self.strands, index)
                                && other_set.has_no_strand_at_or_no_xover(&self.strands, index)
                            {
                                ret.push(PotentialXover {
                                    neighbour: neighbour.num,
                                    index,
                                    strand_type,
                                    is_low_idx,
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(ret)
    }

    /// Return the index of the cross-over position nearest to `idx + delta` to which the end
    /// `idx` of `strand` could be moved, or `None` if there is no such position.
    pub fn xover_snap_to(&self, strand: StrandId, idx: isize, delta: isize) -> Option<isize> {
        let s = self.strands.get(&strand)?;
        let is_low_idx = if idx == s.low {
            true
        } else if idx == s.high {
            false
        } else {
            return None;
        };
        let (low_neighbour, high_neighbour) = self.strand_neighbours(strand).ok()?;
        let (min, max) = if is_low_idx {
            let min = low_neighbour
                .map(|n| self.strands.expect_get(&n).high + 1)
                .unwrap_or(0);
            (min, s.high)
        } else {
            let max = high_neighbour
                .map(|n| self.strands.expect_get(&n).low - 1)
                .unwrap_or(self.max_base - 1);
            (s.low, max)
        };
        let target = idx + delta;
        self.potential_crossover_list(s.helix, None)
            .ok()?
            .into_iter()
            .filter(|p| p.strand_type == s.strand_type && p.is_low_idx == is_low_idx)
            .map(|p| p.index)
            .filter(|i| min <= *i && *i <= max)
            .min_by_key(|i| ((i - target).abs(), *i))
    }

    /// Connect the base `idx5p` of `strand5p` to the base `idx3p` of `strand3p`.
    ///
    /// The strands are split first if needed so that `idx5p` becomes a 3' end and `idx3p` a 5'
    /// end. Returns the strands that are connected by the new cross-over.
    pub fn create_xover(
        &mut self,
        strand5p: StrandId,
        idx5p: isize,
        strand3p: StrandId,
        idx3p: isize,
    ) -> Result<(StrandId, StrandId), ErrOperation> {
        self.transaction("create xover", |part| {
            part.create_xover_unchecked(strand5p, idx5p, strand3p, idx3p)
        })
    }

    pub(super) fn create_xover_unchecked(
        &mut self,
        strand5p: StrandId,
        idx5p: isize,
        strand3p: StrandId,
        idx3p: isize,
    ) -> Result<(StrandId, StrandId), ErrOperation> {
        let s5 = self.get_strand(strand5p)?.clone();
        let s3 = self.get_strand(strand3p)?.clone();
        if s5.strand_type != s3.strand_type {
            return Err(ErrOperation::StrandTypeMismatch {
                prime5: s5.strand_type,
                prime3: s3.strand_type,
            });
        }
        if !s5.contains(idx5p) {
            return Err(ErrOperation::IndexNotOnStrand {
                strand: strand5p,
                idx: idx5p,
            });
        }
        if !s3.contains(idx3p) {
            return Err(ErrOperation::IndexNotOnStrand {
                strand: strand3p,
                idx: idx3p,
            });
        }
        let strand_type = s5.strand_type;

        if s5.idx3p() != idx5p {
            self.split_strand_unchecked(strand5p, idx5p)?;
        }

        let s3 = self.strand_at_or_err(s3.helix, strand_type, idx3p)?;
        let s3 = self.strands.expect_get(&s3).clone();
        let prime3 = if s3.idx5p() == idx3p {
            s3.id
        } else {
            let split_idx = if s3.is_drawn_5_to_3() {
                idx3p - 1
            } else {
                idx3p + 1
            };
            self.split_strand_unchecked(s3.id, split_idx)?.1
        };
        let prime5 = self.strand_at_or_err(s5.helix, strand_type, idx5p)?;

        let p5 = self.strands.expect_get(&prime5);
        if p5.idx3p() != idx5p || p5.connection_3p.is_some() {
            return Err(ErrOperation::ConnectedEnd {
                strand: prime5,
                idx: idx5p,
            });
        }
        let p3 = self.strands.expect_get(&prime3);
        if p3.idx5p() != idx3p || p3.connection_5p.is_some() {
            return Err(ErrOperation::ConnectedEnd {
                strand: prime3,
                idx: idx3p,
            });
        }
        self.connect(prime5, prime3);
        Ok((prime5, prime3))
    }

    fn strand_at_or_err(
        &self,
        helix: usize,
        strand_type: StrandType,
        idx: isize,
    ) -> Result<StrandId, ErrOperation> {
        self.strand_at(helix, strand_type, idx)
            .ok_or(ErrOperation::InvalidRange {
                low: idx,
                high: idx,
            })
    }

    /// Link the 3' end of `prime5` to the 5' end of `prime3` and merge their oligos.
    fn connect(&mut self, prime5: StrandId, prime3: StrandId) {
        let oligo5 = self.strands.expect_get(&prime5).oligo;
        let oligo3 = self.strands.expect_get(&prime3).oligo;
        self.update_strand_raw(prime5, |s| s.connection_3p = Some(prime3));
        self.update_strand_raw(prime3, |s| s.connection_5p = Some(prime5));
        if oligo5 == oligo3 {
            self.update_oligo_raw(oligo5, |o| o.is_loop = true);
        } else {
            let added = self.oligos.expect_get(&oligo3).length;
            self.remove_oligo_raw(oligo3);
            self.relabel_chain(prime3, oligo5);
            self.update_oligo_raw(oligo5, |o| o.length += added);
        }
    }

    /// Remove the cross-over from the 3' end of `strand5p` to the 5' end of `strand3p`.
    ///
    /// The strands downstream of the cross-over get a new oligo, unless the oligo was a loop in
    /// which case it is opened at the cross-over.
    pub fn remove_xover(
        &mut self,
        strand5p: StrandId,
        strand3p: StrandId,
    ) -> Result<(), ErrOperation> {
        self.transaction("remove xover", |part| {
            part.remove_xover_unchecked(strand5p, strand3p)
        })
    }

    pub(super) fn remove_xover_unchecked(
        &mut self,
        strand5p: StrandId,
        strand3p: StrandId,
    ) -> Result<(), ErrOperation> {
        let s5 = self.get_strand(strand5p)?;
        let s3 = self.get_strand(strand3p)?;
        if s5.connection_3p != Some(strand3p) || s3.connection_5p != Some(strand5p) {
            return Err(ErrOperation::NotConnected {
                prime5: strand5p,
                prime3: strand3p,
            });
        }
        let oligo = self.oligos.expect_get(&s5.oligo).clone();
        self.update_strand_raw(strand5p, |s| s.connection_3p = None);
        self.update_strand_raw(strand3p, |s| s.connection_5p = None);
        if oligo.is_loop {
            self.update_oligo_raw(oligo.id, |o| {
                o.is_loop = false;
                o.strand_5p = strand3p;
            });
        } else {
            let new_oligo = self.fresh_oligo(oligo.strand_type, strand3p, 0);
            let new_id = new_oligo.id;
            self.add_oligo_raw(new_oligo);
            let length = self.relabel_chain(strand3p, new_id);
            self.update_oligo_raw(new_id, |o| o.length = length);
            self.update_oligo_raw(oligo.id, |o| o.length -= length);
        }
        Ok(())
    }
}
