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
//! Operations on single strands: creation, removal, resizing, insertions, split and merge.

use super::*;

impl Part {
    /// Create a strand spanning `[low, high]` on a strand set. The new strand gets a new oligo.
    pub fn create_strand(
        &mut self,
        helix: usize,
        strand_type: StrandType,
        low: isize,
        high: isize,
    ) -> Result<StrandId, ErrOperation> {
        self.transaction("create strand", |part| {
            part.create_strand_unchecked(helix, strand_type, low, high)
        })
    }

    pub(super) fn create_strand_unchecked(
        &mut self,
        helix: usize,
        strand_type: StrandType,
        low: isize,
        high: isize,
    ) -> Result<StrandId, ErrOperation> {
        if low > high || low < 0 || high >= self.max_base {
            return Err(ErrOperation::InvalidRange { low, high });
        }
        let set = self.get_helix(helix)?.strand_set(strand_type);
        if set.insertion_position(&self.strands, low, high).is_none() {
            return Err(ErrOperation::RangeOccupied { low, high });
        }
        let id = self.fresh_strand_id();
        let oligo = self.fresh_oligo(strand_type, id, (high - low + 1) as usize);
        let strand = Strand::new(id, helix, strand_type, low, high, oligo.id);
        self.add_oligo_raw(oligo);
        self.add_strand_raw(strand);
        Ok(id)
    }

    /// Remove a strand. Its oligo is split in two if the strand was in the middle of the oligo.
    pub fn remove_strand(&mut self, id: StrandId) -> Result<(), ErrOperation> {
        self.transaction("remove strand", |part| part.remove_strand_unchecked(id))
    }

    pub(super) fn remove_strand_unchecked(&mut self, id: StrandId) -> Result<(), ErrOperation> {
        let strand = self.get_strand(id)?.clone();
        let oligo = self.oligos.expect_get(&strand.oligo).clone();
        let total = strand.total_length();
        let self_loop = strand.connection_3p == Some(id);
        let upstream = strand.connection_5p.filter(|_| !self_loop);
        let downstream = strand.connection_3p.filter(|_| !self_loop);
        if let Some(up) = upstream {
            self.update_strand_raw(up, |s| s.connection_3p = None);
        }
        if let Some(down) = downstream {
            self.update_strand_raw(down, |s| s.connection_5p = None);
        }
        match (upstream, downstream) {
            (_, Some(down)) if oligo.is_loop => {
                self.update_oligo_raw(oligo.id, |o| {
                    o.is_loop = false;
                    o.strand_5p = down;
                    o.length -= total;
                });
            }
            (Some(_), Some(down)) => {
                let new_oligo = self.fresh_oligo(strand.strand_type, down, 0);
                let new_id = new_oligo.id;
                self.add_oligo_raw(new_oligo);
                let length = self.relabel_chain(down, new_id);
                self.update_oligo_raw(new_id, |o| o.length = length);
                self.update_oligo_raw(oligo.id, |o| o.length -= total + length);
            }
            (None, Some(down)) => {
                self.update_oligo_raw(oligo.id, |o| {
                    o.strand_5p = down;
                    o.length -= total;
                });
            }
            (Some(_), None) => {
                self.update_oligo_raw(oligo.id, |o| o.length -= total);
            }
            (None, None) => {
                self.remove_oligo_raw(oligo.id);
            }
        }
        self.remove_strand_raw(id);
        Ok(())
    }

    /// Move the ends of a strand to `[low, high]`.
    ///
    /// An end that carries a connection cannot be moved. Insertions outside of the new range are
    /// discarded and the sequence of the strand is cleared.
    pub fn resize_strand(
        &mut self,
        id: StrandId,
        low: isize,
        high: isize,
    ) -> Result<(), ErrOperation> {
        self.transaction("resize strand", |part| {
            let strand = part.get_strand(id)?.clone();
            if low > high || low < 0 || high >= part.max_base {
                return Err(ErrOperation::InvalidRange { low, high });
            }
            if low != strand.low && strand.connection_low().is_some() {
                return Err(ErrOperation::ConnectedEnd {
                    strand: id,
                    idx: strand.low,
                });
            }
            if high != strand.high && strand.connection_high().is_some() {
                return Err(ErrOperation::ConnectedEnd {
                    strand: id,
                    idx: strand.high,
                });
            }
            let set = part.expect_strand_set(strand.helix, strand.strand_type);
            let (below, above) = set.neighbours(&part.strands, id);
            let floor = below.map(|b| part.strands.expect_get(&b).high).unwrap_or(-1);
            let ceiling = above
                .map(|a| part.strands.expect_get(&a).low)
                .unwrap_or(part.max_base);
            // The strand may not jump over its neighbours.
            if low <= floor || high >= ceiling {
                return Err(ErrOperation::RangeOccupied { low, high });
            }
            let old_total = strand.total_length();
            part.update_strand_raw(id, |s| {
                s.low = low;
                s.high = high;
                s.insertions.retain(|idx, _| low <= *idx && *idx <= high);
                s.sequence = None;
            });
            let new_total = part.strands.expect_get(&id).total_length();
            part.update_oligo_raw(strand.oligo, |o| {
                o.length = o.length + new_total - old_total;
            });
            Ok(())
        })
    }

    /// Add an insertion of `length` bases at `idx`, or a skip if `length` is -1. An existing
    /// insertion at `idx` is replaced.
    pub fn add_insertion(
        &mut self,
        id: StrandId,
        idx: isize,
        length: isize,
    ) -> Result<(), ErrOperation> {
        self.transaction("add insertion", |part| {
            let strand = part.get_strand(id)?;
            if !strand.contains(idx) {
                return Err(ErrOperation::IndexNotOnStrand { strand: id, idx });
            }
            if length < -1 || length == 0 {
                return Err(ErrOperation::InvalidInsertion { idx, length });
            }
            let previous = strand.insertions.get(&idx).cloned().unwrap_or(0);
            let oligo = strand.oligo;
            part.update_strand_raw(id, |s| {
                s.insertions.insert(idx, length);
                s.sequence = None;
            });
            part.update_oligo_raw(oligo, |o| {
                o.length = (o.length as isize + length - previous) as usize;
            });
            Ok(())
        })
    }

    pub fn remove_insertion(&mut self, id: StrandId, idx: isize) -> Result<(), ErrOperation> {
        self.transaction("remove insertion", |part| {
            let strand = part.get_strand(id)?;
            let previous = strand
                .insertions
                .get(&idx)
                .cloned()
                .ok_or(ErrOperation::NoInsertion { strand: id, idx })?;
            let oligo = strand.oligo;
            part.update_strand_raw(id, |s| {
                s.insertions.remove(&idx);
                s.sequence = None;
            });
            part.update_oligo_raw(oligo, |o| {
                o.length = (o.length as isize - previous) as usize;
            });
            Ok(())
        })
    }

    /// Split a strand so that `idx` becomes the 3' end of the 5' fragment.
    ///
    /// Returns the 5' and 3' fragments, which both get new identifiers. The 5' fragment keeps the
    /// oligo and the strands downstream of the split get a new oligo, unless the oligo was a loop
    /// in which case it is opened at the split.
    pub fn split_strand(
        &mut self,
        id: StrandId,
        idx: isize,
    ) -> Result<(StrandId, StrandId), ErrOperation> {
        self.transaction("split strand", |part| part.split_strand_unchecked(id, idx))
    }

    pub(super) fn split_strand_unchecked(
        &mut self,
        id: StrandId,
        idx: isize,
    ) -> Result<(StrandId, StrandId), ErrOperation> {
        let strand = self.get_strand(id)?.clone();
        if !strand.can_split(idx) {
            return Err(ErrOperation::IllegalSplit { strand: id, idx });
        }
        let ((low5, high5), (low3, high3)) = if strand.is_drawn_5_to_3() {
            ((strand.low, idx), (idx + 1, strand.high))
        } else {
            ((idx, strand.high), (strand.low, idx - 1))
        };
        let id5 = self.fresh_strand_id();
        let id3 = self.fresh_strand_id();
        let self_loop = strand.connection_3p == Some(id);

        let mut prime5 = Strand::new(id5, strand.helix, strand.strand_type, low5, high5, strand.oligo);
        let mut prime3 = Strand::new(id3, strand.helix, strand.strand_type, low3, high3, strand.oligo);
        if self_loop {
            prime5.connection_5p = Some(id3);
            prime3.connection_3p = Some(id5);
        } else {
            prime5.connection_5p = strand.connection_5p;
            prime3.connection_3p = strand.connection_3p;
        }
        for (i, len) in strand.insertions.iter() {
            if prime5.contains(*i) {
                prime5.insertions.insert(*i, *len);
            } else {
                prime3.insertions.insert(*i, *len);
            }
        }
        if let Some(seq) = strand.sequence.as_ref() {
            let nb_5 = prime5.total_length();
            prime5.sequence = Some(seq.chars().take(nb_5).collect());
            prime3.sequence = Some(seq.chars().skip(nb_5).collect());
        }

        self.remove_strand_raw(id);
        self.add_strand_raw(prime5);
        self.add_strand_raw(prime3);
        if !self_loop {
            if let Some(up) = strand.connection_5p {
                self.update_strand_raw(up, |s| s.connection_3p = Some(id5));
            }
            if let Some(down) = strand.connection_3p {
                self.update_strand_raw(down, |s| s.connection_5p = Some(id3));
            }
        }

        let oligo = self.oligos.expect_get(&strand.oligo).clone();
        if oligo.is_loop {
            self.update_oligo_raw(oligo.id, |o| {
                o.is_loop = false;
                o.strand_5p = id3;
            });
        } else {
            let new_oligo = self.fresh_oligo(strand.strand_type, id3, 0);
            let new_id = new_oligo.id;
            self.add_oligo_raw(new_oligo);
            let length = self.relabel_chain(id3, new_id);
            self.update_oligo_raw(new_id, |o| o.length = length);
            self.update_oligo_raw(oligo.id, |o| {
                if o.strand_5p == id {
                    o.strand_5p = id5;
                }
                o.length -= length;
            });
        }
        Ok((id5, id3))
    }

    /// Merge two adjacent strands of the same strand set into one strand.
    ///
    /// The touching ends must not carry connections. The merged strand belongs to the oligo of
    /// `priority`. If both strands belong to the same oligo, the merge closes it into a loop.
    pub fn merge_strands(
        &mut self,
        priority: StrandId,
        other: StrandId,
    ) -> Result<StrandId, ErrOperation> {
        self.transaction("merge strands", |part| {
            part.merge_strands_unchecked(priority, other)
        })
    }

    fn merge_strands_unchecked(
        &mut self,
        priority: StrandId,
        other: StrandId,
    ) -> Result<StrandId, ErrOperation> {
        let a = self.get_strand(priority)?.clone();
        let b = self.get_strand(other)?.clone();
        let illegal = ErrOperation::IllegalMerge {
            strand: priority,
            other,
        };
        if priority == other || a.helix != b.helix || a.strand_type != b.strand_type {
            return Err(illegal);
        }
        let (lower, upper) = if a.low < b.low { (&a, &b) } else { (&b, &a) };
        if lower.high + 1 != upper.low {
            return Err(illegal);
        }
        let (x, y) = if a.is_drawn_5_to_3() {
            (lower.clone(), upper.clone())
        } else {
            (upper.clone(), lower.clone())
        };
        if x.connection_3p.is_some() || y.connection_5p.is_some() {
            return Err(illegal);
        }

        let id = self.fresh_strand_id();
        let remap = |c: Option<StrandId>| {
            c.map(|s| if s == x.id || s == y.id { id } else { s })
        };
        let mut merged = Strand::new(id, a.helix, a.strand_type, lower.low, upper.high, a.oligo);
        merged.connection_5p = remap(x.connection_5p);
        merged.connection_3p = remap(y.connection_3p);
        merged.insertions = x.insertions.clone();
        merged.insertions.extend(y.insertions.iter());
        if let (Some(s1), Some(s2)) = (x.sequence.as_ref(), y.sequence.as_ref()) {
            merged.sequence = Some(format!("{}{}", s1, s2));
        }

        let oligo_x = self.oligos.expect_get(&x.oligo).clone();
        self.remove_strand_raw(x.id);
        self.remove_strand_raw(y.id);
        self.add_strand_raw(merged.clone());
        if let Some(up) = merged.connection_5p.filter(|s| *s != id) {
            self.update_strand_raw(up, |s| s.connection_3p = Some(id));
        }
        if let Some(down) = merged.connection_3p.filter(|s| *s != id) {
            self.update_strand_raw(down, |s| s.connection_5p = Some(id));
        }

        if x.oligo == y.oligo {
            self.update_oligo_raw(x.oligo, |o| {
                o.is_loop = true;
                o.strand_5p = id;
            });
        } else {
            let kept = a.oligo;
            let discarded = b.oligo;
            let start = if oligo_x.strand_5p == x.id {
                id
            } else {
                oligo_x.strand_5p
            };
            self.remove_oligo_raw(discarded);
            let length = self.relabel_chain(start, kept);
            self.update_oligo_raw(kept, |o| {
                o.strand_5p = start;
                o.length = length;
            });
        }
        Ok(id)
    }

    /// Merge the strand with the neighbour touching its end `idx`.
    pub fn merge_at(&mut self, id: StrandId, idx: isize) -> Result<StrandId, ErrOperation> {
        let strand = self.get_strand(id)?;
        let (low_neighbour, high_neighbour) = self.strand_neighbours(id)?;
        let neighbour = if idx == strand.low {
            low_neighbour.filter(|n| self.strands.expect_get(n).high + 1 == strand.low)
        } else if idx == strand.high {
            high_neighbour.filter(|n| self.strands.expect_get(n).low == strand.high + 1)
        } else {
            None
        };
        let other = neighbour.ok_or(ErrOperation::NoNeighbourToMerge { strand: id, idx })?;
        self.merge_strands(id, other)
    }

    pub fn set_oligo_color(&mut self, id: OligoId, color: u32) -> Result<(), ErrOperation> {
        self.transaction("set oligo color", |part| {
            part.get_oligo(id)?;
            part.update_oligo_raw(id, |o| o.color = color & 0xFF_FFFF);
            Ok(())
        })
    }

    /// Make `strand` the strand at which the loop oligo `id` is read.
    pub fn rotate_loop_start(&mut self, id: OligoId, strand: StrandId) -> Result<(), ErrOperation> {
        self.transaction("rotate loop", |part| {
            if !part.get_oligo(id)?.is_loop {
                return Err(ErrOperation::NotALoop(id));
            }
            if part.get_strand(strand)?.oligo != id {
                return Err(ErrOperation::StrandNotInOligo { strand, oligo: id });
            }
            part.update_oligo_raw(id, |o| o.strand_5p = strand);
            Ok(())
        })
    }
}
