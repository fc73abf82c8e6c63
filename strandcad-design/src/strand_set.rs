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
use super::{Strand, StrandId, StrandType, Strands};
use std::sync::atomic::{AtomicUsize, Ordering};

/// The strands of one type on one helix, sorted by increasing `low` index.
///
/// The strands themselves live in the part's `Strands` collection, the set only holds their
/// identifiers. All queries are binary searches over the sorted identifiers. The position of the
/// last strand that was looked up or inserted is kept as a hint and is always checked before being
/// used.
#[derive(Debug)]
pub struct StrandSet {
    helix: usize,
    strand_type: StrandType,
    ids: Vec<StrandId>,
    last_position: AtomicUsize,
}

impl Clone for StrandSet {
    fn clone(&self) -> Self {
        Self {
            helix: self.helix,
            strand_type: self.strand_type,
            ids: self.ids.clone(),
            last_position: AtomicUsize::new(self.last_position.load(Ordering::Relaxed)),
        }
    }
}

impl StrandSet {
    pub(crate) fn new(helix: usize, strand_type: StrandType) -> Self {
        Self {
            helix,
            strand_type,
            ids: Vec::new(),
            last_position: AtomicUsize::new(0),
        }
    }

    pub fn helix(&self) -> usize {
        self.helix
    }

    pub fn strand_type(&self) -> StrandType {
        self.strand_type
    }

    pub fn is_drawn_5_to_3(&self) -> bool {
        self.strand_type.is_drawn_5_to_3(self.helix)
    }

    pub fn ids(&self) -> &[StrandId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn strand<'a>(&self, strands: &'a Strands, pos: usize) -> &'a Strand {
        strands.expect_get(&self.ids[pos])
    }

    /// The position of the first strand whose high end is at least `idx`.
    fn first_not_below(&self, strands: &Strands, idx: isize) -> usize {
        self.ids
            .partition_point(|id| strands.expect_get(id).high < idx)
    }

    /// The position of strand `id` in the set.
    pub fn position_of(&self, strands: &Strands, id: StrandId) -> Option<usize> {
        let hint = self.last_position.load(Ordering::Relaxed);
        if self.ids.get(hint) == Some(&id) {
            return Some(hint);
        }
        let low = strands.get(&id)?.low;
        let pos = self
            .ids
            .partition_point(|s| strands.expect_get(s).low < low);
        if self.ids.get(pos) == Some(&id) {
            self.last_position.store(pos, Ordering::Relaxed);
            Some(pos)
        } else {
            None
        }
    }

    pub fn contains(&self, strands: &Strands, id: StrandId) -> bool {
        self.position_of(strands, id).is_some()
    }

    /// The strand covering `idx`, if any.
    pub fn get_strand(&self, strands: &Strands, idx: isize) -> Option<StrandId> {
        let pos = self.first_not_below(strands, idx);
        if pos < self.ids.len() && self.strand(strands, pos).low <= idx {
            self.last_position.store(pos, Ordering::Relaxed);
            Some(self.ids[pos])
        } else {
            None
        }
    }

    /// The strands intersecting `[low, high]`, sorted.
    pub fn find_overlapping(&self, strands: &Strands, low: isize, high: isize) -> Vec<StrandId> {
        let start = self.first_not_below(strands, low);
        self.ids[start..]
            .iter()
            .take_while(|id| strands.expect_get(id).low <= high)
            .cloned()
            .collect()
    }

    /// Return true if `idx` is not covered by a strand, or if the strand covering it has no
    /// cross-over leaving from `idx`.
    pub fn has_no_strand_at_or_no_xover(&self, strands: &Strands, idx: isize) -> bool {
        self.get_strand(strands, idx)
            .map(|id| !strands.expect_get(&id).has_xover_at(idx))
            .unwrap_or(true)
    }

    /// The bounds of the maximal empty interval containing `idx`, clamped to `[0, max_base)`.
    /// Returns `None` if `idx` is covered by a strand or is outside of the helix.
    pub fn bounds_of_empty_region_containing(
        &self,
        strands: &Strands,
        idx: isize,
        max_base: isize,
    ) -> Option<(isize, isize)> {
        if idx < 0 || idx >= max_base {
            return None;
        }
        let pos = self.first_not_below(strands, idx);
        if pos < self.ids.len() && self.strand(strands, pos).low <= idx {
            return None;
        }
        let low = if pos > 0 {
            self.strand(strands, pos - 1).high + 1
        } else {
            0
        };
        let high = if pos < self.ids.len() {
            self.strand(strands, pos).low - 1
        } else {
            max_base - 1
        };
        Some((low, high))
    }

    /// The strands immediately below and above strand `id` in the set.
    pub fn neighbours(
        &self,
        strands: &Strands,
        id: StrandId,
    ) -> (Option<StrandId>, Option<StrandId>) {
        match self.position_of(strands, id) {
            Some(pos) => (
                pos.checked_sub(1).map(|p| self.ids[p]),
                self.ids.get(pos + 1).cloned(),
            ),
            None => (None, None),
        }
    }

    /// Return the position at which a strand spanning `[low, high]` would be inserted, or `None`
    /// if the range intersects a strand of the set.
    pub fn insertion_position(&self, strands: &Strands, low: isize, high: isize) -> Option<usize> {
        let fits_at = |pos: usize| {
            let after_previous = pos == 0 || self.strand(strands, pos - 1).high < low;
            let before_next = pos == self.ids.len() || self.strand(strands, pos).low > high;
            after_previous && before_next
        };
        let hint = self.last_position.load(Ordering::Relaxed);
        if hint <= self.ids.len() && fits_at(hint) {
            return Some(hint);
        }
        let pos = self.first_not_below(strands, low);
        if fits_at(pos) {
            Some(pos)
        } else {
            None
        }
    }

    /// Insert `id` in the set. The caller must have added the strand to `strands`.
    pub(crate) fn insert(&mut self, strands: &Strands, id: StrandId) -> bool {
        let s = strands.expect_get(&id);
        match self.insertion_position(strands, s.low, s.high) {
            Some(pos) => {
                self.ids.insert(pos, id);
                self.last_position.store(pos, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Remove `id` from the set. Must be called while the strand is still in `strands`.
    pub(crate) fn remove(&mut self, strands: &Strands, id: StrandId) -> bool {
        match self.position_of(strands, id) {
            Some(pos) => {
                self.ids.remove(pos);
                self.last_position.store(pos, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Return true if the strands of the set are sorted and pairwise disjoint.
    pub fn is_sorted_and_disjoint(&self, strands: &Strands) -> bool {
        self.ids.windows(2).all(|w| {
            let a = strands.expect_get(&w[0]);
            let b = strands.expect_get(&w[1]);
            a.low <= a.high && a.high < b.low
        })
    }
}
