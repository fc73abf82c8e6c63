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
use super::{OligoId, StrandId, StrandType};
use std::collections::BTreeMap;

/// A contiguous run of bases `[low, high]` on one strand set.
///
/// Strands are owned by the `Part` and are only modified through its operations. The connections
/// store the identifier of the strand that comes before (5') or after (3') this strand in its
/// oligo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strand {
    pub id: StrandId,
    pub helix: usize,
    pub strand_type: StrandType,
    pub low: isize,
    pub high: isize,
    pub connection_5p: Option<StrandId>,
    pub connection_3p: Option<StrandId>,
    pub oligo: OligoId,
    /// Map from index to the number of bases inserted at that index. A length of -1 is a skip.
    pub insertions: BTreeMap<isize, isize>,
    /// The bases of the strand in 5' to 3' order, one per physical base.
    pub sequence: Option<String>,
}

impl Strand {
    pub(crate) fn new(
        id: StrandId,
        helix: usize,
        strand_type: StrandType,
        low: isize,
        high: isize,
        oligo: OligoId,
    ) -> Self {
        Self {
            id,
            helix,
            strand_type,
            low,
            high,
            connection_5p: None,
            connection_3p: None,
            oligo,
            insertions: BTreeMap::new(),
            sequence: None,
        }
    }

    pub fn is_drawn_5_to_3(&self) -> bool {
        self.strand_type.is_drawn_5_to_3(self.helix)
    }

    pub fn idxs(&self) -> (isize, isize) {
        (self.low, self.high)
    }

    pub fn idx5p(&self) -> isize {
        if self.is_drawn_5_to_3() {
            self.low
        } else {
            self.high
        }
    }

    pub fn idx3p(&self) -> isize {
        if self.is_drawn_5_to_3() {
            self.high
        } else {
            self.low
        }
    }

    pub fn connection_low(&self) -> Option<StrandId> {
        if self.is_drawn_5_to_3() {
            self.connection_5p
        } else {
            self.connection_3p
        }
    }

    pub fn connection_high(&self) -> Option<StrandId> {
        if self.is_drawn_5_to_3() {
            self.connection_3p
        } else {
            self.connection_5p
        }
    }

    /// The connection leaving from the end `idx`, if `idx` is an end of the strand.
    pub fn connection_at(&self, idx: isize) -> Option<StrandId> {
        if idx == self.idx5p() {
            self.connection_5p
        } else if idx == self.idx3p() {
            self.connection_3p
        } else {
            None
        }
    }

    pub fn has_xover_at(&self, idx: isize) -> bool {
        self.connection_at(idx).is_some()
    }

    pub fn contains(&self, idx: isize) -> bool {
        self.low <= idx && idx <= self.high
    }

    pub fn overlaps(&self, low: isize, high: isize) -> bool {
        self.low <= high && low <= self.high
    }

    /// Number of indices covered by the strand.
    pub fn length(&self) -> usize {
        (self.high - self.low + 1) as usize
    }

    pub fn insertion_length(&self) -> isize {
        self.insertions.values().sum()
    }

    pub fn has_insertion(&self) -> bool {
        !self.insertions.is_empty()
    }

    /// Number of physical bases of the strand, insertions included and skips excluded.
    pub fn total_length(&self) -> usize {
        (self.length() as isize + self.insertion_length()).max(0) as usize
    }

    /// Return true if the strand can be split at `idx`, i.e. if both fragments are non empty and
    /// the 5' fragment does not end right before the 3' end.
    pub fn can_split(&self, idx: isize) -> bool {
        self.low < idx && idx < self.high && (idx - self.idx3p()).abs() > 1
    }

    /// The indices of the strand in 5' to 3' order, paired with the number of physical bases at
    /// each index.
    pub fn bases_5_to_3(&self) -> Vec<(isize, usize)> {
        let with_count = |idx: isize| {
            let count = 1 + self.insertions.get(&idx).cloned().unwrap_or(0);
            (idx, count.max(0) as usize)
        };
        if self.is_drawn_5_to_3() {
            (self.low..=self.high).map(with_count).collect()
        } else {
            (self.low..=self.high).rev().map(with_count).collect()
        }
    }

    /// Number of physical bases strictly upstream of index `idx` on this strand.
    pub fn offset_of_idx(&self, idx: isize) -> usize {
        self.bases_5_to_3()
            .into_iter()
            .take_while(|(i, _)| *i != idx)
            .map(|(_, n)| n)
            .sum()
    }

    /// Return the index that carries the `offset`-th base (0 based) of the strand, together with
    /// the number of bases that come before it at that same index.
    pub fn idx_of_offset(&self, offset: usize) -> Option<(isize, usize)> {
        let mut acc = 0;
        for (idx, n) in self.bases_5_to_3() {
            if offset < acc + n {
                return Some((idx, offset - acc));
            }
            acc += n;
        }
        None
    }

    /// The physical bases carried by index `idx`, read from the strand sequence.
    pub fn bases_at(&self, idx: isize) -> Option<String> {
        let seq = self.sequence.as_ref()?;
        if !self.contains(idx) {
            return None;
        }
        let start = self.offset_of_idx(idx);
        let n = (1 + self.insertions.get(&idx).cloned().unwrap_or(0)).max(0) as usize;
        Some(seq.chars().skip(start).take(n).collect())
    }
}

/// The strands of a part, indexed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Strands(pub(crate) BTreeMap<StrandId, Strand>);

impl Strands {
    pub fn get(&self, id: &StrandId) -> Option<&Strand> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StrandId, &Strand)> {
        self.0.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Strand> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Panics if `id` is not in the collection. Only used on identifiers read from the model.
    pub(crate) fn expect_get(&self, id: &StrandId) -> &Strand {
        match self.0.get(id) {
            Some(s) => s,
            None => panic!("Invariant violated: dangling reference to {}", id),
        }
    }
}
