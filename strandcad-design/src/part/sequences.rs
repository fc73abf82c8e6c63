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
//! Sequences of oligos and strands.

use super::*;
use crate::sequence::{reverse_complement, BLANK_BASE, UNKNOWN_BASE};

impl Part {
    /// Distribute `sequence` along the strands of oligo `id` from 5' to 3', or clear the sequence
    /// of the oligo if `sequence` is `None`.
    ///
    /// Missing bases are set to `?` and extra bases are ignored. The strands of the other strand
    /// type that pair with the oligo receive the reverse complement of the sequence, index by
    /// index.
    pub fn apply_sequence(&mut self, id: OligoId, sequence: Option<&str>) -> Result<(), ErrOperation> {
        self.transaction("apply sequence", |part| {
            let chain = part.oligo_strands(id)?;
            let bases = sequence.map(|s| s.chars().collect::<Vec<char>>());
            let mut offset = 0;
            for strand_id in chain.iter() {
                let total = part.strands.expect_get(strand_id).total_length();
                let strand_seq = bases.as_ref().map(|bases| {
                    (offset..offset + total)
                        .map(|i| bases.get(i).cloned().unwrap_or(UNKNOWN_BASE))
                        .collect::<String>()
                });
                offset += total;
                part.update_strand_raw(*strand_id, |s| s.sequence = strand_seq);
            }
            let mut paired = Vec::new();
            for strand_id in chain.iter() {
                let s = part.strands.expect_get(strand_id);
                let set = part.expect_strand_set(s.helix, s.strand_type.complement());
                for other in set.find_overlapping(&part.strands, s.low, s.high) {
                    if !paired.contains(&other) {
                        paired.push(other);
                    }
                }
            }
            for other in paired {
                let seq = part.paired_sequence(other);
                part.update_strand_raw(other, |s| s.sequence = seq);
            }
            Ok(())
        })
    }

    /// The sequence of strand `id` deduced from the sequences of the strands it pairs with.
    /// Unpaired bases are blank, and `None` is returned if every base is blank.
    fn paired_sequence(&self, id: StrandId) -> Option<String> {
        let strand = self.strands.expect_get(&id);
        let other_type = strand.strand_type.complement();
        let mut ret = String::with_capacity(strand.total_length());
        let mut any_base = false;
        for (idx, nb_bases) in strand.bases_5_to_3() {
            let partner_bases = self
                .strand_at(strand.helix, other_type, idx)
                .and_then(|other| self.strands.expect_get(&other).bases_at(idx))
                .map(|bases| reverse_complement(&bases));
            let mut chars = partner_bases.iter().flat_map(|s| s.chars());
            for _ in 0..nb_bases {
                let c = chars.next().unwrap_or(BLANK_BASE);
                any_base |= c != BLANK_BASE;
                ret.push(c);
            }
        }
        if any_base {
            Some(ret)
        } else {
            None
        }
    }

    pub fn strand_sequence(&self, id: StrandId) -> Result<Option<&str>, ErrOperation> {
        Ok(self.get_strand(id)?.sequence.as_deref())
    }

    /// The sequence of oligo `id`, if every one of its strands has a sequence.
    pub fn oligo_sequence(&self, id: OligoId) -> Result<Option<String>, ErrOperation> {
        let mut ret = String::new();
        for strand_id in self.oligo_strands(id)? {
            match self.strands.expect_get(&strand_id).sequence.as_ref() {
                Some(seq) => ret.push_str(seq),
                None => return Ok(None),
            }
        }
        Ok(Some(ret))
    }

    /// The bases of strand `id` index by index, from the low index to the high index.
    ///
    /// Each entry holds the index, the base read at that index (blank for a skip), and the bases
    /// inserted at that index. Returns `None` if the strand has no sequence.
    pub fn sequence_list(
        &self,
        id: StrandId,
    ) -> Result<Option<Vec<(isize, char, String)>>, ErrOperation> {
        let strand = self.get_strand(id)?;
        if strand.sequence.is_none() {
            return Ok(None);
        }
        let mut ret = Vec::with_capacity(strand.length());
        for idx in strand.low..=strand.high {
            let mut bases: Vec<char> = strand.bases_at(idx).unwrap_or_default().chars().collect();
            if !strand.is_drawn_5_to_3() {
                bases.reverse();
            }
            let base = bases.first().cloned().unwrap_or(BLANK_BASE);
            let inserted = bases.iter().skip(1).collect();
            ret.push((idx, base, inserted));
        }
        Ok(Some(ret))
    }
}
