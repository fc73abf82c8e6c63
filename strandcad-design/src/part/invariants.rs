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
use super::*;

impl Part {
    /// Check every structural invariant of the part.
    ///
    /// Strand sets are sorted and disjoint, connections are symmetric, every oligo is the chain
    /// of strands reached from its 5' strand and its cached length is the length of that chain.
    pub fn check_invariants(&self) -> Result<(), InternalError> {
        let broken = |msg: String| Err(InternalError::BrokenInvariant(msg));
        let mut nb_in_sets = 0;
        for helix in self.helices.values() {
            for strand_type in StrandType::ALL {
                let set = helix.strand_set(strand_type);
                for id in set.ids() {
                    match self.strands.get(id) {
                        Some(s) if s.helix == helix.num && s.strand_type == strand_type => (),
                        _ => return broken(format!("{} is misplaced in helix {}", id, helix.num)),
                    }
                }
                if !set.is_sorted_and_disjoint(&self.strands) {
                    return broken(format!("{} strands of helix {} overlap", strand_type, helix.num));
                }
                nb_in_sets += set.len();
            }
        }
        if nb_in_sets != self.strands.len() {
            return broken(String::from("some strands are not in a strand set"));
        }

        for s in self.strands.values() {
            if s.low < 0 || s.high >= self.max_base || s.low > s.high {
                return broken(format!("{} has range [{}, {}]", s.id, s.low, s.high));
            }
            if s.insertions.keys().any(|i| !s.contains(*i)) {
                return broken(format!("{} has an insertion out of its range", s.id));
            }
            if let Some(next) = s.connection_3p {
                match self.strands.get(&next) {
                    Some(n) if n.connection_5p == Some(s.id) && n.strand_type == s.strand_type => (),
                    _ => return broken(format!("{} has a broken 3' connection", s.id)),
                }
            }
            if let Some(prev) = s.connection_5p {
                match self.strands.get(&prev) {
                    Some(p) if p.connection_3p == Some(s.id) => (),
                    _ => return broken(format!("{} has a broken 5' connection", s.id)),
                }
            }
            if self.oligos.get(&s.oligo).is_none() {
                return broken(format!("{} belongs to missing {}", s.id, s.oligo));
            }
        }

        let mut nb_in_chains = 0;
        for oligo in self.oligos.values() {
            let start = match self.strands.get(&oligo.strand_5p) {
                Some(s) => s,
                None => return broken(format!("{} starts at a missing strand", oligo.id)),
            };
            if !oligo.is_loop && start.connection_5p.is_some() {
                return broken(format!("{} does not start at a 5' end", oligo.id));
            }
            let chain = self.chain_from(oligo.strand_5p);
            let last = self.strands.expect_get(&chain[chain.len() - 1]);
            let closes = last.connection_3p == Some(oligo.strand_5p);
            if closes != oligo.is_loop {
                return broken(format!("loop flag of {} is wrong", oligo.id));
            }
            for id in chain.iter() {
                let s = self.strands.expect_get(id);
                if s.oligo != oligo.id || s.strand_type != oligo.strand_type {
                    return broken(format!("{} is in the chain of {}", id, oligo.id));
                }
            }
            let walked = self.chain_length(oligo.strand_5p);
            if walked != oligo.length {
                return broken(format!(
                    "{} has length {} but its strands sum to {}",
                    oligo.id, oligo.length, walked
                ));
            }
            nb_in_chains += chain.len();
        }
        if nb_in_chains != self.strands.len() {
            return broken(String::from("some strands are not reachable from their oligo"));
        }
        Ok(())
    }
}
