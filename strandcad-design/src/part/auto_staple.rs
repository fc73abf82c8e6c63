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
    /// Replace every staple by staples covering the scaffold, connected by double cross-overs at
    /// every staple cross-over position where both staples are long enough.
    pub fn auto_staple(&mut self) -> Result<(), ErrOperation> {
        self.transaction("auto staple", |part| {
            let staples: Vec<StrandId> = part
                .strands
                .values()
                .filter(|s| s.strand_type == StrandType::Staple)
                .map(|s| s.id)
                .collect();
            for id in staples {
                part.remove_strand_unchecked(id)?;
            }

            let helices = part.helix_order.clone();
            for helix in helices.iter() {
                for (low, high) in part.scaffold_regions(*helix) {
                    part.create_strand_unchecked(*helix, StrandType::Staple, low, high)?;
                }
            }

            let mut nb_xovers = 0;
            for helix in helices.iter() {
                if !StrandType::Staple.is_drawn_5_to_3(*helix) {
                    continue;
                }
                let sites = part.potential_crossover_list(*helix, None)?;
                for site in sites {
                    if site.strand_type != StrandType::Staple || !site.is_low_idx {
                        continue;
                    }
                    let result = part.transaction("double xover", |part| {
                        part.create_double_xover(*helix, site.neighbour, site.index)
                    });
                    if let Ok(true) = result {
                        nb_xovers += 1;
                    }
                }
            }
            log::info!("auto staple created {} double cross-overs", nb_xovers);
            Ok(())
        })
    }

    /// The maximal intervals covered by consecutive scaffold strands of `helix`.
    fn scaffold_regions(&self, helix: usize) -> Vec<(isize, isize)> {
        let mut ret: Vec<(isize, isize)> = Vec::new();
        let set = self.expect_strand_set(helix, StrandType::Scaffold);
        for id in set.ids() {
            let s = self.strands.expect_get(id);
            match ret.last_mut() {
                Some(last) if last.1 + 1 == s.low => last.1 = s.high,
                _ => ret.push((s.low, s.high)),
            }
        }
        ret
    }

    /// Connect the staples of `helix` and `neighbour` by two cross-overs, between `idx` and
    /// `idx + 1`. The staple set of `helix` must be drawn from 5' to 3'.
    ///
    /// Returns `Ok(false)` without modifying the part if one of the staples does not extend on
    /// both sides of the cross-overs.
    fn create_double_xover(
        &mut self,
        helix: usize,
        neighbour: usize,
        idx: isize,
    ) -> Result<bool, ErrOperation> {
        let long_enough = |part: &Self, h: usize| {
            part.strand_at(h, StrandType::Staple, idx).filter(|id| {
                let s = part.strands.expect_get(id);
                s.low < idx && s.high > idx + 1
            })
        };
        let (strand, other) = match (long_enough(self, helix), long_enough(self, neighbour)) {
            (Some(strand), Some(other)) => (strand, other),
            _ => return Ok(false),
        };
        self.create_xover_unchecked(strand, idx, other, idx)?;
        let missing = ErrOperation::InvalidRange {
            low: idx + 1,
            high: idx + 1,
        };
        let other = self
            .strand_at(neighbour, StrandType::Staple, idx + 1)
            .ok_or(missing.clone())?;
        let strand = self
            .strand_at(helix, StrandType::Staple, idx + 1)
            .ok_or(missing)?;
        self.create_xover_unchecked(other, idx + 1, strand, idx + 1)?;
        Ok(true)
    }
}
