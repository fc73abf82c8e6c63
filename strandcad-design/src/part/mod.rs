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
//! The `Part` owns every helix, strand and oligo of a design and is the only entry point for
//! modifying them.

use super::journal::Journal;
use super::lattice::{is_even_parity, LatticeDivision};
use super::*;
use ahash::AHashMap;
use std::collections::BTreeMap;

mod auto_staple;
mod helices;
mod history;
mod invariants;
mod sequences;
mod strand_ops;
mod xovers;

pub use xovers::PotentialXover;

/// A double helix axis positioned on the lattice. It carries one scaffold and one staple strand
/// set.
#[derive(Debug, Clone)]
pub struct VirtualHelix {
    pub num: usize,
    pub row: isize,
    pub col: isize,
    scaffold: StrandSet,
    staple: StrandSet,
}

impl VirtualHelix {
    fn new(num: usize, row: isize, col: isize) -> Self {
        Self {
            num,
            row,
            col,
            scaffold: StrandSet::new(num, StrandType::Scaffold),
            staple: StrandSet::new(num, StrandType::Staple),
        }
    }

    pub fn strand_set(&self, strand_type: StrandType) -> &StrandSet {
        match strand_type {
            StrandType::Scaffold => &self.scaffold,
            StrandType::Staple => &self.staple,
        }
    }

    fn strand_set_mut(&mut self, strand_type: StrandType) -> &mut StrandSet {
        match strand_type {
            StrandType::Scaffold => &mut self.scaffold,
            StrandType::Staple => &mut self.staple,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scaffold.is_empty() && self.staple.is_empty()
    }

    /// Return true if the helix is numbered with an even number. Even helices carry scaffold
    /// strands drawn from 5' to 3'.
    pub fn is_even(&self) -> bool {
        self.num % 2 == 0
    }
}

#[derive(Debug)]
pub struct Part {
    lattice: LatticeType,
    max_base: isize,
    helices: BTreeMap<usize, VirtualHelix>,
    /// Helix numbers in the order in which the helices were created.
    helix_order: Vec<usize>,
    positions: AHashMap<(isize, isize), usize>,
    strands: Strands,
    oligos: Oligos,
    next_strand_id: usize,
    next_oligo_id: usize,
    color_idx: usize,
    journal: Journal,
}

impl Part {
    /// Create an empty part. `max_base` is rounded up to a whole number of lattice steps.
    pub fn new(lattice: LatticeType, max_base: usize) -> Self {
        Self {
            lattice,
            max_base: lattice.round_up_size(max_base) as isize,
            helices: BTreeMap::new(),
            helix_order: Vec::new(),
            positions: AHashMap::new(),
            strands: Default::default(),
            oligos: Default::default(),
            next_strand_id: 0,
            next_oligo_id: 0,
            color_idx: 0,
            journal: Default::default(),
        }
    }

    /// Create an empty part whose helices are two lattice steps long.
    pub fn with_default_size(lattice: LatticeType) -> Self {
        Self::new(lattice, 2 * lattice.step())
    }

    pub fn lattice(&self) -> LatticeType {
        self.lattice
    }

    /// The number of bases of every helix. Valid indices are `0..max_base`.
    pub fn max_base(&self) -> isize {
        self.max_base
    }

    pub fn helix(&self, num: usize) -> Option<&VirtualHelix> {
        self.helices.get(&num)
    }

    pub fn helices(&self) -> impl Iterator<Item = &VirtualHelix> {
        self.helix_order.iter().filter_map(move |n| self.helices.get(n))
    }

    pub fn helix_order(&self) -> &[usize] {
        &self.helix_order
    }

    pub fn helix_at(&self, row: isize, col: isize) -> Option<usize> {
        self.positions.get(&(row, col)).cloned()
    }

    pub fn strand_set(&self, helix: usize, strand_type: StrandType) -> Option<&StrandSet> {
        self.helices.get(&helix).map(|h| h.strand_set(strand_type))
    }

    pub fn strands(&self) -> &Strands {
        &self.strands
    }

    pub fn strand(&self, id: StrandId) -> Option<&Strand> {
        self.strands.get(&id)
    }

    pub fn oligos(&self) -> &Oligos {
        &self.oligos
    }

    pub fn oligo(&self, id: OligoId) -> Option<&Oligo> {
        self.oligos.get(&id)
    }

    /// The strand of type `strand_type` covering `idx` on `helix`.
    pub fn strand_at(&self, helix: usize, strand_type: StrandType, idx: isize) -> Option<StrandId> {
        self.strand_set(helix, strand_type)
            .and_then(|set| set.get_strand(&self.strands, idx))
    }

    pub fn strand_idxs(&self, id: StrandId) -> Result<(isize, isize), ErrOperation> {
        Ok(self.get_strand(id)?.idxs())
    }

    pub fn total_length(&self, id: StrandId) -> Result<usize, ErrOperation> {
        Ok(self.get_strand(id)?.total_length())
    }

    /// The strands immediately below and above strand `id` on its strand set.
    pub fn strand_neighbours(
        &self,
        id: StrandId,
    ) -> Result<(Option<StrandId>, Option<StrandId>), ErrOperation> {
        let s = self.get_strand(id)?;
        let set = self.expect_strand_set(s.helix, s.strand_type);
        Ok(set.neighbours(&self.strands, id))
    }

    pub fn oligo_length(&self, id: OligoId) -> Result<usize, ErrOperation> {
        Ok(self.get_oligo(id)?.length)
    }

    pub fn oligo_color(&self, id: OligoId) -> Result<u32, ErrOperation> {
        Ok(self.get_oligo(id)?.color)
    }

    pub fn oligo_is_loop(&self, id: OligoId) -> Result<bool, ErrOperation> {
        Ok(self.get_oligo(id)?.is_loop)
    }

    pub fn staple_oligos(&self) -> Vec<OligoId> {
        self.oligos
            .values()
            .filter(|o| o.strand_type == StrandType::Staple)
            .map(|o| o.id)
            .collect()
    }

    /// The strands of oligo `id` from 5' to 3'.
    pub fn oligo_strands(&self, id: OligoId) -> Result<Vec<StrandId>, ErrOperation> {
        let oligo = self.get_oligo(id)?;
        Ok(self.chain_from(oligo.strand_5p))
    }

    /// The length of oligo `id` computed by walking its strands.
    pub fn walk_length(&self, id: OligoId) -> Result<usize, ErrOperation> {
        Ok(self.chain_length(self.get_oligo(id)?.strand_5p))
    }

    pub(crate) fn get_strand(&self, id: StrandId) -> Result<&Strand, ErrOperation> {
        self.strands.get(&id).ok_or(ErrOperation::StrandDoesNotExist(id))
    }

    pub(crate) fn get_oligo(&self, id: OligoId) -> Result<&Oligo, ErrOperation> {
        self.oligos.get(&id).ok_or(ErrOperation::OligoDoesNotExist(id))
    }

    pub(crate) fn get_helix(&self, num: usize) -> Result<&VirtualHelix, ErrOperation> {
        self.helices.get(&num).ok_or(ErrOperation::HelixDoesNotExist(num))
    }

    fn expect_strand_set(&self, helix: usize, strand_type: StrandType) -> &StrandSet {
        match self.helices.get(&helix) {
            Some(h) => h.strand_set(strand_type),
            None => panic!("Invariant violated: a strand is on missing helix {}", helix),
        }
    }

    /// The strands reached by following 3' connections from `start`, `start` included. Stops
    /// when coming back to `start`.
    pub(crate) fn chain_from(&self, start: StrandId) -> Vec<StrandId> {
        let mut ret = vec![start];
        let mut current = self.strands.expect_get(&start).connection_3p;
        while let Some(id) = current {
            if id == start {
                break;
            }
            if ret.len() > self.strands.len() {
                panic!("Invariant violated: the chain of {} never ends", start);
            }
            ret.push(id);
            current = self.strands.expect_get(&id).connection_3p;
        }
        ret
    }

    pub(crate) fn chain_length(&self, start: StrandId) -> usize {
        self.chain_from(start)
            .iter()
            .map(|id| self.strands.expect_get(id).total_length())
            .sum()
    }

    fn fresh_strand_id(&mut self) -> StrandId {
        let ret = StrandId(self.next_strand_id);
        self.next_strand_id += 1;
        ret
    }

    /// A new oligo that is not yet added to the part.
    fn fresh_oligo(&mut self, strand_type: StrandType, strand_5p: StrandId, length: usize) -> Oligo {
        let id = OligoId(self.next_oligo_id);
        self.next_oligo_id += 1;
        let color = match strand_type {
            StrandType::Scaffold => utils::DEFAULT_SCAFFOLD_COLOR,
            StrandType::Staple => utils::new_color(&mut self.color_idx),
        };
        Oligo {
            id,
            strand_type,
            strand_5p,
            length,
            color,
            is_loop: false,
        }
    }

    /// Run `operation` as a macro named `name`. If `operation` fails, every modification it made
    /// is reverted before returning the error.
    pub fn transaction<T, F>(&mut self, name: &str, operation: F) -> Result<T, ErrOperation>
    where
        F: FnOnce(&mut Self) -> Result<T, ErrOperation>,
    {
        self.journal.open(name);
        let savepoint = self.journal.savepoint();
        let ret = operation(self);
        if let Err(ref e) = ret {
            log::warn!("{} failed: {}", name, e);
            self.rollback_to(savepoint);
        }
        self.close_macro();
        ret
    }
}

/// Return the lowest helix number that is not in `used` and that has the parity of `(row, col)`.
fn lowest_free_number(used: &BTreeMap<usize, VirtualHelix>, row: isize, col: isize) -> usize {
    let mut num = if is_even_parity(row, col) { 0 } else { 1 };
    while used.contains_key(&num) {
        num += 2;
    }
    num
}
