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

/// A chain of strands linked from 5' to 3'.
///
/// `length` is maintained incrementally by every operation and always equals the sum of the
/// total lengths of the strands of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oligo {
    pub id: OligoId,
    pub strand_type: StrandType,
    /// The first strand of the chain. For a loop, the strand at which the loop is read.
    pub strand_5p: StrandId,
    pub length: usize,
    pub color: u32,
    pub is_loop: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Oligos(pub(crate) BTreeMap<OligoId, Oligo>);

impl Oligos {
    pub fn get(&self, id: &OligoId) -> Option<&Oligo> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OligoId, &Oligo)> {
        self.0.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Oligo> {
        self.0.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &OligoId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn expect_get(&self, id: &OligoId) -> &Oligo {
        match self.0.get(id) {
            Some(o) => o,
            None => panic!("Invariant violated: dangling reference to {}", id),
        }
    }
}
