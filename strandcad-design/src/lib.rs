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
//! This crate defines the strand model of a DNA origami design.
//!
//! A `Part` owns virtual helices laid out on a lattice. Each helix carries two `StrandSet`s (one
//! for the scaffold, one for the staples) that index non overlapping intervals of bases, the
//! `Strand`s. Strands are linked from 5' to 3' by connections and every maximal chain of linked
//! strands forms an `Oligo`.
//!
//! All mutations of a part go through operations that either fully succeed or leave the part
//! untouched. Operations are recorded in a journal so that they can be grouped in macros, undone
//! and redone.

#[macro_use]
extern crate serde_derive;
extern crate serde;

mod errors;
pub use errors::*;
mod journal;
pub use journal::{PartNotification, PartObserver};
pub mod lattice;
pub use lattice::LatticeType;
mod oligo;
pub use oligo::*;
mod part;
pub use part::*;
pub mod sequence;
mod strand;
pub use strand::*;
mod strand_set;
pub use strand_set::*;
pub mod utils;

#[cfg(test)]
mod tests;

/// Identifier of a strand in a `Part`. Identifiers are never reused: an operation that replaces a
/// strand (split, merge) creates strands with fresh identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StrandId(pub usize);

/// Identifier of an oligo in a `Part`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OligoId(pub usize);

impl std::fmt::Display for StrandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "strand {}", self.0)
    }
}

impl std::fmt::Display for OligoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "oligo {}", self.0)
    }
}

/// The role of a strand in a DNA origami.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrandType {
    Scaffold,
    Staple,
}

impl StrandType {
    pub const ALL: [StrandType; 2] = [StrandType::Scaffold, StrandType::Staple];

    pub fn complement(&self) -> Self {
        match self {
            Self::Scaffold => Self::Staple,
            Self::Staple => Self::Scaffold,
        }
    }

    /// Strands of the scaffold are drawn 5' to 3' on even helices, staples on odd helices.
    pub fn is_drawn_5_to_3(&self, helix: usize) -> bool {
        let even = helix % 2 == 0;
        match self {
            Self::Scaffold => even,
            Self::Staple => !even,
        }
    }
}

impl std::fmt::Display for StrandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scaffold => write!(f, "scaffold"),
            Self::Staple => write!(f, "staple"),
        }
    }
}
