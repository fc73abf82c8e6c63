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
//! Lattices on which virtual helices are laid out.
//!
//! A lattice defines which lattice positions are neighbours and, for each neighbour, the
//! positions along the helix at which a cross-over between the two helices is geometrically
//! possible. These positions are periodic along the helix axis, with period `step`.

/// The candidate cross-over offsets towards one neighbour, relative to the beginning of a period.
///
/// `low` offsets are sites where the cross-over leaves from the low end of a strand, `high`
/// offsets where it leaves from the high end.
#[derive(Debug, Clone, Copy)]
pub struct CrossoverSites {
    pub scaffold_low: &'static [isize],
    pub scaffold_high: &'static [isize],
    pub staple_low: &'static [isize],
    pub staple_high: &'static [isize],
}

impl CrossoverSites {
    pub fn sites(&self, strand_type: super::StrandType, is_low: bool) -> &'static [isize] {
        use super::StrandType::*;
        match (strand_type, is_low) {
            (Scaffold, true) => self.scaffold_low,
            (Scaffold, false) => self.scaffold_high,
            (Staple, true) => self.staple_low,
            (Staple, false) => self.staple_high,
        }
    }
}

pub trait LatticeDivision {
    /// The number of bases after which the cross-over pattern repeats.
    fn step(&self) -> usize;
    /// The lattice positions of the neighbours of (row, col). The i-th neighbour uses the i-th
    /// entry of `crossover_sites`.
    fn neighbour_positions(&self, row: isize, col: isize) -> Vec<(isize, isize)>;
    fn crossover_sites(&self) -> &'static [CrossoverSites];
    fn lattice_type(&self) -> LatticeType;
}

/// Return true if the helices at (row, col) are numbered with even numbers.
pub fn is_even_parity(row: isize, col: isize) -> bool {
    row.rem_euclid(2) == col.rem_euclid(2)
}

#[derive(Debug, Clone, Copy)]
pub struct HoneyComb;

const HONEYCOMB_SITES: [CrossoverSites; 3] = [
    CrossoverSites {
        scaffold_low: &[1, 11],
        scaffold_high: &[2, 12],
        staple_low: &[6],
        staple_high: &[7],
    },
    CrossoverSites {
        scaffold_low: &[8, 18],
        scaffold_high: &[9, 19],
        staple_low: &[13],
        staple_high: &[14],
    },
    CrossoverSites {
        scaffold_low: &[4, 15],
        scaffold_high: &[5, 16],
        staple_low: &[20],
        staple_high: &[0],
    },
];

impl LatticeDivision for HoneyComb {
    fn step(&self) -> usize {
        21
    }

    fn neighbour_positions(&self, row: isize, col: isize) -> Vec<(isize, isize)> {
        if is_even_parity(row, col) {
            vec![(row, col + 1), (row - 1, col), (row, col - 1)]
        } else {
            vec![(row, col - 1), (row + 1, col), (row, col + 1)]
        }
    }

    fn crossover_sites(&self) -> &'static [CrossoverSites] {
        &HONEYCOMB_SITES
    }

    fn lattice_type(&self) -> LatticeType {
        LatticeType::Honeycomb
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SquareLattice;

const SQUARE_SITES: [CrossoverSites; 4] = [
    CrossoverSites {
        scaffold_low: &[4, 26, 15],
        scaffold_high: &[5, 27, 16],
        staple_low: &[31],
        staple_high: &[0],
    },
    CrossoverSites {
        scaffold_low: &[18, 28, 7],
        scaffold_high: &[19, 29, 8],
        staple_low: &[23],
        staple_high: &[24],
    },
    CrossoverSites {
        scaffold_low: &[10, 20, 31],
        scaffold_high: &[11, 21, 0],
        staple_low: &[15],
        staple_high: &[16],
    },
    CrossoverSites {
        scaffold_low: &[2, 12, 23],
        scaffold_high: &[3, 13, 24],
        staple_low: &[7],
        staple_high: &[8],
    },
];

impl LatticeDivision for SquareLattice {
    fn step(&self) -> usize {
        32
    }

    fn neighbour_positions(&self, row: isize, col: isize) -> Vec<(isize, isize)> {
        if is_even_parity(row, col) {
            vec![
                (row, col + 1),
                (row + 1, col),
                (row, col - 1),
                (row - 1, col),
            ]
        } else {
            vec![
                (row, col - 1),
                (row - 1, col),
                (row, col + 1),
                (row + 1, col),
            ]
        }
    }

    fn crossover_sites(&self) -> &'static [CrossoverSites] {
        &SQUARE_SITES
    }

    fn lattice_type(&self) -> LatticeType {
        LatticeType::Square
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatticeType {
    Honeycomb,
    Square,
}

impl LatticeDivision for LatticeType {
    fn step(&self) -> usize {
        match self {
            Self::Honeycomb => HoneyComb.step(),
            Self::Square => SquareLattice.step(),
        }
    }

    fn neighbour_positions(&self, row: isize, col: isize) -> Vec<(isize, isize)> {
        match self {
            Self::Honeycomb => HoneyComb.neighbour_positions(row, col),
            Self::Square => SquareLattice.neighbour_positions(row, col),
        }
    }

    fn crossover_sites(&self) -> &'static [CrossoverSites] {
        match self {
            Self::Honeycomb => HoneyComb.crossover_sites(),
            Self::Square => SquareLattice.crossover_sites(),
        }
    }

    fn lattice_type(&self) -> LatticeType {
        *self
    }
}

impl LatticeType {
    /// Round `nb_bases` up to a whole, non zero, number of periods.
    pub fn round_up_size(&self, nb_bases: usize) -> usize {
        let step = self.step();
        nb_bases.max(1).div_ceil(step) * step
    }
}

impl std::fmt::Display for LatticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Honeycomb => write!(f, "Honeycomb"),
            Self::Square => write!(f, "Square"),
        }
    }
}
