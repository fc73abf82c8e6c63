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
    /// Create a virtual helix at `(row, col)`. The helix gets the lowest free number whose parity
    /// matches the parity of the lattice position.
    pub fn create_virtual_helix(&mut self, row: isize, col: isize) -> Result<usize, ErrOperation> {
        let num = lowest_free_number(&self.helices, row, col);
        self.create_virtual_helix_with_num(row, col, num)
    }

    /// Create a virtual helix at `(row, col)` with number `num`.
    pub fn create_virtual_helix_with_num(
        &mut self,
        row: isize,
        col: isize,
        num: usize,
    ) -> Result<usize, ErrOperation> {
        self.transaction("create virtual helix", |part| {
            if part.positions.contains_key(&(row, col)) {
                return Err(ErrOperation::LatticePositionAlreadyUsed { row, col });
            }
            if part.helices.contains_key(&num) || (num % 2 == 0) != is_even_parity(row, col) {
                return Err(ErrOperation::HelixNumberUnavailable(num));
            }
            part.add_helix_raw(num, row, col);
            Ok(num)
        })
    }

    /// Remove a virtual helix. The helix must not carry any strand.
    pub fn remove_virtual_helix(&mut self, num: usize) -> Result<(), ErrOperation> {
        self.transaction("remove virtual helix", |part| {
            if !part.get_helix(num)?.is_empty() {
                return Err(ErrOperation::HelixNotEmpty(num));
            }
            part.remove_helix_raw(num);
            Ok(())
        })
    }

    /// The helices at the neighbour positions of helix `num`, in the order of the lattice's
    /// cross-over tables. `None` entries are empty positions.
    pub fn neighbour_helices(&self, num: usize) -> Result<Vec<Option<usize>>, ErrOperation> {
        let helix = self.get_helix(num)?;
        Ok(self
            .lattice
            .neighbour_positions(helix.row, helix.col)
            .into_iter()
            .map(|(row, col)| self.helix_at(row, col))
            .collect())
    }
}
