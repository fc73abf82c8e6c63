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
//! Primitive recorded modifications of a part, macros, undo and redo.

use super::*;
use crate::journal::{notify_all, Edit, SharedObserver};
use std::sync::{Arc, Mutex};

impl Part {
    fn apply_edit(&mut self, edit: &Edit) {
        match edit {
            Edit::AddHelix {
                num,
                row,
                col,
                position,
            } => {
                self.helices
                    .insert(*num, VirtualHelix::new(*num, *row, *col));
                self.positions.insert((*row, *col), *num);
                let position = (*position).min(self.helix_order.len());
                self.helix_order.insert(position, *num);
            }
            Edit::RemoveHelix { num, row, col, .. } => {
                self.helices.remove(num);
                self.positions.remove(&(*row, *col));
                self.helix_order.retain(|n| n != num);
            }
            Edit::AddStrand(strand) => {
                let (helix, strand_type, id) = (strand.helix, strand.strand_type, strand.id);
                self.strands.0.insert(id, strand.clone());
                let inserted = match self.helices.get_mut(&helix) {
                    Some(h) => h.strand_set_mut(strand_type).insert(&self.strands, id),
                    None => false,
                };
                if !inserted {
                    panic!("Invariant violated: could not insert {}", id);
                }
            }
            Edit::RemoveStrand(strand) => {
                let removed = match self.helices.get_mut(&strand.helix) {
                    Some(h) => h
                        .strand_set_mut(strand.strand_type)
                        .remove(&self.strands, strand.id),
                    None => false,
                };
                if !removed {
                    panic!("Invariant violated: could not remove {}", strand.id);
                }
                self.strands.0.remove(&strand.id);
            }
            Edit::UpdateStrand { after, .. } => {
                self.strands.0.insert(after.id, after.clone());
            }
            Edit::AddOligo(oligo) => {
                self.oligos.0.insert(oligo.id, oligo.clone());
            }
            Edit::RemoveOligo(oligo) => {
                self.oligos.0.remove(&oligo.id);
            }
            Edit::UpdateOligo { after, .. } => {
                self.oligos.0.insert(after.id, after.clone());
            }
        }
    }

    fn record(&mut self, edit: Edit) {
        self.apply_edit(&edit);
        self.journal.record(edit);
    }

    pub(super) fn add_helix_raw(&mut self, num: usize, row: isize, col: isize) {
        let position = self.helix_order.len();
        self.record(Edit::AddHelix {
            num,
            row,
            col,
            position,
        })
    }

    pub(super) fn remove_helix_raw(&mut self, num: usize) {
        if let Some(h) = self.helices.get(&num) {
            let (row, col) = (h.row, h.col);
            let position = self
                .helix_order
                .iter()
                .position(|n| *n == num)
                .unwrap_or(self.helix_order.len());
            self.record(Edit::RemoveHelix {
                num,
                row,
                col,
                position,
            })
        }
    }

    pub(super) fn add_strand_raw(&mut self, strand: Strand) {
        self.record(Edit::AddStrand(strand))
    }

    pub(super) fn remove_strand_raw(&mut self, id: StrandId) -> Strand {
        let strand = self.strands.expect_get(&id).clone();
        self.record(Edit::RemoveStrand(strand.clone()));
        strand
    }

    pub(super) fn update_strand_raw<F>(&mut self, id: StrandId, update: F)
    where
        F: FnOnce(&mut Strand),
    {
        let before = self.strands.expect_get(&id).clone();
        let mut after = before.clone();
        update(&mut after);
        if after != before {
            self.record(Edit::UpdateStrand { before, after })
        }
    }

    pub(super) fn add_oligo_raw(&mut self, oligo: Oligo) {
        self.record(Edit::AddOligo(oligo))
    }

    pub(super) fn remove_oligo_raw(&mut self, id: OligoId) -> Oligo {
        let oligo = self.oligos.expect_get(&id).clone();
        self.record(Edit::RemoveOligo(oligo.clone()));
        oligo
    }

    pub(super) fn update_oligo_raw<F>(&mut self, id: OligoId, update: F)
    where
        F: FnOnce(&mut Oligo),
    {
        let before = self.oligos.expect_get(&id).clone();
        let mut after = before.clone();
        update(&mut after);
        if after != before {
            self.record(Edit::UpdateOligo { before, after })
        }
    }

    /// Set the oligo of every strand of the chain starting at `start` and return the length of
    /// the chain.
    pub(super) fn relabel_chain(&mut self, start: StrandId, oligo: OligoId) -> usize {
        let mut length = 0;
        for id in self.chain_from(start) {
            length += self.strands.expect_get(&id).total_length();
            self.update_strand_raw(id, |s| s.oligo = oligo);
        }
        length
    }

    pub(super) fn rollback_to(&mut self, savepoint: usize) {
        for edit in self.journal.drain_after(savepoint) {
            self.apply_edit(&edit.inverse());
        }
    }

    pub(super) fn close_macro(&mut self) {
        if !self.journal.close() {
            return;
        }
        if let Some(m) = self.journal.last_committed() {
            log::debug!("committed {} ({} edits)", m.name, m.edits.len());
            notify_all(
                self.journal.observers(),
                m.edits.iter(),
                PartNotification::MacroCommitted(m.name.clone()),
            );
        }
    }

    /// Open a macro. Every modification made until the matching `end_macro` is undone and redone
    /// as a whole. Macros can be nested, only the outermost one is recorded.
    pub fn begin_macro(&mut self, name: &str) {
        self.journal.open(name)
    }

    /// Close the innermost open macro.
    pub fn end_macro(&mut self) -> Result<(), InternalError> {
        if self.journal.depth() == 0 {
            return Err(InternalError::NoOpenMacro);
        }
        self.close_macro();
        Ok(())
    }

    /// Revert every modification made since the outermost open macro was opened and close all
    /// open macros.
    pub fn cancel_macro(&mut self) -> Result<(), InternalError> {
        if self.journal.depth() == 0 {
            return Err(InternalError::NoOpenMacro);
        }
        for edit in self.journal.abort() {
            self.apply_edit(&edit.inverse());
        }
        log::debug!("macro cancelled");
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), InternalError> {
        if self.journal.depth() > 0 {
            return Err(InternalError::MacroInProgress);
        }
        let m = self.journal.pop_undo().ok_or(InternalError::EmptyUndoStack)?;
        let inverses: Vec<Edit> = m.edits.iter().rev().map(Edit::inverse).collect();
        for edit in inverses.iter() {
            self.apply_edit(edit);
        }
        log::debug!("undo {}", m.name);
        notify_all(
            self.journal.observers(),
            inverses.iter(),
            PartNotification::Undone(m.name.clone()),
        );
        self.journal.push_redo(m);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), InternalError> {
        if self.journal.depth() > 0 {
            return Err(InternalError::MacroInProgress);
        }
        let m = self.journal.pop_redo().ok_or(InternalError::EmptyRedoStack)?;
        for edit in m.edits.iter() {
            self.apply_edit(edit);
        }
        log::debug!("redo {}", m.name);
        notify_all(
            self.journal.observers(),
            m.edits.iter(),
            PartNotification::Redone(m.name.clone()),
        );
        self.journal.push_undo(m);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.journal.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.journal.can_redo()
    }

    /// Forget every recorded macro. Used after loading a design.
    pub fn clear_history(&mut self) {
        self.journal.clear()
    }

    pub fn add_observer(&mut self, observer: Arc<Mutex<dyn PartObserver + Send>>) {
        let observer: SharedObserver = observer;
        self.journal.add_observer(observer)
    }
}
