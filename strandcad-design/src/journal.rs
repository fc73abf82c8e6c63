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
use super::{Oligo, OligoId, Strand, StrandId};
use std::sync::{Arc, Mutex};

/// A reversible primitive modification of a `Part`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Edit {
    AddHelix {
        num: usize,
        row: isize,
        col: isize,
        position: usize,
    },
    RemoveHelix {
        num: usize,
        row: isize,
        col: isize,
        position: usize,
    },
    AddStrand(Strand),
    RemoveStrand(Strand),
    UpdateStrand {
        before: Strand,
        after: Strand,
    },
    AddOligo(Oligo),
    RemoveOligo(Oligo),
    UpdateOligo {
        before: Oligo,
        after: Oligo,
    },
}

impl Edit {
    /// The edit that undoes `self`.
    pub fn inverse(&self) -> Self {
        match self.clone() {
            Self::AddHelix {
                num,
                row,
                col,
                position,
            } => Self::RemoveHelix {
                num,
                row,
                col,
                position,
            },
            Self::RemoveHelix {
                num,
                row,
                col,
                position,
            } => Self::AddHelix {
                num,
                row,
                col,
                position,
            },
            Self::AddStrand(s) => Self::RemoveStrand(s),
            Self::RemoveStrand(s) => Self::AddStrand(s),
            Self::UpdateStrand { before, after } => Self::UpdateStrand {
                before: after,
                after: before,
            },
            Self::AddOligo(o) => Self::RemoveOligo(o),
            Self::RemoveOligo(o) => Self::AddOligo(o),
            Self::UpdateOligo { before, after } => Self::UpdateOligo {
                before: after,
                after: before,
            },
        }
    }

    fn notification(&self) -> PartNotification {
        match self {
            Self::AddHelix { num, .. } => PartNotification::HelixAdded(*num),
            Self::RemoveHelix { num, .. } => PartNotification::HelixRemoved(*num),
            Self::AddStrand(s) => PartNotification::StrandAdded(s.id),
            Self::RemoveStrand(s) => PartNotification::StrandRemoved(s.id),
            Self::UpdateStrand { after, .. } => PartNotification::StrandUpdated(after.id),
            Self::AddOligo(o) => PartNotification::OligoAdded(o.id),
            Self::RemoveOligo(o) => PartNotification::OligoRemoved(o.id),
            Self::UpdateOligo { after, .. } => PartNotification::OligoUpdated(after.id),
        }
    }
}

/// A named group of edits that is undone and redone as a whole.
#[derive(Debug, Clone)]
pub(crate) struct Macro {
    pub name: String,
    pub edits: Vec<Edit>,
}

/// An event published to the observers of a `Part`.
///
/// Observers only see states in which every invariant of the part holds: the events of a macro
/// are published once the outermost macro is committed, followed by `MacroCommitted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartNotification {
    HelixAdded(usize),
    HelixRemoved(usize),
    StrandAdded(StrandId),
    StrandRemoved(StrandId),
    StrandUpdated(StrandId),
    OligoAdded(OligoId),
    OligoRemoved(OligoId),
    OligoUpdated(OligoId),
    MacroCommitted(String),
    Undone(String),
    Redone(String),
}

pub trait PartObserver {
    fn on_notify(&mut self, notification: &PartNotification);
}

pub(crate) type SharedObserver = Arc<Mutex<dyn PartObserver + Send>>;

/// The record of the modifications of a part.
///
/// Edits are accumulated in the current macro while at least one macro is open. Closing the
/// outermost macro commits it to the undo stack.
#[derive(Default)]
pub(crate) struct Journal {
    depth: usize,
    name: Option<String>,
    current: Vec<Edit>,
    undo_stack: Vec<Macro>,
    redo_stack: Vec<Macro>,
    observers: Vec<SharedObserver>,
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("depth", &self.depth)
            .field("name", &self.name)
            .field("current", &self.current.len())
            .field("undo_stack", &self.undo_stack.len())
            .field("redo_stack", &self.redo_stack.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Journal {
    pub fn open(&mut self, name: &str) {
        if self.depth == 0 {
            self.name = Some(name.to_string());
        }
        self.depth += 1;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn record(&mut self, edit: Edit) {
        self.current.push(edit);
    }

    /// The number of edits of the current macro, to roll back to.
    pub fn savepoint(&self) -> usize {
        self.current.len()
    }

    /// Remove and return the edits recorded after `savepoint`, most recent first.
    pub fn drain_after(&mut self, savepoint: usize) -> Vec<Edit> {
        let mut ret: Vec<Edit> = self.current.drain(savepoint.min(self.current.len())..).collect();
        ret.reverse();
        ret
    }

    /// Close one level of macro. Returns true if the outermost macro was closed and committed,
    /// which only happens if it recorded at least one edit.
    pub fn close(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        if self.depth > 0 {
            return false;
        }
        let name = self.name.take().unwrap_or_default();
        if self.current.is_empty() {
            return false;
        }
        let edits = std::mem::take(&mut self.current);
        self.redo_stack.clear();
        self.undo_stack.push(Macro { name, edits });
        true
    }

    pub fn last_committed(&self) -> Option<&Macro> {
        self.undo_stack.last()
    }

    /// Close every open macro without committing. Returns the edits to revert, most recent
    /// first.
    pub fn abort(&mut self) -> Vec<Edit> {
        self.depth = 0;
        self.name = None;
        self.drain_after(0)
    }

    pub fn pop_undo(&mut self) -> Option<Macro> {
        self.undo_stack.pop()
    }

    pub fn push_redo(&mut self, m: Macro) {
        self.redo_stack.push(m)
    }

    pub fn pop_redo(&mut self) -> Option<Macro> {
        self.redo_stack.pop()
    }

    pub fn push_undo(&mut self, m: Macro) {
        self.undo_stack.push(m)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn add_observer(&mut self, observer: SharedObserver) {
        self.observers.push(observer)
    }

    pub fn observers(&self) -> &[SharedObserver] {
        &self.observers
    }
}

/// Send to `observers` the notifications of `edits` followed by `last`.
pub(crate) fn notify_all<'a>(
    observers: &[SharedObserver],
    edits: impl Iterator<Item = &'a Edit>,
    last: PartNotification,
) {
    if observers.is_empty() {
        return;
    }
    let notifications: Vec<PartNotification> = edits
        .map(Edit::notification)
        .chain(std::iter::once(last))
        .collect();
    for observer in observers.iter() {
        match observer.lock() {
            Ok(mut observer) => {
                for n in notifications.iter() {
                    observer.on_notify(n);
                }
            }
            Err(_) => log::warn!("An observer of the part was poisoned"),
        }
    }
}
