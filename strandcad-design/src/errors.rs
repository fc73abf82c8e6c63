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

/// An error that occured when trying to apply an operation on a `Part`.
///
/// When an operation returns an `ErrOperation`, the part is left exactly as it was before the
/// operation was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrOperation {
    HelixDoesNotExist(usize),
    LatticePositionAlreadyUsed { row: isize, col: isize },
    /// The requested helix number is already used or does not have the parity of its lattice
    /// position.
    HelixNumberUnavailable(usize),
    HelixNotEmpty(usize),
    StrandDoesNotExist(StrandId),
    OligoDoesNotExist(OligoId),
    /// The range is empty or outside of the part.
    InvalidRange { low: isize, high: isize },
    /// The range intersects an existing strand.
    RangeOccupied { low: isize, high: isize },
    IllegalSplit { strand: StrandId, idx: isize },
    IllegalMerge { strand: StrandId, other: StrandId },
    NoNeighbourToMerge { strand: StrandId, idx: isize },
    IndexNotOnStrand { strand: StrandId, idx: isize },
    /// The end of the strand carries a connection and cannot be moved or reconnected.
    ConnectedEnd { strand: StrandId, idx: isize },
    NotConnected { prime5: StrandId, prime3: StrandId },
    StrandTypeMismatch { prime5: StrandType, prime3: StrandType },
    InvalidInsertion { idx: isize, length: isize },
    NoInsertion { strand: StrandId, idx: isize },
    NotALoop(OligoId),
    StrandNotInOligo { strand: StrandId, oligo: OligoId },
}

impl std::fmt::Display for ErrOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HelixDoesNotExist(h) => write!(f, "helix {} does not exist", h),
            Self::LatticePositionAlreadyUsed { row, col } => {
                write!(f, "lattice position ({}, {}) is already used", row, col)
            }
            Self::HelixNumberUnavailable(h) => write!(f, "helix number {} is unavailable", h),
            Self::HelixNotEmpty(h) => write!(f, "helix {} still has strands", h),
            Self::StrandDoesNotExist(s) => write!(f, "{} does not exist", s),
            Self::OligoDoesNotExist(o) => write!(f, "{} does not exist", o),
            Self::InvalidRange { low, high } => write!(f, "invalid range [{}, {}]", low, high),
            Self::RangeOccupied { low, high } => {
                write!(f, "range [{}, {}] intersects an existing strand", low, high)
            }
            Self::IllegalSplit { strand, idx } => write!(f, "{} cannot be split at {}", strand, idx),
            Self::IllegalMerge { strand, other } => {
                write!(f, "{} cannot be merged with {}", strand, other)
            }
            Self::NoNeighbourToMerge { strand, idx } => {
                write!(f, "{} has no neighbour to merge with at {}", strand, idx)
            }
            Self::IndexNotOnStrand { strand, idx } => write!(f, "{} does not cover {}", strand, idx),
            Self::ConnectedEnd { strand, idx } => {
                write!(f, "the end {} of {} is connected", idx, strand)
            }
            Self::NotConnected { prime5, prime3 } => {
                write!(f, "{} is not connected to {}", prime5, prime3)
            }
            Self::StrandTypeMismatch { prime5, prime3 } => {
                write!(f, "cannot connect a {} strand to a {} strand", prime5, prime3)
            }
            Self::InvalidInsertion { idx, length } => {
                write!(f, "invalid insertion of length {} at {}", length, idx)
            }
            Self::NoInsertion { strand, idx } => write!(f, "{} has no insertion at {}", strand, idx),
            Self::NotALoop(o) => write!(f, "{} is not a loop", o),
            Self::StrandNotInOligo { strand, oligo } => {
                write!(f, "{} does not belong to {}", strand, oligo)
            }
        }
    }
}

impl std::error::Error for ErrOperation {}

/// A violation of the rules of the model that cannot be caused by a user request.
///
/// These errors indicate a bug in the caller (e.g. closing a macro that was never opened) or in
/// this crate (a broken invariant) and must not be silently recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    EmptyUndoStack,
    EmptyRedoStack,
    NoOpenMacro,
    /// Undo and redo are forbidden while a macro is open.
    MacroInProgress,
    BrokenInvariant(String),
}

impl std::fmt::Display for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUndoStack => write!(f, "nothing to undo"),
            Self::EmptyRedoStack => write!(f, "nothing to redo"),
            Self::NoOpenMacro => write!(f, "no macro is open"),
            Self::MacroInProgress => write!(f, "a macro is in progress"),
            Self::BrokenInvariant(msg) => write!(f, "invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for InternalError {}
