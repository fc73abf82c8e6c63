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
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

fn honeycomb_part(nb_helices: isize) -> Part {
    let mut part = Part::with_default_size(LatticeType::Honeycomb);
    for col in 0..nb_helices {
        part.create_virtual_helix(0, col).unwrap();
    }
    part.clear_history();
    part
}

fn assert_sane(part: &Part) {
    if let Err(e) = part.check_invariants() {
        panic!("{}", e)
    }
}

/// A description of the part that does not depend on strand and oligo identifiers.
fn layout(part: &Part) -> Vec<(usize, StrandType, isize, isize, Option<(usize, isize)>, usize)> {
    let mut ret: Vec<_> = part
        .strands()
        .values()
        .map(|s| {
            let next = s.connection_3p.map(|n| {
                let n = part.strand(n).unwrap();
                (n.helix, n.idx5p())
            });
            let length = part.oligo_length(s.oligo).unwrap();
            (s.helix, s.strand_type, s.low, s.high, next, length)
        })
        .collect();
    ret.sort_by_key(|l| (l.0, l.1, l.2));
    ret
}

#[test]
fn create_strand_on_occupied_range_fails() {
    let mut part = honeycomb_part(1);
    assert_eq!(part.max_base(), 42);
    let s = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    assert_eq!(part.strand_idxs(s).unwrap(), (0, 20));
    let before = layout(&part);
    assert_eq!(
        part.create_strand(0, StrandType::Scaffold, 10, 15),
        Err(ErrOperation::RangeOccupied { low: 10, high: 15 })
    );
    assert_eq!(layout(&part), before);
    assert_eq!(part.oligos().len(), 1);
    assert!(part.create_strand(0, StrandType::Staple, 10, 15).is_ok());
    assert_eq!(
        part.create_strand(0, StrandType::Scaffold, 30, 42),
        Err(ErrOperation::InvalidRange { low: 30, high: 42 })
    );
    assert_sane(&part);
}

#[test]
fn split_redistributes_oligo_length() {
    let mut part = honeycomb_part(1);
    let s = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    let (prime5, prime3) = part.split_strand(s, 10).unwrap();
    assert!(part.strand(s).is_none());
    assert_eq!(part.strand_idxs(prime5).unwrap(), (0, 10));
    assert_eq!(part.strand_idxs(prime3).unwrap(), (11, 20));
    let o5 = part.strand(prime5).unwrap().oligo;
    let o3 = part.strand(prime3).unwrap().oligo;
    assert_ne!(o5, o3);
    assert_eq!(part.oligo_length(o5).unwrap(), 11);
    assert_eq!(part.oligo_length(o3).unwrap(), 10);
    assert!(!part.oligo_is_loop(o5).unwrap());
    assert!(!part.oligo_is_loop(o3).unwrap());
    assert_sane(&part);
}

#[test]
fn split_of_strand_drawn_3_to_5() {
    let mut part = honeycomb_part(2);
    let s = part.create_strand(1, StrandType::Scaffold, 0, 20).unwrap();
    assert_eq!(part.strand(s).unwrap().idx5p(), 20);
    let (prime5, prime3) = part.split_strand(s, 10).unwrap();
    assert_eq!(part.strand_idxs(prime5).unwrap(), (10, 20));
    assert_eq!(part.strand_idxs(prime3).unwrap(), (0, 9));
    assert_eq!(
        part.split_strand(prime3, 1),
        Err(ErrOperation::IllegalSplit {
            strand: prime3,
            idx: 1
        })
    );
    assert_sane(&part);
}

#[test]
fn merge_adjacent_strands() {
    let mut part = honeycomb_part(1);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 10).unwrap();
    let b = part.create_strand(0, StrandType::Scaffold, 11, 20).unwrap();
    let c = part.merge_strands(a, b).unwrap();
    assert_eq!(part.strand_idxs(c).unwrap(), (0, 20));
    assert_eq!(part.oligos().len(), 1);
    let oligo = part.strand(c).unwrap().oligo;
    assert_eq!(part.oligo_length(oligo).unwrap(), 21);
    assert_sane(&part);
}

#[test]
fn merge_rejects_non_adjacent_strands() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 10).unwrap();
    let b = part.create_strand(0, StrandType::Scaffold, 12, 20).unwrap();
    let c = part.create_strand(1, StrandType::Scaffold, 11, 20).unwrap();
    assert!(part.merge_strands(a, b).is_err());
    assert!(part.merge_strands(a, c).is_err());
    assert_eq!(
        part.merge_at(a, 5),
        Err(ErrOperation::NoNeighbourToMerge { strand: a, idx: 5 })
    );
    assert_sane(&part);
}

#[test]
fn split_then_merge_restores_strand() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 30).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 0, 30).unwrap();
    part.create_xover(a, 30, b, 30).unwrap();
    let before = layout(&part);
    let b = part.strand_at(1, StrandType::Scaffold, 15).unwrap();
    let (prime5, _) = part.split_strand(b, 15).unwrap();
    assert_ne!(layout(&part), before);
    part.merge_at(prime5, 15).unwrap();
    assert_eq!(layout(&part), before);
    assert_sane(&part);
}

#[test]
fn xover_between_strand_interiors() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 41).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 0, 41).unwrap();
    let (prime5, prime3) = part.create_xover(a, 20, b, 20).unwrap();
    assert_eq!(part.strand_idxs(prime5).unwrap(), (0, 20));
    assert_eq!(part.strand_idxs(prime3).unwrap(), (0, 20));
    assert_eq!(part.strand(prime5).unwrap().connection_3p, Some(prime3));
    let oligo = part.strand(prime5).unwrap().oligo;
    assert_eq!(part.oligo_length(oligo).unwrap(), 42);
    assert_eq!(part.oligo_strands(oligo).unwrap(), vec![prime5, prime3]);
    assert_eq!(part.oligos().len(), 3);
    assert_sane(&part);
}

#[test]
fn xover_create_then_remove_restores_oligos() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 0, 20).unwrap();
    let before = layout(&part);
    let (prime5, prime3) = part.create_xover(a, 20, b, 20).unwrap();
    assert_eq!((prime5, prime3), (a, b));
    assert_eq!(part.oligos().len(), 1);
    part.remove_xover(prime5, prime3).unwrap();
    assert_eq!(layout(&part), before);
    assert_eq!(part.oligos().len(), 2);
    assert_eq!(
        part.remove_xover(prime5, prime3),
        Err(ErrOperation::NotConnected {
            prime5: a,
            prime3: b
        })
    );
    assert_sane(&part);
}

#[test]
fn xover_requires_same_strand_type() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    let b = part.create_strand(1, StrandType::Staple, 0, 20).unwrap();
    assert!(matches!(
        part.create_xover(a, 20, b, 0),
        Err(ErrOperation::StrandTypeMismatch { .. })
    ));
}

/// Two scaffold strands connected at both ends into a loop.
fn loop_part() -> (Part, OligoId) {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 0, 20).unwrap();
    part.create_xover(a, 20, b, 20).unwrap();
    part.create_xover(b, 0, a, 0).unwrap();
    let oligo = part.strand(a).unwrap().oligo;
    (part, oligo)
}

#[test]
fn closing_a_loop() {
    let (part, oligo) = loop_part();
    assert!(part.oligo_is_loop(oligo).unwrap());
    assert_eq!(part.oligo_length(oligo).unwrap(), 42);
    assert_eq!(part.oligos().len(), 1);
    assert_sane(&part);
}

#[test]
fn split_opens_a_loop() {
    let (mut part, oligo) = loop_part();
    let s = part.strand_at(0, StrandType::Scaffold, 10).unwrap();
    let (prime5, prime3) = part.split_strand(s, 10).unwrap();
    assert!(!part.oligo_is_loop(oligo).unwrap());
    assert_eq!(part.oligo_length(oligo).unwrap(), 42);
    assert_eq!(part.oligo(oligo).unwrap().strand_5p, prime3);
    assert_eq!(part.oligo_strands(oligo).unwrap().last(), Some(&prime5));
    assert_eq!(part.oligos().len(), 1);
    assert_sane(&part);
}

#[test]
fn merge_closes_a_loop() {
    let (mut part, oligo) = loop_part();
    let s = part.strand_at(0, StrandType::Scaffold, 10).unwrap();
    let (prime5, _) = part.split_strand(s, 10).unwrap();
    part.merge_at(prime5, 10).unwrap();
    assert!(part.oligo_is_loop(oligo).unwrap());
    assert_sane(&part);
}

#[test]
fn removing_a_strand_in_the_middle_of_an_oligo() {
    let mut part = honeycomb_part(3);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 0, 20).unwrap();
    let c = part.create_strand(2, StrandType::Scaffold, 0, 20).unwrap();
    part.create_xover(a, 20, b, 20).unwrap();
    part.create_xover(b, 0, c, 0).unwrap();
    assert_eq!(part.oligos().len(), 1);
    part.remove_strand(b).unwrap();
    let oa = part.strand(a).unwrap().oligo;
    let oc = part.strand(c).unwrap().oligo;
    assert_ne!(oa, oc);
    assert_eq!(part.oligo_length(oa).unwrap(), 21);
    assert_eq!(part.oligo_length(oc).unwrap(), 21);
    assert_eq!(part.oligo(oc).unwrap().strand_5p, c);
    assert_sane(&part);
}

#[test]
fn resize_keeps_connected_ends() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 5, 20).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 5, 20).unwrap();
    part.create_xover(a, 20, b, 20).unwrap();
    assert_eq!(
        part.resize_strand(a, 5, 25),
        Err(ErrOperation::ConnectedEnd { strand: a, idx: 20 })
    );
    part.resize_strand(a, 0, 20).unwrap();
    let oligo = part.strand(a).unwrap().oligo;
    assert_eq!(part.oligo_length(oligo).unwrap(), 37);
    let c = part.create_strand(0, StrandType::Scaffold, 30, 35).unwrap();
    assert_eq!(
        part.resize_strand(c, 20, 35),
        Err(ErrOperation::RangeOccupied { low: 20, high: 35 })
    );
    assert_sane(&part);
}

#[test]
fn resize_cannot_jump_over_a_neighbour() {
    let mut part = honeycomb_part(1);
    let a = part.create_strand(0, StrandType::Scaffold, 10, 20).unwrap();
    let b = part.create_strand(0, StrandType::Scaffold, 25, 30).unwrap();
    let before = layout(&part);
    assert_eq!(
        part.resize_strand(a, 32, 40),
        Err(ErrOperation::RangeOccupied { low: 32, high: 40 })
    );
    assert_eq!(
        part.resize_strand(b, 0, 5),
        Err(ErrOperation::RangeOccupied { low: 0, high: 5 })
    );
    assert_eq!(layout(&part), before);
    assert_eq!(part.strand_at(0, StrandType::Scaffold, 15), Some(a));
    assert_eq!(part.strand_at(0, StrandType::Scaffold, 35), None);
    part.resize_strand(a, 0, 24).unwrap();
    part.resize_strand(b, 25, 41).unwrap();
    assert_eq!(part.strand_at(0, StrandType::Scaffold, 0), Some(a));
    assert_eq!(part.strand_at(0, StrandType::Scaffold, 41), Some(b));
    assert_sane(&part);
}

#[test]
fn insertions_change_lengths() {
    let mut part = honeycomb_part(1);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    let oligo = part.strand(a).unwrap().oligo;
    part.add_insertion(a, 5, 3).unwrap();
    part.add_insertion(a, 8, -1).unwrap();
    assert_eq!(part.total_length(a).unwrap(), 23);
    assert_eq!(part.oligo_length(oligo).unwrap(), 23);
    part.add_insertion(a, 5, 1).unwrap();
    assert_eq!(part.oligo_length(oligo).unwrap(), 21);
    assert!(part.add_insertion(a, 25, 1).is_err());
    assert!(part.add_insertion(a, 4, -2).is_err());
    part.remove_insertion(a, 8).unwrap();
    assert_eq!(part.oligo_length(oligo).unwrap(), 22);
    assert_eq!(
        part.remove_insertion(a, 8),
        Err(ErrOperation::NoInsertion { strand: a, idx: 8 })
    );
    let (prime5, prime3) = part.split_strand(a, 10).unwrap();
    assert_eq!(part.total_length(prime5).unwrap(), 12);
    assert_eq!(part.total_length(prime3).unwrap(), 10);
    assert_sane(&part);
}

#[test]
fn helix_numbers_follow_parity() {
    let mut part = Part::with_default_size(LatticeType::Square);
    assert_eq!(part.create_virtual_helix(0, 0), Ok(0));
    assert_eq!(part.create_virtual_helix(0, 1), Ok(1));
    assert_eq!(part.create_virtual_helix(1, 1), Ok(2));
    assert_eq!(part.create_virtual_helix(2, 1), Ok(3));
    assert_eq!(
        part.create_virtual_helix(0, 0),
        Err(ErrOperation::LatticePositionAlreadyUsed { row: 0, col: 0 })
    );
    assert_eq!(
        part.create_virtual_helix_with_num(5, 5, 7),
        Err(ErrOperation::HelixNumberUnavailable(7))
    );
    assert_eq!(part.neighbour_helices(0).unwrap(), vec![Some(1), None, None, None]);
    part.create_strand(2, StrandType::Staple, 0, 5).unwrap();
    assert_eq!(part.remove_virtual_helix(2), Err(ErrOperation::HelixNotEmpty(2)));
    part.remove_virtual_helix(3).unwrap();
    assert_eq!(part.create_virtual_helix(3, 0), Ok(3));
    assert_eq!(part.helix_order(), &[0, 1, 2, 3]);
}

#[test]
fn potential_crossovers_on_honeycomb() {
    let mut part = honeycomb_part(2);
    let all = part.potential_crossover_list(0, None).unwrap();
    assert_eq!(all.len(), 12);
    assert!(all.iter().all(|p| p.neighbour == 1));
    let in_first_step = part.potential_crossover_list(0, Some(5)).unwrap();
    assert_eq!(in_first_step.len(), 6);
    assert!(in_first_step.iter().all(|p| p.index < 21));
    assert!(in_first_step.contains(&PotentialXover {
        neighbour: 1,
        index: 6,
        strand_type: StrandType::Staple,
        is_low_idx: true,
    }));

    let a = part.create_strand(0, StrandType::Staple, 0, 6).unwrap();
    let b = part.create_strand(1, StrandType::Staple, 0, 6).unwrap();
    part.create_xover(b, 6, a, 6).unwrap();
    let staples_at_6 = part
        .potential_crossover_list(0, Some(6))
        .unwrap()
        .into_iter()
        .filter(|p| p.strand_type == StrandType::Staple && p.index == 6)
        .count();
    assert_eq!(staples_at_6, 0);
}

#[test]
fn snap_to_nearest_crossover() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 9).unwrap();
    assert_eq!(part.xover_snap_to(a, 9, 3), Some(12));
    assert_eq!(part.xover_snap_to(a, 0, 0), Some(1));
    part.create_strand(0, StrandType::Scaffold, 11, 30).unwrap();
    assert_eq!(part.xover_snap_to(a, 9, 3), Some(2));
    assert_eq!(part.xover_snap_to(a, 5, 1), None);
}

#[test]
fn auto_staple_two_helices() {
    let mut part = honeycomb_part(2);
    part.create_strand(0, StrandType::Scaffold, 0, 41).unwrap();
    part.create_strand(1, StrandType::Scaffold, 0, 41).unwrap();
    part.create_strand(1, StrandType::Staple, 3, 8).unwrap();
    part.auto_staple().unwrap();
    assert_sane(&part);
    let staples: Vec<&Strand> = part
        .strands()
        .values()
        .filter(|s| s.strand_type == StrandType::Staple)
        .collect();
    assert_eq!(staples.len(), 6);
    let oligos = part.staple_oligos();
    assert_eq!(oligos.len(), 3);
    let total: usize = oligos.iter().map(|o| part.oligo_length(*o).unwrap()).sum();
    assert_eq!(total, 84);
    let loops: Vec<&OligoId> = oligos
        .iter()
        .filter(|o| part.oligo_is_loop(**o).unwrap())
        .collect();
    assert_eq!(loops.len(), 1);
    assert_eq!(part.oligo_length(*loops[0]).unwrap(), 42);
    part.undo().unwrap();
    assert_eq!(part.staple_oligos().len(), 1);
}

#[test]
fn apply_sequence_pairs_complementary_strands() {
    let mut part = honeycomb_part(1);
    let scaf = part.create_strand(0, StrandType::Scaffold, 0, 9).unwrap();
    let stap = part.create_strand(0, StrandType::Staple, 0, 4).unwrap();
    let stap_far = part.create_strand(0, StrandType::Staple, 20, 24).unwrap();
    let oligo = part.strand(scaf).unwrap().oligo;
    part.apply_sequence(oligo, Some("ACGTACGTAC")).unwrap();
    assert_eq!(part.strand_sequence(scaf).unwrap(), Some("ACGTACGTAC"));
    assert_eq!(part.strand_sequence(stap).unwrap(), Some("TACGT"));
    assert_eq!(part.strand_sequence(stap_far).unwrap(), None);
    let stap_oligo = part.strand(stap).unwrap().oligo;
    assert_eq!(
        part.oligo_sequence(stap_oligo).unwrap().as_deref(),
        Some("TACGT")
    );

    part.apply_sequence(oligo, Some("ACG")).unwrap();
    assert_eq!(part.strand_sequence(scaf).unwrap(), Some("ACG???????"));
    let list = part.sequence_list(stap).unwrap().unwrap();
    assert_eq!(list[0], (0, 'T', String::new()));
    assert_eq!(list[2], (2, 'C', String::new()));
    assert_eq!(list[4], (4, '?', String::new()));

    part.apply_sequence(oligo, None).unwrap();
    assert_eq!(part.strand_sequence(scaf).unwrap(), None);
    assert_eq!(part.strand_sequence(stap).unwrap(), None);
}

#[test]
fn partial_overlap_is_paired_base_by_base() {
    let mut part = honeycomb_part(1);
    let scaf = part.create_strand(0, StrandType::Scaffold, 3, 6).unwrap();
    let stap = part.create_strand(0, StrandType::Staple, 0, 4).unwrap();
    let oligo = part.strand(scaf).unwrap().oligo;
    part.apply_sequence(oligo, Some("GGCA")).unwrap();
    assert_eq!(part.strand_sequence(stap).unwrap(), Some("CC   "));
}

#[test]
fn sequence_with_insertion() {
    let mut part = honeycomb_part(1);
    let scaf = part.create_strand(0, StrandType::Scaffold, 0, 3).unwrap();
    let stap = part.create_strand(0, StrandType::Staple, 0, 3).unwrap();
    part.add_insertion(scaf, 1, 2).unwrap();
    part.add_insertion(stap, 1, 2).unwrap();
    let oligo = part.strand(scaf).unwrap().oligo;
    part.apply_sequence(oligo, Some("AACGTT")).unwrap();
    let list = part.sequence_list(scaf).unwrap().unwrap();
    assert_eq!(list[1], (1, 'A', String::from("CG")));
    assert_eq!(part.strand_sequence(stap).unwrap(), Some("AACGTT"));
}

#[test]
fn undo_and_redo() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 41).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 0, 41).unwrap();
    let before = layout(&part);
    part.create_xover(a, 20, b, 20).unwrap();
    let after = layout(&part);
    part.undo().unwrap();
    assert_eq!(layout(&part), before);
    assert_sane(&part);
    part.redo().unwrap();
    assert_eq!(layout(&part), after);
    assert_sane(&part);
    assert_eq!(part.redo(), Err(InternalError::EmptyRedoStack));
    part.clear_history();
    assert_eq!(part.undo(), Err(InternalError::EmptyUndoStack));
}

#[test]
fn macros_are_undone_as_a_whole() {
    let mut part = honeycomb_part(1);
    part.begin_macro("two strands");
    part.create_strand(0, StrandType::Scaffold, 0, 10).unwrap();
    assert!(part.create_strand(0, StrandType::Scaffold, 5, 12).is_err());
    part.create_strand(0, StrandType::Scaffold, 15, 20).unwrap();
    assert_eq!(part.undo(), Err(InternalError::MacroInProgress));
    part.end_macro().unwrap();
    assert_eq!(part.strands().len(), 2);
    part.undo().unwrap();
    assert!(part.strands().is_empty());
    assert!(part.oligos().is_empty());

    part.begin_macro("cancelled");
    part.create_strand(0, StrandType::Scaffold, 0, 10).unwrap();
    part.cancel_macro().unwrap();
    assert!(part.strands().is_empty());
    assert_eq!(part.end_macro(), Err(InternalError::NoOpenMacro));
    assert_sane(&part);
}

#[derive(Default)]
struct Recorder {
    notifications: Vec<PartNotification>,
}

impl PartObserver for Recorder {
    fn on_notify(&mut self, notification: &PartNotification) {
        self.notifications.push(notification.clone())
    }
}

#[test]
fn observers_only_see_committed_states() {
    let mut part = honeycomb_part(1);
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    part.add_observer(recorder.clone());
    part.begin_macro("strands");
    let a = part.create_strand(0, StrandType::Scaffold, 0, 10).unwrap();
    assert!(recorder.lock().unwrap().notifications.is_empty());
    part.end_macro().unwrap();
    {
        let recorded = recorder.lock().unwrap();
        let notifications = &recorded.notifications;
        assert!(notifications.contains(&PartNotification::StrandAdded(a)));
        assert_eq!(
            notifications.last(),
            Some(&PartNotification::MacroCommitted(String::from("strands")))
        );
    }
    part.undo().unwrap();
    let recorded = recorder.lock().unwrap();
    let notifications = &recorded.notifications;
    assert!(notifications.contains(&PartNotification::StrandRemoved(a)));
    assert_eq!(
        notifications.last(),
        Some(&PartNotification::Undone(String::from("strands")))
    );
}

#[test]
fn failed_operation_is_not_recorded() {
    let mut part = honeycomb_part(2);
    let a = part.create_strand(0, StrandType::Scaffold, 0, 20).unwrap();
    let b = part.create_strand(1, StrandType::Scaffold, 0, 20).unwrap();
    part.create_xover(a, 20, b, 20).unwrap();
    let before = layout(&part);
    let c = part.create_strand(0, StrandType::Scaffold, 21, 41).unwrap();
    part.undo().unwrap();
    assert!(part.strand(c).is_none());
    // The split succeeds but the 5' end of `b` is already connected.
    assert!(part.create_xover(a, 10, b, 20).is_err());
    assert_eq!(layout(&part), before);
    assert_sane(&part);
}

/// Apply random operations and check the invariants after each of them.
#[test]
fn random_operations_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(2021);
    let mut part = honeycomb_part(4);
    let max = part.max_base();
    for _ in 0..600 {
        let ids: Vec<StrandId> = part.strands().values().map(|s| s.id).collect();
        let pick = |rng: &mut StdRng| {
            if ids.is_empty() {
                None
            } else {
                Some(ids[rng.gen_range(0..ids.len())])
            }
        };
        let helix = rng.gen_range(0..4usize);
        let strand_type = if rng.gen_bool(0.5) {
            StrandType::Scaffold
        } else {
            StrandType::Staple
        };
        match rng.gen_range(0..13) {
            0 | 1 => {
                let low = rng.gen_range(0..max);
                let high = (low + rng.gen_range(0..15)).min(max - 1);
                let _ = part.create_strand(helix, strand_type, low, high);
            }
            2 => {
                if let Some(id) = pick(&mut rng) {
                    let (low, high) = part.strand_idxs(id).unwrap();
                    let _ = part.split_strand(id, rng.gen_range(low..=high));
                }
            }
            3 => {
                if let Some(id) = pick(&mut rng) {
                    let (low, high) = part.strand_idxs(id).unwrap();
                    let idx = if rng.gen_bool(0.5) { low } else { high };
                    let _ = part.merge_at(id, idx);
                }
            }
            4 => {
                if let (Some(a), Some(b)) = (pick(&mut rng), pick(&mut rng)) {
                    let i5 = part.strand(a).unwrap().idx3p();
                    let i3 = part.strand(b).unwrap().idx5p();
                    let _ = part.create_xover(a, i5, b, i3);
                }
            }
            5 => {
                if let Some(a) = pick(&mut rng) {
                    if let Some(b) = part.strand(a).unwrap().connection_3p {
                        part.remove_xover(a, b).unwrap();
                    }
                }
            }
            6 => {
                if let Some(a) = pick(&mut rng) {
                    part.remove_strand(a).unwrap();
                }
            }
            7 => {
                if let Some(a) = pick(&mut rng) {
                    let (low, high) = part.strand_idxs(a).unwrap();
                    let idx = rng.gen_range(low..=high);
                    let length = rng.gen_range(-1..3);
                    let _ = part.add_insertion(a, idx, length);
                }
            }
            8 => {
                if let Some(a) = pick(&mut rng) {
                    let (low, high) = part.strand_idxs(a).unwrap();
                    let new_low = (low + rng.gen_range(-20..10)).max(0);
                    let new_high = (high + rng.gen_range(-10..20)).min(max - 1);
                    let _ = part.resize_strand(a, new_low, new_high);
                }
            }
            9 => {
                if let Some(a) = pick(&mut rng) {
                    let idx = part.strand(a).unwrap().insertions.keys().next().cloned();
                    if let Some(idx) = idx {
                        part.remove_insertion(a, idx).unwrap();
                    }
                }
            }
            10 => {
                if let Some(a) = pick(&mut rng) {
                    let (below, above) = part.strand_neighbours(a).unwrap();
                    if let Some(other) = if rng.gen_bool(0.5) { below } else { above } {
                        let _ = part.merge_strands(other, a);
                    }
                }
            }
            11 => {
                if let Some(a) = pick(&mut rng) {
                    let oligo = part.strand(a).unwrap().oligo;
                    let length = part.oligo_length(oligo).unwrap();
                    let sequence: String = "ACTG".chars().cycle().take(length).collect();
                    let sequence = if rng.gen_bool(0.8) {
                        Some(sequence.as_str())
                    } else {
                        None
                    };
                    part.apply_sequence(oligo, sequence).unwrap();
                }
            }
            _ => {
                if part.can_undo() {
                    part.undo().unwrap();
                }
            }
        }
        assert_sane(&part);
        for s in part.strands().values() {
            assert_eq!(
                part.walk_length(s.oligo).unwrap(),
                part.oligo_length(s.oligo).unwrap()
            );
        }
    }
    while part.can_undo() {
        part.undo().unwrap();
        assert_sane(&part);
    }
    assert!(part.strands().is_empty());
    assert!(part.oligos().is_empty());
}
