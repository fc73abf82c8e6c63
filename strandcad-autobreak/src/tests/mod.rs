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
use strandcad_design::{LatticeType, StrandId};

fn part_with_helices(nb_helices: isize, nb_bases: usize) -> Part {
    let mut part = Part::new(LatticeType::Honeycomb, nb_bases);
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

fn staple_lengths_of(part: &Part) -> Vec<usize> {
    let mut ret: Vec<usize> = part
        .staple_oligos()
        .into_iter()
        .map(|o| part.oligo_length(o).unwrap())
        .collect();
    ret.sort();
    ret
}

/// Connect the 3' end of each strand to the 5' end of the next one.
fn chain(part: &mut Part, strands: &[StrandId]) {
    for w in strands.windows(2) {
        let i5 = part.strand(w[0]).unwrap().idx3p();
        let i3 = part.strand(w[1]).unwrap().idx5p();
        part.create_xover(w[0], i5, w[1], i3).unwrap();
    }
}

#[test]
fn break_linear_oligo_of_90_bases() {
    let mut part = part_with_helices(2, 90);
    part.create_strand(1, StrandType::Staple, 0, 89).unwrap();
    let settings = AutobreakSettings {
        min_staple_leg_len: 3,
        min_staple_len: 30,
        max_staple_len: 40,
        tgt_staple_len: 35,
    };
    let report = break_staples(&mut part, &settings).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(report.broken.len(), 1);
    let lengths = &report.broken[0].staple_lengths;
    assert!(lengths.iter().all(|l| (30..=40).contains(l)));
    assert_eq!(lengths.iter().sum::<usize>(), 90);
    assert_eq!(staple_lengths_of(&part), vec![30, 30, 30]);
    let idxs: Vec<(isize, isize)> = part
        .strand_set(1, StrandType::Staple)
        .unwrap()
        .ids()
        .iter()
        .map(|id| part.strand_idxs(*id).unwrap())
        .collect();
    assert_eq!(idxs, vec![(0, 29), (30, 59), (60, 89)]);
    assert_sane(&part);

    part.undo().unwrap();
    assert_eq!(staple_lengths_of(&part), vec![90]);
}

#[test]
fn break_a_loop() {
    let mut part = part_with_helices(2, 105);
    let s0 = part.create_strand(0, StrandType::Staple, 0, 104).unwrap();
    let s1 = part.create_strand(1, StrandType::Staple, 0, 104).unwrap();
    chain(&mut part, &[s1, s0]);
    part.create_xover(s0, 0, s1, 0).unwrap();
    let oligo = part.strand(s0).unwrap().oligo;
    assert!(part.oligo_is_loop(oligo).unwrap());

    let tokens = tokenize_oligo(&part, oligo, &Default::default()).unwrap();
    assert_eq!(tokens.total(), 210);
    assert_eq!(tokens.loop_shift, 2);

    let report = break_staples(&mut part, &Default::default()).unwrap();
    assert_eq!(report.broken.len(), 1);
    assert_eq!(report.broken[0].staple_lengths, vec![42; 5]);
    assert_eq!(staple_lengths_of(&part), vec![42; 5]);
    for o in part.staple_oligos() {
        assert!(!part.oligo_is_loop(o).unwrap());
    }
    assert_sane(&part);
}

#[test]
fn breaks_on_junctions_remove_crossovers() {
    let mut part = part_with_helices(3, 42);
    let strands: Vec<StrandId> = (0..3)
        .map(|h| part.create_strand(h, StrandType::Staple, 0, 29).unwrap())
        .collect();
    chain(&mut part, &strands);
    assert_eq!(part.staple_oligos().len(), 1);
    let settings = AutobreakSettings {
        min_staple_leg_len: 2,
        min_staple_len: 25,
        max_staple_len: 35,
        tgt_staple_len: 30,
    };
    let report = break_staples(&mut part, &settings).unwrap();
    assert_eq!(report.broken[0].staple_lengths, vec![30, 30, 30]);
    assert_eq!(part.strands().len(), 3);
    for s in part.strands().values() {
        assert_eq!(s.connection_5p, None);
        assert_eq!(s.connection_3p, None);
    }
    assert_eq!(staple_lengths_of(&part), vec![30, 30, 30]);
    assert_sane(&part);
}

#[test]
fn unbreakable_oligos_are_left_untouched() {
    let mut part = part_with_helices(2, 105);
    let long = part.create_strand(1, StrandType::Staple, 0, 89).unwrap();
    part.add_insertion(long, 40, 1).unwrap();
    let small = [
        part.create_strand(0, StrandType::Staple, 0, 9).unwrap(),
        part.create_strand(1, StrandType::Staple, 95, 104).unwrap(),
    ];
    chain(&mut part, &small);
    part.create_xover(small[1], 104, small[0], 9).unwrap();
    let small_oligo = part.strand(small[0]).unwrap().oligo;
    let long_oligo = part.strand(long).unwrap().oligo;
    assert!(part.oligo_is_loop(small_oligo).unwrap());
    let before = staple_lengths_of(&part);

    let report = break_staples(&mut part, &Default::default()).unwrap();
    assert!(report.broken.is_empty());
    assert!(report
        .skipped
        .contains(&(long_oligo, SkipReason::NoFeasibleSegmentation)));
    assert!(report
        .skipped
        .contains(&(small_oligo, SkipReason::TooShort { length: 20 })));
    assert_eq!(staple_lengths_of(&part), before);
    assert_sane(&part);
}

#[test]
fn invalid_settings_are_rejected() {
    let mut part = part_with_helices(1, 42);
    let settings = AutobreakSettings {
        min_staple_len: 45,
        ..Default::default()
    };
    assert!(break_staples(&mut part, &settings).is_err());
}

#[test]
fn breaks_never_leave_single_base_fragments() {
    let short_legs = AutobreakSettings {
        min_staple_leg_len: 1,
        min_staple_len: 20,
        max_staple_len: 21,
        tgt_staple_len: 20,
    };
    let mut part = part_with_helices(2, 42);
    assert_eq!(
        break_staples(&mut part, &short_legs).unwrap_err(),
        SettingsError::LegTooShort { leg: 1 }
    );

    let settings = AutobreakSettings {
        min_staple_leg_len: 2,
        ..short_legs
    };
    for a in 3..40 {
        for b in 3..40 {
            let mut part = part_with_helices(2, 42);
            let first = part.create_strand(1, StrandType::Staple, 0, a - 1).unwrap();
            let second = part.create_strand(0, StrandType::Staple, 0, b - 1).unwrap();
            chain(&mut part, &[first, second]);
            let report = break_staples(&mut part, &settings).unwrap();
            for (_, reason) in report.skipped.iter() {
                assert!(
                    !matches!(reason, SkipReason::ApplyFailed(_)),
                    "{} + {}: {}",
                    a,
                    b,
                    reason
                );
            }
            assert_sane(&part);
        }
    }
}

#[test]
fn breaking_staples_conserves_bases() {
    let settings = AutobreakSettings::default();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut part = part_with_helices(4, 105);
        let strands: Vec<StrandId> = (0..4)
            .map(|h| {
                let low = rng.gen_range(0..30);
                let high = rng.gen_range(40..105);
                part.create_strand(h, StrandType::Staple, low, high).unwrap()
            })
            .collect();
        for s in strands.iter() {
            if rng.gen_bool(0.3) {
                let (low, high) = part.strand_idxs(*s).unwrap();
                let idx = rng.gen_range(low..=high);
                let length = if rng.gen_bool(0.5) { -1 } else { rng.gen_range(1..4) };
                part.add_insertion(*s, idx, length).unwrap();
            }
        }
        chain(&mut part, &strands);
        if rng.gen_bool(0.5) {
            let i5 = part.strand(strands[3]).unwrap().idx3p();
            let i3 = part.strand(strands[0]).unwrap().idx5p();
            part.create_xover(strands[3], i5, strands[0], i3).unwrap();
        }
        let oligo = part.strand(strands[0]).unwrap().oligo;
        let length = part.oligo_length(oligo).unwrap();
        let tokens = tokenize_oligo(&part, oligo, &settings).unwrap();
        if tokens.is_empty() {
            assert!(length < settings.min_oligo_len());
        } else {
            assert_eq!(tokens.total(), length);
        }

        let report = break_staples(&mut part, &settings).unwrap();
        assert_sane(&part);
        assert_eq!(staple_lengths_of(&part).iter().sum::<usize>(), length);
        for broken in report.broken.iter() {
            assert_eq!(broken.staple_lengths.iter().sum::<usize>(), length);
            for l in broken.staple_lengths.iter() {
                assert!(*l >= settings.min_staple_len && *l <= settings.max_staple_len);
            }
        }
        if !report.broken.is_empty() {
            let mut lengths = report.broken[0].staple_lengths.clone();
            lengths.sort();
            assert_eq!(staple_lengths_of(&part), lengths);
        }
    }
}
