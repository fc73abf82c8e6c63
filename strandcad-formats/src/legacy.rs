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
//! The legacy json format, in which every base of a helix is described by the positions of its
//! 5' and 3' neighbours.

use super::FormatError;
use ahash::AHashMap;
use strandcad_design::{LatticeType, OligoId, Part, Strand, StrandId, StrandType};

const NO_BASE: [isize; 4] = [-1, -1, -1, -1];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyDesign {
    #[serde(default)]
    pub name: String,
    pub vstrands: Vec<LegacyVStrand>,
}

/// A helix of a legacy design.
///
/// `scaf` and `stap` hold, for each base, `[5' helix, 5' idx, 3' helix, 3' idx]` with `-1` for
/// missing neighbours, and `[-1, -1, -1, -1]` at positions without a base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[allow(non_snake_case)]
pub struct LegacyVStrand {
    pub stap_colors: Vec<[isize; 2]>,
    pub num: isize,
    pub scafLoop: Vec<Vec<isize>>,
    pub stap: Vec<[isize; 4]>,
    pub skip: Vec<isize>,
    pub scaf: Vec<[isize; 4]>,
    pub stapLoop: Vec<Vec<isize>>,
    pub col: isize,
    #[serde(rename = "loop")]
    pub loop_: Vec<isize>,
    pub row: isize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scaf_colors: Vec<[isize; 2]>,
    /// `(helix, idx, sequence)` of oligos whose 5' end is at `(helix, idx)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oligo_sequences: Vec<(isize, isize, String)>,
}

impl LegacyVStrand {
    fn bases(&self, strand_type: StrandType) -> &[[isize; 4]] {
        match strand_type {
            StrandType::Scaffold => &self.scaf,
            StrandType::Staple => &self.stap,
        }
    }

    fn colors(&self, strand_type: StrandType) -> &[[isize; 2]] {
        match strand_type {
            StrandType::Scaffold => &self.scaf_colors,
            StrandType::Staple => &self.stap_colors,
        }
    }

    /// The insertion length at `idx`, `-1` for a skip and `0` if there is nothing.
    fn insertion_at(&self, idx: usize) -> isize {
        if self.skip[idx] < 0 {
            -1
        } else {
            self.loop_[idx].max(0)
        }
    }
}

pub trait FromLegacy: Sized {
    fn from_legacy(design: LegacyDesign) -> Result<Self, FormatError>;
}

impl FromLegacy for Part {
    fn from_legacy(design: LegacyDesign) -> Result<Self, FormatError> {
        let length = design.vstrands.first().map(|v| v.scaf.len()).unwrap_or(0);
        for v in design.vstrands.iter() {
            for found in [
                v.scaf.len(),
                v.stap.len(),
                v.loop_.len(),
                v.skip.len(),
            ] {
                if found != length {
                    return Err(FormatError::InconsistentLength {
                        num: v.num,
                        expected: length,
                        found,
                    });
                }
            }
        }
        let lattice = if length % 21 == 0 {
            LatticeType::Honeycomb
        } else {
            LatticeType::Square
        };
        log::info!(
            "reading {} helices of {} bases on a {} lattice",
            design.vstrands.len(),
            length,
            lattice
        );
        let mut part = Part::new(lattice, length);
        read_design(&mut part, &design)?;
        part.clear_history();
        Ok(part)
    }
}

fn read_design(part: &mut Part, design: &LegacyDesign) -> Result<(), FormatError> {
    let mut ordered = Vec::with_capacity(design.vstrands.len());
    for v in design.vstrands.iter() {
        if v.num < 0 {
            return Err(FormatError::InvalidHelixNumber(v.num));
        }
        let num = part.create_virtual_helix_with_num(v.row, v.col, v.num as usize)?;
        log::debug!("helix {} at ({}, {})", num, v.row, v.col);
        ordered.push((num, v));
    }
    let helices: AHashMap<usize, &LegacyVStrand> = ordered.iter().cloned().collect();
    for strand_type in StrandType::ALL {
        for (num, v) in ordered.iter() {
            for (low, high) in runs(*num, strand_type, v.bases(strand_type))? {
                part.create_strand(*num, strand_type, low, high)?;
            }
        }
        for (num, v) in ordered.iter() {
            connect_helix(part, &helices, *num, strand_type, v)?;
        }
    }
    for (num, v) in ordered.iter() {
        read_insertions(part, *num, v)?;
    }
    for (num, v) in ordered.iter() {
        for strand_type in StrandType::ALL {
            for [idx, color] in v.colors(strand_type).iter().cloned() {
                if let Some(oligo) = oligo_starting_at(part, *num, strand_type, idx)? {
                    part.set_oligo_color(oligo, color as u32)?;
                } else {
                    log::warn!("Color of helix {} at {} does not start an oligo", num, idx);
                }
            }
        }
    }
    for (num, v) in ordered.iter() {
        for (helix, idx, sequence) in v.oligo_sequences.iter() {
            if *helix != *num as isize {
                log::warn!("Sequence listed on helix {} starts on helix {}", num, helix);
            }
            let found = if *helix < 0 {
                None
            } else {
                oligo_starting_at(part, *helix as usize, StrandType::Scaffold, *idx)?
            };
            match found {
                Some(oligo) => part.apply_sequence(oligo, Some(sequence.as_str()))?,
                None => log::warn!("No scaffold oligo starts at {}[{}]", helix, idx),
            }
        }
    }
    Ok(())
}

/// The `(low, high)` ranges of the maximal runs of bases of a helix that are linked to each other.
/// Two consecutive bases are linked when each of them points to the other.
fn runs(
    num: usize,
    strand_type: StrandType,
    bases: &[[isize; 4]],
) -> Result<Vec<(isize, isize)>, FormatError> {
    let drawn_5_to_3 = strand_type.is_drawn_5_to_3(num);
    let helix = num as isize;
    // The neighbour of a base towards increasing indices, and the neighbour towards decreasing
    // indices.
    let up = |b: &[isize; 4]| if drawn_5_to_3 { [b[2], b[3]] } else { [b[0], b[1]] };
    let down = |b: &[isize; 4]| if drawn_5_to_3 { [b[0], b[1]] } else { [b[2], b[3]] };
    let mut ret = Vec::new();
    let mut start: Option<isize> = None;
    for (i, base) in bases.iter().enumerate() {
        let idx = i as isize;
        if *base == NO_BASE {
            continue;
        }
        let low = *start.get_or_insert(idx);
        let next = bases.get(i + 1).filter(|b| **b != NO_BASE);
        let links_up = up(base) == [helix, idx + 1];
        let linked_back = next.map(|b| down(b) == [helix, idx]).unwrap_or(false);
        if links_up != linked_back {
            let idx = if links_up { idx } else { idx + 1 };
            return Err(FormatError::DanglingConnection {
                num,
                idx,
                strand_type,
            });
        }
        if !links_up {
            ret.push((low, idx));
            start = None;
        }
    }
    Ok(ret)
}

/// Create the connections leaving the 3' ends of the strands of a helix.
fn connect_helix(
    part: &mut Part,
    helices: &AHashMap<usize, &LegacyVStrand>,
    num: usize,
    strand_type: StrandType,
    v: &LegacyVStrand,
) -> Result<(), FormatError> {
    let dangling = |idx: isize| FormatError::DanglingConnection {
        num,
        idx,
        strand_type,
    };
    let ends: Vec<isize> = part
        .strand_set(num, strand_type)
        .map(|set| {
            set.ids()
                .iter()
                .filter_map(|id| part.strand(*id).map(Strand::idx3p))
                .collect()
        })
        .unwrap_or_default();
    for idx3p in ends {
        let [_, _, helix, idx] = v.bases(strand_type)[idx3p as usize];
        if helix < 0 {
            continue;
        }
        let target = helices
            .get(&(helix as usize))
            .and_then(|t| t.bases(strand_type).get(idx as usize))
            .ok_or_else(|| dangling(idx3p))?;
        if target[..2] != [num as isize, idx3p] {
            return Err(dangling(idx3p));
        }
        let prime5 = part
            .strand_at(num, strand_type, idx3p)
            .ok_or_else(|| dangling(idx3p))?;
        let prime3 = part
            .strand_at(helix as usize, strand_type, idx)
            .ok_or_else(|| dangling(idx3p))?;
        if part.strand(prime3).map(Strand::idx5p) != Some(idx) {
            return Err(dangling(idx3p));
        }
        part.create_xover(prime5, idx3p, prime3, idx)?;
    }
    Ok(())
}

fn read_insertions(part: &mut Part, num: usize, v: &LegacyVStrand) -> Result<(), FormatError> {
    for i in 0..v.loop_.len() {
        let length = v.insertion_at(i);
        if length == 0 {
            continue;
        }
        let idx = i as isize;
        let mut placed = false;
        for strand_type in StrandType::ALL {
            if let Some(id) = part.strand_at(num, strand_type, idx) {
                part.add_insertion(id, idx, length)?;
                placed = true;
            }
        }
        if !placed {
            log::warn!("Dropping insertion at {}[{}] that is on no strand", num, idx);
        }
    }
    Ok(())
}

/// The oligo whose 5' end is at `idx` on helix `num`. A loop oligo is rotated so that it starts
/// there.
fn oligo_starting_at(
    part: &mut Part,
    num: usize,
    strand_type: StrandType,
    idx: isize,
) -> Result<Option<OligoId>, FormatError> {
    let found = part
        .strand_at(num, strand_type, idx)
        .and_then(|id| part.strand(id))
        .filter(|s| s.idx5p() == idx)
        .map(|s| (s.id, s.oligo));
    let (strand, oligo) = match found {
        Some(found) => found,
        None => return Ok(None),
    };
    if part.oligo_is_loop(oligo)? {
        part.rotate_loop_start(oligo, strand)?;
    }
    Ok(Some(oligo))
}

impl LegacyDesign {
    pub fn from_part(part: &Part, name: &str) -> Self {
        let length = part.max_base() as usize;
        let mut vstrands: Vec<LegacyVStrand> = part
            .helices()
            .map(|h| LegacyVStrand {
                stap_colors: Vec::new(),
                num: h.num as isize,
                scafLoop: Vec::new(),
                stap: vec![NO_BASE; length],
                skip: vec![0; length],
                scaf: vec![NO_BASE; length],
                stapLoop: Vec::new(),
                col: h.col,
                loop_: vec![0; length],
                row: h.row,
                scaf_colors: Vec::new(),
                oligo_sequences: Vec::new(),
            })
            .collect();
        let position: AHashMap<usize, usize> = part
            .helix_order()
            .iter()
            .enumerate()
            .map(|(i, num)| (*num, i))
            .collect();

        for strand in part.strands().values() {
            let v = &mut vstrands[position[&strand.helix]];
            write_strand(part, strand, v);
            for (idx, length) in strand.insertions.iter() {
                let i = *idx as usize;
                if *length < 0 {
                    v.skip[i] = -1;
                } else if v.loop_[i] == 0 {
                    v.loop_[i] = *length;
                }
            }
        }

        for oligo in part.oligos().values() {
            let start = match part.strand(oligo.strand_5p) {
                Some(s) => s,
                None => continue,
            };
            let v = &mut vstrands[position[&start.helix]];
            let entry = [start.idx5p(), oligo.color as isize];
            match oligo.strand_type {
                StrandType::Staple => v.stap_colors.push(entry),
                StrandType::Scaffold => {
                    if oligo.color != strandcad_design::utils::DEFAULT_SCAFFOLD_COLOR {
                        v.scaf_colors.push(entry)
                    }
                    if let Ok(Some(sequence)) = part.oligo_sequence(oligo.id) {
                        v.oligo_sequences
                            .push((start.helix as isize, start.idx5p(), sequence));
                    }
                }
            }
        }
        for v in vstrands.iter_mut() {
            v.stap_colors.sort();
            v.scaf_colors.sort();
            v.oligo_sequences.sort_by_key(|s| s.1);
        }

        Self {
            name: name.to_string(),
            vstrands,
        }
    }
}

fn write_strand(part: &Part, strand: &Strand, v: &mut LegacyVStrand) {
    let num = strand.helix as isize;
    let end_of = |id: Option<StrandId>, prime5: bool| -> [isize; 2] {
        id.and_then(|id| part.strand(id))
            .map(|s| {
                let idx = if prime5 { s.idx3p() } else { s.idx5p() };
                [s.helix as isize, idx]
            })
            .unwrap_or([-1, -1])
    };
    let step: isize = if strand.is_drawn_5_to_3() { 1 } else { -1 };
    let bases = match strand.strand_type {
        StrandType::Scaffold => &mut v.scaf,
        StrandType::Staple => &mut v.stap,
    };
    for idx in strand.low..=strand.high {
        let prime5 = if idx == strand.idx5p() {
            end_of(strand.connection_5p, true)
        } else {
            [num, idx - step]
        };
        let prime3 = if idx == strand.idx3p() {
            end_of(strand.connection_3p, false)
        } else {
            [num, idx + step]
        };
        bases[idx as usize] = [prime5[0], prime5[1], prime3[0], prime3[1]];
    }
}
