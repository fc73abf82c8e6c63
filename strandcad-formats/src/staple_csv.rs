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
//! Staple list in csv format, one row per staple oligo.

use strandcad_design::sequence::{BLANK_BASE, UNKNOWN_BASE};
use strandcad_design::utils::color_to_hex;
use strandcad_design::{OligoId, Part};

pub const CSV_HEADER: &str = "Start,End,Sequence,Length,Color";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StapleRow {
    pub start: (usize, isize),
    pub end: (usize, isize),
    pub sequence: String,
    pub length: usize,
    pub color: u32,
}

impl StapleRow {
    fn from_oligo(part: &Part, id: OligoId) -> Option<Self> {
        let oligo = part.oligo(id)?;
        let strands = part.oligo_strands(id).ok()?;
        let first = part.strand(*strands.first()?)?;
        let last = part.strand(*strands.last()?)?;
        let sequence = match part.oligo_sequence(id).ok().flatten() {
            Some(seq) => seq
                .chars()
                .map(|c| if c == BLANK_BASE { UNKNOWN_BASE } else { c })
                .collect(),
            None => std::iter::repeat(UNKNOWN_BASE).take(oligo.length).collect(),
        };
        Some(Self {
            start: (first.helix, first.idx5p()),
            end: (last.helix, last.idx3p()),
            sequence,
            length: oligo.length,
            color: oligo.color,
        })
    }

    pub fn to_csv(&self) -> String {
        format!(
            "{}[{}],{}[{}],{},{},{}",
            self.start.0,
            self.start.1,
            self.end.0,
            self.end.1,
            self.sequence,
            self.length,
            color_to_hex(self.color)
        )
    }
}

/// The staple oligos of `part`, sorted by the position of their 5' end.
pub fn staple_rows(part: &Part) -> Vec<StapleRow> {
    let mut rows: Vec<StapleRow> = part
        .staple_oligos()
        .into_iter()
        .filter_map(|id| StapleRow::from_oligo(part, id))
        .collect();
    rows.sort_by_key(|r| r.start);
    rows
}

pub fn staple_csv(part: &Part) -> String {
    let mut ret = String::from(CSV_HEADER);
    ret.push('\n');
    for row in staple_rows(part) {
        ret.push_str(&row.to_csv());
        ret.push('\n');
    }
    ret
}
