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
pub const DEFAULT_MIN_STAPLE_LEG_LEN: usize = 2;
/// A strand is never split so as to leave a fragment of a single base.
pub const SHORTEST_STAPLE_LEG_LEN: usize = 2;
pub const DEFAULT_MIN_STAPLE_LEN: usize = 30;
pub const DEFAULT_MAX_STAPLE_LEN: usize = 50;
pub const DEFAULT_TGT_STAPLE_LEN: usize = 40;

/// The constraints on the staples produced by the auto-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutobreakSettings {
    /// The minimum number of bases between a break and a cross-over.
    pub min_staple_leg_len: usize,
    pub min_staple_len: usize,
    pub max_staple_len: usize,
    pub tgt_staple_len: usize,
}

impl Default for AutobreakSettings {
    fn default() -> Self {
        Self {
            min_staple_leg_len: DEFAULT_MIN_STAPLE_LEG_LEN,
            min_staple_len: DEFAULT_MIN_STAPLE_LEN,
            max_staple_len: DEFAULT_MAX_STAPLE_LEN,
            tgt_staple_len: DEFAULT_TGT_STAPLE_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The target length must lie between the minimum and maximum lengths.
    TargetOutOfBounds { min: usize, tgt: usize, max: usize },
    /// Legs shorter than `SHORTEST_STAPLE_LEG_LEN` would leave single base fragments.
    LegTooShort { leg: usize },
    /// Two legs must fit in the shortest staple.
    LegTooLong { leg: usize, min: usize },
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetOutOfBounds { min, tgt, max } => write!(
                f,
                "target length {} is not in [{}, {}]",
                tgt, min, max
            ),
            Self::LegTooShort { leg } => write!(
                f,
                "the minimum leg length {} is below {}",
                leg, SHORTEST_STAPLE_LEG_LEN
            ),
            Self::LegTooLong { leg, min } => write!(
                f,
                "two legs of length {} do not fit in a staple of length {}",
                leg, min
            ),
        }
    }
}

impl std::error::Error for SettingsError {}

impl AutobreakSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (min, tgt, max) = (self.min_staple_len, self.tgt_staple_len, self.max_staple_len);
        if min > tgt || tgt > max {
            return Err(SettingsError::TargetOutOfBounds { min, tgt, max });
        }
        if self.min_staple_leg_len < SHORTEST_STAPLE_LEG_LEN {
            return Err(SettingsError::LegTooShort {
                leg: self.min_staple_leg_len,
            });
        }
        if 2 * self.min_staple_leg_len > min {
            return Err(SettingsError::LegTooLong {
                leg: self.min_staple_leg_len,
                min,
            });
        }
        Ok(())
    }

    /// The shortest oligo that is worth breaking.
    pub fn min_oligo_len(&self) -> usize {
        (2 * self.min_staple_len + 1).max(self.min_staple_len)
    }
}
