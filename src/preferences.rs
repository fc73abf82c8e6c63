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
use super::AppError;
use std::path::Path;
use strandcad_autobreak::AutobreakSettings;

/// The parameters of a run, read from an optional json file. Missing fields take their default
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub autobreak: AutobreakSettings,
    /// Replace the staples of the design by new ones before breaking them.
    pub auto_staple: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            autobreak: Default::default(),
            auto_staple: true,
        }
    }
}

impl Preferences {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn from_json(json: &str) -> Result<Self, AppError> {
        let ret: Self = serde_json::from_str(json).map_err(AppError::Preferences)?;
        ret.autobreak.validate()?;
        Ok(ret)
    }
}
