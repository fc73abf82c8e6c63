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
//! Color helpers. Colors are stored as `0xRRGGBB`.

pub const DEFAULT_SCAFFOLD_COLOR: u32 = 0x0066CC;
/// Color given to oligos whose bookkeeping could not be trusted by an algorithm.
pub const ERROR_COLOR: u32 = 0xFF3333;

pub fn hsv_color(hue: f64, saturation: f64, value: f64) -> u32 {
    let hsv = color_space::Hsv::new(hue, saturation, value);
    let rgb = color_space::Rgb::from(hsv);
    ((rgb.r as u32) << 16) | ((rgb.g as u32) << 8) | (rgb.b as u32)
}

/// Return the next color of a golden ratio walk on the hue circle and advance `color_idx`.
pub fn new_color(color_idx: &mut usize) -> u32 {
    let color = {
        let hue = (*color_idx as f64 * (1. + 5f64.sqrt()) / 2.).fract() * 360.;
        let saturation = (*color_idx as f64 * 7. * (1. + 5f64.sqrt() / 2.)).fract() * 0.25 + 0.75;
        let value = (*color_idx as f64 * 11. * (1. + 5f64.sqrt() / 2.)).fract() * 0.5 + 0.5;
        hsv_color(hue, saturation, value)
    };
    *color_idx += 1;
    color
}

/// Format a color as `#rrggbb`.
pub fn color_to_hex(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}
