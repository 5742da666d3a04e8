use serde::{Deserialize, Serialize};

use crate::classify::ColorBucket;

/// Lower edge of each legend row. Static, not derived from the data.
pub const LEGEND_BREAKPOINTS: [f64; 4] = [0.0, 2.0, 4.0, 6.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub bucket: ColorBucket,
    pub range_label: String,
    pub from: f64,
    pub to: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub position: LegendPosition,
    pub entries: Vec<LegendEntry>,
}

/// Swatch color for a legend row starting at `from`.
///
/// Evaluated one unit above the lower edge so the swatch uses the same rule
/// as the markers without depending on how the boundary itself classifies.
pub fn swatch_bucket(from: f64) -> ColorBucket {
    ColorBucket::for_magnitude(from + 1.0)
}

pub fn range_label(from: f64, to: Option<f64>) -> String {
    match to {
        Some(to) => format!("{}\u{2013}{}", from, to),
        None => format!("{}+", from),
    }
}

pub fn build_legend(position: LegendPosition) -> Legend {
    let entries = LEGEND_BREAKPOINTS
        .iter()
        .enumerate()
        .map(|(i, &from)| {
            let to = LEGEND_BREAKPOINTS.get(i + 1).copied();
            LegendEntry {
                bucket: swatch_bucket(from),
                range_label: range_label(from, to),
                from,
                to,
            }
        })
        .collect();

    Legend { position, entries }
}

impl Legend {
    /// Row describing the color a marker of `magnitude` is drawn in.
    ///
    /// Selected through the marker rule itself, so values outside the
    /// labelled ranges (negative, NaN) land on the row of their color.
    pub fn entry_for(&self, magnitude: f64) -> Option<&LegendEntry> {
        let bucket = ColorBucket::for_magnitude(magnitude);
        self.entries.iter().find(|entry| entry.bucket == bucket)
    }
}
