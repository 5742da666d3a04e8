use serde::{Deserialize, Serialize};

/// Ordinal severity classes, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    Green,
    Blue,
    Purple,
    Red,
}

/// Lower bounds of `Blue`, `Purple` and `Red`, ascending.
pub const BUCKET_THRESHOLDS: [f64; 3] = [2.0, 4.0, 6.0];

impl ColorBucket {
    pub const ALL: [ColorBucket; 4] = [
        ColorBucket::Green,
        ColorBucket::Blue,
        ColorBucket::Purple,
        ColorBucket::Red,
    ];

    /// First matching half-open interval wins, so 2, 4 and 6 land in the
    /// upper bucket. NaN fails every comparison and lands in `Red`.
    pub fn for_magnitude(magnitude: f64) -> Self {
        if magnitude < BUCKET_THRESHOLDS[0] {
            ColorBucket::Green
        } else if magnitude < BUCKET_THRESHOLDS[1] {
            ColorBucket::Blue
        } else if magnitude < BUCKET_THRESHOLDS[2] {
            ColorBucket::Purple
        } else {
            ColorBucket::Red
        }
    }

    /// CSS color keyword handed to the renderer.
    pub fn css_name(self) -> &'static str {
        match self {
            ColorBucket::Green => "green",
            ColorBucket::Blue => "blue",
            ColorBucket::Purple => "purple",
            ColorBucket::Red => "red",
        }
    }
}

impl std::fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}
