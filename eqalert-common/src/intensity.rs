//! Seismic intensity scale
//!
//! Nine canonical levels, strongest first. Bulletins spell levels either as
//! bare codes (`"5-"`) or as localized labels (`"震度5弱"`, also written with
//! full-width digits).

use serde::{Deserialize, Serialize};

/// Code reported when a localized label is not recognized
pub const UNKNOWN_CODE: &str = "0";

/// Code reported when a bulletin carries no maximum intensity at all
pub const ABSENT_CODE: &str = "NoN";

/// Canonical intensity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntensityLevel {
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "6+")]
    SixUpper,
    #[serde(rename = "6-")]
    SixLower,
    #[serde(rename = "5+")]
    FiveUpper,
    #[serde(rename = "5-")]
    FiveLower,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "1")]
    One,
}

impl IntensityLevel {
    /// All levels in descending severity
    pub const DESCENDING: [IntensityLevel; 9] = [
        IntensityLevel::Seven,
        IntensityLevel::SixUpper,
        IntensityLevel::SixLower,
        IntensityLevel::FiveUpper,
        IntensityLevel::FiveLower,
        IntensityLevel::Four,
        IntensityLevel::Three,
        IntensityLevel::Two,
        IntensityLevel::One,
    ];

    /// Canonical short code, e.g. `"6+"`
    pub fn code(self) -> &'static str {
        match self {
            IntensityLevel::Seven => "7",
            IntensityLevel::SixUpper => "6+",
            IntensityLevel::SixLower => "6-",
            IntensityLevel::FiveUpper => "5+",
            IntensityLevel::FiveLower => "5-",
            IntensityLevel::Four => "4",
            IntensityLevel::Three => "3",
            IntensityLevel::Two => "2",
            IntensityLevel::One => "1",
        }
    }

    /// Index into [`IntensityLevel::DESCENDING`]
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Parse a canonical code as used by station readings
    pub fn from_code(code: &str) -> Option<Self> {
        Self::DESCENDING.into_iter().find(|level| level.code() == code)
    }

    /// Parse a localized label such as `"震度５弱"`
    pub fn from_label(label: &str) -> Option<Self> {
        LOCALIZED_LABELS
            .iter()
            .find(|(text, _)| *text == label)
            .map(|(_, level)| *level)
    }
}

impl std::fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Localized label variants, ASCII and full-width digit per level
static LOCALIZED_LABELS: [(&str, IntensityLevel); 18] = [
    ("震度7", IntensityLevel::Seven),
    ("震度７", IntensityLevel::Seven),
    ("震度6強", IntensityLevel::SixUpper),
    ("震度６強", IntensityLevel::SixUpper),
    ("震度6弱", IntensityLevel::SixLower),
    ("震度６弱", IntensityLevel::SixLower),
    ("震度5強", IntensityLevel::FiveUpper),
    ("震度５強", IntensityLevel::FiveUpper),
    ("震度5弱", IntensityLevel::FiveLower),
    ("震度５弱", IntensityLevel::FiveLower),
    ("震度4", IntensityLevel::Four),
    ("震度４", IntensityLevel::Four),
    ("震度3", IntensityLevel::Three),
    ("震度３", IntensityLevel::Three),
    ("震度2", IntensityLevel::Two),
    ("震度２", IntensityLevel::Two),
    ("震度1", IntensityLevel::One),
    ("震度１", IntensityLevel::One),
];

/// Canonical code for a localized label, `"0"` if unrecognized
pub fn label_to_code(label: &str) -> &'static str {
    IntensityLevel::from_label(label)
        .map(IntensityLevel::code)
        .unwrap_or(UNKNOWN_CODE)
}
