//! Column vocabulary and channel naming rules for station tables.

use crate::error::{ImpactError, Result};

/// Columns every station table must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["STATION", "LAT", "LON", "NETID"];

/// Station columns that are never channels
pub const OPTIONAL_COLUMNS: [&str; 18] = [
    "NAME",
    "DISTANCE",
    "REFERENCE",
    "INTENSITY",
    "SOURCE",
    "LOC",
    "INSTTYPE",
    "ELEV",
    "NRESP",
    "INTENSITY_STDDEV",
    "PROVIDER",
    "INSTRUMENT",
    "SERIAL",
    "PERIOD",
    "DAMPING",
    "SENSITIVITY",
    "SOURCE_FORMAT",
    "STRUCTURE",
];

/// Columns of the one-measurement-per-row layout
pub const LONG_FORM_COLUMNS: [&str; 4] = ["CHANNEL", "IMT", "VALUE", "FLAG"];

/// True if `name` is a required, optional or long-form column
pub fn is_station_column(name: &str) -> bool {
    REQUIRED_COLUMNS
        .iter()
        .chain(OPTIONAL_COLUMNS.iter())
        .chain(LONG_FORM_COLUMNS.iter())
        .any(|c| c.eq_ignore_ascii_case(name))
}

/// A prefix rule over channel names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelPattern {
    /// Two uppercase letters followed by the given character
    Seed(char),
    /// A literal prefix
    Prefix(&'static str),
}

impl ChannelPattern {
    fn matches(self, name: &str) -> bool {
        match self {
            ChannelPattern::Seed(last) => {
                let bytes = name.as_bytes();
                bytes.len() >= 3
                    && bytes[0].is_ascii_uppercase()
                    && bytes[1].is_ascii_uppercase()
                    && bytes[2] as char == last
            }
            ChannelPattern::Prefix(prefix) => name.starts_with(prefix),
        }
    }
}

/// Recognized channel naming schemes; the first two entries of each
/// multi-entry scheme are the horizontal pair
const CHANNEL_GROUPS: [&[ChannelPattern]; 4] = [
    &[
        ChannelPattern::Seed('E'),
        ChannelPattern::Seed('N'),
        ChannelPattern::Seed('Z'),
    ],
    &[
        ChannelPattern::Seed('1'),
        ChannelPattern::Seed('2'),
        ChannelPattern::Seed('Z'),
    ],
    &[
        ChannelPattern::Prefix("H1"),
        ChannelPattern::Prefix("H2"),
        ChannelPattern::Prefix("Z"),
    ],
    &[ChannelPattern::Prefix("UNK")],
];

/// Check that the channel names form one recognized scheme.
///
/// A scheme matches when at least two of its patterns are present, or when
/// exactly one is present and it is the only channel in the table. An empty
/// channel set is valid.
pub fn validate_channel_grouping(channels: &[String]) -> Result<()> {
    if channels.is_empty() {
        return Ok(());
    }

    let valid = CHANNEL_GROUPS.iter().any(|group| {
        let matched = group
            .iter()
            .filter(|pattern| channels.iter().any(|c| pattern.matches(c)))
            .count();
        (matched == 1 && channels.len() == 1) || matched > 1
    });

    if valid {
        Ok(())
    } else {
        let mut sorted = channels.to_vec();
        sorted.sort();
        Err(ImpactError::InvalidChannelGrouping { channels: sorted })
    }
}

/// True if `name` is a channel the writers emit.
///
/// Accepts SEED-style names (`[HB][HLN][ENZ123]`), `H1`/`H2`, `Z` and `UNK`.
pub fn is_output_channel(name: &str) -> bool {
    let b = name.as_bytes();
    match b.len() {
        1 => b[0] == b'Z',
        2 => b[0] == b'H' && matches!(b[1], b'1' | b'2'),
        3 => {
            name == "UNK"
                || (matches!(b[0], b'H' | b'B')
                    && matches!(b[1], b'H' | b'L' | b'N')
                    && matches!(b[2], b'E' | b'N' | b'Z' | b'1' | b'2' | b'3'))
        }
        _ => false,
    }
}

/// Component orientation of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Horizontal for names ending in 1, 2, E or N
    pub fn of_channel(name: &str) -> Self {
        match name.chars().last() {
            Some('1' | '2' | 'E' | 'N') => Orientation::Horizontal,
            _ => Orientation::Vertical,
        }
    }

    /// Attribute value used in station XML
    pub fn code(self) -> &'static str {
        match self {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "z",
        }
    }
}
