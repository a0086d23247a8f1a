//! Score bands for summable instruments.
//!
//! On the wire an interpretation is a JSON object keyed by range label:
//!
//! ```json
//! { "0-4": { "level": "Minimal", "description": "...", "color": "#4A6741" }, ... }
//! ```
//!
//! Clients walk the keys in order, so bands keep their declaration order in
//! both directions.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Inclusive range of total scores, written `low-high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScoreRange {
    pub low: u32,
    pub high: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeParseError {
    #[error("score range '{0}' is not of the form low-high")]
    Malformed(String),
    #[error("score range '{0}' has its lower bound above its upper bound")]
    Inverted(String),
}

impl ScoreRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, score: u32) -> bool {
        self.low <= score && score <= self.high
    }
}

impl FromStr for ScoreRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RangeParseError::Malformed(s.to_string());
        let (low, high) = s.split_once('-').ok_or_else(malformed)?;
        let low: u32 = low.parse().map_err(|_| malformed())?;
        let high: u32 = high.parse().map_err(|_| malformed())?;
        if low > high {
            return Err(RangeParseError::Inverted(s.to_string()));
        }
        Ok(Self { low, high })
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl Serialize for ScoreRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScoreRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// One labelled severity band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationBand {
    pub range: ScoreRange,
    pub level: String,
    pub description: String,
    /// Hex display color, e.g. `#4A6741`.
    pub color: String,
}

#[derive(Serialize)]
struct BandBodyRef<'a> {
    level: &'a str,
    description: &'a str,
    color: &'a str,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BandBody {
    level: String,
    description: String,
    color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interpretation {
    bands: Vec<InterpretationBand>,
}

impl Interpretation {
    pub fn new(bands: Vec<InterpretationBand>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[InterpretationBand] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// The band whose range contains `score`, if any.
    pub fn band_for(&self, score: u32) -> Option<&InterpretationBand> {
        self.bands.iter().find(|band| band.range.contains(score))
    }
}

impl Serialize for Interpretation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bands.len()))?;
        for band in &self.bands {
            map.serialize_entry(
                &band.range,
                &BandBodyRef {
                    level: &band.level,
                    description: &band.description,
                    color: &band.color,
                },
            )?;
        }
        map.end()
    }
}

struct InterpretationVisitor;

impl<'de> Visitor<'de> for InterpretationVisitor {
    type Value = Interpretation;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from score range to band")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut bands = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((range, body)) = access.next_entry::<ScoreRange, BandBody>()? {
            if bands.iter().any(|b: &InterpretationBand| b.range == range) {
                return Err(de::Error::custom(format!("duplicate score range '{}'", range)));
            }
            bands.push(InterpretationBand {
                range,
                level: body.level,
                description: body.description,
                color: body.color,
            });
        }
        Ok(Interpretation { bands })
    }
}

impl<'de> Deserialize<'de> for Interpretation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(InterpretationVisitor)
    }
}
