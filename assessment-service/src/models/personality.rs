use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trait code carried by a typing-instrument answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraitLetter {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl TraitLetter {
    pub fn dimension(self) -> Dimension {
        match self {
            TraitLetter::E | TraitLetter::I => Dimension::EI,
            TraitLetter::S | TraitLetter::N => Dimension::SN,
            TraitLetter::T | TraitLetter::F => Dimension::TF,
            TraitLetter::J | TraitLetter::P => Dimension::JP,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            TraitLetter::E => 'E',
            TraitLetter::I => 'I',
            TraitLetter::S => 'S',
            TraitLetter::N => 'N',
            TraitLetter::T => 'T',
            TraitLetter::F => 'F',
            TraitLetter::J => 'J',
            TraitLetter::P => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'E' => Some(TraitLetter::E),
            'I' => Some(TraitLetter::I),
            'S' => Some(TraitLetter::S),
            'N' => Some(TraitLetter::N),
            'T' => Some(TraitLetter::T),
            'F' => Some(TraitLetter::F),
            'J' => Some(TraitLetter::J),
            'P' => Some(TraitLetter::P),
            _ => None,
        }
    }
}

/// Trait axis a typing question measures. Named after its two poles.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    EI,
    SN,
    TF,
    JP,
}

impl Dimension {
    /// Axes in the order their letters appear in a type code.
    pub const ALL: [Dimension; 4] = [Dimension::EI, Dimension::SN, Dimension::TF, Dimension::JP];

    pub fn poles(self) -> (TraitLetter, TraitLetter) {
        match self {
            Dimension::EI => (TraitLetter::E, TraitLetter::I),
            Dimension::SN => (TraitLetter::S, TraitLetter::N),
            Dimension::TF => (TraitLetter::T, TraitLetter::F),
            Dimension::JP => (TraitLetter::J, TraitLetter::P),
        }
    }

    pub fn contains(self, letter: TraitLetter) -> bool {
        letter.dimension() == self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("type code '{0}' must be four letters, one pole of EI, SN, TF and JP in that order")]
pub struct TypeCodeError(pub String);

/// Four-letter personality type such as `INTJ`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeCode([TraitLetter; 4]);

impl TypeCode {
    /// All sixteen codes, ordered by axis and pole.
    pub fn all() -> Vec<TypeCode> {
        let mut codes = Vec::with_capacity(16);
        let [ei, sn, tf, jp] = Dimension::ALL.map(|d| {
            let (a, b) = d.poles();
            [a, b]
        });
        for a in ei {
            for b in sn {
                for c in tf {
                    for d in jp {
                        codes.push(TypeCode([a, b, c, d]));
                    }
                }
            }
        }
        codes
    }

    pub fn letters(&self) -> [TraitLetter; 4] {
        self.0
    }
}

impl FromStr for TypeCode {
    type Err = TypeCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeCodeError(s.to_string());
        let letters: Vec<TraitLetter> = s
            .chars()
            .map(TraitLetter::from_char)
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        let letters: [TraitLetter; 4] = letters.try_into().map_err(|_| invalid())?;
        let in_order = letters
            .iter()
            .zip(Dimension::ALL)
            .all(|(letter, dimension)| dimension.contains(*letter));
        if !in_order {
            return Err(invalid());
        }
        Ok(TypeCode(letters))
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{}", letter.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeCode({})", self)
    }
}

impl Serialize for TypeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Profile shown for one type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalityType {
    pub name: String,
    pub description: String,
    pub strengths: String,
    pub color: String,
}
