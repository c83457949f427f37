use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QuizError;

/// One of the four fixed bipolar axes. Declaration order is the canonical
/// order used for type codes, reports, and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "EI")]
    Ei,
    #[serde(rename = "SN")]
    Sn,
    #[serde(rename = "TF")]
    Tf,
    #[serde(rename = "JP")]
    Jp,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [Dimension::Ei, Dimension::Sn, Dimension::Tf, Dimension::Jp];

    pub fn code(self) -> &'static str {
        match self {
            Dimension::Ei => "EI",
            Dimension::Sn => "SN",
            Dimension::Tf => "TF",
            Dimension::Jp => "JP",
        }
    }

    /// `(first_pole, second_pole)` for this axis.
    pub fn poles(self) -> (char, char) {
        match self {
            Dimension::Ei => ('E', 'I'),
            Dimension::Sn => ('S', 'N'),
            Dimension::Tf => ('T', 'F'),
            Dimension::Jp => ('J', 'P'),
        }
    }

    pub fn first_pole(self) -> char {
        self.poles().0
    }

    pub fn second_pole(self) -> char {
        self.poles().1
    }

    /// Exact, case-sensitive lookup. Unknown codes are `None`, not an error:
    /// the selector drops them silently.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Dimension {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
            .ok_or_else(|| QuizError::InvalidParameter(format!("Unsupported dimension: {s:?}")))
    }
}

fn default_active() -> bool {
    true
}

fn default_source() -> String {
    "ai".to_string()
}

/// A quiz question. `dimension` stays a raw code so that content with an
/// unrecognized axis can still be carried around (and ignored by the selector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub dimension: String,
    pub agree_pole: char,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "default_source")]
    pub source: String,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        dimension: impl Into<String>,
        agree_pole: char,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            dimension: dimension.into(),
            agree_pole,
            text: text.into(),
            is_active: true,
            source: default_source(),
        }
    }

    /// The parsed axis, if the raw code is one of the four known dimensions.
    pub fn parsed_dimension(&self) -> Option<Dimension> {
        Dimension::from_code(&self.dimension)
    }
}
