use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::question::Dimension;

/// Derived per-dimension outcome of one quiz attempt. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension: Dimension,
    pub first_pole: char,
    pub second_pole: char,
    pub score: i32,
    pub answered: u32,
    pub first_percent: u8,
    pub second_percent: u8,
    pub gap_percent: u8,
}

impl DimensionResult {
    /// The pole letter this dimension contributes to the type code.
    /// A zero score resolves to the first pole.
    pub fn leading_pole(&self) -> char {
        if self.score >= 0 {
            self.first_pole
        } else {
            self.second_pole
        }
    }
}

/// Four-letter summary, one pole per dimension in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCode(String);

impl TypeCode {
    pub fn from_results(results: &[DimensionResult]) -> Self {
        Self(results.iter().map(DimensionResult::leading_pole).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All 16 codes in canonical order (`ESTJ`, `ESTP`, ... `INFP`).
    pub fn all() -> Vec<TypeCode> {
        let mut codes = vec![String::new()];
        for dim in Dimension::ALL {
            let (first, second) = dim.poles();
            codes = codes
                .into_iter()
                .flat_map(|prefix| [format!("{prefix}{first}"), format!("{prefix}{second}")])
                .collect();
        }
        codes.into_iter().map(TypeCode).collect()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of scoring a whole attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub type_code: TypeCode,
    /// Always four entries, in `Dimension::ALL` order.
    pub dimensions: Vec<DimensionResult>,
}

impl ScoreSummary {
    pub fn get(&self, dimension: Dimension) -> Option<&DimensionResult> {
        self.dimensions.iter().find(|r| r.dimension == dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_type_codes_are_sixteen_and_unique() {
        let codes = TypeCode::all();
        assert_eq!(codes.len(), 16);
        assert_eq!(codes[0].as_str(), "ESTJ");
        assert_eq!(codes[15].as_str(), "INFP");
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn test_leading_pole_zero_is_first() {
        let r = DimensionResult {
            dimension: Dimension::Ei,
            first_pole: 'E',
            second_pole: 'I',
            score: 0,
            answered: 2,
            first_percent: 50,
            second_percent: 50,
            gap_percent: 0,
        };
        assert_eq!(r.leading_pole(), 'E');
    }
}
