//! Grade levels an entry can target

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reading level a sentence is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Grade {
    #[default]
    #[serde(rename = "Grade 1")]
    Grade1,
    #[serde(rename = "Grade 2")]
    Grade2,
    #[serde(rename = "Grade 3")]
    Grade3,
    #[serde(rename = "Grade 4")]
    Grade4,
    #[serde(rename = "Grade 5")]
    Grade5,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Grade1,
        Grade::Grade2,
        Grade::Grade3,
        Grade::Grade4,
        Grade::Grade5,
    ];

    /// Numeric level, 1 through 5
    pub fn level(&self) -> u8 {
        match self {
            Grade::Grade1 => 1,
            Grade::Grade2 => 2,
            Grade::Grade3 => 3,
            Grade::Grade4 => 4,
            Grade::Grade5 => 5,
        }
    }

    /// Display label, as stored and exported (e.g. "Grade 2")
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Grade1 => "Grade 1",
            Grade::Grade2 => "Grade 2",
            Grade::Grade3 => "Grade 3",
            Grade::Grade4 => "Grade 4",
            Grade::Grade5 => "Grade 5",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    /// Accepts "Grade 2", "grade2", "g2" or a bare "2".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let digits = normalized
            .strip_prefix("grade")
            .or_else(|| normalized.strip_prefix('g'))
            .unwrap_or(&normalized);

        Grade::ALL
            .iter()
            .copied()
            .find(|grade| digits == grade.level().to_string())
            .ok_or_else(|| {
                format!(
                    "Invalid grade: '{}'. Valid grades are: Grade 1, Grade 2, Grade 3, Grade 4, Grade 5",
                    s
                )
            })
    }
}
