//! Standard optimization levels used as comparison baselines

use crate::error::IrisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A standard LLVM optimization level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptLevel {
    /// No optimization
    O0,
    /// Basic optimization
    O1,
    /// Moderate optimization
    O2,
    /// Aggressive optimization
    O3,
}

impl OptLevel {
    /// All levels, lowest first
    pub const ALL: [OptLevel; 4] = [OptLevel::O0, OptLevel::O1, OptLevel::O2, OptLevel::O3];

    /// Short name, e.g. `O2`
    pub fn name(self) -> &'static str {
        match self {
            Self::O0 => "O0",
            Self::O1 => "O1",
            Self::O2 => "O2",
            Self::O3 => "O3",
        }
    }

    /// Compiler flag, e.g. `-O2`
    pub fn flag(self) -> &'static str {
        match self {
            Self::O0 => "-O0",
            Self::O1 => "-O1",
            Self::O2 => "-O2",
            Self::O3 => "-O3",
        }
    }

    /// Key under which the comparison endpoint reports this level
    pub fn response_key(self) -> &'static str {
        match self {
            Self::O0 => "llvm_o0",
            Self::O1 => "llvm_o1",
            Self::O2 => "llvm_o2",
            Self::O3 => "llvm_o3",
        }
    }

    /// Display label, e.g. `LLVM -O2`
    pub fn label(self) -> String {
        format!("LLVM {}", self.flag())
    }

    /// One-line description of the level
    pub fn description(self) -> &'static str {
        match self {
            Self::O0 => "No optimization",
            Self::O1 => "Basic optimization level",
            Self::O2 => "Moderate optimization level",
            Self::O3 => "Aggressive optimization level",
        }
    }

    fn valid_names() -> Vec<String> {
        Self::ALL.iter().map(|l| l.name().to_string()).collect()
    }
}

impl fmt::Display for OptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptLevel {
    type Err = IrisError;

    /// Accepts `O2`, `o2`, `-O2` and `2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('-').unwrap_or(trimmed);
        let digit = bare
            .strip_prefix('O')
            .or_else(|| bare.strip_prefix('o'))
            .unwrap_or(bare);

        match digit {
            "0" => Ok(Self::O0),
            "1" => Ok(Self::O1),
            "2" => Ok(Self::O2),
            "3" => Ok(Self::O3),
            _ => Err(IrisError::InvalidOptLevel {
                level: s.to_string(),
                valid: Self::valid_names(),
            }),
        }
    }
}

impl TryFrom<String> for OptLevel {
    type Error = IrisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptLevel> for String {
    fn from(level: OptLevel) -> Self {
        level.name().to_string()
    }
}
