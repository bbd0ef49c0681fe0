// ============================================================
// Domain: Splits and Setup Stages
// ============================================================
// Three named partitions, each read from its own CSV file.
// Stage mirrors the two setup phases of a training run:
//   Fit  → train + dev are prepared together
//   Test → only the test split is prepared

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    #[serde(alias = "validation")]
    Dev,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev   => "dev",
            Split::Test  => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train" | "fit"        => Ok(Split::Train),
            "dev" | "validation"   => Ok(Split::Dev),
            "test"                 => Ok(Split::Test),
            other => Err(format!("unknown split '{other}'")),
        }
    }
}

/// Which group of splits a `setup` call prepares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fit,
    Test,
}

impl Stage {
    /// The splits prepared by this stage, in load order
    pub fn splits(&self) -> &'static [Split] {
        match self {
            Stage::Fit  => &[Split::Train, Split::Dev],
            Stage::Test => &[Split::Test],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("validation".parse::<Split>().unwrap(), Split::Dev);
        assert_eq!("TRAIN".parse::<Split>().unwrap(), Split::Train);
        assert!("holdout".parse::<Split>().is_err());
    }

    #[test]
    fn test_fit_stage_prepares_train_then_dev() {
        assert_eq!(Stage::Fit.splits(), &[Split::Train, Split::Dev]);
        assert_eq!(Stage::Test.splits(), &[Split::Test]);
    }
}
