// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Dataset identifiers.
//!
//! Every dataset captured with the multi-view rig has its own skeleton. This module
//! names the closed set of datasets the [`crate::visualizer::skeleton`] registry knows about.

use std::fmt;
use std::str::FromStr;

use crate::error::VisError;

/// Datasets with a registered skeleton topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Human3.6M-style 17 joint body.
    Human,
    /// Cheetah, 20 joints.
    Cheetah,
    /// Flamingo, 11 joints.
    Flamingo,
    /// Tiger, 16 joints.
    Tiger,
    /// Fish, 12 joints.
    Fish,
    /// Colobus monkey, 16 joints.
    ColobusMonkey,
    /// Chimpanzee, 16 joints.
    Chimpanzee,
    /// Fruit fly, 38 joints.
    Fly,
}

impl Dataset {
    /// All datasets in registry order.
    pub const ALL: [Self; 8] = [
        Self::Human,
        Self::Cheetah,
        Self::Flamingo,
        Self::Tiger,
        Self::Fish,
        Self::ColobusMonkey,
        Self::Chimpanzee,
        Self::Fly,
    ];

    /// Returns the name used for the dataset directory on disk.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Cheetah => "Cheetah",
            Self::Flamingo => "Flamingo",
            Self::Tiger => "Tiger",
            Self::Fish => "Fish",
            Self::ColobusMonkey => "Colobus_Monkey",
            Self::Chimpanzee => "Chimpanzee",
            Self::Fly => "Fly",
        }
    }

    /// Directory names of every dataset.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|dataset| dataset.as_str().to_lowercase() == normalized)
            .ok_or_else(|| VisError::UnknownDataset(s.to_string()))
    }
}
