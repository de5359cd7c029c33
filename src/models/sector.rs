use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub const SECTOR_COUNT: usize = 6;

/// Government budget category. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    Healthcare,
    Education,
    Defence,
    Infrastructure,
    Agriculture,
    Environment,
}

impl Sector {
    pub const ALL: [Sector; SECTOR_COUNT] = [
        Sector::Healthcare,
        Sector::Education,
        Sector::Defence,
        Sector::Infrastructure,
        Sector::Agriculture,
        Sector::Environment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sector::Healthcare => "Healthcare",
            Sector::Education => "Education",
            Sector::Defence => "Defence",
            Sector::Infrastructure => "Infrastructure",
            Sector::Agriculture => "Agriculture",
            Sector::Environment => "Environment",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-sector currency amounts, iterated in display order.
pub type SectorAmounts = BTreeMap<Sector, f64>;

pub fn sector_total(amounts: &SectorAmounts) -> f64 {
    amounts.values().sum()
}
