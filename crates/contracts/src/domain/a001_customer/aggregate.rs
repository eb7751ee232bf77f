use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Sector
// ============================================================================

/// Business sector a customer operates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Health,
    Retail,
    Finance,
    Construction,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Sector::Technology,
        Sector::Health,
        Sector::Retail,
        Sector::Finance,
        Sector::Construction,
    ];

    /// Value stored in the `sector` column
    pub fn code(&self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Health => "Health",
            Sector::Retail => "Retail",
            Sector::Finance => "Finance",
            Sector::Construction => "Construction",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown sector: {}", s))
    }
}

// ============================================================================
// Customer
// ============================================================================

/// Customer company. Created in bulk by the generator, never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub sector: Sector,
}

impl Customer {
    /// Synthetic customer, the name embeds sector and index
    pub fn synthetic(index: i32, sector: Sector) -> Self {
        Self {
            id: index,
            name: format!("Company {} {}", sector, index),
            sector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_code_roundtrip() {
        for sector in Sector::ALL {
            assert_eq!(sector.code().parse::<Sector>(), Ok(sector));
        }
        assert!("Mining".parse::<Sector>().is_err());
    }

    #[test]
    fn test_synthetic_name() {
        let customer = Customer::synthetic(7, Sector::Retail);
        assert_eq!(customer.id, 7);
        assert_eq!(customer.name, "Company Retail 7");
    }
}
