use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Category
// ============================================================================

/// Product group of an order, independent of the customer's sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Hardware,
    Software,
    Services,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hardware, Category::Software, Category::Services];

    /// Value stored in the `category` column
    pub fn code(&self) -> &'static str {
        match self {
            Category::Hardware => "Hardware",
            Category::Software => "Software",
            Category::Services => "Services",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Product templates sold under this category
    pub fn products(&self) -> &'static [ProductTemplate] {
        match self {
            Category::Hardware => &HARDWARE_PRODUCTS,
            Category::Software => &SOFTWARE_PRODUCTS,
            Category::Services => &SERVICES_PRODUCTS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown category: {}", s))
    }
}

// ============================================================================
// Product catalogue
// ============================================================================

/// Concrete product with the base price the generator perturbs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductTemplate {
    pub name: &'static str,
    pub base_price: f64,
}

const fn product(name: &'static str, base_price: f64) -> ProductTemplate {
    ProductTemplate { name, base_price }
}

const HARDWARE_PRODUCTS: [ProductTemplate; 3] = [
    product("Laptop Pro", 1200.0),
    product("Rack Server", 3000.0),
    product("4K Monitor", 400.0),
];

const SOFTWARE_PRODUCTS: [ProductTemplate; 3] = [
    product("CRM License", 500.0),
    product("Cloud Subscription", 150.0),
    product("Corporate Antivirus", 80.0),
];

const SERVICES_PRODUCTS: [ProductTemplate; 3] = [
    product("Consulting Hour", 100.0),
    product("Monthly Support", 800.0),
    product("Audit", 2500.0),
];

// ============================================================================
// Order
// ============================================================================

/// Sales order. `total` carries two fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub date: NaiveDate,
    pub total: f64,
    pub product: String,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_three_products() {
        for category in Category::ALL {
            let products = category.products();
            assert_eq!(products.len(), 3);
            assert!(products.iter().all(|p| p.base_price > 0.0));
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Services".parse::<Category>(), Ok(Category::Services));
        assert!("services".parse::<Category>().is_err());
    }
}
