use core::str::FromStr;
use serde::{Deserialize, Serialize};

use frostcart_core::{DomainError, DomainResult, Money};

/// Product identifier as issued by the catalog data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Appliance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ac,
    Fan,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Ac, Category::Fan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ac => "ac",
            Category::Fan => "fan",
        }
    }

    /// Human-readable heading for listing pages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Ac => "Air Conditioners",
            Category::Fan => "Fans",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Parses a `?category=` query value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| DomainError::validation(format!("unknown category '{value}'")))
    }
}

/// Star rating in tenths of a star, `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(u8);

impl Rating {
    pub const MAX_TENTHS: u8 = 50;

    pub fn from_tenths(tenths: u8) -> DomainResult<Self> {
        if tenths > Self::MAX_TENTHS {
            return Err(DomainError::validation(format!(
                "rating {tenths} tenths exceeds 5 stars"
            )));
        }
        Ok(Self(tenths))
    }

    /// Clamps to 5 stars instead of failing (used for static seed data).
    pub const fn saturating(tenths: u8) -> Self {
        if tenths > Self::MAX_TENTHS {
            Self(Self::MAX_TENTHS)
        } else {
            Self(tenths)
        }
    }

    /// Whole-star floor such as the "4 & up" filter.
    pub fn stars(stars: u8) -> DomainResult<Self> {
        Self::from_tenths(stars.saturating_mul(10))
    }

    pub const fn tenths(self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for Rating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl TryFrom<f64> for Rating {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(0.0..=5.0).contains(&value) {
            return Err(DomainError::validation(format!("rating {value} outside 0..=5")));
        }
        Ok(Self((value * 10.0).round() as u8))
    }
}

impl From<Rating> for f64 {
    fn from(value: Rating) -> Self {
        value.0 as f64 / 10.0
    }
}

/// A purchasable product. Immutable once loaded into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in minor currency units.
    pub price: Money,
    pub category: Category,
    pub image: String,
    pub rating: Rating,
    pub reviews: u32,
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    pub features: Vec<String>,
    pub stock: u32,
}

impl Product {
    /// Color used when the shopper has not picked one.
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
