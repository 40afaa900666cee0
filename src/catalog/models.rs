//! Data models for themes, product records, prices and attributes.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sentinel used when a price cannot be read from a product card.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fallback theme name when the heading label is missing.
pub const UNKNOWN_THEME: &str = "Unknown";

/// Fallback theme URL when the entry has no link.
pub const NO_LINK: &str = "#";

/// A named product collection with its own catalog URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name
    pub name: String,
    /// Absolute catalog URL, or `#` when the entry had no link
    pub url: String,
}

impl Theme {
    /// Creates a new theme.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }

    /// Returns true if the theme has a usable catalog link.
    pub fn has_link(&self) -> bool {
        self.url != NO_LINK
    }
}

/// One scraped product, flattened for tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name
    pub name: String,
    /// Owning theme's name
    pub collection: String,
    /// Age range label (e.g. "18+")
    pub age: Option<String>,
    /// Piece count label
    pub pieces: Option<String>,
    /// Rating label (e.g. "4.7")
    pub rating: Option<String>,
    /// Listed price text
    pub price: String,
    /// Discounted price, or 0 when not on sale
    pub discount: Discount,
}

impl ProductRecord {
    /// Assembles a record from its extracted parts.
    pub fn new(
        name: impl Into<String>,
        collection: impl Into<String>,
        attributes: ToyAttributes,
        price: ProductPrice,
    ) -> Self {
        Self {
            name: name.into(),
            collection: collection.into(),
            age: attributes.age,
            pieces: attributes.pieces,
            rating: attributes.rating,
            price: price.price,
            discount: price.discount,
        }
    }
}

/// Price pair read from a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPrice {
    pub price: String,
    pub discount: Discount,
}

impl ProductPrice {
    /// Regular price without discount.
    pub fn regular(price: impl Into<String>) -> Self {
        Self { price: price.into(), discount: Discount::NotDiscounted }
    }

    /// Listed price with its discounted counterpart.
    pub fn discounted(price: impl Into<String>, discount: impl Into<String>) -> Self {
        Self { price: price.into(), discount: Discount::Price(discount.into()) }
    }

    /// Price elements were missing from the card.
    pub fn unavailable() -> Self {
        Self { price: NOT_AVAILABLE.to_string(), discount: Discount::Unavailable }
    }

    /// Returns true if this is the `N/A` sentinel pair.
    pub fn is_unavailable(&self) -> bool {
        self.price == NOT_AVAILABLE && self.discount == Discount::Unavailable
    }
}

/// Discount column value: numeric 0 when not on sale, the discounted
/// price text, or `N/A` when the card's price could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Discount {
    #[default]
    NotDiscounted,
    Price(String),
    Unavailable,
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::NotDiscounted => write!(f, "0"),
            Discount::Price(p) => write!(f, "{}", p),
            Discount::Unavailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

impl Serialize for Discount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Discount::NotDiscounted => serializer.serialize_u8(0),
            Discount::Price(p) => serializer.serialize_str(p),
            Discount::Unavailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Discount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Text is tried first; IgnoredAny would accept strings too
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(p) if p == NOT_AVAILABLE => Discount::Unavailable,
            Raw::Text(p) => Discount::Price(p),
            Raw::Number(_) => Discount::NotDiscounted,
        })
    }
}

/// Age, piece count and rating classified from a card's attribute labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToyAttributes {
    pub age: Option<String>,
    pub pieces: Option<String>,
    pub rating: Option<String>,
}

/// Themes and products gathered during one run.
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub themes: Vec<Theme>,
    pub products: Vec<ProductRecord>,
}

impl ScrapeReport {
    /// Returns true if no products were collected.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
