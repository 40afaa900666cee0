//! CSS selectors for catalog HTML parsing.
//!
//! These selectors are the only contract with the site's markup.
//! Update this file when the storefront changes its HTML structure.
//!
//! When a page stops parsing, save its markup under `tests/fixtures/`
//! and adjust the selectors here until the fixture tests pass again.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the themes listing page.
pub mod themes {
    use super::*;

    /// Section holding the theme list (first match wins).
    pub static SECTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("section").unwrap());

    /// Theme list inside the section.
    pub static LIST: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());

    /// One theme entry.
    pub static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

    /// Theme heading (first match wins).
    pub static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

    /// Display name label inside the heading.
    pub static LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

    /// Theme link.
    pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
}

/// Selectors for a theme's paginated catalog page.
pub mod catalog {
    use super::*;

    /// Attribute carrying the total product count.
    pub static COUNT_ATTR: &str = "data-value";

    /// Product count indicator.
    pub static PRODUCT_COUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-value]").unwrap());

    /// Product card.
    pub static PRODUCT_ITEM: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li[data-test='product-item']").unwrap());
}

/// Selectors scoped to a single product card.
pub mod product {
    use super::*;

    /// Product name heading.
    pub static NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());

    /// Row listing age, piece count and rating as loose labels.
    pub static ATTRIBUTES_ROW: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-test='product-leaf-attributes-row']").unwrap());

    /// Individual attribute label.
    pub static ATTRIBUTE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

    /// Price row; contains a `%` marker when discounted.
    pub static PRICE_ROW: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-test='product-leaf-price-row']").unwrap());

    /// Listed price.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-test='product-leaf-price']").unwrap());

    /// Discounted price.
    pub static DISCOUNTED_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("span[data-test='product-leaf-discounted-price']").unwrap()
    });
}
