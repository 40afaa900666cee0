//! HTML parser for the themes listing and theme catalog pages.

use crate::catalog::error::ParseError;
use crate::catalog::models::{
    ProductPrice, ProductRecord, Theme, ToyAttributes, NO_LINK, UNKNOWN_THEME,
};
use crate::catalog::selectors::{catalog, product, themes};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace, warn};

/// Number of products shown per catalog page.
pub const PAGE_SIZE: u32 = 18;

/// Computes how many catalog pages a theme spans.
///
/// Always at least one page, and a count that is an exact multiple of
/// the page size still yields one extra page.
pub fn page_count(total: u32) -> u32 {
    total / PAGE_SIZE + 1
}

/// Sorts raw attribute labels into age, rating and piece count.
///
/// A label containing `+` is an age, otherwise one containing `.` is a
/// rating, anything else is a piece count. Later labels of the same kind
/// replace earlier ones.
pub fn classify_attributes<I, S>(labels: I) -> ToyAttributes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut attributes = ToyAttributes::default();

    for label in labels {
        let label = label.as_ref();
        if label.contains('+') {
            attributes.age = Some(label.to_string());
        } else if label.contains('.') {
            attributes.rating = Some(label.to_string());
        } else {
            attributes.pieces = Some(label.to_string());
        }
    }

    attributes
}

/// Parser for storefront HTML pages.
pub struct Parser {
    base_url: String,
}

impl Parser {
    /// Creates a new parser resolving theme links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Extracts the theme list from the themes listing page.
    ///
    /// Missing structure is logged and yields an empty list.
    pub fn parse_themes(&self, html: &str) -> Vec<Theme> {
        let document = Html::parse_document(html);

        let Some(section) = document.select(&themes::SECTION).next() else {
            warn!("Section not found");
            return Vec::new();
        };

        let Some(list) = section.select(&themes::LIST).next() else {
            warn!("Theme list not found");
            return Vec::new();
        };

        let themes: Vec<Theme> =
            list.select(&themes::ITEM).map(|item| self.parse_theme(item)).collect();

        debug!("Parsed {} themes", themes.len());
        themes
    }

    fn parse_theme(&self, item: ElementRef) -> Theme {
        // Only the first heading counts, even if a later one carries a label
        let name = item
            .select(&themes::HEADING)
            .next()
            .and_then(|heading| first_text(heading, &themes::LABEL))
            .unwrap_or_else(|| UNKNOWN_THEME.to_string());

        let url = item
            .select(&themes::LINK)
            .next()
            .and_then(|e| e.value().attr("href"))
            .map(|href| format!("{}{}", self.base_url, href))
            .unwrap_or_else(|| NO_LINK.to_string());

        trace!("Parsed theme: {} - {}", name, url);
        Theme { name, url }
    }

    /// Reads the total product count from a catalog page.
    pub fn parse_product_count(&self, html: &str) -> Result<u32, ParseError> {
        let document = Html::parse_document(html);

        let value = document
            .select(&catalog::PRODUCT_COUNT)
            .next()
            .and_then(|e| e.value().attr(catalog::COUNT_ATTR))
            .ok_or(ParseError::MissingProductCount)?;

        value.trim().parse().map_err(|_| ParseError::InvalidProductCount(value.to_string()))
    }

    /// Extracts product records from one catalog page.
    pub fn parse_products(&self, html: &str, collection: &str) -> Vec<ProductRecord> {
        let document = Html::parse_document(html);
        let mut products = Vec::new();

        for item in document.select(&catalog::PRODUCT_ITEM) {
            let Some(name) = first_text(item, &product::NAME) else {
                trace!("Skipping product card without a name");
                continue;
            };

            let price = self.parse_price(item);

            let Some(row) = item.select(&product::ATTRIBUTES_ROW).next() else {
                warn!("No attributes found for product {}, skipping", name);
                continue;
            };

            let labels = row.select(&product::ATTRIBUTE).map(element_text);
            let attributes = classify_attributes(labels);

            trace!("Parsed product: {} ({})", name, price.price);
            products.push(ProductRecord::new(name, collection, attributes, price));
        }

        debug!("Parsed {} products for {}", products.len(), collection);
        products
    }

    /// Reads listed and discounted price from a product card.
    ///
    /// Falls back to the `N/A` pair when any expected element is missing.
    pub fn parse_price(&self, element: ElementRef) -> ProductPrice {
        self.try_parse_price(element).unwrap_or_else(|| {
            debug!("Price elements missing, using N/A");
            ProductPrice::unavailable()
        })
    }

    fn try_parse_price(&self, element: ElementRef) -> Option<ProductPrice> {
        let row =
            element.select(&product::PRICE_ROW).next().map(|e| e.text().collect::<String>())?;
        let price = first_text(element, &product::PRICE)?;

        if row.contains('%') {
            let discount = first_text(element, &product::DISCOUNTED_PRICE)?;
            Some(ProductPrice::discounted(price, discount))
        } else {
            Some(ProductPrice::regular(price))
        }
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(element_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Discount;

    const BASE: &str = "https://www.lego.com";

    fn parser() -> Parser {
        Parser::new(BASE)
    }

    fn price_of(html: &str) -> ProductPrice {
        let fragment = Html::parse_fragment(html);
        parser().parse_price(fragment.root_element())
    }

    // Pagination

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(17), 1);
        assert_eq!(page_count(18), 2);
        assert_eq!(page_count(35), 2);
        assert_eq!(page_count(36), 3);
    }

    #[test]
    fn test_parse_product_count() {
        let html = r#"<div><span data-value="35">Showing 18 of 35</span></div>"#;
        assert_eq!(parser().parse_product_count(html).unwrap(), 35);

        let html = r#"<span data-value=" 7 "></span><span data-value="99"></span>"#;
        assert_eq!(parser().parse_product_count(html).unwrap(), 7);
    }

    #[test]
    fn test_parse_product_count_missing() {
        let result = parser().parse_product_count("<html><body></body></html>");
        assert!(matches!(result, Err(ParseError::MissingProductCount)));
    }

    #[test]
    fn test_parse_product_count_invalid() {
        let result = parser().parse_product_count(r#"<span data-value="many"></span>"#);
        assert!(matches!(result, Err(ParseError::InvalidProductCount(v)) if v == "many"));
    }

    // Attribute classification

    #[test]
    fn test_classify_attributes() {
        let attributes = classify_attributes(["18+", "7541", "4.8"]);
        assert_eq!(attributes.age.as_deref(), Some("18+"));
        assert_eq!(attributes.pieces.as_deref(), Some("7541"));
        assert_eq!(attributes.rating.as_deref(), Some("4.8"));
    }

    #[test]
    fn test_classify_plus_wins_over_dot() {
        let attributes = classify_attributes(["1.5+"]);
        assert_eq!(attributes.age.as_deref(), Some("1.5+"));
        assert!(attributes.rating.is_none());
        assert!(attributes.pieces.is_none());
    }

    #[test]
    fn test_classify_last_value_wins() {
        let attributes = classify_attributes(vec!["100".to_string(), "200".to_string()]);
        assert_eq!(attributes.pieces.as_deref(), Some("200"));
    }

    #[test]
    fn test_classify_empty() {
        let attributes = classify_attributes(Vec::<String>::new());
        assert_eq!(attributes, ToyAttributes::default());
    }

    // Price extraction

    #[test]
    fn test_parse_price_regular() {
        let price = price_of(
            r#"<div data-test="product-leaf-price-row">
                <span data-test="product-leaf-price">1 299,99 ₴</span>
            </div>"#,
        );
        assert_eq!(price, ProductPrice::regular("1 299,99 ₴"));
    }

    #[test]
    fn test_parse_price_discounted() {
        let price = price_of(
            r#"<div data-test="product-leaf-price-row">
                <span data-test="product-leaf-price">1 000 ₴</span>
                <span>-20%</span>
                <span data-test="product-leaf-discounted-price">800 ₴</span>
            </div>"#,
        );
        assert_eq!(price.price, "1 000 ₴");
        assert_eq!(price.discount, Discount::Price("800 ₴".to_string()));
    }

    #[test]
    fn test_parse_price_missing_elements() {
        assert!(price_of("<div><span>no price here</span></div>").is_unavailable());

        // Row without the price label
        assert!(price_of(r#"<div data-test="product-leaf-price-row">999</div>"#).is_unavailable());

        // Discount marker without the discounted label
        let price = price_of(
            r#"<div data-test="product-leaf-price-row">
                <span data-test="product-leaf-price">1 000 ₴</span> -20%
            </div>"#,
        );
        assert!(price.is_unavailable());
    }

    // Themes

    #[test]
    fn test_parse_themes() {
        let html = r#"
            <html><body>
                <section>
                    <ul>
                        <li><a href="/uk-ua/themes/marvel"><h2><span>Marvel</span></h2></a></li>
                        <li><h2><span> Star Wars </span></h2><a href="/uk-ua/themes/star-wars">Go</a></li>
                    </ul>
                </section>
            </body></html>
        "#;
        let themes = parser().parse_themes(html);
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0], Theme::new("Marvel", "https://www.lego.com/uk-ua/themes/marvel"));
        assert_eq!(themes[1].name, "Star Wars");
        assert_eq!(themes[1].url, "https://www.lego.com/uk-ua/themes/star-wars");
    }

    #[test]
    fn test_parse_themes_fallbacks() {
        let html = r#"
            <section><ul>
                <li><a href="/city">City</a></li>
                <li><h2><span>Ideas</span></h2></li>
                <li><h2>No label</h2><a>No href</a></li>
            </ul></section>
        "#;
        let themes = parser().parse_themes(html);
        assert_eq!(themes.len(), 3);
        assert_eq!(themes[0], Theme::new("Unknown", "https://www.lego.com/city"));
        assert_eq!(themes[1], Theme::new("Ideas", "#"));
        assert_eq!(themes[2], Theme::new("Unknown", "#"));
    }

    #[test]
    fn test_parse_themes_reads_label_of_first_heading_only() {
        let html = r#"
            <section><ul>
                <li><h2>Plain</h2><h2><span>Later</span></h2><a href="/x">x</a></li>
                <li><h2><span>Technic</span></h2><h2><span>Other</span></h2></li>
            </ul></section>
        "#;
        let themes = parser().parse_themes(html);
        assert_eq!(themes[0], Theme::new("Unknown", "https://www.lego.com/x"));
        assert_eq!(themes[1].name, "Technic");
    }

    #[test]
    fn test_parse_themes_uses_first_section() {
        let html = r#"
            <section><p>Hero banner</p></section>
            <section><ul><li><h2><span>Marvel</span></h2></li></ul></section>
        "#;
        assert!(parser().parse_themes(html).is_empty());
    }

    #[test]
    fn test_parse_themes_missing_structure() {
        assert!(parser().parse_themes("<html><body><ul><li>x</li></ul></body></html>").is_empty());
        assert!(parser().parse_themes("<section><div>nothing</div></section>").is_empty());
    }

    // Products

    #[test]
    fn test_parse_products() {
        let html = r#"
            <ul>
                <li data-test="product-item">
                    <h3> Hulkbuster </h3>
                    <div data-test="product-leaf-attributes-row">
                        <span>18+</span><span>4049</span><span>4.7</span>
                    </div>
                    <div data-test="product-leaf-price-row">
                        <span data-test="product-leaf-price">21 999 ₴</span>
                    </div>
                </li>
                <li data-test="product-item">
                    <div data-test="product-leaf-attributes-row"><span>9+</span></div>
                </li>
            </ul>
        "#;
        let products = parser().parse_products(html, "Marvel");
        assert_eq!(products.len(), 1);

        let record = &products[0];
        assert_eq!(record.name, "Hulkbuster");
        assert_eq!(record.collection, "Marvel");
        assert_eq!(record.age.as_deref(), Some("18+"));
        assert_eq!(record.pieces.as_deref(), Some("4049"));
        assert_eq!(record.rating.as_deref(), Some("4.7"));
        assert_eq!(record.price, "21 999 ₴");
        assert_eq!(record.discount, Discount::NotDiscounted);
    }

    #[test]
    fn test_parse_products_without_attributes_row_is_skipped() {
        // A card missing its attributes row must not inherit the previous card's values
        let html = r#"
            <li data-test="product-item">
                <h3>First</h3>
                <div data-test="product-leaf-attributes-row"><span>6+</span></div>
            </li>
            <li data-test="product-item"><h3>Second</h3></li>
        "#;
        let products = parser().parse_products(html, "City");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "First");
    }

    #[test]
    fn test_parse_products_missing_price() {
        let html = r#"
            <li data-test="product-item">
                <h3>Mystery Box</h3>
                <div data-test="product-leaf-attributes-row"></div>
            </li>
        "#;
        let products = parser().parse_products(html, "Ideas");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, "N/A");
        assert_eq!(products[0].discount, Discount::Unavailable);
        assert!(products[0].age.is_none());
        assert!(products[0].pieces.is_none());
        assert!(products[0].rating.is_none());
    }

    #[test]
    fn test_parse_products_empty_page() {
        assert!(parser().parse_products("<html></html>", "Marvel").is_empty());
    }
}
