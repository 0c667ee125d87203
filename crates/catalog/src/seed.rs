//! Catalog data loading: the static seed and a JSON loader.

use std::collections::HashSet;

use frostcart_core::{DomainError, DomainResult, Money};

use crate::product::{Category, Product, ProductId, Rating};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn seed_product(
    id: &str,
    name: &str,
    description: &str,
    rupees: u64,
    category: Category,
    rating_tenths: u8,
    reviews: u32,
    colors: &[&str],
    size: &str,
    features: &[&str],
    stock: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_major(rupees),
        category,
        image: "placeholder.jpg".to_string(),
        rating: Rating::saturating(rating_tenths),
        reviews,
        colors: strings(colors),
        sizes: Some(vec![size.to_string()]),
        features: strings(features),
        stock,
    }
}

/// The six-product launch catalog (prices in INR).
pub fn default_products() -> Vec<Product> {
    vec![
        seed_product(
            "1",
            "Premium AC 1.5 Ton",
            "Premium 1.5 Ton Split AC with advanced cooling technology and smart features",
            35_000,
            Category::Ac,
            45,
            128,
            &["#ffffff", "#000000", "#silver"],
            "1.5 Ton",
            &["Energy Efficient", "5 Star Rating", "WiFi Enabled"],
            10,
        ),
        seed_product(
            "2",
            "Smart Fan 1200mm",
            "Smart ceiling fan with remote control and energy-efficient operation",
            3_500,
            Category::Fan,
            42,
            95,
            &["#ffffff", "#black"],
            "1200mm",
            &["Remote Control", "Energy Saving", "5 Speed Settings"],
            25,
        ),
        seed_product(
            "3",
            "Inverter AC 2 Ton",
            "2 Ton Inverter AC with advanced cooling and self-cleaning technology",
            45_000,
            Category::Ac,
            48,
            156,
            &["#white", "#silver"],
            "2 Ton",
            &["Inverter Technology", "5 Star Rating", "Self Clean"],
            8,
        ),
        seed_product(
            "4",
            "Table Fan 400mm",
            "Compact table fan with multiple speed settings and tilt function",
            2_500,
            Category::Fan,
            40,
            78,
            &["#white", "#blue"],
            "400mm",
            &["3 Speed Settings", "Tilt Function", "Energy Efficient"],
            30,
        ),
        seed_product(
            "5",
            "Window AC 1 Ton",
            "1 Ton Window AC with easy installation and auto restart feature",
            28_000,
            Category::Ac,
            43,
            112,
            &["#white"],
            "1 Ton",
            &["Easy Installation", "4 Star Rating", "Auto Restart"],
            15,
        ),
        seed_product(
            "6",
            "Pedestal Fan 450mm",
            "Powerful pedestal fan with oscillation and remote control",
            4_500,
            Category::Fan,
            41,
            64,
            &["#white", "#black"],
            "450mm",
            &["Oscillation", "Remote Control", "Timer Function"],
            20,
        ),
    ]
}

/// Parse a JSON array of products and check it is fit to load.
pub fn products_from_json(json: &str) -> DomainResult<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(json)
        .map_err(|e| DomainError::validation(format!("product data: {e}")))?;
    validate_products(&products)?;
    tracing::debug!(count = products.len(), "parsed product data");
    Ok(products)
}

/// Reject empty or duplicate identifiers and blank names.
pub fn validate_products(products: &[Product]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if product.id.as_str().trim().is_empty() {
            return Err(DomainError::validation("product id cannot be empty"));
        }
        if product.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {} has an empty name",
                product.id
            )));
        }
        if !seen.insert(&product.id) {
            return Err(DomainError::validation(format!(
                "duplicate product id {}",
                product.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_three_of_each_category_within_price_band() {
        let products = default_products();
        assert_eq!(products.len(), 6);
        for category in Category::ALL {
            assert_eq!(products.iter().filter(|p| p.category == category).count(), 3);
        }
        assert!(products.iter().all(|p| {
            p.price >= Money::from_major(2_500) && p.price <= Money::from_major(45_000)
        }));
        validate_products(&products).unwrap();
    }

    #[test]
    fn json_loader_accepts_minimal_product() {
        let json = r##"[{
            "id": "7", "name": "Tower Fan", "description": "Slim",
            "price": 599900, "category": "fan", "image": "tower.jpg",
            "rating": 3.9, "reviews": 12, "colors": ["#grey"],
            "features": [], "stock": 4
        }]"##;

        let products = products_from_json(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Money::from_minor(599_900));
        assert_eq!(products[0].rating.tenths(), 39);
        assert_eq!(products[0].sizes, None);
    }

    #[test]
    fn json_loader_rejects_duplicate_ids() {
        let mut products = default_products();
        products.push(products[0].clone());
        let json = serde_json::to_string(&products).unwrap();

        match products_from_json(&json).unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("duplicate product id 1")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn json_loader_rejects_out_of_range_rating() {
        let mut value = serde_json::to_value(&default_products()[..1]).unwrap();
        value[0]["rating"] = serde_json::json!(7.5);
        assert!(products_from_json(&value.to_string()).is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut products = default_products();
        products[2].name = "  ".to_string();
        assert!(validate_products(&products).is_err());
    }
}
