//! # Catalog
//!
//! The read-only set of purchasable products.
//!
//! ## Sources
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │  Catalog::builtin()  │      │  catalog.json        │
//! │  (static mango data) │      │  camelCase records,  │
//! │                      │      │  decimal prices      │
//! └──────────┬───────────┘      └──────────┬───────────┘
//!            │                             │ Catalog::from_json_str()
//!            └──────────────┬──────────────┘
//!                           ▼
//!              validate every record + unique ids
//!                           │
//!                           ▼
//!                  Catalog { products }   (never mutated)
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Category, Product};
use crate::validation::validate_product;

/// Varieties offered as filter checkboxes.
pub const KNOWN_VARIETIES: [&str; 8] = [
    "Alphonso",
    "Kesar",
    "Tommy Atkins",
    "Haden",
    "Kent",
    "Manila",
    "Keitt",
    "Francis",
];

/// A validated, immutable product list. Order is "popularity" order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid records and duplicate ids.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        {
            let mut seen = HashSet::with_capacity(products.len());
            for product in &products {
                validate_product(product).map_err(|source| CoreError::InvalidProduct {
                    id: product.id.clone(),
                    source,
                })?;

                if !seen.insert(product.id.as_str()) {
                    return Err(CoreError::InvalidProduct {
                        id: product.id.clone(),
                        source: ValidationError::Duplicate {
                            field: "id".to_string(),
                            value: product.id.clone(),
                        },
                    });
                }
            }
        }

        debug!(count = products.len(), "Catalog loaded");
        Ok(Catalog { products })
    }

    /// Parses a JSON array of product records.
    ///
    /// ## Record Shape
    /// ```json
    /// {
    ///   "id": "1",
    ///   "name": "Premium Alphonso Mangoes",
    ///   "variety": "Alphonso",
    ///   "price": 24.99,
    ///   "originalPrice": 29.99,
    ///   "rating": 4.8,
    ///   "reviewCount": 156,
    ///   "image": "/images/alphonso.jpg",
    ///   "description": "...",
    ///   "category": "fresh",
    ///   "inStock": true,
    ///   "origin": "Ratnagiri, India",
    ///   "weight": "1 kg (4-5 pieces)",
    ///   "features": ["Hand-picked"]
    /// }
    /// ```
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        let products = records
            .into_iter()
            .map(ProductRecord::into_product)
            .collect::<CoreResult<Vec<_>>>()?;
        Catalog::new(products)
    }

    /// The storefront's built-in mango catalog.
    pub fn builtin() -> Self {
        Catalog {
            products: builtin_products(),
        }
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Finds a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Finds a product by id, as an error when missing.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products per category. Every category is present, possibly with 0.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|c| (c, 0)).collect();
        for product in &self.products {
            *counts.entry(product.category).or_default() += 1;
        }
        counts
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

// =============================================================================
// File Format
// =============================================================================

/// On-disk shape of a product: decimal prices, camelCase keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: String,
    name: String,
    variety: String,
    price: f64,
    #[serde(default)]
    original_price: Option<f64>,
    rating: f32,
    #[serde(default)]
    review_count: u32,
    #[serde(default)]
    image: String,
    #[serde(default)]
    description: String,
    category: Category,
    in_stock: bool,
    #[serde(default)]
    origin: String,
    #[serde(default)]
    weight: String,
    #[serde(default)]
    features: Vec<String>,
}

impl ProductRecord {
    fn into_product(self) -> CoreResult<Product> {
        let price = to_money(&self.id, "price", self.price)?;
        let original_price = self
            .original_price
            .map(|p| to_money(&self.id, "originalPrice", p))
            .transpose()?;

        Ok(Product {
            id: self.id,
            name: self.name,
            variety: self.variety,
            price,
            original_price,
            rating: self.rating,
            review_count: self.review_count,
            image: self.image,
            description: self.description,
            category: self.category,
            in_stock: self.in_stock,
            origin: self.origin,
            weight: self.weight,
            features: self.features,
        })
    }
}

fn to_money(id: &str, field: &str, amount: f64) -> CoreResult<Money> {
    Money::from_decimal(amount).ok_or_else(|| CoreError::InvalidProduct {
        id: id.to_string(),
        source: ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number in range".to_string(),
        },
    })
}

// =============================================================================
// Built-in Data
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn mango(
    id: &str,
    name: &str,
    variety: &str,
    price_cents: i64,
    original_price_cents: Option<i64>,
    rating: f32,
    review_count: u32,
    category: Category,
    in_stock: bool,
    origin: &str,
    weight: &str,
    description: &str,
    features: &[&str],
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        variety: variety.to_string(),
        price: Money::from_cents(price_cents),
        original_price: original_price_cents.map(Money::from_cents),
        rating,
        review_count,
        image: format!("/images/products/{}.jpg", id),
        description: description.to_string(),
        category,
        in_stock,
        origin: origin.to_string(),
        weight: weight.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

fn builtin_products() -> Vec<Product> {
    use Category::{Fresh, Processed, Pulp};

    vec![
        mango(
            "1", "Premium Alphonso Mangoes", "Alphonso", 2499, Some(2999), 4.8, 156,
            Fresh, true, "Ratnagiri, India", "1 kg (4-5 pieces)",
            "The king of mangoes, rich and creamy with a saffron-coloured flesh and an unmistakable aroma.",
            &["GI tagged", "Naturally ripened", "Hand-picked"],
        ),
        mango(
            "2", "Kesar Mangoes", "Kesar", 1999, None, 4.7, 98,
            Fresh, true, "Gir, Gujarat, India", "1 kg (5-6 pieces)",
            "Sweet saffron mangoes from the foothills of Girnar, ideal for eating fresh or making aamras.",
            &["Carbide free", "Farm fresh"],
        ),
        mango(
            "3", "Tommy Atkins Mangoes", "Tommy Atkins", 1299, None, 4.2, 64,
            Fresh, true, "Florida, USA", "2 lb (3-4 pieces)",
            "Firm, long-lasting mangoes with a mild sweetness and a deep red blush.",
            &["Long shelf life", "Great for slicing"],
        ),
        mango(
            "4", "Haden Mangoes", "Haden", 1499, Some(1699), 4.4, 41,
            Fresh, false, "Sinaloa, Mexico", "2 lb (3 pieces)",
            "A classic variety with rich flavour and a hint of tartness.",
            &["Juicy", "Aromatic"],
        ),
        mango(
            "5", "Kent Mangoes", "Kent", 1599, None, 4.5, 57,
            Fresh, true, "Piura, Peru", "2 lb (2-3 pieces)",
            "Large, sweet and nearly fibreless mangoes perfect for juicing.",
            &["Fibreless", "Large size"],
        ),
        mango(
            "6", "Ataulfo Honey Mangoes", "Manila", 1399, None, 4.6, 73,
            Fresh, true, "Chiapas, Mexico", "2 lb (5-6 pieces)",
            "Buttery golden mangoes with a honeyed taste and a thin seed.",
            &["Thin seed", "Buttery texture"],
        ),
        mango(
            "7", "Alphonso Mango Pulp", "Alphonso", 899, Some(1099), 4.6, 212,
            Pulp, true, "Maharashtra, India", "850 g can",
            "Smooth, sweetened Alphonso pulp for lassi, milkshakes and desserts.",
            &["No preservatives", "Ready to use"],
        ),
        mango(
            "8", "Kesar Mango Pulp", "Kesar", 799, None, 4.5, 134,
            Pulp, true, "Gujarat, India", "850 g can",
            "Rich Kesar pulp with natural sweetness, perfect for aamras puri.",
            &["Natural sweetness"],
        ),
        mango(
            "9", "Totapuri Mango Pulp", "Totapuri", 649, None, 4.1, 58,
            Pulp, false, "Andhra Pradesh, India", "3.1 kg tin",
            "Tangy pulp favoured by bakers and juice makers.",
            &["Bulk pack", "Tangy"],
        ),
        mango(
            "10", "Dried Mango Slices", "Kent", 1099, None, 4.4, 189,
            Processed, true, "Piura, Peru", "250 g pouch",
            "Chewy, unsweetened dried mango slices for snacking on the go.",
            &["No added sugar", "Vegan"],
        ),
        mango(
            "11", "Alphonso Mango Jam", "Alphonso", 749, Some(899), 4.3, 47,
            Processed, true, "Ratnagiri, India", "340 g jar",
            "Small-batch jam made with ripe Alphonso mangoes and cane sugar.",
            &["Small batch"],
        ),
        mango(
            "12", "Mango Nectar Juice", "Haden", 599, None, 4.0, 66,
            Processed, true, "Sinaloa, Mexico", "1 L bottle",
            "Refreshing mango nectar, lightly sweetened and served best chilled.",
            &["Serve chilled"],
        ),
        mango(
            "13", "Spicy Mango Pickle", "Totapuri", 549, None, 4.2, 91,
            Processed, false, "Andhra Pradesh, India", "500 g jar",
            "Traditional raw mango pickle with mustard, chilli and cold-pressed oil.",
            &["Traditional recipe"],
        ),
        mango(
            "14", "Keitt Late Season Mangoes", "Keitt", 1399, None, 4.3, 22,
            Fresh, true, "California, USA", "2 lb (2 pieces)",
            "Green-skinned late season mangoes with sweet, tangy flesh.",
            &["Late season", "Green when ripe"],
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let revalidated = Catalog::new(builtin.products().to_vec()).unwrap();
        assert_eq!(revalidated, builtin);
        assert!(!builtin.is_empty());
    }

    #[test]
    fn test_category_counts_cover_every_category() {
        let counts = Catalog::builtin().category_counts();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.values().sum::<usize>(), Catalog::builtin().len());

        let empty = Catalog::new(Vec::new()).unwrap();
        assert!(empty.category_counts().values().all(|&n| n == 0));
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("1").map(|p| p.variety.as_str()), Some("Alphonso"));
        assert!(catalog.get("nope").is_none());
        assert!(matches!(
            catalog.require("nope"),
            Err(CoreError::ProductNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_from_json_converts_decimal_prices() {
        let json = r#"[
            {
                "id": "1",
                "name": "Alphonso",
                "variety": "Alphonso",
                "price": 24.99,
                "originalPrice": 29.99,
                "rating": 4.8,
                "reviewCount": 156,
                "category": "fresh",
                "inStock": true
            },
            {
                "id": "2",
                "name": "Pulp",
                "variety": "Kesar",
                "price": 8,
                "rating": 4,
                "category": "pulp",
                "inStock": false,
                "features": ["Canned"]
            }
        ]"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = catalog.get("1").unwrap();
        assert_eq!(first.price.cents(), 2499);
        assert_eq!(first.original_price.map(|m| m.cents()), Some(2999));

        let second = catalog.get("2").unwrap();
        assert_eq!(second.price.cents(), 800);
        assert_eq!(second.category, Category::Pulp);
        assert_eq!(second.features, vec!["Canned".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"[
            {"id": "1", "name": "A", "variety": "Kent", "price": 1, "rating": 3, "category": "fresh", "inStock": true},
            {"id": "1", "name": "B", "variety": "Kent", "price": 2, "rating": 3, "category": "fresh", "inStock": true}
        ]"#;

        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidProduct { source: ValidationError::Duplicate { .. }, .. }
        ));
    }

    #[test]
    fn test_from_json_rejects_invalid_records() {
        let negative = r#"[{"id": "1", "name": "A", "variety": "Kent", "price": -1, "rating": 3, "category": "fresh", "inStock": true}]"#;
        assert!(matches!(
            Catalog::from_json_str(negative),
            Err(CoreError::InvalidProduct { .. })
        ));

        let runaway = r#"[{"id": "1", "name": "A", "variety": "Kent", "price": 1e17, "rating": 3, "category": "fresh", "inStock": true}]"#;
        assert!(matches!(
            Catalog::from_json_str(runaway),
            Err(CoreError::InvalidProduct { .. })
        ));

        let pricey = r#"[{"id": "1", "name": "A", "variety": "Kent", "price": 2000000, "rating": 3, "category": "fresh", "inStock": true}]"#;
        match Catalog::from_json_str(pricey) {
            Err(CoreError::InvalidProduct { source, .. }) => {
                assert_eq!(source.to_string(), "price must be at most $1000000.00");
            }
            other => panic!("expected InvalidProduct, got {:?}", other),
        }

        let unknown_category = r#"[{"id": "1", "name": "A", "variety": "Kent", "price": 1, "rating": 3, "category": "frozen", "inStock": true}]"#;
        assert!(matches!(
            Catalog::from_json_str(unknown_category),
            Err(CoreError::CatalogParse(_))
        ));

        assert!(matches!(
            Catalog::from_json_str("not json"),
            Err(CoreError::CatalogParse(_))
        ));
    }
}
