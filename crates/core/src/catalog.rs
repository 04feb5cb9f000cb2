//! Product catalog records and the seeded demo catalog.
//!
//! The catalog is read-mostly: the storefront serves it as-is, while the
//! admin panel can override or extend it. Overrides are persisted through
//! the [`store`](crate::store) snapshot port; the base catalog ships with
//! the binary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Product categories carried by the storefront filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Skincare,
    Makeup,
    Fragrance,
    Bodycare,
}

impl Category {
    /// Display label in the store's language.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skincare => "Soins de la peau",
            Self::Makeup => "Maquillage",
            Self::Fragrance => "Parfums",
            Self::Bodycare => "Soins du corps",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skincare" => Ok(Self::Skincare),
            "makeup" => Ok(Self::Makeup),
            "fragrance" => Ok(Self::Fragrance),
            "bodycare" => Ok(Self::Bodycare),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// Skin types a skincare product is suited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinType {
    Normal,
    Dry,
    Oily,
    Combination,
    Sensitive,
    Mature,
}

impl std::str::FromStr for SkinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "dry" => Ok(Self::Dry),
            "oily" => Ok(Self::Oily),
            "combination" => Ok(Self::Combination),
            "sensitive" => Ok(Self::Sensitive),
            "mature" => Ok(Self::Mature),
            _ => Err(format!("unknown skin type: {s}")),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skin_types: Vec<SkinType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    /// Discount percentage in `[0, 100)`, if the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
}

/// A customer testimonial shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: String,
    pub avatar: String,
    pub comment: String,
    pub rating: u8,
    pub product: String,
}

/// Builder-free constructor used by the seed data below.
#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    cents: i64,
    image: &str,
    category: Category,
    brand: &str,
    rating: Decimal,
    reviews: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::from_cents(cents, crate::types::CurrencyCode::EUR),
        image: image.to_owned(),
        category,
        brand: brand.to_owned(),
        skin_types: Vec::new(),
        description: None,
        ingredients: None,
        rating: Some(rating),
        reviews: Some(reviews),
        is_new: false,
        is_best_seller: false,
        discount: None,
    }
}

/// The demo product catalog.
///
/// Eight cosmetics products spanning all four categories, including
/// discounted, new and best-seller items so every storefront filter has
/// something to match.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            skin_types: vec![SkinType::Dry, SkinType::Normal],
            description: Some(
                "Un sérum hydratant enrichi en acide hyaluronique pour une peau \
                 intensément hydratée et repulpée."
                    .to_owned(),
            ),
            ingredients: Some(
                "Aqua, Glycerin, Sodium Hyaluronate, Pentylene Glycol, Phenoxyethanol".to_owned(),
            ),
            is_new: true,
            ..product(
                1,
                "Sérum Hydratant Intense",
                45_99,
                "https://images.example.com/products/serum-hydratant.jpg",
                Category::Skincare,
                "Lumine",
                Decimal::new(48, 1),
                124,
            )
        },
        Product {
            skin_types: vec![SkinType::Mature, SkinType::Dry],
            description: Some(
                "Cette crème de nuit anti-âge aide à réduire l'apparence des rides \
                 tout en nourrissant la peau."
                    .to_owned(),
            ),
            ingredients: Some(
                "Aqua, Caprylic/Capric Triglyceride, Glycerin, Cetearyl Alcohol, Retinol"
                    .to_owned(),
            ),
            is_best_seller: true,
            ..product(
                2,
                "Crème Anti-âge Régénérante",
                69_99,
                "https://images.example.com/products/creme-anti-age.jpg",
                Category::Skincare,
                "Elixir",
                Decimal::new(46, 1),
                89,
            )
        },
        Product {
            description: Some(
                "Un fond de teint longue tenue qui offre une couvrance modulable et un \
                 fini naturel."
                    .to_owned(),
            ),
            discount: Some(15),
            ..product(
                3,
                "Fond de Teint Fluide Longue Tenue",
                38_50,
                "https://images.example.com/products/fond-de-teint.jpg",
                Category::Makeup,
                "Lumière",
                Decimal::new(43, 1),
                207,
            )
        },
        Product {
            description: Some(
                "Une palette de 12 teintes neutres mates et satinées pour créer des \
                 looks jour et soir."
                    .to_owned(),
            ),
            is_best_seller: true,
            ..product(
                4,
                "Palette de Fards à Paupières Nude",
                42_00,
                "https://images.example.com/products/palette-nude.jpg",
                Category::Makeup,
                "Céleste",
                Decimal::new(47, 1),
                156,
            )
        },
        Product {
            description: Some(
                "Un parfum élégant aux notes de rose, jasmin et vanille pour une \
                 fragrance féminine et sophistiquée."
                    .to_owned(),
            ),
            is_new: true,
            ..product(
                5,
                "Eau de Parfum Floral",
                89_00,
                "https://images.example.com/products/eau-de-parfum.jpg",
                Category::Fragrance,
                "Rose Dorée",
                Decimal::new(49, 1),
                78,
            )
        },
        Product {
            skin_types: vec![SkinType::Oily, SkinType::Combination],
            description: Some(
                "Un gel nettoyant qui élimine en douceur les impuretés et l'excès de \
                 sébum sans dessécher la peau."
                    .to_owned(),
            ),
            ingredients: Some(
                "Aqua, Sodium Laureth Sulfate, Cocamidopropyl Betaine, Glycerin, Zinc PCA"
                    .to_owned(),
            ),
            discount: Some(10),
            ..product(
                6,
                "Gel Nettoyant Purifiant",
                28_50,
                "https://images.example.com/products/gel-nettoyant.jpg",
                Category::Skincare,
                "Pure",
                Decimal::new(45, 1),
                113,
            )
        },
        Product {
            description: Some(
                "Une huile sèche multi-usage qui nourrit la peau et apporte brillance \
                 aux cheveux."
                    .to_owned(),
            ),
            is_best_seller: true,
            ..product(
                7,
                "Huile Sèche Corps et Cheveux",
                34_99,
                "https://images.example.com/products/huile-seche.jpg",
                Category::Bodycare,
                "Éclat",
                Decimal::new(44, 1),
                92,
            )
        },
        Product {
            description: Some(
                "Un rouge à lèvres à la texture crémeuse qui offre une couleur intense \
                 et un fini mat longue tenue."
                    .to_owned(),
            ),
            ..product(
                8,
                "Rouge à Lèvres Mat",
                25_99,
                "https://images.example.com/products/rouge-a-levres.jpg",
                Category::Makeup,
                "Lumière",
                Decimal::new(42, 1),
                165,
            )
        },
    ]
}

/// The demo testimonials for the home page.
#[must_use]
pub fn demo_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            id: 1,
            name: "Sophie L.".to_owned(),
            avatar: "https://images.example.com/avatars/sophie.jpg".to_owned(),
            comment: "Le Sérum Hydratant Intense a complètement transformé ma peau \
                      sèche. Je ne peux plus m'en passer !"
                .to_owned(),
            rating: 5,
            product: "Sérum Hydratant Intense".to_owned(),
        },
        Testimonial {
            id: 2,
            name: "Camille D.".to_owned(),
            avatar: "https://images.example.com/avatars/camille.jpg".to_owned(),
            comment: "Cette palette offre de superbes teintes qui se fondent \
                      parfaitement. Idéale pour les looks quotidiens."
                .to_owned(),
            rating: 4,
            product: "Palette de Fards à Paupières Nude".to_owned(),
        },
        Testimonial {
            id: 3,
            name: "Marie-Claire P.".to_owned(),
            avatar: "https://images.example.com/avatars/marie-claire.jpg".to_owned(),
            comment: "J'utilise la Crème Anti-âge depuis 3 mois et je vois déjà une \
                      différence visible sur mes ridules. Très satisfaite !"
                .to_owned(),
            rating: 5,
            product: "Crème Anti-âge Régénérante".to_owned(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_ids_are_unique() {
        let products = demo_products();
        let mut ids: Vec<_> = products.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_demo_catalog_discounts_are_valid() {
        for p in demo_products() {
            if let Some(d) = p.discount {
                assert!(d < 100, "{} has an out-of-range discount", p.name);
            }
        }
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for c in ["skincare", "makeup", "fragrance", "bodycare"] {
            let parsed: Category = c.parse().expect("known category");
            let json = serde_json::to_string(&parsed).expect("serialize");
            assert_eq!(json, format!("\"{c}\""));
        }
        assert!("haircare".parse::<Category>().is_err());
    }

    #[test]
    fn test_product_serde_shape() {
        let products = demo_products();
        let first = products.first().expect("non-empty catalog");
        let json = serde_json::to_value(first).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["category"], "skincare");
        // Prices serialize as strings to keep decimals exact.
        assert_eq!(json["price"]["amount"], "45.99");
    }
}
