//! Inbound catalog DTOs.
//!
//! The catalog collaborator sends variations with string-encoded prices
//! and a loose attribute list; these types mirror that wire shape and
//! convert it into the engine's read-only snapshots. Attribute naming is
//! not interpreted here -- the engine's descriptor module is the single
//! place that knows which attribute holds the size.

use serde::{Deserialize, Serialize};

use tessera_commerce::catalog::{ProductVariant, VariantAttribute};
use tessera_commerce::descriptor::size_descriptor_of;
use tessera_commerce::{Currency, Money, ProductId, VariantId};

use crate::error::CatalogError;

/// A raw attribute pair as the catalog sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAttribute {
    pub name: String,
    pub option: String,
}

/// One variation record from the catalog feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVariation {
    pub id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// String-encoded decimal price.
    pub price: String,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// A product with its variation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    #[serde(default)]
    pub variations: Vec<RawVariation>,
}

impl RawVariation {
    /// Convert into an engine variant.
    ///
    /// `fallback_product_id` is used when the record carries no
    /// `parent_id` of its own.
    pub fn into_variant(
        self,
        fallback_product_id: ProductId,
        currency: Currency,
    ) -> Result<ProductVariant, CatalogError> {
        let attributes: Vec<VariantAttribute> = self
            .attributes
            .iter()
            .map(|attr| VariantAttribute::new(attr.name.clone(), attr.option.clone()))
            .collect();
        let descriptor = size_descriptor_of(&attributes)
            .ok_or(CatalogError::MissingSize(self.id))?
            .to_string();

        let price = Money::parse(&self.price, currency).map_err(|_| CatalogError::BadPrice {
            variation_id: self.id,
            price: self.price.clone(),
        })?;

        let product_id = self
            .parent_id
            .map(ProductId::new)
            .unwrap_or(fallback_product_id);

        Ok(ProductVariant {
            id: VariantId::new(self.id),
            product_id,
            size_descriptor: descriptor,
            price,
            in_stock: self.in_stock,
        })
    }
}

impl RawProduct {
    /// Convert every variation of this product.
    ///
    /// A single malformed variation fails the whole conversion; a feed
    /// that mixes good and bad records is a catalog defect to surface,
    /// not to paper over.
    pub fn into_variants(self, currency: Currency) -> Result<Vec<ProductVariant>, CatalogError> {
        let product_id = ProductId::new(self.id);
        self.variations
            .into_iter()
            .map(|variation| variation.into_variant(product_id, currency))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_json() -> &'static str {
        r#"{
            "id": 7,
            "variations": [
                {
                    "id": 21,
                    "parent_id": 7,
                    "price": "45.00",
                    "attributes": [
                        {"name": "pa_sizemm", "option": "610x305x10"},
                        {"name": "Colour", "option": "Grey"}
                    ],
                    "in_stock": true
                },
                {
                    "id": 23,
                    "price": "0.00",
                    "attributes": [{"name": "Sizemm", "option": "Free Sample"}]
                }
            ]
        }"#
    }

    #[test]
    fn test_deserialize_feed() {
        let product: RawProduct = serde_json::from_str(feed_json()).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.variations.len(), 2);
        // in_stock defaults on when the feed omits it
        assert!(product.variations[1].in_stock);
    }

    #[test]
    fn test_into_variants() {
        let product: RawProduct = serde_json::from_str(feed_json()).unwrap();
        let variants = product.into_variants(Currency::GBP).unwrap();

        assert_eq!(variants[0].id, VariantId::new(21));
        assert_eq!(variants[0].product_id, ProductId::new(7));
        assert_eq!(variants[0].size_descriptor, "610x305x10");
        assert_eq!(variants[0].price.amount_cents, 4500);

        // parent_id omitted: falls back to the product's id
        assert_eq!(variants[1].product_id, ProductId::new(7));
        assert_eq!(variants[1].size_descriptor, "Free Sample");
        assert!(variants[1].price.is_zero());
    }

    #[test]
    fn test_bad_price_is_rejected() {
        let variation = RawVariation {
            id: 30,
            parent_id: None,
            price: "call us".into(),
            attributes: vec![RawAttribute {
                name: "Sizemm".into(),
                option: "610x305x10".into(),
            }],
            in_stock: true,
        };
        let err = variation
            .into_variant(ProductId::new(7), Currency::GBP)
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::BadPrice {
                variation_id: 30,
                price: "call us".into()
            }
        );
    }

    #[test]
    fn test_missing_size_attribute_is_rejected() {
        let variation = RawVariation {
            id: 31,
            parent_id: None,
            price: "45.00".into(),
            attributes: vec![RawAttribute {
                name: "Colour".into(),
                option: "Grey".into(),
            }],
            in_stock: true,
        };
        let err = variation
            .into_variant(ProductId::new(7), Currency::GBP)
            .unwrap_err();
        assert_eq!(err, CatalogError::MissingSize(31));
    }
}
