//! Catalog snapshot types.
//!
//! Variants arrive from the catalog collaborator and are treated as
//! read-only snapshots for the duration of a configuration session.

use serde::{Deserialize, Serialize};

use crate::descriptor::{parse_descriptor, DimensionKind, DimensionRecord};
use crate::error::EngineError;
use crate::ids::{ProductId, VariantId};
use crate::money::Money;

/// A raw name/option attribute pair as the catalog sends it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantAttribute {
    /// Attribute name (e.g., "Sizemm", "Colour").
    pub name: String,
    /// Attribute value (e.g., "610x305x10").
    pub option: String,
}

impl VariantAttribute {
    pub fn new(name: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            option: option.into(),
        }
    }
}

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Parent product ID.
    pub product_id: ProductId,
    /// Raw size label; the only size information a variant carries.
    pub size_descriptor: String,
    /// Stored price. Read as per-piece or per-m² depending on what the
    /// descriptor resolves to.
    pub price: Money,
    /// Whether the variant can currently be purchased.
    pub in_stock: bool,
}

impl ProductVariant {
    /// Create a new in-stock variant.
    pub fn new(
        id: VariantId,
        product_id: ProductId,
        size_descriptor: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id,
            product_id,
            size_descriptor: size_descriptor.into(),
            price,
            in_stock: true,
        }
    }

    /// Parse this variant's size descriptor.
    pub fn dimensions(&self) -> Result<DimensionRecord, EngineError> {
        parse_descriptor(&self.size_descriptor)
    }

    /// Whether this variant is a free sample.
    pub fn is_free_sample(&self) -> bool {
        matches!(
            self.dimensions(),
            Ok(DimensionRecord {
                kind: DimensionKind::FreeSample,
                ..
            })
        )
    }

    /// Whether this variant can currently be purchased.
    pub fn is_in_stock(&self) -> bool {
        self.in_stock
    }
}

/// Locate the in-stock free-sample variant among a product's variants.
///
/// Absence is an explicit [`EngineError::SampleUnavailable`]; the engine
/// never falls back to a different variant in place of a sample.
pub fn find_free_sample(variants: &[ProductVariant]) -> Result<&ProductVariant, EngineError> {
    variants
        .iter()
        .find(|variant| variant.in_stock && variant.is_free_sample())
        .ok_or(EngineError::SampleUnavailable)
}
