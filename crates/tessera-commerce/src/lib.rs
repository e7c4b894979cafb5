//! Dimensional quantity and pricing engine for tile/stone storefronts.
//!
//! Products in this domain are sold either by the piece or by coverage
//! area (square metres), and the purchasable size lives in a free-text
//! descriptor on each variant. This crate provides the types that turn
//! that descriptor into a priced, cart-ready selection:
//!
//! - **Descriptor**: parse a size label into structured dimensions
//! - **Coverage**: derive one piece's m² coverage and how the price applies
//! - **Quantity**: keep the "pieces" and "area" fields mutually consistent
//! - **Pricing**: unit and total price for the current entry, with an
//!   optional VAT-exclusive view
//! - **Cart**: normalize the final line and dedup against the live cart
//!
//! # Example
//!
//! ```rust
//! use tessera_commerce::prelude::*;
//!
//! let variant = ProductVariant::new(
//!     VariantId::new(21),
//!     ProductId::new(7),
//!     "610x305x10",
//!     Money::new(4500, Currency::GBP),
//! );
//!
//! let mut session = ConfigurationSession::new();
//! session.select_variant(variant);
//! session.edit_pieces(Some(10.0));
//!
//! let quote = session.price_quote().unwrap();
//! assert_eq!(quote.total.display(), "\u{00a3}83.72");
//!
//! let action = session.build_line(&CartState::new()).unwrap();
//! assert_eq!(action.line().quantity, 10);
//! ```

pub mod cart;
pub mod catalog;
pub mod coverage;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod money;
pub mod pricing;
pub mod quantity;
pub mod session;

pub use error::EngineError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::EngineError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{find_free_sample, ProductVariant, VariantAttribute};

    // Size resolution
    pub use crate::coverage::{round_area_m2, PriceUnit, UnitCoverage};
    pub use crate::descriptor::{
        parse_descriptor, size_descriptor_of, DimensionKind, DimensionRecord,
    };

    // Quantity and pricing
    pub use crate::pricing::{quote, PriceQuote, VatMode, NO_PRICE, VAT_RATE};
    pub use crate::quantity::{EditedField, QuantityReconciler};

    // Cart
    pub use crate::cart::{CartLine, CartState, LineAction, LineKey};

    // Session
    pub use crate::session::{ConfigurationSession, SelectedVariant};
}
