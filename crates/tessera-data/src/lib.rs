//! Catalog and cart collaborator boundary for tessera-commerce.
//!
//! The engine itself is pure and synchronous; this crate owns the two
//! edges where it meets the outside world:
//!
//! - **Inbound**: catalog variation records with string-encoded prices
//!   and loose attribute lists, converted into engine snapshots
//! - **Outbound**: the normalized cart-line payload, submitted through a
//!   [`CartSubmitter`] that serializes same-key submissions and retries
//!   transient failures
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_data::prelude::*;
//!
//! let product: RawProduct = serde_json::from_str(&feed_body)?;
//! let variants = product.into_variants(Currency::GBP)?;
//!
//! // ... configure a session, resolve a LineAction ...
//!
//! let submitter = CartSubmitter::new(cart_service);
//! submitter.submit(&action).await?;
//! ```

pub mod catalog;
pub mod error;
pub mod payload;
pub mod retry;
pub mod submit;

pub use catalog::{RawAttribute, RawProduct, RawVariation};
pub use error::{CartApiError, CatalogError};
pub use payload::CartLineRequest;
pub use retry::{Backoff, RetryPolicy};
pub use submit::{CartService, CartSubmitter};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{RawAttribute, RawProduct, RawVariation};
    pub use crate::error::{CartApiError, CatalogError};
    pub use crate::payload::CartLineRequest;
    pub use crate::retry::{Backoff, RetryPolicy};
    pub use crate::submit::{CartService, CartSubmitter};
}
