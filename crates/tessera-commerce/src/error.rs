//! Engine error types.
//!
//! Every condition here is recoverable at the point of the user
//! interaction that raised it; nothing in the engine is fatal.

use thiserror::Error;

/// Errors that can occur while configuring and submitting a selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Size text doesn't match any known pattern. The configuration
    /// degrades to "no conversion possible" rather than failing hard.
    #[error("Unparsable size descriptor: {0:?}")]
    UnparsableDescriptor(String),

    /// Resolved unit area is zero for a non-sample size. Quantity and
    /// price conversions become no-ops instead of dividing by zero.
    #[error("Size resolves to a zero unit area")]
    DegenerateArea,

    /// Submission attempted without a valid positive quantity.
    #[error("A positive quantity is required")]
    QuantityRequired,

    /// Submission attempted without a selected size.
    #[error("A size must be selected")]
    SizeRequired,

    /// No in-stock free-sample variation exists for the product.
    #[error("No free sample is available for this product")]
    SampleUnavailable,

    /// The cart collaborator rejected or failed the line handoff.
    /// Local selection state is kept intact so the user can retry.
    #[error("Cart update failed: {0}")]
    CartAddFailed(String),
}
