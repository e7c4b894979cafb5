//! Explicit configuration session.
//!
//! One value object carries the whole configuration pipeline for a
//! product page: the selected variant snapshot, its parsed dimensions
//! and resolved coverage, and the quantity state. The session is
//! serializable so the page boundary can save and restore it explicitly
//! instead of caching pieces of it ambiently.

use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CartState, LineAction};
use crate::catalog::{find_free_sample, ProductVariant};
use crate::coverage::UnitCoverage;
use crate::descriptor::{parse_descriptor, DimensionRecord};
use crate::error::EngineError;
use crate::ids::ProductId;
use crate::pricing::{quote, PriceQuote, VatMode};
use crate::quantity::QuantityReconciler;

/// The active variant with its derived size information.
///
/// Recomputed whenever the selection changes, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedVariant {
    /// Read-only snapshot of the variant.
    pub variant: ProductVariant,
    /// Parsed descriptor; `None` when the size text was unparsable, in
    /// which case conversions and pricing degrade to "unavailable".
    pub dimensions: Option<DimensionRecord>,
    /// Resolved unit coverage.
    pub coverage: UnitCoverage,
}

/// A buyer's in-progress configuration of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigurationSession {
    selected: Option<SelectedVariant>,
    quantity: QuantityReconciler,
    vat_mode: VatMode,
}

impl ConfigurationSession {
    /// Start an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with an explicit VAT display mode.
    pub fn with_vat_mode(vat_mode: VatMode) -> Self {
        Self {
            vat_mode,
            ..Self::default()
        }
    }

    /// Select a variant: parse its descriptor, resolve coverage, and
    /// reset the quantity entry.
    pub fn select_variant(&mut self, variant: ProductVariant) {
        let dimensions = parse_descriptor(&variant.size_descriptor).ok();
        let coverage = dimensions
            .as_ref()
            .map(UnitCoverage::resolve)
            .unwrap_or_default();
        tracing::debug!(
            variant = %variant.id,
            descriptor = %variant.size_descriptor,
            parsed = dimensions.is_some(),
            "variant selected"
        );
        self.selected = Some(SelectedVariant {
            variant,
            dimensions,
            coverage,
        });
        self.quantity.variant_changed(coverage);
    }

    /// Drop the selection entirely.
    pub fn clear_variant(&mut self) {
        self.selected = None;
        self.quantity.variant_changed(UnitCoverage::default());
    }

    /// The active selection, if any.
    pub fn selected(&self) -> Option<&SelectedVariant> {
        self.selected.as_ref()
    }

    /// The quantity state.
    pub fn quantity(&self) -> &QuantityReconciler {
        &self.quantity
    }

    /// Forwarded field events. See [`QuantityReconciler`].
    pub fn edit_pieces(&mut self, value: Option<f64>) {
        self.quantity.edit_pieces(value);
    }

    /// Commit the area field (on blur).
    pub fn commit_area(&mut self, value: Option<f64>) {
        self.quantity.commit_area(value);
    }

    /// Either field gained focus; start a fresh entry.
    pub fn begin_entry(&mut self) {
        self.quantity.begin_entry();
    }

    /// Switch the VAT display mode.
    pub fn set_vat_mode(&mut self, vat_mode: VatMode) {
        self.vat_mode = vat_mode;
    }

    pub fn vat_mode(&self) -> VatMode {
        self.vat_mode
    }

    /// Price the current configuration, if it is complete enough.
    ///
    /// An unparsable descriptor yields no quote at all; the stored price
    /// cannot be classified without dimensions.
    pub fn price_quote(&self) -> Option<PriceQuote> {
        let selected = self.selected.as_ref()?;
        selected.dimensions.as_ref()?;
        quote(
            selected.variant.price,
            &selected.coverage,
            &self.quantity,
            self.vat_mode,
        )
    }

    /// Resolve the finished configuration into a cart-line action.
    ///
    /// Fails with [`EngineError::SizeRequired`] when nothing is selected
    /// and [`EngineError::QuantityRequired`] when no valid quantity was
    /// entered; both are surfaced inline and block the submission. The
    /// session itself is untouched, so a failed collaborator handoff can
    /// be retried without re-entering values.
    pub fn build_line(&self, cart: &CartState) -> Result<LineAction, EngineError> {
        let selected = self.selected.as_ref().ok_or(EngineError::SizeRequired)?;
        let pieces = self.quantity.pieces().ok_or(EngineError::QuantityRequired)?;
        let is_sample = selected
            .dimensions
            .map(|d| d.kind.is_sample())
            .unwrap_or(false);

        let line = CartLine::new(
            selected.variant.product_id,
            selected.variant.id,
            is_sample,
            pieces,
            self.quantity.area_m2(),
        )?;
        Ok(cart.resolve(line))
    }

    /// Resolve a free-sample request for a product into a cart-line
    /// action, independent of the current selection.
    pub fn build_sample_line(
        product_id: ProductId,
        variants: &[ProductVariant],
        cart: &CartState,
    ) -> Result<LineAction, EngineError> {
        let sample = find_free_sample(variants)?;
        let line = CartLine::new(product_id, sample.id, true, 1, None)?;
        Ok(cart.resolve(line))
    }
}
