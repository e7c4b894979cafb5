//! Bidirectional piece/area quantity reconciliation.
//!
//! The buyer edits either a "pieces" field or an "area" field; the other
//! is always a pure derivation of the last-edited one, keyed by a
//! [`EditedField`] tag. There are no cross-field listeners, so a
//! programmatic update of the derived field can never re-trigger an edit
//! handler.

use serde::{Deserialize, Serialize};

use crate::coverage::{round_area_m2, UnitCoverage};

/// Tolerance subtracted before the ceiling when converting area to
/// pieces, so an area that is an exact multiple of the unit area (up to
/// float noise) does not round up to an extra piece.
const CEILING_TOLERANCE: f64 = 1e-9;

/// Which quantity field the user edited last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EditedField {
    #[default]
    None,
    Pieces,
    Area,
}

/// Session-scoped quantity state for the active variant.
///
/// At most one field is authoritative at any instant (the last-edited
/// one); the other always holds the derived, rounded-consistent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuantityReconciler {
    coverage: UnitCoverage,
    pieces: Option<i64>,
    area_m2: Option<f64>,
    last_edited: EditedField,
    quantity_required: bool,
}

impl QuantityReconciler {
    /// Create a reconciler for a variant's resolved coverage.
    pub fn new(coverage: UnitCoverage) -> Self {
        Self {
            coverage,
            ..Self::default()
        }
    }

    /// The selected variant changed: drop both fields and start over.
    pub fn variant_changed(&mut self, coverage: UnitCoverage) {
        tracing::debug!(unit_area_m2 = coverage.unit_area_m2, "variant changed, quantity reset");
        *self = Self::new(coverage);
    }

    /// Focusing either field starts a fresh entry: both values clear and
    /// the user re-enters a complete value. Avoids ambiguous partial-edit
    /// states.
    pub fn begin_entry(&mut self) {
        self.pieces = None;
        self.area_m2 = None;
        self.last_edited = EditedField::None;
    }

    /// The user edited the pieces field.
    ///
    /// Empty or non-positive input clears both fields and raises the
    /// quantity-required flag. Otherwise pieces is floored to a whole
    /// count and, when the variant has a usable unit area, the area field
    /// is derived from it.
    pub fn edit_pieces(&mut self, value: Option<f64>) {
        let pieces = match value {
            Some(v) if v > 0.0 => v.floor() as i64,
            _ => {
                self.clear_requiring_quantity();
                return;
            }
        };
        if pieces <= 0 {
            self.clear_requiring_quantity();
            return;
        }

        self.pieces = Some(pieces);
        self.area_m2 = if self.coverage.has_area() {
            Some(pieces as f64 * self.coverage.unit_area_m2)
        } else {
            None
        };
        self.last_edited = EditedField::Pieces;
        self.quantity_required = false;
        tracing::debug!(pieces, area_m2 = ?self.area_m2, "pieces edited");
    }

    /// The user committed the area field (on blur, not per keystroke).
    ///
    /// Pieces is the ceiling of `area / unit_area` -- a fractional tile
    /// cannot be bought -- and the area is then re-derived from that
    /// whole count, so the display reflects the coverage that will
    /// actually ship rather than the raw typed value.
    pub fn commit_area(&mut self, value: Option<f64>) {
        let area = match value {
            Some(v) if v > 0.0 => v,
            _ => {
                self.clear_requiring_quantity();
                return;
            }
        };
        if !self.coverage.has_area() {
            // No conversion possible; leave the entry untouched.
            return;
        }

        let ratio = area / self.coverage.unit_area_m2;
        let pieces = ((ratio - CEILING_TOLERANCE).ceil() as i64).max(1);

        self.pieces = Some(pieces);
        self.area_m2 = Some(pieces as f64 * self.coverage.unit_area_m2);
        self.last_edited = EditedField::Area;
        self.quantity_required = false;
        tracing::debug!(pieces, area_m2 = ?self.area_m2, "area committed");
    }

    fn clear_requiring_quantity(&mut self) {
        self.pieces = None;
        self.area_m2 = None;
        self.last_edited = EditedField::None;
        self.quantity_required = true;
    }

    /// Coverage of the active variant.
    pub fn coverage(&self) -> &UnitCoverage {
        &self.coverage
    }

    /// Whole pieces to purchase, if entered.
    pub fn pieces(&self) -> Option<i64> {
        self.pieces
    }

    /// Exact coverage of the selected pieces in m².
    pub fn area_m2(&self) -> Option<f64> {
        self.area_m2
    }

    /// Area as shown in the field, rounded to 3 decimal places.
    pub fn display_area_m2(&self) -> Option<f64> {
        self.area_m2.map(round_area_m2)
    }

    /// Which field the user last edited.
    pub fn last_edited(&self) -> EditedField {
        self.last_edited
    }

    /// Whether the last submit-or-edit left the selection without a
    /// valid positive quantity.
    pub fn quantity_required(&self) -> bool {
        self.quantity_required
    }

    /// Whether a valid quantity is currently entered.
    pub fn has_quantity(&self) -> bool {
        self.pieces.is_some()
    }
}
