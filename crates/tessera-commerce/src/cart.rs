//! Cart line resolution.
//!
//! Builds the normalized outbound cart line for a finished selection and
//! decides, against a read snapshot of the collaborator's cart, whether
//! it adds a new line or updates an existing one. The lookup key is the
//! `(product, variation, sample-flag)` triple, which is what keeps a
//! buyer from accumulating duplicate free-sample lines.

use serde::{Deserialize, Serialize};

use crate::coverage::round_area_m2;
use crate::error::EngineError;
use crate::ids::{ProductId, VariantId};

/// Dedup key for a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variation_id: VariantId,
    pub is_sample: bool,
}

/// A normalized cart line, built once per "add" action and handed to the
/// cart collaborator.
///
/// Invariants: `quantity` is a whole count of at least one; `area_m2`,
/// when present, is rounded to 3 decimal places; a sample line never
/// carries an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub variation_id: VariantId,
    pub is_sample: bool,
    pub quantity: i64,
    pub area_m2: Option<f64>,
}

impl CartLine {
    /// Build a normalized line.
    ///
    /// Rejects non-positive quantities; strips the area for samples
    /// regardless of what the quantity state held.
    pub fn new(
        product_id: ProductId,
        variation_id: VariantId,
        is_sample: bool,
        quantity: i64,
        area_m2: Option<f64>,
    ) -> Result<Self, EngineError> {
        if quantity <= 0 {
            return Err(EngineError::QuantityRequired);
        }
        let area_m2 = if is_sample {
            None
        } else {
            area_m2.filter(|a| *a > 0.0).map(round_area_m2)
        };
        Ok(Self {
            product_id,
            variation_id,
            is_sample,
            quantity,
            area_m2,
        })
    }

    /// The dedup key for this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            variation_id: self.variation_id,
            is_sample: self.is_sample,
        }
    }
}

/// The resolved action for a submitted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineAction {
    /// No line with this key exists; insert a new one.
    Add(CartLine),
    /// A line with this key exists; replace its quantity and area.
    Update(CartLine),
}

impl LineAction {
    /// The line being added or updated.
    pub fn line(&self) -> &CartLine {
        match self {
            LineAction::Add(line) | LineAction::Update(line) => line,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, LineAction::Update(_))
    }
}

/// A read snapshot of the collaborator's current cart lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from the collaborator's lines.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Lines currently in the cart.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find a line by its dedup key.
    pub fn find(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.key() == key)
    }

    /// Decide add-vs-update for a submitted line.
    ///
    /// A line with the same key already in the cart yields an update
    /// that replaces its quantity and area with the new selection; a
    /// duplicate insert is never produced.
    pub fn resolve(&self, line: CartLine) -> LineAction {
        if self.find(&line.key()).is_some() {
            LineAction::Update(line)
        } else {
            LineAction::Add(line)
        }
    }

    /// Fold a successfully submitted action back into the snapshot.
    pub fn apply(&mut self, action: &LineAction) {
        match action {
            LineAction::Add(line) => self.lines.push(line.clone()),
            LineAction::Update(line) => {
                if let Some(existing) = self
                    .lines
                    .iter_mut()
                    .find(|existing| existing.key() == line.key())
                {
                    *existing = line.clone();
                } else {
                    self.lines.push(line.clone());
                }
            }
        }
    }
}
