//! Unit coverage and price-unit resolution.
//!
//! Derives one purchasable unit's coverage area in m² from a parsed
//! [`DimensionRecord`] and classifies how the variant's stored price is
//! to be read: per item, or per square metre.

use serde::{Deserialize, Serialize};

use crate::descriptor::{DimensionKind, DimensionRecord};
use crate::error::EngineError;

const MM_PER_METRE: f64 = 1000.0;

/// How a variant's stored price is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PriceUnit {
    /// The price buys one piece.
    #[default]
    PerItem,
    /// The price buys one square metre of coverage.
    PerSquareMetre,
}

impl PriceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceUnit::PerItem => "per_item",
            PriceUnit::PerSquareMetre => "per_m2",
        }
    }
}

/// One purchasable unit's coverage and price classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct UnitCoverage {
    /// Coverage of one piece in square metres. Zero for samples, and for
    /// malformed descriptors.
    pub unit_area_m2: f64,
    /// How the stored price applies.
    pub price_unit: PriceUnit,
}

impl UnitCoverage {
    /// Resolve coverage from a parsed dimension record.
    ///
    /// Mosaic coverage always uses the sheet dimensions, never the chip
    /// dimensions; the sheet is the purchasable unit.
    pub fn resolve(record: &DimensionRecord) -> Self {
        match record.kind {
            DimensionKind::FullSample | DimensionKind::FreeSample => Self {
                unit_area_m2: 0.0,
                price_unit: PriceUnit::PerItem,
            },
            DimensionKind::Rectangular | DimensionKind::Mosaic => {
                let unit_area_m2 = record
                    .pricing_dimensions_mm()
                    .map(|(w, l)| (w / MM_PER_METRE) * (l / MM_PER_METRE))
                    .unwrap_or(0.0);
                Self {
                    unit_area_m2,
                    price_unit: PriceUnit::PerSquareMetre,
                }
            }
        }
    }

    /// Whether pieces and area can be converted into each other.
    pub fn has_area(&self) -> bool {
        self.unit_area_m2 > 0.0
    }

    /// A non-sample kind that resolved to zero area cannot price or
    /// convert anything.
    pub fn is_degenerate(&self) -> bool {
        self.price_unit == PriceUnit::PerSquareMetre && !self.has_area()
    }

    /// Error form of [`Self::is_degenerate`] for callers that propagate.
    pub fn check_degenerate(&self) -> Result<(), EngineError> {
        if self.is_degenerate() {
            Err(EngineError::DegenerateArea)
        } else {
            Ok(())
        }
    }
}

/// Round an area to the 3 decimal places used for display and payloads.
pub fn round_area_m2(area: f64) -> f64 {
    (area * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse_descriptor;

    #[test]
    fn test_rectangular_coverage() {
        let record = parse_descriptor("610x305x10").unwrap();
        let coverage = UnitCoverage::resolve(&record);
        assert_eq!(coverage.price_unit, PriceUnit::PerSquareMetre);
        assert!((coverage.unit_area_m2 - 0.18605).abs() < 1e-9);
        assert!(coverage.has_area());
        assert!(!coverage.is_degenerate());
    }

    #[test]
    fn test_mosaic_coverage_uses_sheet() {
        let record = parse_descriptor("49x49x10 (295x295x10)").unwrap();
        let coverage = UnitCoverage::resolve(&record);
        assert!((coverage.unit_area_m2 - 0.087025).abs() < 1e-9);
        assert_eq!(coverage.price_unit, PriceUnit::PerSquareMetre);
    }

    #[test]
    fn test_sample_coverage() {
        let record = parse_descriptor("Free Sample").unwrap();
        let coverage = UnitCoverage::resolve(&record);
        assert_eq!(coverage.unit_area_m2, 0.0);
        assert_eq!(coverage.price_unit, PriceUnit::PerItem);
        assert!(!coverage.is_degenerate());
        assert!(coverage.check_degenerate().is_ok());
    }

    #[test]
    fn test_degenerate_area() {
        let record = DimensionRecord::rectangular(0.0, 305.0);
        let coverage = UnitCoverage::resolve(&record);
        assert!(coverage.is_degenerate());
        assert_eq!(
            coverage.check_degenerate(),
            Err(EngineError::DegenerateArea)
        );
    }

    #[test]
    fn test_round_area() {
        assert_eq!(round_area_m2(2.04655), 2.047);
        assert_eq!(round_area_m2(1.2344), 1.234);
        assert_eq!(round_area_m2(0.0), 0.0);
    }
}
