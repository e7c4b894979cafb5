//! Price calculation for the active configuration.
//!
//! Produces the displayed unit price and the total for the current
//! quantity. An incomplete configuration (no pieces entered, or a size
//! that resolved to a degenerate area) yields no quote; the UI renders
//! the no-price sentinel instead of a number.

use serde::{Deserialize, Serialize};

use crate::coverage::{PriceUnit, UnitCoverage};
use crate::money::Money;
use crate::quantity::QuantityReconciler;

/// Flat display-rate VAT multiplier.
pub const VAT_RATE: f64 = 0.20;

/// Rendered in place of a price when no quote is available.
pub const NO_PRICE: &str = "\u{2014}";

/// Whether prices are shown with or without VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VatMode {
    #[default]
    IncludingVat,
    ExcludingVat,
}

/// A computed price for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The per-unit figure shown next to the price (per piece or per m²,
    /// depending on the variant), already adjusted for the VAT mode.
    pub unit_price: Money,
    /// Total for the entered quantity, rounded at the cent.
    pub total: Money,
}

impl PriceQuote {
    /// Format an optional quote's total, falling back to the sentinel.
    pub fn display_total(quote: Option<&PriceQuote>) -> String {
        match quote {
            Some(q) => q.total.display(),
            None => NO_PRICE.to_string(),
        }
    }
}

/// Compute the quote for a variant price, its coverage, and the current
/// quantity state.
///
/// The VAT-exclusive view divides the *per-unit* price before any
/// quantity multiplication, so large quantities do not accumulate
/// rounding drift. Returns `None` when pieces is unset, the coverage is
/// degenerate, or the multiplication overflows.
pub fn quote(
    variant_price: Money,
    coverage: &UnitCoverage,
    quantity: &QuantityReconciler,
    vat_mode: VatMode,
) -> Option<PriceQuote> {
    let pieces = quantity.pieces()?;
    let unit_price = match vat_mode {
        VatMode::IncludingVat => variant_price,
        VatMode::ExcludingVat => variant_price.excluding_vat(VAT_RATE),
    };

    let total = match coverage.price_unit {
        PriceUnit::PerItem => unit_price.try_multiply(pieces)?,
        PriceUnit::PerSquareMetre => {
            if coverage.is_degenerate() {
                return None;
            }
            unit_price.multiply_decimal(pieces as f64 * coverage.unit_area_m2)
        }
    };

    Some(PriceQuote { unit_price, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse_descriptor;
    use crate::money::Currency;

    fn setup(descriptor: &str) -> (UnitCoverage, QuantityReconciler) {
        let coverage = UnitCoverage::resolve(&parse_descriptor(descriptor).unwrap());
        (coverage, QuantityReconciler::new(coverage))
    }

    #[test]
    fn test_area_priced_total_from_pieces() {
        let (coverage, mut quantity) = setup("610x305x10");
        quantity.edit_pieces(Some(10.0));

        let price = Money::new(4500, Currency::GBP);
        let quote = quote(price, &coverage, &quantity, VatMode::IncludingVat).unwrap();

        // 45.00 * 10 * 0.18605 = 83.7225 -> £83.72
        assert_eq!(quote.total.amount_cents, 8372);
        assert_eq!(quote.unit_price, price);
    }

    #[test]
    fn test_area_priced_total_from_committed_area() {
        let (coverage, mut quantity) = setup("610x305x10");
        quantity.commit_area(Some(2.0));

        let price = Money::new(4500, Currency::GBP);
        let quote = quote(price, &coverage, &quantity, VatMode::IncludingVat).unwrap();

        // 11 pieces, 45.00 * 2.04655 = 92.09475 -> £92.09
        assert_eq!(quantity.pieces(), Some(11));
        assert_eq!(quote.total.amount_cents, 9209);
    }

    #[test]
    fn test_mosaic_priced_on_sheet_area() {
        let (coverage, mut quantity) = setup("49x49x10 (295x295x10)");
        quantity.edit_pieces(Some(1.0));

        let price = Money::new(10000, Currency::GBP);
        let quote = quote(price, &coverage, &quantity, VatMode::IncludingVat).unwrap();

        // 100.00 * 0.087025 = £8.70, not 100.00 * 0.002401
        assert_eq!(quote.total.amount_cents, 870);
    }

    #[test]
    fn test_sample_priced_per_item() {
        let (coverage, mut quantity) = setup("Full Size Sample");
        quantity.edit_pieces(Some(2.0));

        let price = Money::new(350, Currency::GBP);
        let quote = quote(price, &coverage, &quantity, VatMode::IncludingVat).unwrap();

        assert_eq!(quote.total.amount_cents, 700);
        assert_eq!(quote.total.display(), "\u{00a3}7.00");
    }

    #[test]
    fn test_excluding_vat_divides_unit_price_first() {
        let (coverage, mut quantity) = setup("610x305x10");
        quantity.edit_pieces(Some(10.0));

        let price = Money::new(4500, Currency::GBP);
        let quote = quote(price, &coverage, &quantity, VatMode::ExcludingVat).unwrap();

        // Unit drops to 37.50 first, then 37.50 * 1.8605 = 69.77
        assert_eq!(quote.unit_price.amount_cents, 3750);
        assert_eq!(quote.total.amount_cents, 6977);
    }

    #[test]
    fn test_no_quote_without_pieces() {
        let (coverage, quantity) = setup("610x305x10");
        let price = Money::new(4500, Currency::GBP);
        let result = quote(price, &coverage, &quantity, VatMode::IncludingVat);

        assert!(result.is_none());
        assert_eq!(PriceQuote::display_total(result.as_ref()), NO_PRICE);
    }

    #[test]
    fn test_no_quote_for_degenerate_coverage() {
        use crate::descriptor::DimensionRecord;

        let coverage = UnitCoverage::resolve(&DimensionRecord::rectangular(0.0, 305.0));
        let mut quantity = QuantityReconciler::new(coverage);
        // Degenerate coverage cannot derive an area, but a raw pieces
        // entry is still recorded; pricing must still refuse.
        quantity.edit_pieces(Some(3.0));

        let price = Money::new(4500, Currency::GBP);
        assert!(quote(price, &coverage, &quantity, VatMode::IncludingVat).is_none());
    }
}
