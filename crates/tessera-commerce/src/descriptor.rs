//! Size descriptor parsing.
//!
//! A variant carries a single free-text size label (e.g. `"610x305x10"`,
//! `"49x49x10 (295x295x10)"`, `"Full Size Sample"`). This module is the
//! one place that understands that text, and the one place that knows
//! which variant attribute the label lives in. Everything downstream
//! consumes the resulting [`DimensionRecord`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::catalog::VariantAttribute;
use crate::error::EngineError;

/// Attribute names the catalog uses for the size label, compared
/// case-insensitively.
pub const SIZE_ATTRIBUTE_NAMES: [&str; 2] = ["Sizemm", "pa_sizemm"];

/// Classification of a parsed size descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionKind {
    /// A plain tile with width and length.
    Rectangular,
    /// A mosaic: small chips mounted on a larger sheet. The sheet is the
    /// purchasable unit and the one used for pricing.
    Mosaic,
    /// A full-size sample, unit-counted and unit-priced.
    FullSample,
    /// A free sample, unit-counted at quantity one.
    FreeSample,
}

impl DimensionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionKind::Rectangular => "rectangular",
            DimensionKind::Mosaic => "mosaic",
            DimensionKind::FullSample => "full_sample",
            DimensionKind::FreeSample => "free_sample",
        }
    }

    /// Sample kinds are unit-counted and never area-priced.
    pub fn is_sample(&self) -> bool {
        matches!(self, DimensionKind::FullSample | DimensionKind::FreeSample)
    }
}

/// Structured dimensions parsed from a size descriptor.
///
/// Millimetre fields are present for `Rectangular` and `Mosaic`; the
/// sheet fields only for `Mosaic`, where they describe the outer mounted
/// panel rather than the individual chip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    /// What the descriptor describes.
    pub kind: DimensionKind,
    /// Tile (or chip) width in millimetres.
    pub width_mm: Option<f64>,
    /// Tile (or chip) length in millimetres.
    pub length_mm: Option<f64>,
    /// Mosaic sheet width in millimetres.
    pub sheet_width_mm: Option<f64>,
    /// Mosaic sheet length in millimetres.
    pub sheet_length_mm: Option<f64>,
}

impl DimensionRecord {
    /// A plain rectangular tile.
    pub fn rectangular(width_mm: f64, length_mm: f64) -> Self {
        Self {
            kind: DimensionKind::Rectangular,
            width_mm: Some(width_mm),
            length_mm: Some(length_mm),
            sheet_width_mm: None,
            sheet_length_mm: None,
        }
    }

    /// A mosaic with chip and sheet dimensions.
    pub fn mosaic(width_mm: f64, length_mm: f64, sheet_width_mm: f64, sheet_length_mm: f64) -> Self {
        Self {
            kind: DimensionKind::Mosaic,
            width_mm: Some(width_mm),
            length_mm: Some(length_mm),
            sheet_width_mm: Some(sheet_width_mm),
            sheet_length_mm: Some(sheet_length_mm),
        }
    }

    /// A sample record, carrying no dimensions.
    pub fn sample(kind: DimensionKind) -> Self {
        Self {
            kind,
            width_mm: None,
            length_mm: None,
            sheet_width_mm: None,
            sheet_length_mm: None,
        }
    }

    /// The dimensions used for pricing: the sheet for a mosaic, the tile
    /// itself otherwise. None for samples.
    pub fn pricing_dimensions_mm(&self) -> Option<(f64, f64)> {
        match self.kind {
            DimensionKind::Rectangular => Some((self.width_mm?, self.length_mm?)),
            DimensionKind::Mosaic => Some((self.sheet_width_mm?, self.sheet_length_mm?)),
            DimensionKind::FullSample | DimensionKind::FreeSample => None,
        }
    }
}

/// Mosaic descriptor: `W x H [x D] (SW x SH [x D])`. Tried before the
/// plain pattern because a mosaic string contains a plain-looking prefix.
fn mosaic_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?ix)
            (\d+(?:\.\d+)?) \s* x \s* (\d+(?:\.\d+)?)   # chip width x length
            (?: \s* x \s* \d+(?:\.\d+)? )?              # optional chip depth
            \s* \( \s*
            (\d+(?:\.\d+)?) \s* x \s* (\d+(?:\.\d+)?)   # sheet width x length
            (?: \s* x \s* \d+(?:\.\d+)? )?              # optional sheet depth
            \s* \)",
        )
        .expect("mosaic descriptor pattern")
    })
}

/// Plain descriptor: `W x H [x D]`.
fn plain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)").expect("plain descriptor pattern")
    })
}

fn dimension(raw: &str, text: &str) -> Result<f64, EngineError> {
    text.parse()
        .map_err(|_| EngineError::UnparsableDescriptor(raw.to_string()))
}

/// Parse a raw size descriptor into a [`DimensionRecord`].
///
/// Match order is significant: sample phrases first, then the mosaic
/// pattern, then the plain pattern. Anything else fails with
/// [`EngineError::UnparsableDescriptor`] and downstream conversions
/// degrade to "unavailable".
pub fn parse_descriptor(raw: &str) -> Result<DimensionRecord, EngineError> {
    let lowered = raw.to_lowercase();
    if lowered.contains("full size sample") {
        return Ok(DimensionRecord::sample(DimensionKind::FullSample));
    }
    if lowered.contains("free sample") {
        return Ok(DimensionRecord::sample(DimensionKind::FreeSample));
    }

    if let Some(caps) = mosaic_pattern().captures(raw) {
        return Ok(DimensionRecord::mosaic(
            dimension(raw, &caps[1])?,
            dimension(raw, &caps[2])?,
            dimension(raw, &caps[3])?,
            dimension(raw, &caps[4])?,
        ));
    }

    if let Some(caps) = plain_pattern().captures(raw) {
        return Ok(DimensionRecord::rectangular(
            dimension(raw, &caps[1])?,
            dimension(raw, &caps[2])?,
        ));
    }

    tracing::warn!(descriptor = raw, "size descriptor matched no known pattern");
    Err(EngineError::UnparsableDescriptor(raw.to_string()))
}

/// Find the size descriptor among a variant's raw attributes.
///
/// This is the single normalization point for the catalog's loose
/// attribute naming; callers never match on attribute names themselves.
pub fn size_descriptor_of(attributes: &[VariantAttribute]) -> Option<&str> {
    attributes
        .iter()
        .find(|attr| {
            SIZE_ATTRIBUTE_NAMES
                .iter()
                .any(|name| attr.name.eq_ignore_ascii_case(name))
        })
        .map(|attr| attr.option.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rectangular() {
        let record = parse_descriptor("610x305x10").unwrap();
        assert_eq!(record.kind, DimensionKind::Rectangular);
        assert_eq!(record.width_mm, Some(610.0));
        assert_eq!(record.length_mm, Some(305.0));
        assert_eq!(record.sheet_width_mm, None);
    }

    #[test]
    fn test_parse_rectangular_without_depth() {
        let record = parse_descriptor("600 x 300").unwrap();
        assert_eq!(record.kind, DimensionKind::Rectangular);
        assert_eq!(record.pricing_dimensions_mm(), Some((600.0, 300.0)));
    }

    #[test]
    fn test_parse_rectangular_decimal() {
        let record = parse_descriptor("305.5x152.5x9").unwrap();
        assert_eq!(record.width_mm, Some(305.5));
        assert_eq!(record.length_mm, Some(152.5));
    }

    #[test]
    fn test_parse_mosaic_captures_sheet() {
        let record = parse_descriptor("49x49x10 (295x295x10)").unwrap();
        assert_eq!(record.kind, DimensionKind::Mosaic);
        assert_eq!(record.width_mm, Some(49.0));
        assert_eq!(record.length_mm, Some(49.0));
        assert_eq!(record.sheet_width_mm, Some(295.0));
        assert_eq!(record.sheet_length_mm, Some(295.0));
    }

    #[test]
    fn test_mosaic_pricing_uses_sheet_not_chip() {
        let record = parse_descriptor("49x49x10 (295x295x10)").unwrap();
        assert_eq!(record.pricing_dimensions_mm(), Some((295.0, 295.0)));
    }

    #[test]
    fn test_mosaic_tried_before_plain() {
        // The same string matches the plain pattern by its prefix; the
        // mosaic interpretation must win.
        let record = parse_descriptor("25x25 (300x300)").unwrap();
        assert_eq!(record.kind, DimensionKind::Mosaic);
    }

    #[test]
    fn test_parse_full_size_sample() {
        let record = parse_descriptor("Full Size Sample").unwrap();
        assert_eq!(record.kind, DimensionKind::FullSample);
        assert_eq!(record.pricing_dimensions_mm(), None);

        let record = parse_descriptor("FULL SIZE SAMPLE").unwrap();
        assert_eq!(record.kind, DimensionKind::FullSample);
    }

    #[test]
    fn test_parse_free_sample() {
        let record = parse_descriptor("Free Sample").unwrap();
        assert_eq!(record.kind, DimensionKind::FreeSample);
        assert!(record.kind.is_sample());
    }

    #[test]
    fn test_unparsable_descriptor() {
        let err = parse_descriptor("large format").unwrap_err();
        assert_eq!(
            err,
            EngineError::UnparsableDescriptor("large format".to_string())
        );
    }

    #[test]
    fn test_size_descriptor_of_matches_known_names() {
        let attrs = vec![
            VariantAttribute::new("Colour", "Grey"),
            VariantAttribute::new("pa_sizemm", "610x305x10"),
        ];
        assert_eq!(size_descriptor_of(&attrs), Some("610x305x10"));

        let attrs = vec![VariantAttribute::new("Sizemm", "Free Sample")];
        assert_eq!(size_descriptor_of(&attrs), Some("Free Sample"));

        let attrs = vec![VariantAttribute::new("Finish", "Honed")];
        assert_eq!(size_descriptor_of(&attrs), None);
    }
}
