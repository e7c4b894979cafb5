//! Outbound cart-line payload.

use serde::{Deserialize, Serialize};

use tessera_commerce::cart::CartLine;

/// The line-add/update payload the cart collaborator accepts.
///
/// `m2_quantity` is present and positive for non-sample area-priced
/// lines and omitted entirely for sample lines; the upstream
/// [`CartLine`] invariants guarantee that split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineRequest {
    pub product_id: i64,
    pub variation_id: i64,
    pub is_sample: bool,
    /// Pieces, always >= 1.
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m2_quantity: Option<f64>,
}

impl CartLineRequest {
    /// Build the payload from a resolved line.
    pub fn from_line(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.get(),
            variation_id: line.variation_id.get(),
            is_sample: line.is_sample,
            quantity: line.quantity,
            m2_quantity: line.area_m2,
        }
    }
}

impl From<&CartLine> for CartLineRequest {
    fn from(line: &CartLine) -> Self {
        Self::from_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_commerce::{ProductId, VariantId};

    #[test]
    fn test_area_line_payload() {
        let line = CartLine::new(
            ProductId::new(7),
            VariantId::new(21),
            false,
            11,
            Some(2.04655),
        )
        .unwrap();
        let request = CartLineRequest::from_line(&line);

        assert_eq!(request.product_id, 7);
        assert_eq!(request.variation_id, 21);
        assert_eq!(request.quantity, 11);
        assert_eq!(request.m2_quantity, Some(2.047));

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"m2_quantity\":2.047"));
    }

    #[test]
    fn test_sample_line_payload_omits_area() {
        let line = CartLine::new(ProductId::new(7), VariantId::new(23), true, 1, None).unwrap();
        let request = CartLineRequest::from_line(&line);

        assert_eq!(request.m2_quantity, None);
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("m2_quantity"));
        assert!(json.contains("\"is_sample\":true"));
    }
}
