//! Model basket
use models::types::{null_as_default, CouponCode};

/// Customer's cart at the moment a coupon is applied. Never stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub applied_discount: i32,
    #[serde(default)]
    pub application_successful: bool,
    #[serde(default)]
    pub coupon_code: CouponCode,
}

impl Basket {
    pub fn with_value(value: f64) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }
}

/// Payload for applying coupon to a basket. Absent fields bind to zero values
/// and are rejected by the service, not by parsing.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ApplyCouponPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub basket: Basket,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: CouponCode,
}
