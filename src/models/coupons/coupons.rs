//! Model coupons
use models::types::{null_as_default, CouponCode, CouponId};

/// Stored discount offer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub code: CouponCode,
    pub discount: i32,
    /// Kept with the coupon, not checked when applying it
    pub min_basket_value: f64,
}

/// Payload for creating coupon, absent fields bind to zero values
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewCouponPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: CouponCode,
    #[serde(default)]
    pub discount: i32,
    #[serde(default)]
    pub min_basket_value: f64,
}

/// Payload for fetching coupons by their codes, absent or null `codes` means none
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CouponsSearchCodesPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub codes: Vec<CouponCode>,
}
