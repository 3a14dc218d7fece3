use std::fmt;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Reads `null` the same way as an absent field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|value| value.unwrap_or_default())
}

/// Opaque coupon identifier, assigned on creation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CouponId(pub String);

impl CouponId {
    pub fn new() -> Self {
        CouponId(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human readable coupon key
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CouponCode(pub String);

impl CouponCode {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CouponCode {
    fn from(code: String) -> Self {
        CouponCode(code)
    }
}

impl<'a> From<&'a str> for CouponCode {
    fn from(code: &'a str) -> Self {
        CouponCode(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_id_is_uuid() {
        let id = CouponId::new();
        assert!(Uuid::parse_str(&id.to_string()).is_ok());
        assert_eq!(id.to_string(), id.0);
    }

    #[test]
    fn test_code_display() {
        assert_eq!(CouponCode::from("SUMMER2024").to_string(), "SUMMER2024");
    }
}
