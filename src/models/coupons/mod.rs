pub mod basket;
pub mod coupons;

pub use self::basket::*;
pub use self::coupons::*;
