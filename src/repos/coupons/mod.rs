pub mod coupons;

pub use self::coupons::*;
