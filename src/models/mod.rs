//! Models contains all structures that are used in different
//! modules of the app

pub mod coupons;
pub mod jwt;
pub mod system;
pub mod types;

pub use self::coupons::*;
pub use self::jwt::*;
pub use self::system::*;
pub use self::types::*;
