//! Repos is a module responsible for keeping coupons and request counters
pub mod coupons;
pub mod rate_limits;
pub mod repo_factory;
pub mod types;

pub use self::coupons::*;
pub use self::rate_limits::*;
pub use self::repo_factory::*;
pub use self::types::*;
