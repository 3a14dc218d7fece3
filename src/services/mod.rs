//! Services is a core layer for the app business logic like
//! validation, authorization, etc.

pub mod coupons;
pub mod system;
pub mod types;

pub use self::coupons::*;
pub use self::system::*;
pub use self::types::*;

use failure::Error as FailureError;

use controller::context::{DynamicContext, StaticContext};
use repos::ReposFactory;

/// Service
pub struct Service<F: ReposFactory> {
    pub static_context: StaticContext<F>,
    pub dynamic_context: DynamicContext,
}

impl<F: ReposFactory> Service<F> {
    /// Create a new service
    pub fn new(static_context: StaticContext<F>, dynamic_context: DynamicContext) -> Self {
        Self {
            static_context,
            dynamic_context,
        }
    }

    /// Runs repo work on the cpu pool
    pub fn spawn_on_pool<T, Func>(&self, f: Func) -> ServiceFuture<T>
    where
        T: Send + 'static,
        Func: FnOnce() -> Result<T, FailureError> + Send + 'static,
    {
        Box::new(self.static_context.cpu_pool.spawn_fn(f))
    }
}
