use std::sync::Arc;

use futures_cpupool::CpuPool;

use config::Config;
use controller::routes::{create_route_parser, Route, RouteParser};
use repos::repo_factory::ReposFactory;

/// Static context for all app
pub struct StaticContext<F>
where
    F: ReposFactory,
{
    pub cpu_pool: CpuPool,
    pub config: Arc<Config>,
    pub route_parser: Arc<RouteParser<Route>>,
    pub repo_factory: F,
}

impl<F: ReposFactory> StaticContext<F> {
    /// Create a new static context
    pub fn new(cpu_pool: CpuPool, config: Arc<Config>, repo_factory: F) -> Self {
        let route_parser = Arc::new(create_route_parser());
        Self {
            cpu_pool,
            config,
            route_parser,
            repo_factory,
        }
    }
}

impl<F: ReposFactory> Clone for StaticContext<F> {
    fn clone(&self) -> Self {
        Self {
            cpu_pool: self.cpu_pool.clone(),
            config: self.config.clone(),
            route_parser: self.route_parser.clone(),
            repo_factory: self.repo_factory.clone(),
        }
    }
}

/// Dynamic context for each request
#[derive(Clone, Debug, Default)]
pub struct DynamicContext {
    pub user_id: Option<String>,
}

impl DynamicContext {
    /// Create a new dynamic context
    pub fn new(user_id: Option<String>) -> Self {
        Self { user_id }
    }
}
