use hyper::Method;
use regex::Regex;

/// Matches request paths against regex patterns, first match wins
pub struct RouteParser<R> {
    routes: Vec<(Regex, Box<Fn() -> R + Send + Sync>)>,
}

impl<R> Default for RouteParser<R> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<R> RouteParser<R> {
    /// Adds a route without params. Patterns are static, an invalid one is a programming error.
    pub fn add_route<F>(&mut self, pattern: &str, f: F)
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        let regex = Regex::new(pattern).unwrap_or_else(|e| panic!("Invalid route pattern {}: {}", pattern, e));
        self.routes.push((regex, Box::new(f)));
    }

    /// Returns the route for `path`, if any
    pub fn test(&self, path: &str) -> Option<R> {
        self.routes
            .iter()
            .find(|&&(ref regex, _)| regex.is_match(path))
            .map(|&(_, ref f)| f())
    }
}

/// List of all routes of the app
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Healthcheck,
    Coupons,
    CouponsApply,
    CouponsCreate,
}

impl Route {
    /// The only method the route is served with
    pub fn method(&self) -> Method {
        match *self {
            Route::Healthcheck | Route::Coupons => Method::Get,
            Route::CouponsApply | Route::CouponsCreate => Method::Post,
        }
    }

    /// Coupons routes are available to admins only
    pub fn requires_admin(&self) -> bool {
        match *self {
            Route::Healthcheck => false,
            Route::Coupons | Route::CouponsApply | Route::CouponsCreate => true,
        }
    }
}

pub fn create_route_parser() -> RouteParser<Route> {
    let mut router = RouteParser::default();

    // Healthcheck
    router.add_route(r"^/api/v1/health$", || Route::Healthcheck);

    // Coupons routes
    router.add_route(r"^/api/v1/coupons/?$", || Route::Coupons);
    router.add_route(r"^/api/v1/coupons/apply$", || Route::CouponsApply);
    router.add_route(r"^/api/v1/coupons/create$", || Route::CouponsCreate);

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes() {
        let router = create_route_parser();
        assert_eq!(router.test("/api/v1/health"), Some(Route::Healthcheck));
        assert_eq!(router.test("/api/v1/coupons"), Some(Route::Coupons));
        assert_eq!(router.test("/api/v1/coupons/"), Some(Route::Coupons));
        assert_eq!(router.test("/api/v1/coupons/apply"), Some(Route::CouponsApply));
        assert_eq!(router.test("/api/v1/coupons/create"), Some(Route::CouponsCreate));
    }

    #[test]
    fn test_unknown_routes() {
        let router = create_route_parser();
        assert_eq!(router.test("/"), None);
        assert_eq!(router.test("/api/v1/healthcheck"), None);
        assert_eq!(router.test("/api/v1/coupons/delete"), None);
        assert_eq!(router.test("/api/v2/coupons"), None);
    }

    #[test]
    fn test_route_access() {
        assert!(!Route::Healthcheck.requires_admin());
        assert!(Route::CouponsApply.requires_admin());
        assert_eq!(Route::Coupons.method(), Method::Get);
        assert_eq!(Route::CouponsCreate.method(), Method::Post);
    }
}
