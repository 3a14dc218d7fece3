//! `Controller` is a top layer that handles all http-related
//! stuff like reading bodies, parsing params, forming a response.
//! Basically it provides inputs to `Service` layer and converts outputs
//! of `Service` layer to http responses

pub mod application;
pub mod auth;
pub mod context;
pub mod routes;
pub mod types;
pub mod utils;

use failure::Error as FailureError;
use futures::future;
use futures::Future;
use hyper::server::Request;
use serde_json;

use self::context::{DynamicContext, StaticContext};
use self::routes::Route;
use self::types::ControllerFuture;
use self::utils::parse_body;
use errors::Error;
use models::*;
use repos::repo_factory::ReposFactory;
use services::*;

macro_rules! serialize_future {
    ($e:expr) => {
        Box::new($e.and_then(|resp| serde_json::to_string(&resp).map_err(FailureError::from)))
    };
}

/// Controller handles route parsing and calling `Service` layer
pub struct ControllerImpl<F: ReposFactory> {
    pub static_context: StaticContext<F>,
}

impl<F: ReposFactory> Clone for ControllerImpl<F> {
    fn clone(&self) -> Self {
        Self {
            static_context: self.static_context.clone(),
        }
    }
}

impl<F: ReposFactory> ControllerImpl<F> {
    /// Create a new controller based on services
    pub fn new(static_context: StaticContext<F>) -> Self {
        Self { static_context }
    }

    /// Handle a request and get future response
    pub fn call(&self, req: Request) -> ControllerFuture {
        let route = match self.static_context.route_parser.test(req.path()) {
            Some(route) if route.method() == *req.method() => route,
            _ => {
                let err: FailureError = format_err!("No route for {} {}", req.method(), req.path())
                    .context(Error::RouteNotFound)
                    .into();
                return Box::new(future::err(err));
            }
        };

        let user_id = if route.requires_admin() {
            match auth::authorize_admin(req.headers(), &self.static_context.config.auth.jwt_secret) {
                Ok(claims) => Some(claims.user_id),
                Err(err) => return Box::new(future::err(err)),
            }
        } else {
            None
        };

        let dynamic_context = DynamicContext::new(user_id);
        let service = Service::new(self.static_context.clone(), dynamic_context);

        match route {
            // GET /api/v1/health
            Route::Healthcheck => serialize_future!(service.healthcheck()),

            // POST /api/v1/coupons/apply
            Route::CouponsApply => serialize_future!(
                parse_body::<ApplyCouponPayload>(req.body())
                    .and_then(move |payload| service.apply_coupon(payload.basket, payload.code))
            ),

            // POST /api/v1/coupons/create
            Route::CouponsCreate => serialize_future!(parse_body::<NewCouponPayload>(req.body()).and_then(move |payload| {
                service
                    .create_coupon(payload.discount, payload.code, payload.min_basket_value)
                    .map(|_| SuccessMessage::new("Coupon created successfully"))
            })),

            // GET /api/v1/coupons
            Route::Coupons => serialize_future!(
                parse_body::<CouponsSearchCodesPayload>(req.body()).and_then(move |payload| service.get_coupons(payload.codes))
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures_cpupool::CpuPool;
    use hyper::header::Authorization;
    use hyper::{Method, Uri};

    use super::*;
    use config::Config;
    use errors::{describe, kind_of};
    use repos::repo_factory::tests::*;

    fn create_controller() -> ControllerImpl<ReposFactoryMock> {
        let config = Config::new().unwrap();
        let static_context = StaticContext::new(CpuPool::new(1), Arc::new(config), ReposFactoryMock::default());
        ControllerImpl::new(static_context)
    }

    fn admin_request(method: Method, path: &str, body: &str) -> Request {
        let controller = create_controller();
        let config = &controller.static_context.config;
        let token = auth::generate_token(MOCK_USER_ID, ADMIN_ROLE, &config.auth.jwt_secret, 60).unwrap();

        let mut req = Request::new(method, path.parse::<Uri>().unwrap());
        req.headers_mut().set(Authorization(format!("Bearer {}", token)));
        req.set_body(body.to_string());
        req
    }

    #[test]
    fn test_healthcheck() {
        let controller = create_controller();
        let req = Request::new(Method::Get, "/api/v1/health".parse::<Uri>().unwrap());
        assert_eq!(controller.call(req).wait().unwrap(), r#"{"status":true}"#);
    }

    #[test]
    fn test_wrong_method_is_not_found() {
        let controller = create_controller();
        let req = Request::new(Method::Post, "/api/v1/health".parse::<Uri>().unwrap());
        let err = controller.call(req).wait().unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::RouteNotFound));
    }

    #[test]
    fn test_coupons_require_token() {
        let controller = create_controller();
        let req = Request::new(Method::Get, "/api/v1/coupons".parse::<Uri>().unwrap());
        let err = controller.call(req).wait().unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::Unauthorized));
    }

    #[test]
    fn test_apply_coupon() {
        let controller = create_controller();
        let req = admin_request(
            Method::Post,
            "/api/v1/coupons/apply",
            r#"{"basket": {"value": 100}, "code": "SUMMER2024"}"#,
        );
        let body = controller.call(req).wait().unwrap();
        let basket = serde_json::from_str::<Basket>(&body).unwrap();
        assert_eq!(basket.applied_discount, MOCK_COUPON_DISCOUNT);
        assert!(basket.application_successful);
    }

    #[test]
    fn test_create_coupon_message() {
        let controller = create_controller();
        let req = admin_request(
            Method::Post,
            "/api/v1/coupons/create",
            r#"{"code": "NEW10", "discount": 10, "minBasketValue": 20}"#,
        );
        let body = controller.call(req).wait().unwrap();
        assert_eq!(body, r#"{"message":"Coupon created successfully"}"#);
    }

    #[test]
    fn test_apply_without_code_is_empty_code() {
        let controller = create_controller();
        let req = admin_request(Method::Post, "/api/v1/coupons/apply", r#"{"basket": {"value": 100}}"#);
        let err = controller.call(req).wait().unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::InvalidInput));
        assert_eq!(describe(&err), "empty coupon code");
    }

    #[test]
    fn test_apply_without_value_looks_up_first() {
        let controller = create_controller();
        let req = admin_request(
            Method::Post,
            "/api/v1/coupons/apply",
            r#"{"code": "SUMMER2024", "basket": {}}"#,
        );
        let err = controller.call(req).wait().unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::InvalidInput));
        assert_eq!(describe(&err), "invalid basket value");

        let req = admin_request(Method::Post, "/api/v1/coupons/apply", r#"{"code": "INVALID", "basket": {}}"#);
        let err = controller.call(req).wait().unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::NotFound));
    }

    #[test]
    fn test_get_coupons_without_codes() {
        let controller = create_controller();
        for body in &["{}", r#"{"codes": null}"#] {
            let req = admin_request(Method::Get, "/api/v1/coupons", body);
            assert_eq!(controller.call(req).wait().unwrap(), "[]");
        }
    }

    #[test]
    fn test_malformed_body() {
        let controller = create_controller();
        let req = admin_request(Method::Post, "/api/v1/coupons/create", r#"{"code": 1}"#);
        let err = controller.call(req).wait().unwrap_err();
        assert_eq!(kind_of(&err), Some(Error::Parse));
    }
}
