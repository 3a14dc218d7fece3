//! Http entry point: preflight, rate limiting and turning controller results into responses
use std::str;

use failure::Error as FailureError;
use futures::future;
use futures::Future;
use hyper;
use hyper::header::{ContentLength, ContentType, Headers};
use hyper::server::{Request, Response, Service};
use hyper::{Method, StatusCode};
use serde_json;

use config::Cors;
use controller::context::StaticContext;
use controller::ControllerImpl;
use errors::{describe, into_http_error, Error};
use repos::repo_factory::ReposFactory;

/// Length of a rate limit window
pub const RATE_LIMIT_WINDOW_SEC: u64 = 1;

pub struct Application<F: ReposFactory> {
    pub controller: ControllerImpl<F>,
}

impl<F: ReposFactory> Application<F> {
    pub fn new(static_context: StaticContext<F>) -> Self {
        Self {
            controller: ControllerImpl::new(static_context),
        }
    }

    /// Counts the request for `client` and fails once the limit for the current window is exceeded.
    /// Counter failures let the request through.
    fn check_rate_limit(&self, client: String) -> Box<Future<Item = (), Error = FailureError>> {
        let context = &self.controller.static_context;
        if !context.config.rate_limit.enabled {
            return Box::new(future::ok::<(), FailureError>(()));
        }

        let per_second = context.config.rate_limit.per_second;
        let repo_factory = context.repo_factory.clone();

        Box::new(context.cpu_pool.spawn_fn(move || -> Result<(), FailureError> {
            let count = match repo_factory.create_rate_limits_repo().hit(&client, RATE_LIMIT_WINDOW_SEC) {
                Ok(count) => count,
                Err(e) => {
                    warn!("Rate limit check failed for {}, request let through: {}", client, describe(&e));
                    return Ok(());
                }
            };

            if count > per_second {
                warn!("Client {} exceeded rate limit: {} requests.", client, count);
                return Err(format_err!("Too many requests. Try again in {}s", RATE_LIMIT_WINDOW_SEC)
                    .context(Error::TooManyRequests)
                    .into());
            }

            Ok(())
        }))
    }
}

/// Cross-origin headers. A single wildcard origin allows everyone,
/// otherwise the request origin is echoed back when it is on the list.
pub fn cors_headers(cors: &Cors, origin: Option<&str>) -> Headers {
    let mut headers = Headers::new();

    let allowed_origin = if cors.allowed_origins.iter().any(|o| o == "*") {
        Some("*".to_string())
    } else {
        origin
            .filter(|origin| cors.allowed_origins.iter().any(|o| o == origin))
            .map(|origin| origin.to_string())
    };

    if let Some(allowed_origin) = allowed_origin {
        headers.set_raw("Access-Control-Allow-Origin", allowed_origin);
    }
    headers.set_raw("Access-Control-Allow-Methods", cors.allowed_methods.join(", "));
    headers.set_raw("Access-Control-Allow-Headers", "Content-Type, Authorization");

    headers
}

fn json_response(code: StatusCode, body: String, cors: &Headers) -> Response {
    let mut response = Response::new()
        .with_status(code)
        .with_header(ContentType::json())
        .with_header(ContentLength(body.len() as u64))
        .with_body(body);
    response.headers_mut().extend(cors.iter());
    response
}

impl<F: ReposFactory> Service for Application<F> {
    type Request = Request;
    type Response = Response;
    type Error = hyper::Error;
    type Future = Box<Future<Item = Response, Error = hyper::Error>>;

    fn call(&self, req: Request) -> Self::Future {
        let origin = req
            .headers()
            .get_raw("Origin")
            .and_then(|raw| raw.one())
            .and_then(|bytes| str::from_utf8(bytes).ok())
            .map(|origin| origin.to_string());
        let cors = cors_headers(&self.controller.static_context.config.cors, origin.as_ref().map(|o| o.as_str()));

        if *req.method() == Method::Options {
            let mut response = Response::new().with_status(StatusCode::NoContent);
            response.headers_mut().extend(cors.iter());
            return Box::new(future::ok::<Response, hyper::Error>(response));
        }

        let method = req.method().clone();
        let path = req.path().to_string();
        let client = req
            .remote_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        debug!("Received request {} {} from {}.", method, path, client);

        let controller = self.controller.clone();
        let work = self.check_rate_limit(client).and_then(move |_| controller.call(req));

        Box::new(work.then(move |result| {
            let response = match result {
                Ok(body) => {
                    info!("{} {} - {}", method, path, StatusCode::Ok);
                    json_response(StatusCode::Ok, body, &cors)
                }
                Err(err) => {
                    let (code, message) = into_http_error(&err);
                    info!("{} {} - {}: {}", method, path, code, message.error);
                    let body = serde_json::to_string(&message)
                        .unwrap_or_else(|_| r#"{"code":500,"error":"Internal server error"}"#.to_string());
                    json_response(code, body, &cors)
                }
            };
            Ok::<Response, hyper::Error>(response)
        }))
    }
}
