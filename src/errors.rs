//! Error kinds shared by all layers.
//!
//! Layers return `failure::Error`. A kind is attached as context
//! (`format_err!("empty coupon code").context(Error::InvalidInput)`) and
//! survives any further string context added on the way up.

use failure::{Context, Error as FailureError, Fail};
use hyper::StatusCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Fail)]
pub enum Error {
    #[fail(display = "Invalid input")]
    InvalidInput,
    #[fail(display = "Not found")]
    NotFound,
    #[fail(display = "Storage error")]
    Storage,
    #[fail(display = "Parse error")]
    Parse,
    #[fail(display = "Unauthorized")]
    Unauthorized,
    #[fail(display = "Forbidden")]
    Forbidden,
    #[fail(display = "Too many requests")]
    TooManyRequests,
    #[fail(display = "Route not found")]
    RouteNotFound,
}

pub trait Codeable {
    fn code(&self) -> StatusCode;
}

impl Codeable for Error {
    fn code(&self) -> StatusCode {
        match *self {
            Error::InvalidInput | Error::NotFound | Error::Storage | Error::Parse => StatusCode::BadRequest,
            Error::Unauthorized => StatusCode::Unauthorized,
            Error::Forbidden => StatusCode::Forbidden,
            Error::TooManyRequests => StatusCode::TooManyRequests,
            Error::RouteNotFound => StatusCode::NotFound,
        }
    }
}

/// Body of every error response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorMessage {
    pub code: u16,
    pub error: String,
}

fn as_kind(fail: &Fail) -> Option<Error> {
    fail.downcast_ref::<Context<Error>>()
        .map(|ctx| *ctx.get_context())
        .or_else(|| fail.downcast_ref::<Error>().cloned())
}

/// Outermost error kind in the chain, `None` for untagged errors
pub fn kind_of(err: &FailureError) -> Option<Error> {
    err.iter_chain().filter_map(as_kind).next()
}

/// Human readable description: every cause except the kind markers, outermost first
pub fn describe(err: &FailureError) -> String {
    let parts = err
        .iter_chain()
        .filter(|fail| as_kind(*fail).is_none())
        .map(|fail| fail.to_string())
        .collect::<Vec<String>>();

    if parts.is_empty() {
        kind_of(err).map(|kind| kind.to_string()).unwrap_or_default()
    } else {
        parts.join(": ")
    }
}

/// Converts an error to the status and body sent back to the client
pub fn into_http_error(err: &FailureError) -> (StatusCode, ErrorMessage) {
    match kind_of(err) {
        Some(kind) => {
            let code = kind.code();
            (
                code,
                ErrorMessage {
                    code: code.as_u16(),
                    error: describe(err),
                },
            )
        }
        None => {
            error!("Unhandled error: {}", describe(err));
            (
                StatusCode::InternalServerError,
                ErrorMessage {
                    code: StatusCode::InternalServerError.as_u16(),
                    error: "Internal server error".to_string(),
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_survives_string_context() {
        let err: FailureError = format_err!("coupon not found").context(Error::NotFound).into();
        let err: FailureError = err.context("error finding coupon WINTER").into();

        assert_eq!(kind_of(&err), Some(Error::NotFound));
        assert_eq!(describe(&err), "error finding coupon WINTER: coupon not found");
    }

    #[test]
    fn test_bare_kind() {
        let err: FailureError = Error::Unauthorized.into();
        assert_eq!(kind_of(&err), Some(Error::Unauthorized));
        assert_eq!(describe(&err), "Unauthorized");
    }

    #[test]
    fn test_untagged_error_is_internal() {
        let err = format_err!("boom");
        let (code, message) = into_http_error(&err);
        assert_eq!(code, StatusCode::InternalServerError);
        assert_eq!(message.error, "Internal server error");
    }

    #[test]
    fn test_service_errors_are_bad_request() {
        let err: FailureError = format_err!("invalid basket value").context(Error::InvalidInput).into();
        let (code, message) = into_http_error(&err);
        assert_eq!(code, StatusCode::BadRequest);
        assert_eq!(message.code, 400);
        assert_eq!(message.error, "invalid basket value");
    }
}
