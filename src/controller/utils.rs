use failure::Error as FailureError;
use futures::{Future, Stream};
use hyper::Body;
use serde::de::DeserializeOwned;
use serde_json;

use errors::Error;

/// Reads the whole body and deserializes it from json
pub fn parse_body<T>(body: Body) -> Box<Future<Item = T, Error = FailureError>>
where
    T: DeserializeOwned + 'static,
{
    Box::new(
        body.concat2()
            .map_err(|e| -> FailureError { format_err!("Failed to read request body: {}", e).context(Error::Parse).into() })
            .and_then(|chunk| {
                serde_json::from_slice::<T>(&chunk)
                    .map_err(|e| -> FailureError { format_err!("Invalid request format: {}", e).context(Error::Parse).into() })
            }),
    )
}
