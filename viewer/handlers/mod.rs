pub mod index;
pub mod genome;

use std::io::Cursor;
use tiny_http::Response;
use tracing::warn;

use iris_neat::Error;

/// Maps a library error for artifact `name` to an HTTP response.
///
/// Missing or unusable names are 404; artifacts that exist but cannot be
/// decoded or replayed are 400.
pub fn error_response(name: &str, err: &Error) -> Response<Cursor<Vec<u8>>> {
    match err {
        Error::ArtifactNotFound(_) | Error::InvalidArtifactName(_) => crate::routes::not_found(),
        _ => {
            warn!(artifact = name, error = %err, "artifact could not be replayed");
            crate::routes::bad_request(&err.to_string())
        }
    }
}
