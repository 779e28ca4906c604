use thiserror::Error;

/// Errors from the SmugMug API client, including data-validation failures
/// found while converting wire records into domain types.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API call {method} failed: {message} (code {code})")]
    Response {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Unexpected HTTP status {status} from {method}")]
    HttpStatus { method: String, status: u16 },

    #[error("Image {image_id} in album {album} has no filename")]
    MissingFilename { album: String, image_id: u64 },

    #[error("Unknown image format {format:?} for image {image_id} in album {album}")]
    UnknownFormat {
        album: String,
        image_id: u64,
        format: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
