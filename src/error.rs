use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("content is empty")]
    EmptyInput,

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported history document version: {0}")]
    UnsupportedVersion(u32),

    #[error("history entry not found: {0}")]
    EntryNotFound(i64),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("unknown color preset: {0}")]
    UnknownPreset(String),
}
