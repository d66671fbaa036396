use thiserror::Error;

pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid overlay frame: width={width}, height={height}")]
    InvalidFrame { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
