#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("UUID error: {0}")]
    Uuid(#[from] mbid_uuid::UuidError),
    #[error("conversion error: {0}")]
    Radix(#[from] mbid_radix::RadixError),
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
    #[error("could not detect the encoding of '{0}'")]
    UndetectedEncoding(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
