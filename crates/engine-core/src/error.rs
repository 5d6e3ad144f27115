use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateStoreError {
    #[error("Sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Stored value is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("State store lock poisoned")]
    Poisoned,
}
