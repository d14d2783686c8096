use thiserror::Error;

#[derive(Error, Debug)]
pub enum StringError {
    #[error("{0} is a null pointer")]
    NullPointer(&'static str),

    #[error("invalid UTF-8 sequence")]
    NonUTF8(#[from] std::str::Utf8Error),

    #[error("string contains a null byte")]
    StringContainsNull(#[from] std::ffi::NulError),
}

#[derive(Error, Debug)]
pub enum EnvironmentCallError {
    #[error("invalid string")]
    StringError(#[from] StringError),

    #[error("{0} is a null pointer")]
    NullPointer(&'static str),

    #[error("callback returned `false`")]
    Failure,

    #[error("unsupported: {0}")]
    Unsupported(String),
}
