use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid query parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid year: must be 1994 or greater")]
    InvalidYear,

    #[error("Invalid quarter: must be between 1 and 4")]
    InvalidQuarter,

    #[error("Invalid month: must be between 1 and 12")]
    InvalidMonth,

    #[error("Invalid day: must be between 1 and 31")]
    InvalidDay,

    #[error("XML parsing error: {0}")]
    XmlError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(feature = "feeds")]
impl From<quick_xml::DeError> for EdgarError {
    fn from(error: quick_xml::DeError) -> Self {
        EdgarError::XmlError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EdgarError>;
