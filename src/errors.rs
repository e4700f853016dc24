use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP status {code} from {url}")]
    HttpStatus { code: u16, url: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;

impl From<chrono::ParseError> for BoardError {
    fn from(e: chrono::ParseError) -> Self {
        BoardError::DateError(e.to_string())
    }
}
