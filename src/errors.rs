use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebtError {
    #[error("invalid amount for {field}: {value}")]
    InvalidAmount {
        field: &'static str,
        value: String,
    },

    #[error("invalid rate: {value}")]
    InvalidRate {
        value: String,
    },

    #[error("invalid date for {field}: {value}")]
    InvalidDate {
        field: &'static str,
        value: String,
    },

    #[error("unknown interest type: {value}")]
    UnknownInterestType {
        value: String,
    },

    #[error("interest unavailable: {message}")]
    InterestUnavailable {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DebtError>;
