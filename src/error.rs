use bigdecimal::ParseBigDecimalError as BIG_DECIMAL_ERROR;
use serde_json::Error as JSON_ERROR;
use std::{
    env::VarError, io::Error as IO_ERROR, num::ParseIntError,
    str::ParseBoolError as PARSE_BOOL_ERROR,
};
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    ParseBoolError(#[from] PARSE_BOOL_ERROR),

    #[error("{0}")]
    BigDecimalError(#[from] BIG_DECIMAL_ERROR),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("Field not exists: {0}")]
    FieldNotExist(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Decode datetime: {0}")]
    DecodeDateTimeError(String),

    #[error("Parse message error: {0}")]
    ParseMessage(String),

    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error("Missing record: {0}")]
    MissingRecord(String),
}

impl Error {
    /// Non-fatal errors make the dispatcher skip the offending event and
    /// continue with the next one; everything else aborts the feed.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Error::ValidationError(_)
                | Error::ParseMessage(_)
                | Error::FieldNotExist(_)
                | Error::DecodeDateTimeError(_)
                | Error::BigDecimalError(_)
                | Error::INT(_)
        )
    }
}
