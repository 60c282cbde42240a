use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("MX_DEV_CREDS environment variable is not set")]
    Missing,
    #[error("MX_DEV_CREDS holds a value that cannot be sent as a header: {0}")]
    Invalid(#[from] InvalidHeaderValue)
}

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Could not reach the enhancement service: {0}")]
    Transport(reqwest::Error),
    #[error("Enhancement service responded with status [{status}]")]
    UnexpectedStatus {
        status: StatusCode
    },
    #[error("Could not parse the enhancement service response: {0}")]
    MalformedResponse(reqwest::Error)
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Transaction [{id}] has no type value and cannot be submitted")]
    MissingTransactionType {
        id: String
    }
}
