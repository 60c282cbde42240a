use std::env;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::client::errors::{CredentialsError, EnhanceError, PayloadError};
use crate::models::TransactionRecord;

/// Production endpoint of the MX transaction enhancement API.
pub const ENHANCE_ENDPOINT: &str = "https://int-api.mx.com/transactions/enhance";

/// Environment variable holding the pre-issued API credential.
pub const CREDENTIALS_VAR: &str = "MX_DEV_CREDS";

const ACCEPT_HEADER: &str = "application/vnd.mx.api.v1+json";

/// A validated API credential, sent verbatim as the `Authorization` header.
#[derive(Debug, Clone)]
pub struct Credentials(HeaderValue);

impl Credentials {
    /// Loads the credential from `MX_DEV_CREDS`.
    ///
    /// An unset or empty variable is an error. This check runs before any
    /// file or network I/O so a misconfigured run stops without leaving
    /// partial outputs behind.
    pub fn from_env() -> Result<Self, CredentialsError> {
        match env::var(CREDENTIALS_VAR) {
            Ok(value) if !value.is_empty() => Self::new(&value),
            _ => Err(CredentialsError::Missing)
        }
    }

    /// Wraps an already-obtained credential value.
    pub fn new(value: &str) -> Result<Self, CredentialsError> {
        let mut header = HeaderValue::from_str(value)?;
        //NOTE: Marked sensitive so the credential never shows up in debug or log output
        header.set_sensitive(true);

        Ok(Self(header))
    }
}

/// HTTP client for the transaction enhancement API.
///
/// The credential and `Accept` header ride on every request as client-wide
/// defaults. One `enhance` call submits one batch.
pub struct EnhanceClient {
    http: reqwest::Client,
    endpoint: String
}

impl EnhanceClient {
    pub fn new(credentials: Credentials) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        headers.insert(AUTHORIZATION, credentials.0);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: ENHANCE_ENDPOINT.to_string()
        })
    }

    /// Points the client at a different endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Submits one batch and returns the enriched records the service sent
    /// back, in response order.
    ///
    /// A response without a `transactions` key counts as success with zero
    /// results. Transport failures, non-success statuses and unparseable
    /// bodies are all reported as errors; the caller decides what happens
    /// to the originals.
    pub async fn enhance(&self, payload: &EnhancePayload) -> Result<Vec<TransactionRecord>, EnhanceError> {
        let response = self.http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(EnhanceError::Transport)?;

        let status = response.status();

        if !status.is_success() {
            return Err(EnhanceError::UnexpectedStatus { status });
        }

        let body: EnhanceResponse = response.json()
            .await
            .map_err(EnhanceError::MalformedResponse)?;

        Ok(body.transactions.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct EnhanceResponse {
    #[serde(default)]
    transactions: Option<Vec<TransactionRecord>>
}

/// Request body for one enhancement call.
#[derive(Debug, Serialize)]
pub struct EnhancePayload {
    transactions: Vec<OutboundTransaction>
}

impl EnhancePayload {
    /// Projects a batch of records onto the request shape the service
    /// accepts.
    ///
    /// Every transaction must carry a non-empty `type`, which is submitted
    /// upper-cased. `amount` and `description` are omitted for rows that
    /// lack them, and `merchant_category_code` is forwarded only when the
    /// input file carried that column at all.
    pub fn from_batch(batch: &[TransactionRecord], include_merchant_category_code: bool) -> Result<Self, PayloadError> {
        let mut transactions = Vec::with_capacity(batch.len());

        for record in batch {
            transactions.push(OutboundTransaction::from_record(record, include_merchant_category_code)?);
        }

        Ok(Self { transactions })
    }
}

/// The projection of an input row the service accepts. Everything else from
/// the input file stays local and reappears in the outputs untouched.
#[derive(Debug, Serialize)]
struct OutboundTransaction {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "type")]
    transaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_category_code: Option<String>
}

impl OutboundTransaction {
    fn from_record(record: &TransactionRecord, include_merchant_category_code: bool) -> Result<Self, PayloadError> {
        let transaction_type = match record.str_field("type") {
            Some(value) if !value.is_empty() => value.to_uppercase(),
            _ => {
                return Err(PayloadError::MissingTransactionType {
                    id: record.id().unwrap_or("unknown").to_string()
                });
            }
        };

        let merchant_category_code = if include_merchant_category_code {
            record.str_field("merchant_category_code").map(str::to_string)
        } else {
            None
        };

        Ok(Self {
            id: record.id().unwrap_or_default().to_string(),
            amount: record.str_field("amount").map(str::to_string),
            description: record.str_field("description").map(str::to_string),
            transaction_type,
            merchant_category_code
        })
    }
}
