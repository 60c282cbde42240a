mod enhance;
mod errors;

pub use enhance::{Credentials, EnhanceClient, EnhancePayload};
pub use errors::{CredentialsError, EnhanceError, PayloadError};
