use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Could not open input CSV at [{path}]: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Could not parse input CSV at [{path}]: {source}")]
    Parse {
        path: String,
        #[source]
        source: csv::Error
    }
}

impl ReadError {
    pub fn open(path: &Path, source: io::Error) -> Self {
        Self::Open { path: path.display().to_string(), source }
    }

    pub fn parse(path: &Path, source: csv::Error) -> Self {
        Self::Parse { path: path.display().to_string(), source }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Could not create output CSV at [{path}]: {source}")]
    Create {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Could not write output CSV at [{path}]: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error
    }
}

impl WriteError {
    pub fn create(path: &Path, source: io::Error) -> Self {
        Self::Create { path: path.display().to_string(), source }
    }

    pub fn write(path: &Path, source: csv::Error) -> Self {
        Self::Write { path: path.display().to_string(), source }
    }
}
