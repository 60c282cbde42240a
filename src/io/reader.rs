use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::Value;

use crate::io::errors::ReadError;
use crate::models::{FieldMap, TransactionRecord};

const MERCHANT_CATEGORY_CODE_FIELD: &str = "merchant_category_code";

/// The parsed input file: every row, plus the one fact about the header set
/// that payload construction needs later.
#[derive(Debug)]
pub struct CsvContents {
    pub records: Vec<TransactionRecord>,
    pub has_merchant_category_code: bool
}

/// Reads the whole input CSV into memory.
///
/// Headers are lowercased once and become the field names of every row, and
/// each row missing an `id` gets one assigned. Values pass through verbatim
/// as strings so formats like zero-padded amounts survive the round trip.
/// A row whose field count disagrees with the header is an error; partial
/// results are never returned.
pub fn read_transactions(path: &Path) -> Result<CsvContents, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::open(path, source))?;

    let mut reader = ReaderBuilder::new()
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader.headers()
        .map_err(|source| ReadError::parse(path, source))?
        .iter()
        .map(str::to_lowercase)
        .collect();

    let has_merchant_category_code = headers.iter().any(|name| name == MERCHANT_CATEGORY_CODE_FIELD);

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row.map_err(|source| ReadError::parse(path, source))?;
        let mut fields = FieldMap::new();

        for (name, value) in headers.iter().zip(row.iter()) {
            fields.insert(name.clone(), Value::String(value.to_string()));
        }

        let mut record = TransactionRecord::from_fields(fields);
        record.ensure_id();
        records.push(record);
    }

    Ok(CsvContents { records, has_merchant_category_code })
}
