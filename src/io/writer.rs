use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use serde_json::Value;

use crate::io::errors::WriteError;
use crate::models::TransactionRecord;

/// Writes records to a CSV file, deriving the header row from the first
/// record's field order.
///
/// Later records are aligned to that header set: absent fields become empty
/// cells and fields the first record lacked are dropped. An empty record set
/// still creates the file, so a completed run always leaves both outputs
/// behind.
pub fn write_records(path: &Path, records: &[TransactionRecord]) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|source| WriteError::create(path, source))?;
    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));

    let Some(first) = records.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.field_names().collect();

    writer.write_record(&headers)
        .map_err(|source| WriteError::write(path, source))?;

    for record in records {
        let row: Vec<String> = headers.iter()
            .map(|&name| cell_value(record.get(name)))
            .collect();

        writer.write_record(&row)
            .map_err(|source| WriteError::write(path, source))?;
    }

    writer.flush()
        .map_err(|source| WriteError::write(path, source.into()))?;

    Ok(())
}

fn cell_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string()
    }
}
