use super::{read_transactions, write_records, ReadError, WriteError};

use std::fs;
use std::io::Write;

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tempfile::{tempdir, NamedTempFile};
use uuid::Uuid;

use crate::models::{FieldMap, TransactionRecord};

fn create_input_csv(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;

    Ok(file)
}

fn create_record(fields: &[(&str, &str)]) -> TransactionRecord {
    let mut map = FieldMap::new();

    for (name, value) in fields {
        map.insert((*name).to_string(), Value::String((*value).to_string()));
    }

    TransactionRecord::from_fields(map)
}

#[test]
fn test_reader_lowercases_headers_and_keeps_values_verbatim() -> Result<()> {
    let file = create_input_csv("ID,Amount,Description,Type\ntx-1,001.50, Coffee Shop ,debit\n")?;

    let contents = read_transactions(file.path())?;

    assert_eq!(contents.records.len(), 1);

    let record = &contents.records[0];
    let names: Vec<&str> = record.field_names().collect();

    assert_eq!(names, vec!["id", "amount", "description", "type"]);
    assert_eq!(record.str_field("amount"), Some("001.50"));
    assert_eq!(record.str_field("description"), Some(" Coffee Shop "));

    Ok(())
}

#[test]
fn test_reader_detects_merchant_category_code_column() -> Result<()> {
    let with_column = create_input_csv("id,type,Merchant_Category_Code\ntx-1,debit,5812\n")?;
    let without_column = create_input_csv("id,type\ntx-1,debit\n")?;

    assert!(read_transactions(with_column.path())?.has_merchant_category_code);
    assert!(!read_transactions(without_column.path())?.has_merchant_category_code);

    Ok(())
}

#[test]
fn test_reader_assigns_unique_ids_when_column_is_missing() -> Result<()> {
    let file = create_input_csv("amount,type\n1.00,debit\n2.00,credit\n")?;

    let contents = read_transactions(file.path())?;

    let first = contents.records[0].id().ok_or_else(|| anyhow!("first id missing"))?;
    let second = contents.records[1].id().ok_or_else(|| anyhow!("second id missing"))?;

    Uuid::parse_str(first)?;
    Uuid::parse_str(second)?;
    assert_ne!(first, second);

    let names: Vec<&str> = contents.records[0].field_names().collect();
    assert_eq!(names, vec!["amount", "type", "id"]);

    Ok(())
}

#[test]
fn test_reader_preserves_existing_ids_and_fills_empty_ones() -> Result<()> {
    let file = create_input_csv("id,type\ntx-1,debit\n,credit\n")?;

    let contents = read_transactions(file.path())?;

    assert_eq!(contents.records[0].id(), Some("tx-1"));

    let generated = contents.records[1].id().ok_or_else(|| anyhow!("generated id missing"))?;
    Uuid::parse_str(generated)?;

    Ok(())
}

#[test]
fn test_reader_handles_header_only_file() -> Result<()> {
    let file = create_input_csv("id,type,merchant_category_code\n")?;

    let contents = read_transactions(file.path())?;

    assert!(contents.records.is_empty());
    assert!(contents.has_merchant_category_code);

    Ok(())
}

#[test]
fn test_reader_rejects_row_with_wrong_field_count() -> Result<()> {
    let file = create_input_csv("id,type,amount\ntx-1,debit\n")?;

    let result = read_transactions(file.path());

    assert!(matches!(result, Err(ReadError::Parse { .. })));

    Ok(())
}

#[test]
fn test_reader_reports_missing_file_as_open_error() {
    let result = read_transactions("does_not_exist.csv".as_ref());

    assert!(matches!(result, Err(ReadError::Open { .. })));
}

#[test]
fn test_writer_emits_headers_from_first_record_in_field_order() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("output.csv");

    let records = vec![
        create_record(&[("id", "tx-1"), ("description", "Coffee"), ("category", "Food")]),
        create_record(&[("id", "tx-2"), ("description", "Bus fare"), ("category", "Travel")])
    ];

    write_records(&path, &records)?;

    let written = fs::read_to_string(&path)?;
    let mut lines = written.lines();

    assert_eq!(lines.next(), Some("id,description,category"));
    assert_eq!(lines.next(), Some("tx-1,Coffee,Food"));
    assert_eq!(lines.next(), Some("tx-2,Bus fare,Travel"));

    Ok(())
}

#[test]
fn test_writer_aligns_rows_to_the_first_record_schema() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("output.csv");

    let records = vec![
        create_record(&[("id", "tx-1"), ("category", "Food")]),
        create_record(&[("id", "tx-2"), ("merchant_guid", "MCH-123")])
    ];

    write_records(&path, &records)?;

    let written = fs::read_to_string(&path)?;
    let mut lines = written.lines();

    assert_eq!(lines.next(), Some("id,category"));
    assert_eq!(lines.next(), Some("tx-1,Food"));
    assert_eq!(lines.next(), Some("tx-2,"));

    Ok(())
}

#[test]
fn test_writer_creates_empty_file_for_empty_record_set() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("output.csv");

    write_records(&path, &[])?;

    assert_eq!(fs::metadata(&path)?.len(), 0);

    Ok(())
}

#[test]
fn test_writer_stringifies_non_string_values() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("output.csv");

    let mut fields = FieldMap::new();
    fields.insert("id".to_string(), Value::String("tx-1".to_string()));
    fields.insert("score".to_string(), json!(0.92));
    fields.insert("is_recurring".to_string(), json!(false));
    fields.insert("memo".to_string(), Value::Null);

    write_records(&path, &[TransactionRecord::from_fields(fields)])?;

    let written = fs::read_to_string(&path)?;
    let mut lines = written.lines();

    assert_eq!(lines.next(), Some("id,score,is_recurring,memo"));
    assert_eq!(lines.next(), Some("tx-1,0.92,false,"));

    Ok(())
}

#[test]
fn test_writer_quotes_values_containing_delimiters() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("output.csv");

    let records = vec![create_record(&[("id", "tx-1"), ("description", "Books, games and \"misc\"")])];

    write_records(&path, &records)?;

    let reparsed = read_transactions(&path)?;

    assert_eq!(reparsed.records[0].str_field("description"), Some("Books, games and \"misc\""));

    Ok(())
}

#[test]
fn test_writer_reports_unwritable_path_as_create_error() {
    let result = write_records(
        "missing_directory/output.csv".as_ref(),
        &[create_record(&[("id", "tx-1")])]
    );

    assert!(matches!(result, Err(WriteError::Create { .. })));
}
