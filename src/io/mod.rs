mod errors;
mod reader;
#[cfg(test)]
mod tests;
mod writer;

pub use errors::{ReadError, WriteError};
pub use reader::{read_transactions, CsvContents};
pub use writer::write_records;
