mod record;

pub use record::{FieldMap, TransactionRecord};
