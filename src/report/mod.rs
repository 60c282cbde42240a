mod summary;

pub use summary::RunSummary;
