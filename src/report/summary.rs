use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::TransactionRecord;

const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Counts derived from a completed run, rendered as the console summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub processed: usize,
    pub unprocessed: usize,
    pub categorized: usize,
    pub with_merchant_guid: usize,
    pub with_merchant_location_guid: usize
}

impl RunSummary {
    /// Derives the summary from the final record sets.
    ///
    /// `total` is the input row count while `processed` comes from what the
    /// service actually returned, so the two can disagree when the service
    /// responds with a different number of records than were submitted.
    pub fn tally(total: usize, enhanced: &[TransactionRecord], unprocessed: usize) -> Self {
        let categorized = enhanced.iter()
            .filter(|record| {
                record.str_field("category")
                    .is_some_and(|category| !category.is_empty() && category != DEFAULT_CATEGORY)
            })
            .count();

        Self {
            total,
            processed: enhanced.len(),
            unprocessed,
            categorized,
            with_merchant_guid: count_non_empty(enhanced, "merchant_guid"),
            with_merchant_location_guid: count_non_empty(enhanced, "merchant_location_guid")
        }
    }

    fn percentage(&self, count: usize) -> f64 {
        count as f64 / self.processed as f64 * 100.0
    }
}

impl Display for RunSummary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Total transactions: {}", self.total)?;
        write!(formatter, "\nTotal processed transactions: {}", self.processed)?;
        write!(formatter, "\nTotal unprocessed transactions: {}", self.unprocessed)?;

        //NOTE: With nothing processed the percentages would divide by zero, so the lines are dropped entirely
        if self.processed > 0 {
            write!(
                formatter,
                "\nPercentage of processed transactions with a category other than 'Uncategorized': {:.2}%",
                self.percentage(self.categorized)
            )?;
            write!(
                formatter,
                "\nPercentage of processed transactions with a merchant_guid: {:.2}%",
                self.percentage(self.with_merchant_guid)
            )?;
            write!(
                formatter,
                "\nPercentage of processed transactions with a merchant_location_guid: {:.2}%",
                self.percentage(self.with_merchant_location_guid)
            )?;
        }

        Ok(())
    }
}

fn count_non_empty(records: &[TransactionRecord], field: &str) -> usize {
    records.iter()
        .filter(|record| record.str_field(field).is_some_and(|value| !value.is_empty()))
        .count()
}
