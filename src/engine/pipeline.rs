use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::task::spawn_blocking;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::client::{EnhanceClient, EnhancePayload};
use crate::io::{read_transactions, write_records, CsvContents};
use crate::models::TransactionRecord;
use crate::report::RunSummary;

const DEFAULT_BATCH_SIZE: usize = 100;
const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(5);

const ENHANCED_SUFFIX: &str = "_enhanced.csv";
const UNPROCESSED_SUFFIX: &str = "_unprocessed.csv";

/// Sequential batch enhancement pipeline.
///
/// Reads the whole input file, submits fixed-size batches one at a time,
/// sorts the results into enhanced and unprocessed sets, then writes both
/// output files and the run summary. Batches never overlap; a failed batch
/// only affects its own records.
pub struct EnhancePipeline {
    client: EnhanceClient,
    batch_size: usize,
    request_delay: Duration
}

/// Everything a finished run leaves behind.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub summary: RunSummary,
    pub enhanced_path: PathBuf,
    pub unprocessed_path: PathBuf
}

impl EnhancePipeline {
    pub fn new(client: EnhanceClient) -> Self {
        Self {
            client,
            batch_size: DEFAULT_BATCH_SIZE,
            request_delay: DEFAULT_REQUEST_DELAY
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_request_delay(mut self, request_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self
    }

    /// Orchestrates the end-to-end enhancement run for one input file.
    pub async fn run(&self, input: &Path) -> anyhow::Result<PipelineOutcome> {
        let read_path = input.to_path_buf();
        let contents = spawn_blocking(move || read_transactions(&read_path)).await??;

        info!("Parsed [{}] transactions from [{}]", contents.records.len(), input.display());

        let (enhanced, unprocessed) = self.process_batches(&contents).await?;
        let summary = RunSummary::tally(contents.records.len(), &enhanced, unprocessed.len());

        let enhanced_path = output_path(input, ENHANCED_SUFFIX);
        let unprocessed_path = output_path(input, UNPROCESSED_SUFFIX);

        let enhanced_target = enhanced_path.clone();
        let unprocessed_target = unprocessed_path.clone();

        let (enhanced_write, unprocessed_write) = tokio::join!(
            spawn_blocking(move || write_records(&enhanced_target, &enhanced)),
            spawn_blocking(move || write_records(&unprocessed_target, &unprocessed))
        );

        enhanced_write??;
        unprocessed_write??;

        Ok(PipelineOutcome {
            summary,
            enhanced_path,
            unprocessed_path
        })
    }

    async fn process_batches(&self, contents: &CsvContents) -> anyhow::Result<(Vec<TransactionRecord>, Vec<TransactionRecord>)> {
        let mut enhanced = Vec::new();
        let mut unprocessed = Vec::new();
        let total_batches = contents.records.len().div_ceil(self.batch_size);

        for (index, batch) in contents.records.chunks(self.batch_size).enumerate() {
            let payload = EnhancePayload::from_batch(batch, contents.has_merchant_category_code)?;

            //NOTE: The delay runs before every request, the first included, to stay inside the service rate limit
            sleep(self.request_delay).await;

            match self.client.enhance(&payload).await {
                Ok(records) => {
                    info!("Enhanced batch [{}/{}] with [{}] transactions", index + 1, total_batches, batch.len());
                    enhanced.extend(records);
                }
                Err(error) => {
                    warn!("Failed to enhance batch [{}/{}], routing [{}] transactions to the unprocessed output: {error}", index + 1, total_batches, batch.len());
                    unprocessed.extend_from_slice(batch);
                }
            }
        }

        Ok((enhanced, unprocessed))
    }
}

/// Derives an output path next to the input file, stripping a trailing
/// `.csv` from the name before appending the suffix.
fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    let stem = name.strip_suffix(".csv").unwrap_or(&name);

    input.with_file_name(format!("{stem}{suffix}"))
}
