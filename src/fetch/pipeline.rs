use crate::error::{RefugeError, Result};
use crate::fetch::client::{preview, Page, RefugeClient};
use crate::fetch::retry::{retry_with_policy, IsRetryable, RetryOutcome, RetryPolicy};
use crate::models::Record;
use crate::settings::FetchSettings;
use crate::utils::progress::ProgressReporter;
use crate::writers::RecordSink;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use validator::Validate;

/// Why the page loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// An empty page marked the end of the listing
    EndOfListing,
    RetriesExhausted {
        page: u32,
        attempts: u32,
    },
    UnexpectedShape {
        page: u32,
    },
    Failed {
        message: String,
    },
}

/// What happened to the accumulated records
#[derive(Debug, Clone)]
pub enum Persisted {
    Written(usize),
    NothingToSave,
    /// The sink rejected the records; the error is kept for the caller
    Failed(Arc<RefugeError>),
}

#[derive(Debug, Clone)]
pub struct FetchReport {
    pub pages_fetched: u32,
    pub records_fetched: usize,
    pub stop_reason: StopReason,
    pub persisted: Persisted,
}

impl FetchReport {
    /// True when the whole listing was read
    pub fn is_complete(&self) -> bool {
        self.stop_reason == StopReason::EndOfListing
    }

    pub fn summary(&self) -> String {
        let stop = match &self.stop_reason {
            StopReason::EndOfListing => "end of listing reached".to_string(),
            StopReason::RetriesExhausted { page, attempts } => {
                format!("page {} failed after {} attempts", page, attempts)
            }
            StopReason::UnexpectedShape { page } => {
                format!("page {} was not a list of records", page)
            }
            StopReason::Failed { message } => format!("stopped by error: {}", message),
        };

        let saved = match &self.persisted {
            Persisted::Written(rows) => format!("{} rows written", rows),
            Persisted::NothingToSave => "nothing written".to_string(),
            Persisted::Failed(e) => format!("write failed: {}", e),
        };

        format!(
            "Pages: {}\nRecords: {}\nStatus: {}\nOutput: {}",
            self.pages_fetched, self.records_fetched, stop, saved
        )
    }
}

/// Sequential page-by-page download that always saves what it has
pub struct FetchPipeline {
    client: RefugeClient,
    policy: RetryPolicy,
    page_delay: Duration,
}

impl FetchPipeline {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            client: RefugeClient::new(settings)?,
            policy: RetryPolicy::from_settings(settings),
            page_delay: settings.page_delay(),
        })
    }

    /// Fetch the whole listing and persist it to `sink`
    ///
    /// Never fails: every stop condition, including unexpected errors,
    /// ends with a single persist of the records gathered so far.
    pub async fn run<S>(&self, sink: &mut S, progress: Option<&ProgressReporter>) -> FetchReport
    where
        S: RecordSink + ?Sized,
    {
        let mut accumulated = Vec::new();
        let mut pages_fetched = 0;

        let stop_reason = match self
            .collect(&mut accumulated, &mut pages_fetched, progress)
            .await
        {
            Ok(reason) => reason,
            Err(e) => {
                error!(error = %e, "An error occurred while fetching");
                StopReason::Failed {
                    message: e.to_string(),
                }
            }
        };

        let persisted = if accumulated.is_empty() {
            warn!("No records were fetched, nothing to save");
            Persisted::NothingToSave
        } else {
            if stop_reason != StopReason::EndOfListing {
                warn!(records = accumulated.len(), "Saving partial data");
            }
            match sink.persist(&accumulated) {
                Ok(rows) => {
                    info!(rows, "Saved records");
                    Persisted::Written(rows)
                }
                Err(e) => {
                    error!(error = %e, "Failed to save records");
                    Persisted::Failed(Arc::new(e))
                }
            }
        };

        FetchReport {
            pages_fetched,
            records_fetched: accumulated.len(),
            stop_reason,
            persisted,
        }
    }

    async fn collect(
        &self,
        accumulated: &mut Vec<Record>,
        pages_fetched: &mut u32,
        progress: Option<&ProgressReporter>,
    ) -> Result<StopReason> {
        let client = &self.client;
        let max_attempts = self.policy.max_attempts;
        let mut page = 1;

        loop {
            let outcome = retry_with_policy(
                &self.policy,
                |e: &RefugeError| e.is_retryable(),
                move |attempt| {
                    info!(page, attempt, max_attempts, "Fetching page");
                    client.fetch_page_body(page)
                },
            )
            .await;

            let body = match outcome {
                RetryOutcome::Success(body) => body,
                RetryOutcome::Exhausted {
                    attempts,
                    last_error,
                } => {
                    error!(
                        page,
                        attempts,
                        timed_out = last_error.is_timeout(),
                        error = %last_error,
                        "Max retries reached, saving current data"
                    );
                    return Ok(StopReason::RetriesExhausted { page, attempts });
                }
                RetryOutcome::Aborted(e) => return Err(e),
            };

            let records = match Page::parse(&body)? {
                Page::Records(records) => records,
                Page::Unexpected(value) => {
                    error!(page, "API response is not a list of records");
                    error!("Response structure: {}", preview(&value));
                    return Ok(StopReason::UnexpectedShape { page });
                }
            };

            if records.is_empty() {
                info!(
                    page,
                    total = accumulated.len(),
                    "Empty page, end of listing reached"
                );
                return Ok(StopReason::EndOfListing);
            }

            info!(page, count = records.len(), "Fetched records");
            accumulated.extend(records);
            *pages_fetched += 1;

            if let Some(progress) = progress {
                progress.set_message(&format!(
                    "Fetched {} records ({} pages)",
                    accumulated.len(),
                    pages_fetched
                ));
            }

            tokio::time::sleep(self.page_delay).await;
            page += 1;
        }
    }
}
