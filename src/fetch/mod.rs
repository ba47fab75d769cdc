pub mod client;
pub mod pipeline;
pub mod retry;

pub use client::{Page, RefugeClient};
pub use pipeline::{FetchPipeline, FetchReport, Persisted, StopReason};
pub use retry::{retry_with_policy, IsRetryable, RetryOutcome, RetryPolicy};
