use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_DELAY_MS,
    DEFAULT_PER_PAGE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Tunables for a fetch run
///
/// The defaults reproduce the fixed pagination, retry and politeness
/// behaviour of the pipeline. Durations are stored as integers so the
/// struct maps directly onto a config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(default)]
pub struct FetchSettings {
    #[validate(url)]
    pub base_url: String,

    #[validate(range(min = 1, max = 1000))]
    pub per_page: u32,

    #[validate(range(min = 1))]
    pub max_attempts: u32,

    pub retry_delay_ms: u64,

    pub page_delay_ms: u64,

    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,

    pub output_file: PathBuf,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl FetchSettings {
    /// Load settings from a config file, falling back to defaults for absent keys
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize::<FetchSettings>()?;

        Ok(settings)
    }

    /// Defaults, optionally overlaid with a config file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
