//! Background reprocessing when the dataset source changes

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::ProcessingService;
use crate::domain::ingestion::DatasetSource;
use crate::domain::DomainError;

/// Polls the source fingerprint and runs the pipeline once per new version
///
/// Runs are serial: a tick never starts while the previous run is active.
#[derive(Debug)]
pub struct SourcePoller {
    source: Arc<dyn DatasetSource>,
    service: Arc<ProcessingService>,
    interval: Duration,
    last_fingerprint: Option<String>,
}

impl SourcePoller {
    pub fn new(
        source: Arc<dyn DatasetSource>,
        service: Arc<ProcessingService>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            service,
            interval,
            last_fingerprint: None,
        }
    }

    /// Treats the current source version as already processed
    pub async fn mark_current(&mut self) -> Result<(), DomainError> {
        self.last_fingerprint = Some(self.source.fingerprint().await?);
        Ok(())
    }

    /// Processes the source if its fingerprint changed; returns whether a run happened
    ///
    /// A run rejected for its content (schema or integrity) records the
    /// fingerprint, so only a changed file is retried. Any other failure
    /// leaves it unrecorded and the next tick retries.
    pub async fn poll_once(&mut self) -> Result<bool, DomainError> {
        let fingerprint = self.source.fingerprint().await?;

        if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            return Ok(false);
        }

        info!(fingerprint = %fingerprint, "Dataset source changed - processing");
        match self.service.process_source(self.source.as_ref()).await {
            Ok(_) => {
                self.last_fingerprint = Some(fingerprint);
                Ok(true)
            }
            Err(e @ (DomainError::Schema { .. } | DomainError::DataIntegrity { .. })) => {
                warn!(fingerprint = %fingerprint, "Dataset rejected; waiting for a new version");
                self.last_fingerprint = Some(fingerprint);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Spawns the polling loop on the runtime
    pub fn spawn(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            info!(interval_secs = self.interval.as_secs(), "Source poller started");

            loop {
                ticker.tick().await;

                match self.poll_once().await {
                    Ok(_) => {}
                    Err(e @ DomainError::StorageUnavailable { .. }) => {
                        warn!(error = %e, "Dataset source unavailable");
                    }
                    Err(e) => error!(error = %e, "Background processing failed"),
                }
            }
        })
    }
}
