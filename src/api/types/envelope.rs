//! Success envelope shared by the insights, recipes and charts endpoints

use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::insights::{Metadata, ResultProvider, StepTimes};
use crate::domain::recipe::round2;

/// RFC 3339 UTC timestamp with second precision
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPerformance {
    pub api_response_time_sec: f64,
    pub cached: bool,
    pub operations: String,
}

/// Details of the processing run the response was built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub last_processed: Option<DateTime<Utc>>,
    pub step_times: StepTimes,
    pub total_recipes_processed: usize,
}

impl From<Option<&Metadata>> for ProcessingInfo {
    fn from(metadata: Option<&Metadata>) -> Self {
        metadata
            .map(|m| Self {
                last_processed: Some(m.last_processed),
                step_times: m.step_times,
                total_recipes_processed: m.total_recipes,
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub status: ResponseStatus,
    pub data: T,
    pub message: String,
    pub timestamp: String,
    pub api_performance: ApiPerformance,
    pub processing: ProcessingInfo,
}

/// Collects what a handler needs to wrap its payload
pub struct EnvelopeBuilder<'a> {
    started: Instant,
    provider: &'a dyn ResultProvider,
    operations: Option<String>,
}

impl<'a> EnvelopeBuilder<'a> {
    pub fn start(provider: &'a dyn ResultProvider) -> Self {
        Self {
            started: Instant::now(),
            provider,
            operations: None,
        }
    }

    /// Overrides the provider's description of the work done
    pub fn with_operations(mut self, operations: impl Into<String>) -> Self {
        self.operations = Some(operations.into());
        self
    }

    pub fn finish<T>(
        self,
        data: T,
        message: impl Into<String>,
        metadata: Option<&Metadata>,
    ) -> SuccessResponse<T> {
        SuccessResponse {
            status: ResponseStatus::Success,
            data,
            message: message.into(),
            timestamp: timestamp(),
            api_performance: ApiPerformance {
                api_response_time_sec: round2(self.started.elapsed().as_secs_f64()),
                cached: self.provider.is_cached(),
                operations: self
                    .operations
                    .unwrap_or_else(|| self.provider.operations().to_string()),
            },
            processing: ProcessingInfo::from(metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insights::MockResultProvider;

    #[test]
    fn test_envelope_shape() {
        let mut provider = MockResultProvider::new();
        provider.expect_is_cached().return_const(true);
        provider
            .expect_operations()
            .return_const("Read from cache only");

        let response = EnvelopeBuilder::start(&provider).finish(vec![1, 2], "done", None);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["api_performance"]["cached"], true);
        assert_eq!(json["api_performance"]["operations"], "Read from cache only");
        assert!(json["processing"]["last_processed"].is_null());
        assert_eq!(json["processing"]["total_recipes_processed"], 0);
    }

    #[test]
    fn test_operations_override() {
        let mut provider = MockResultProvider::new();
        provider.expect_is_cached().return_const(false);

        let response = EnvelopeBuilder::start(&provider)
            .with_operations("keyword search")
            .finish((), "ok", None);

        assert_eq!(response.api_performance.operations, "keyword search");
        assert!(!response.api_performance.cached);
    }
}
