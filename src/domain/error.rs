use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Data integrity error: {message}")]
    DataIntegrity { message: String },

    #[error("Failed to render {chart}: {message}")]
    Render { chart: String, message: String },

    #[error("Cache unavailable: {message}")]
    CacheUnavailable { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Not ready: {message}")]
    NotReady { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn schema(missing: Vec<String>) -> Self {
        Self::Schema { missing }
    }

    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            message: message.into(),
        }
    }

    pub fn render(chart: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            chart: chart.into(),
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::NotReady {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
