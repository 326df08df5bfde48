//! Response envelopes and request extractors

pub mod envelope;
pub mod error;
pub mod query;

pub use envelope::{
    timestamp, ApiPerformance, EnvelopeBuilder, ProcessingInfo, ResponseStatus, SuccessResponse,
};
pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use query::{Query, RecipeQuery};
