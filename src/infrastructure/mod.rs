//! Infrastructure layer - cache backends, chart rendering, dataset sources
//! and the services built on them

pub mod cache;
pub mod charts;
pub mod insights;
pub mod logging;
pub mod services;
pub mod source;
