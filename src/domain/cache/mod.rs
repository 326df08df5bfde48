//! Cache domain - Flat key-value store abstraction

mod key;
mod repository;

pub use key::{glob_regex, CacheKeys};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
