// Service exports
pub mod cache;
pub mod fixture;
pub mod locator;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use fixture::{AtmStore, FixtureError};
pub use locator::{FallbackLocator, ResolvedOrigin};
