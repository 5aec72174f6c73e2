// Feed Builder System
//
// Two-tier architecture:
//
// Tier 1: podsync-providers (Pure provider HTTP clients)
//   - bilibili::BilibiliClient
//   - No knowledge of feeds
//
// Tier 2: podsync-core/builder (FeedBuilder adapters)
//   - BilibiliBuilder turns client responses into a Feed
//   - BuilderRegistry selects a builder by provider

pub mod context;
pub mod error;
pub mod registry;
pub mod traits;

// FeedBuilder implementations
pub mod bilibili;

pub use context::*;
pub use error::*;
pub use registry::*;
pub use traits::*;

pub use bilibili::BilibiliBuilder;
