// Podsync Provider Clients
//
// Pure HTTP client implementations for the platforms podsync ingests.
// These clients know nothing about feeds; podsync-core adapts their
// responses into the provider-agnostic feed model.
//
// Architecture:
// - podsync-providers: Pure HTTP clients (Bilibili)
// - podsync-core/builder: FeedBuilder implementations calling these clients

// Shared error types
pub mod error;

// HTTP clients
pub mod bilibili;

// Re-export client types for convenience
pub use bilibili::{BilibiliClient, BilibiliError, ClientOptions};
pub use error::ProviderClientError;
