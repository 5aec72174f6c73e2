//! Bilibili Vendor Client
//!
//! Pure HTTP client for the public Bilibili web API, independent of the
//! feed model.
//!
//! # Features
//! - Video detail and uploader card lookup
//! - Uploader, season and series archive listings
//! - Page-size normalization per endpoint family

pub mod client;
pub mod pagination;
pub mod types;

pub use client::{BilibiliClient, ClientOptions, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
pub use pagination::MAX_PAGE_SIZE;
pub use types::*;

/// Errors returned by the Bilibili client.
pub type BilibiliError = crate::error::ProviderClientError;
