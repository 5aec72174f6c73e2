// Builder Registry
//
// Factory-based selection of a FeedBuilder by provider

use std::collections::HashMap;
use std::sync::Arc;

use podsync_providers::ClientOptions;

use super::{BilibiliBuilder, BuildError, Downloader, FeedBuilder};
use crate::models::Provider;

/// Inputs a factory may use to construct a builder
#[derive(Clone, Default)]
pub struct BuilderArgs {
    /// Provider API key, for providers that require one
    pub api_key: Option<String>,
    /// External downloader, for providers that delegate metadata lookup
    pub downloader: Option<Arc<dyn Downloader>>,
    /// HTTP settings for the provider client
    pub client: ClientOptions,
}

impl BuilderArgs {
    #[must_use]
    pub fn new(client: ClientOptions) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_downloader(mut self, downloader: Arc<dyn Downloader>) -> Self {
        self.downloader = Some(downloader);
        self
    }
}

/// Builder factory function type
pub type BuilderFactory =
    Box<dyn Fn(&BuilderArgs) -> Result<Arc<dyn FeedBuilder>, BuildError> + Send + Sync>;

/// Builder registry
///
/// Holds one factory per provider. Selecting a builder keeps no state, so a
/// shared registry can serve concurrent builds.
pub struct BuilderRegistry {
    factories: HashMap<Provider, BuilderFactory>,
}

impl BuilderRegistry {
    /// Create new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every builder this crate ships
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        // API key and downloader are not needed for the public Bilibili API.
        registry.register_factory(
            Provider::Bilibili,
            Box::new(|args: &BuilderArgs| -> Result<Arc<dyn FeedBuilder>, BuildError> {
                Ok(Arc::new(BilibiliBuilder::with_options(&args.client)?))
            }),
        );
        registry
    }

    /// Register (or replace) the factory for `provider`
    pub fn register_factory(&mut self, provider: Provider, factory: BuilderFactory) {
        self.factories.insert(provider, factory);
    }

    /// Construct the builder for `provider`
    pub fn create(
        &self,
        provider: Provider,
        args: &BuilderArgs,
    ) -> Result<Arc<dyn FeedBuilder>, BuildError> {
        let factory = self
            .factories
            .get(&provider)
            .ok_or_else(|| BuildError::UnsupportedProvider(provider.to_string()))?;
        factory(args)
    }

    /// Same as [`Self::create`] for a provider given by name
    pub fn create_by_name(
        &self,
        provider: &str,
        args: &BuilderArgs,
    ) -> Result<Arc<dyn FeedBuilder>, BuildError> {
        self.create(provider.parse()?, args)
    }

    #[must_use]
    pub fn is_supported(&self, provider: Provider) -> bool {
        self.factories.contains_key(&provider)
    }

    /// Providers with a registered factory, sorted
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<_> = self.factories.keys().copied().collect();
        providers.sort();
        providers
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Select a builder for `provider` from the default registry
pub fn new_builder(
    provider: Provider,
    api_key: Option<&str>,
    downloader: Option<Arc<dyn Downloader>>,
) -> Result<Arc<dyn FeedBuilder>, BuildError> {
    let args = BuilderArgs {
        api_key: api_key.map(str::to_string),
        downloader,
        client: ClientOptions::default(),
    };
    BuilderRegistry::with_defaults().create(provider, &args)
}
