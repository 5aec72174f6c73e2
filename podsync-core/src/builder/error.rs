// Builder Error Types

use std::fmt;

use podsync_providers::ProviderClientError;

/// Upstream call a build was performing when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    EpisodeInfo,
    UserInfo,
    UserEpisodes,
    SeasonEpisodes,
    SeriesInfo,
    SeriesEpisodes,
}

impl FetchStage {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EpisodeInfo => "episode detail",
            Self::UserInfo => "user info",
            Self::UserEpisodes => "user listing",
            Self::SeasonEpisodes => "season listing",
            Self::SeriesInfo => "series info",
            Self::SeriesEpisodes => "series listing",
        }
    }
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feed build errors
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// An upstream request failed; `source` is the client error as returned.
    #[error("{stage} request failed: {source}")]
    Upstream {
        stage: FetchStage,
        #[source]
        source: ProviderClientError,
    },

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Build cancelled")]
    Cancelled,
}

impl BuildError {
    #[must_use]
    pub const fn upstream(stage: FetchStage, source: ProviderClientError) -> Self {
        Self::Upstream { stage, source }
    }

    /// Stage of a failed upstream call, if this is one
    #[must_use]
    pub const fn stage(&self) -> Option<FetchStage> {
        match self {
            Self::Upstream { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_names_stage() {
        let err = BuildError::upstream(
            FetchStage::UserInfo,
            ProviderClientError::Api {
                code: -404,
                message: "啥都木有".to_string(),
            },
        );
        assert_eq!(err.to_string(), "user info request failed: API error (code -404): 啥都木有");
        assert_eq!(err.stage(), Some(FetchStage::UserInfo));
    }

    #[test]
    fn test_upstream_keeps_source() {
        use std::error::Error as _;

        let err = BuildError::upstream(
            FetchStage::EpisodeInfo,
            ProviderClientError::Timeout("deadline".to_string()),
        );
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "Request timed out: deadline");
        assert_eq!(BuildError::Cancelled.stage(), None);
    }
}
