pub mod aggregate;
pub mod omdb;
pub mod provider;

use thiserror::Error;

/// Failure of a single call to the movie database.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Failure of a whole search. Display output is user-facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0}")]
    Configuration(String),
    #[error("Please enter a search term.")]
    EmptyQuery,
    #[error("\"{0}\" is not a valid year.")]
    InvalidYear(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    NoResults(String),
}

impl SearchError {
    pub fn no_results_for(title: &str) -> Self {
        Self::NoResults(format!("Could not find any movies matching \"{title}\"."))
    }
}

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";
pub const PLACEHOLDER_API_KEY: &str = "[YOUR_OMDB_API_KEY]";

/// Plot length requested on detail lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotLength {
    #[default]
    Short,
    Full,
}

impl PlotLength {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Full => "full",
        }
    }
}

impl std::str::FromStr for PlotLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown plot length: {other}")),
        }
    }
}

/// OMDb client configuration.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub plot: PlotLength,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_OMDB_URL.to_string(),
            plot: PlotLength::Short,
        }
    }
}

impl OmdbConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Reject a missing or placeholder API key before any request goes out.
    pub fn validate(&self) -> Result<(), SearchError> {
        let key = self.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(SearchError::Configuration(
                "API Key not configured. Please set CINEPAW_OMDB_API_KEY.".to_string(),
            ));
        }
        Ok(())
    }
}

/// What to do with titles whose detail lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Leave them out of the result.
    #[default]
    Drop,
    /// Keep a "Detail Error" record in their place.
    Placeholder,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "placeholder" => Ok(Self::Placeholder),
            other => Err(format!("unknown detail failure policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AggregatorConfig {
    pub failure_policy: FailurePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_placeholder_keys_are_rejected() {
        for key in ["", "   ", PLACEHOLDER_API_KEY] {
            let err = OmdbConfig::with_api_key(key).validate().unwrap_err();
            assert!(matches!(err, SearchError::Configuration(_)), "key {key:?}");
        }
        assert!(OmdbConfig::with_api_key("abc123").validate().is_ok());
    }

    #[test]
    fn generic_no_results_message() {
        assert_eq!(
            SearchError::no_results_for("Xyzzy123NoSuchFilm").to_string(),
            "Could not find any movies matching \"Xyzzy123NoSuchFilm\"."
        );
    }

    #[test]
    fn parses_policy_and_plot_names() {
        assert_eq!("Placeholder".parse::<FailurePolicy>(), Ok(FailurePolicy::Placeholder));
        assert_eq!("drop".parse::<FailurePolicy>(), Ok(FailurePolicy::Drop));
        assert!("keep".parse::<FailurePolicy>().is_err());
        assert_eq!("FULL".parse::<PlotLength>(), Ok(PlotLength::Full));
    }
}
