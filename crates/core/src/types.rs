use serde::{Deserialize, Serialize};

/// Title kind as understood by the movie database (`type=` filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown media type: {0}")]
pub struct UnknownMediaType(pub String);

impl std::str::FromStr for MediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            "episode" => Ok(Self::Episode),
            _ => Err(UnknownMediaType(s.to_string())),
        }
    }
}

/// Outcome of a per-title detail lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStatus {
    Success,
    Failure,
}

/// What the user asked for. Only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    pub title: String,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub language: Option<String>,
}

impl SearchCriteria {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    /// Year filter, with blank input treated as absent.
    pub fn year_filter(&self) -> Option<&str> {
        self.year.as_deref().map(str::trim).filter(|y| !y.is_empty())
    }

    /// Lower-cased language filter, `None` when blank.
    pub fn language_filter(&self) -> Option<String> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
    }
}

/// Lightweight record returned by a title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub poster_url: Option<String>,
}

/// Full record for one title, used for both cards and the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub poster_url: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub genre: Vec<String>,
    pub runtime: Option<String>,
    pub languages: Vec<String>,
    pub imdb_rating: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub producer: Option<String>,
    pub actors: Vec<String>,
    pub plot: Option<String>,
    pub status: DetailStatus,
}

impl MovieDetail {
    pub const FAILURE_TITLE: &'static str = "Detail Error";
    pub const FAILURE_PLOT: &'static str = "Details could not be loaded.";

    /// Placeholder for an identifier whose detail lookup failed.
    pub fn failed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Self::FAILURE_TITLE.to_string(),
            year: None,
            media_type: None,
            poster_url: None,
            rated: None,
            released: None,
            genre: Vec::new(),
            runtime: None,
            languages: Vec::new(),
            imdb_rating: None,
            director: None,
            writer: None,
            producer: None,
            actors: Vec::new(),
            plot: Some(Self::FAILURE_PLOT.to_string()),
            status: DetailStatus::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DetailStatus::Success
    }

    /// Exact, case-insensitive match against one of the record's languages.
    /// `language` is expected to be lower-cased already.
    pub fn speaks(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|l| l.trim().to_lowercase() == language)
    }
}
