use crate::metadata::source::Source;
use crate::scrape::FetchError;
use serde::Serialize;

/// Placeholder rendered for image/icon fields with no value.
pub const SENTINEL_NONE: &str = "None";
pub const NO_TITLE: &str = "No title found";
pub const NO_DESCRIPTION: &str = "No meta description found";
pub const NO_KEYWORDS: &str = "No meta keywords found";
pub const FORUM_TITLE: &str = "Reddit Post";

/// Error types for a single url extraction. Rendered as the `Error` field of
/// the result, never propagated past the orchestrator.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Invalid video URL. Could not extract video ID.")]
    InvalidVideoUrl,

    #[error("The URL is not a valid Reddit link.")]
    NotForumUrl,

    #[error("Failed to retrieve the {target}: {source}")]
    Fetch {
        target: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("Unexpected JSON structure: {0}")]
    Structure(String),
}

impl ExtractError {
    pub fn fetch(target: &'static str) -> impl FnOnce(FetchError) -> Self {
        move |source| Self::Fetch { target, source }
    }
}

/// What a resolver found. `None` means the page truly had no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub source: Source,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub icon_url: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

impl Preview {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            title: None,
            image_url: None,
            icon_url: None,
            description: None,
            keywords: None,
            headings: None,
            links: None,
        }
    }
}

/// Wire form of a successful extraction. Absent keys are fields the
/// source's strategy does not produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

fn or_default(value: Option<String>, default: &str) -> Option<String> {
    Some(value.unwrap_or_else(|| default.to_string()))
}

/// Compatibility shim: clients expect fixed placeholder strings instead of
/// missing values, and a per-source set of keys.
impl From<Preview> for Record {
    fn from(preview: Preview) -> Self {
        match preview.source {
            Source::VideoHost => Record {
                title: or_default(preview.title, SENTINEL_NONE),
                img: or_default(preview.image_url, SENTINEL_NONE),
                icon: or_default(preview.icon_url, SENTINEL_NONE),
                ..Default::default()
            },
            Source::ImageBoard => Record {
                title: or_default(preview.title, NO_TITLE),
                img: or_default(preview.image_url, SENTINEL_NONE),
                icon: or_default(preview.icon_url, SENTINEL_NONE),
                ..Default::default()
            },
            Source::DiscussionForum => Record {
                title: or_default(preview.title, FORUM_TITLE),
                icon: or_default(preview.icon_url, SENTINEL_NONE),
                ..Default::default()
            },
            Source::Generic => Record {
                title: or_default(preview.title, NO_TITLE),
                img: or_default(preview.image_url, SENTINEL_NONE),
                icon: or_default(preview.icon_url, SENTINEL_NONE),
                description: or_default(preview.description, NO_DESCRIPTION),
                keywords: or_default(preview.keywords, NO_KEYWORDS),
                headings: Some(preview.headings.unwrap_or_default()),
                links: Some(preview.links.unwrap_or_default()),
            },
        }
    }
}

impl Record {
    /// Scalar fields by their wire name, in wire order
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", &self.title),
            ("img", &self.img),
            ("icon", &self.icon),
            ("description", &self.description),
            ("keywords", &self.keywords),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
        .collect()
    }
}

/// Per-url result: either the record or a single `Error` message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Extraction {
    Success(Record),
    Failure {
        #[serde(rename = "Error")]
        error: String,
    },
}

impl Extraction {
    /// Non-empty values of every field whose name mentions "title"
    pub fn titles(&self) -> Vec<&str> {
        match self {
            Extraction::Success(record) => record
                .text_fields()
                .into_iter()
                .filter(|(name, value)| name.to_lowercase().contains("title") && !value.is_empty())
                .map(|(_, value)| value)
                .collect(),
            Extraction::Failure { .. } => Vec::new(),
        }
    }
}

impl From<Result<Preview, ExtractError>> for Extraction {
    fn from(result: Result<Preview, ExtractError>) -> Self {
        match result {
            Ok(preview) => Extraction::Success(preview.into()),
            Err(err) => Extraction::Failure {
                error: err.to_string(),
            },
        }
    }
}
