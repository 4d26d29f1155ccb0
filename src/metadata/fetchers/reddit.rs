use crate::metadata::fetchers::Resolver;
use crate::metadata::source::{Source, FORUM_HOST};
use crate::metadata::types::{ExtractError, Preview};
use crate::scrape::Transport;
use serde_json::Value;

pub const REDDIT_ICON: &str = "https://www.redditstatic.com/shreddit/assets/favicon/192x192.png";

/// Appended to a post url to get its JSON listing
pub const JSON_SUFFIX: &str = "/.json";

pub struct RedditResolver;

/// Post url -> JSON listing url. Urls already ending in `.json` are kept.
pub fn json_endpoint(url: &str) -> String {
    if url.ends_with(".json") {
        url.to_string()
    } else {
        format!("{}{JSON_SUFFIX}", url.trim_end_matches('/'))
    }
}

fn index<'a>(value: &'a Value, idx: usize) -> Result<&'a Value, ExtractError> {
    value
        .get(idx)
        .ok_or_else(|| ExtractError::Structure(format!("missing index {idx}")))
}

fn key<'a>(value: &'a Value, name: &str) -> Result<&'a Value, ExtractError> {
    value
        .get(name)
        .ok_or_else(|| ExtractError::Structure(format!("missing key '{name}'")))
}

/// Title of the first post of the first listing:
/// `[0].data.children[0].data.title`
pub fn parse_listing(body: &str) -> Result<Preview, ExtractError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|err| ExtractError::Structure(format!("invalid JSON: {err}")))?;

    let listing = index(&json, 0)?;
    let children = key(key(listing, "data")?, "children")?;
    let post = key(index(children, 0)?, "data")?;

    let title = match key(post, "title")? {
        Value::Null => None,
        Value::String(title) if title.is_empty() => None,
        Value::String(title) => Some(title.clone()),
        other => {
            return Err(ExtractError::Structure(format!(
                "title is not a string: {other}"
            )))
        }
    };

    let mut preview = Preview::new(Source::DiscussionForum);
    preview.title = title;
    preview.icon_url = Some(REDDIT_ICON.to_string());
    Ok(preview)
}

impl Resolver for RedditResolver {
    fn resolve(&self, url: &str, transport: &Transport) -> Result<Preview, ExtractError> {
        if !url.contains(FORUM_HOST) {
            return Err(ExtractError::NotForumUrl);
        }

        let endpoint = json_endpoint(url);
        log::debug!("{url}: using listing {endpoint}");

        let page = transport
            .fetch(&endpoint, None)
            .map_err(ExtractError::fetch("Reddit post"))?;

        parse_listing(&page.body)
    }

    fn name(&self) -> &'static str {
        "Reddit"
    }
}
