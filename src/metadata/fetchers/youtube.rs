use crate::metadata::fetchers::Resolver;
use crate::metadata::heuristics;
use crate::metadata::source::Source;
use crate::metadata::types::{ExtractError, Preview};
use crate::scrape::Transport;
use scraper::Html;
use url::form_urlencoded;

pub const YOUTUBE_ICON: &str = "https://developers.google.com/static/site-assets/logo-youtube.svg";

pub struct YouTubeResolver;

const SHORT_HOST: &str = "youtu.be/";

/// Video id from `youtube.com/watch?v=<id>` or `youtu.be/<id>`.
///
/// Works on the raw string, so urls without a scheme are accepted too.
pub fn video_id(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or_default();

    let id = if url.contains("youtube.com") {
        let query = without_fragment.split_once('?').map(|(_, query)| query)?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    } else if let Some(start) = without_fragment.find(SHORT_HOST) {
        without_fragment[start + SHORT_HOST.len()..]
            .split(|c: char| c == '/' || c == '?')
            .next()
            .map(str::to_string)
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}

/// The watch page keeps its title in `<meta name="title">`; `<title>` is
/// often just "YouTube" for non-browser clients. The title is kept as written.
pub fn parse_video_page(html: &str, video_id: &str) -> Preview {
    let document = Html::parse_document(html);

    let mut preview = Preview::new(Source::VideoHost);
    preview.title = heuristics::meta_content_verbatim(&document, "title");
    preview.image_url = Some(thumbnail_url(video_id));
    preview.icon_url = Some(YOUTUBE_ICON.to_string());
    preview
}

impl Resolver for YouTubeResolver {
    fn resolve(&self, url: &str, transport: &Transport) -> Result<Preview, ExtractError> {
        let id = video_id(url).ok_or(ExtractError::InvalidVideoUrl)?;
        log::debug!("{url}: video id {id}");

        let headers = transport
            .browser_headers()
            .map_err(ExtractError::fetch("YouTube URL"))?;
        let page = transport
            .fetch(url, Some(headers))
            .map_err(ExtractError::fetch("YouTube URL"))?;

        Ok(parse_video_page(&page.body, &id))
    }

    fn name(&self) -> &'static str {
        "YouTube"
    }
}
