use crate::metadata::fetchers::Resolver;
use crate::metadata::heuristics;
use crate::metadata::source::Source;
use crate::metadata::types::{ExtractError, Preview};
use crate::scrape::Transport;
use scraper::Html;

pub struct PinterestResolver;

/// Pin pages put the pinned image first in the markup. Image and icon urls
/// are kept exactly as written in the page.
pub fn parse_board_page(html: &str) -> Preview {
    let document = Html::parse_document(html);

    let mut preview = Preview::new(Source::ImageBoard);
    preview.title = heuristics::document_title(&document);
    preview.image_url = heuristics::first_image_src(&document);
    preview.icon_url = heuristics::rel_icon_href(&document);
    preview
}

impl Resolver for PinterestResolver {
    fn resolve(&self, url: &str, transport: &Transport) -> Result<Preview, ExtractError> {
        let page = transport
            .fetch(url, None)
            .map_err(ExtractError::fetch("Pinterest URL"))?;

        Ok(parse_board_page(&page.body))
    }

    fn name(&self) -> &'static str {
        "Pinterest"
    }
}
