use crate::metadata::fetchers::Resolver;
use crate::metadata::heuristics;
use crate::metadata::normalize::absolutize;
use crate::metadata::source::Source;
use crate::metadata::types::{ExtractError, Preview};
use crate::scrape::Transport;
use scraper::Html;

pub struct PlainResolver;

/// Generic page: every field resolved on its own, a missing element never
/// stops the others. `url` is the base for relative icon/image urls.
pub fn parse_page(html: &str, url: &str) -> Preview {
    let document = Html::parse_document(html);

    let mut preview = Preview::new(Source::Generic);
    preview.title = heuristics::document_title(&document);
    preview.description = heuristics::meta_content(&document, "description");
    preview.keywords = heuristics::meta_content(&document, "keywords");
    preview.headings = Some(heuristics::headings(&document));
    preview.links = Some(heuristics::link_texts(&document));

    // favicon first, then anything that looks like a logo
    preview.icon_url = heuristics::icon_link_href(&document)
        .or_else(|| heuristics::logo_image_src(&document))
        .map(|icon| absolutize(url, &icon));

    preview.image_url = heuristics::first_image_src(&document).map(|img| absolutize(url, &img));

    preview
}

impl Resolver for PlainResolver {
    fn resolve(&self, url: &str, transport: &Transport) -> Result<Preview, ExtractError> {
        let page = transport
            .fetch(url, None)
            .map_err(ExtractError::fetch("URL"))?;
        log::debug!("{url}: {} from {}", page.status, page.url);

        Ok(parse_page(&page.body, url))
    }

    fn name(&self) -> &'static str {
        "Plain"
    }
}
