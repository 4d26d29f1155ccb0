pub mod fetchers;
pub mod heuristics;
pub mod normalize;
pub mod source;
pub mod types;

pub use source::{classify, Source};
pub use types::{ExtractError, Extraction, Preview, Record};

use crate::scrape::Transport;

/// Classify `url` and run the matching resolver. Values are left as found:
/// no placeholder strings.
pub fn preview(url: &str, transport: &Transport) -> Result<Preview, ExtractError> {
    let resolver = fetchers::resolver_for(classify(url));
    log::debug!("{url}: resolver={}", resolver.name());
    resolver.resolve(url, transport)
}

/// Main entry point for a single url. Never fails: resolver errors become
/// an `Error`-only result.
pub fn extract(url: &str, transport: &Transport) -> Extraction {
    let result = preview(url, transport);
    if let Err(err) = &result {
        log::warn!("{url}: {err}");
    }

    let extraction = Extraction::from(result);
    if let Extraction::Success(record) = &extraction {
        for (field, value) in record.text_fields() {
            log::debug!("{url}: {field}: {value}");
        }
    }
    extraction
}
