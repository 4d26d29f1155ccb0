pub mod pinterest;
pub mod plain;
pub mod reddit;
pub mod youtube;

use crate::metadata::source::Source;
use crate::metadata::types::{ExtractError, Preview};
use crate::scrape::Transport;

/// One extraction strategy: fetch the url its own way and run the
/// field-fallback chains over the response
pub trait Resolver: Send + Sync {
    fn resolve(&self, url: &str, transport: &Transport) -> Result<Preview, ExtractError>;

    /// Get the name of this resolver for logging/debugging
    fn name(&self) -> &'static str;
}

pub fn resolver_for(source: Source) -> &'static dyn Resolver {
    match source {
        Source::VideoHost => &youtube::YouTubeResolver,
        Source::ImageBoard => &pinterest::PinterestResolver,
        Source::DiscussionForum => &reddit::RedditResolver,
        Source::Generic => &plain::PlainResolver,
    }
}
