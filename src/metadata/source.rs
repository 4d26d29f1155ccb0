use serde::Serialize;

/// Extraction strategy picked for a url
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    VideoHost,
    ImageBoard,
    DiscussionForum,
    Generic,
}

pub const VIDEO_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];
pub const IMAGE_BOARD_HOST: &str = "pinterest.com";
pub const FORUM_HOST: &str = "reddit.com";

/// Case-sensitive substring match on the raw url, first match wins.
pub fn classify(url: &str) -> Source {
    if VIDEO_HOSTS.iter().any(|host| url.contains(host)) {
        Source::VideoHost
    } else if url.contains(IMAGE_BOARD_HOST) {
        Source::ImageBoard
    } else if url.contains(FORUM_HOST) {
        Source::DiscussionForum
    } else {
        Source::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_video_hosts() {
        assert_eq!(classify("https://www.youtube.com/watch?v=abc"), Source::VideoHost);
        assert_eq!(classify("https://youtu.be/abc123"), Source::VideoHost);
        assert_eq!(classify("https://m.youtube.com/shorts/x"), Source::VideoHost);
    }

    #[test]
    fn test_classify_image_board() {
        assert_eq!(classify("https://www.pinterest.com/pin/123/"), Source::ImageBoard);
    }

    #[test]
    fn test_classify_forum() {
        assert_eq!(
            classify("https://www.reddit.com/r/rust/comments/abc/title/"),
            Source::DiscussionForum
        );
        assert_eq!(classify("https://old.reddit.com/r/rust"), Source::DiscussionForum);
    }

    #[test]
    fn test_classify_generic() {
        assert_eq!(classify("https://example.com"), Source::Generic);
        assert_eq!(classify(""), Source::Generic);
        assert_eq!(classify("not even a url"), Source::Generic);
    }

    #[test]
    fn test_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Source::DiscussionForum).unwrap(),
            serde_json::json!("discussion_forum")
        );
        assert_eq!(
            serde_json::to_value(Source::VideoHost).unwrap(),
            serde_json::json!("video_host")
        );
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify("https://YOUTUBE.COM/watch?v=abc"), Source::Generic);
        assert_eq!(classify("https://Reddit.com/r/rust"), Source::Generic);
    }

    #[test]
    fn test_classify_matches_anywhere_in_url() {
        assert_eq!(
            classify("https://example.com/?next=https://youtu.be/abc"),
            Source::VideoHost
        );
    }
}
