//! DOM lookups shared by the html resolvers.
//!
//! Each function is one link of a field-fallback chain and returns `None`
//! when its signal is missing, so resolvers can chain them with `or_else`.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Failed to compile static selector")
}

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static META: Lazy<Selector> = Lazy::new(|| selector("meta"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("link"));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

/// Tags collected into `headings`, in output order
pub const HEADING_TAGS: [&str; 7] = ["h1", "h2", "h3", "h4", "h5", "h6", "p"];

static HEADINGS: Lazy<Vec<Selector>> =
    Lazy::new(|| HEADING_TAGS.iter().map(|tag| selector(tag)).collect());

/// All descendant text, trimmed
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed text of the first `<title>`
pub fn document_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|el| element_text(&el))
        .filter(|title| !title.is_empty())
}

/// Trimmed `content` of the first `<meta name="{name}">`
pub fn meta_content(document: &Html, name: &str) -> Option<String> {
    document
        .select(&META)
        .find(|el| el.value().attr("name") == Some(name))
        .and_then(|el| non_empty(el.value().attr("content")))
}

/// `content` of the first `<meta name="{name}">`, untrimmed. Only a missing
/// tag or attribute counts as absent.
pub fn meta_content_verbatim(document: &Html, name: &str) -> Option<String> {
    document
        .select(&META)
        .find(|el| el.value().attr("name") == Some(name))
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

/// `src` of the first `<img>` in the document, whatever it is.
///
/// May well be a tracking pixel or a logo; nothing is filtered.
pub fn first_image_src(document: &Html) -> Option<String> {
    document
        .select(&IMG)
        .next()
        .and_then(|el| non_empty(el.value().attr("src")))
}

/// `href` of the first `<link>` with a non-empty href whose `rel` contains
/// "icon" anywhere, case-insensitive (icon, shortcut icon, apple-touch-icon...)
pub fn icon_link_href(document: &Html) -> Option<String> {
    document
        .select(&LINK)
        .filter(|el| {
            el.value()
                .attr("rel")
                .is_some_and(|rel| rel.to_lowercase().contains("icon"))
        })
        .find_map(|el| non_empty(el.value().attr("href")))
}

fn link_href_where(document: &Html, matches: impl Fn(&str) -> bool) -> Option<String> {
    document
        .select(&LINK)
        .find(|el| el.value().attr("rel").is_some_and(&matches))
        .and_then(|el| non_empty(el.value().attr("href")))
}

/// `href` of the first `<link>` whose rel tokens include exactly `icon`,
/// then of the first `<link rel="shortcut icon">`
pub fn rel_icon_href(document: &Html) -> Option<String> {
    link_href_where(document, |rel: &str| {
        rel.split_whitespace().any(|token| token == "icon")
    })
    .or_else(|| {
        link_href_where(document, |rel: &str| {
            rel.trim().eq_ignore_ascii_case("shortcut icon")
        })
    })
}

/// `src` of the first `<img>` whose class mentions "logo", case-insensitive
pub fn logo_image_src(document: &Html) -> Option<String> {
    document
        .select(&IMG)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| class.to_lowercase().contains("logo"))
        })
        .find_map(|el| non_empty(el.value().attr("src")))
}

/// Text of every h1, then every h2 ... then every p. Empty elements are kept.
pub fn headings(document: &Html) -> Vec<String> {
    HEADINGS
        .iter()
        .flat_map(|sel| document.select(sel).map(|el| element_text(&el)))
        .collect()
}

/// Visible text of every `<a href>`, skipping anchors without text
pub fn link_texts(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR)
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_document_title_trimmed() {
        assert_eq!(
            document_title(&doc("<html><head><title>\n  Hi  </title></head></html>")),
            Some("Hi".into())
        );
        assert_eq!(document_title(&doc("<html><head></head></html>")), None);
        assert_eq!(document_title(&doc("<title>   </title>")), None);
    }

    #[test]
    fn test_meta_content_first_match() {
        let d = doc(
            r#"<head>
                <meta property="description" content="wrong attribute">
                <meta name="description" content=" first ">
                <meta name="description" content="second">
            </head>"#,
        );
        assert_eq!(meta_content(&d, "description"), Some("first".into()));
        assert_eq!(meta_content(&d, "keywords"), None);
    }

    #[test]
    fn test_meta_content_verbatim() {
        let d = doc(r#"<meta name="title" content=" padded "><meta name="empty" content="">"#);
        assert_eq!(meta_content_verbatim(&d, "title"), Some(" padded ".into()));
        assert_eq!(meta_content_verbatim(&d, "empty"), Some(String::new()));
        assert_eq!(meta_content_verbatim(&d, "missing"), None);
        assert_eq!(meta_content_verbatim(&doc(r#"<meta name="title">"#), "title"), None);
    }

    #[test]
    fn test_meta_content_is_case_sensitive_on_name() {
        let d = doc(r#"<meta name="Description" content="x">"#);
        assert_eq!(meta_content(&d, "description"), None);
    }

    #[test]
    fn test_first_image_src_takes_first_tag_only() {
        let d = doc(r#"<body><img alt="no src"><img src="/b.png"></body>"#);
        assert_eq!(first_image_src(&d), None);

        let d = doc(r#"<body><img src="/pixel.gif" width="1"><img src="/hero.png"></body>"#);
        assert_eq!(first_image_src(&d), Some("/pixel.gif".into()));
    }

    #[test]
    fn test_icon_link_href_substring() {
        let d = doc(
            r#"<head>
                <link rel="stylesheet" href="/s.css">
                <link rel="Apple-Touch-Icon" href="/touch.png">
                <link rel="icon" href="/favicon.ico">
            </head>"#,
        );
        assert_eq!(icon_link_href(&d), Some("/touch.png".into()));
    }

    #[test]
    fn test_icon_link_href_skips_missing_href() {
        let d = doc(r#"<head><link rel="icon"><link rel="shortcut icon" href="/f.ico"></head>"#);
        assert_eq!(icon_link_href(&d), Some("/f.ico".into()));
    }

    #[test]
    fn test_rel_icon_href_token_match() {
        let d = doc(
            r#"<head>
                <link rel="apple-touch-icon" href="/touch.png">
                <link rel="shortcut icon" href="/short.ico">
                <link rel="icon" href="/icon.png">
            </head>"#,
        );
        assert_eq!(rel_icon_href(&d), Some("/short.ico".into()));

        let d = doc(r#"<head><link rel="apple-touch-icon" href="/touch.png"></head>"#);
        assert_eq!(rel_icon_href(&d), None);
    }

    #[test]
    fn test_rel_icon_href_shortcut_fallback() {
        let d = doc(r#"<head><link rel="Shortcut Icon" href="/short.ico"></head>"#);
        assert_eq!(rel_icon_href(&d), Some("/short.ico".into()));
    }

    #[test]
    fn test_logo_image_src() {
        let d = doc(
            r#"<body>
                <img src="/hero.png" class="banner">
                <img src="/brand.svg" class="site-Logo big">
            </body>"#,
        );
        assert_eq!(logo_image_src(&d), Some("/brand.svg".into()));
        assert_eq!(logo_image_src(&doc("<img src='/a.png'>")), None);
    }

    #[test]
    fn test_headings_grouped_by_tag() {
        let d = doc(
            r#"<body>
                <p>para one</p>
                <h2>second level</h2>
                <h1>  top  </h1>
                <p></p>
                <h1>another <em>top</em></h1>
            </body>"#,
        );
        assert_eq!(
            headings(&d),
            vec!["top", "another top", "second level", "para one", ""]
        );
    }

    #[test]
    fn test_link_texts() {
        let d = doc(
            r#"<body>
                <a href="/a"> Home </a>
                <a name="anchor">No href</a>
                <a href="/b"><img src="/icon.png"></a>
                <a href="/c">About <b>us</b></a>
            </body>"#,
        );
        assert_eq!(link_texts(&d), vec!["Home", "About us"]);
    }
}
