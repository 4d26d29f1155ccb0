use url::Url;

/// Make `candidate` absolute against the page it was found on.
///
/// Anything already starting with `http://` or `https://` passes through
/// untouched. Protocol-relative (`//cdn...`), root-relative and
/// path-relative references are joined onto `base`.
///
/// Returns the candidate unchanged if `base` cannot be parsed.
pub fn absolutize(base: &str, candidate: &str) -> String {
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return candidate.to_string();
    }

    match Url::parse(base).and_then(|base| base.join(candidate)) {
        Ok(joined) => joined.to_string(),
        Err(err) => {
            log::debug!("{base}: cannot resolve {candidate:?}: {err}");
            candidate.to_string()
        }
    }
}
