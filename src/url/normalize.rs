use crate::url::FETCHABLE_SCHEMES;
use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL string into the form used as the visited-set key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Scheme and host are lowercased, dot segments removed, and an empty
///    path rendered as `/` (all done by the `url` parser)
/// 3. Remove the fragment, which is never sent to the server
///
/// The scheme is not checked here; see [`ensure_fetchable`].
///
/// # Examples
///
/// ```
/// use ripple_crawl::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/a/../b#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/b");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;
    url.set_fragment(None);
    Ok(url)
}

/// Returns true if the URL uses a scheme the crawler fetches
pub fn is_fetchable(url: &Url) -> bool {
    FETCHABLE_SCHEMES.contains(&url.scheme())
}

/// Rejects URLs whose scheme is not http or https
pub fn ensure_fetchable(url: &Url) -> UrlResult<()> {
    if is_fetchable(url) {
        Ok(())
    } else {
        Err(UrlError::UnsupportedScheme(url.scheme().to_string()))
    }
}

/// Resolves an href against the page it was found on
///
/// A missing scheme or host is taken from `base`; a relative path is
/// resolved against the base path. Absolute hrefs come back unchanged
/// (apart from parser normalization).
///
/// # Examples
///
/// ```
/// use ripple_crawl::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/a/").unwrap();
/// assert_eq!(resolve_href("/b", &base).unwrap().as_str(), "https://example.com/b");
/// assert_eq!(resolve_href("c", &base).unwrap().as_str(), "https://example.com/a/c");
/// ```
pub fn resolve_href(href: &str, base: &Url) -> UrlResult<Url> {
    base.join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))
}
