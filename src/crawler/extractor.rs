//! Link extraction from parsed HTML
//!
//! Walks a page's node tree in document order and turns every anchor's href into
//! an absolute URL, resolved against the URL of the page that contained it.
//! No deduplication happens here; that is the visited set's job.

use crate::url::resolve_href;
use ego_tree::NodeRef;
use scraper::{Html, Node};
use url::Url;

/// Parses an HTML body into a node tree
///
/// html5ever recovers from malformed markup instead of failing, so this never
/// errors. Recoverable parse errors are only logged.
pub fn parse_document(body: &str) -> Html {
    let document = Html::parse_document(body);
    if !document.errors.is_empty() {
        tracing::trace!("Recovered from {} HTML parse errors", document.errors.len());
    }
    document
}

/// Lazily yields every absolute link under `root`
///
/// The traversal is depth-first and pre-order: a node is inspected before its
/// children, and children are visited in document order. Only `root` and its
/// descendants are visited. An href that cannot be parsed is skipped without
/// ending the traversal.
pub fn extract_links<'a>(
    root: NodeRef<'a, Node>,
    base_url: &'a Url,
) -> impl Iterator<Item = String> + 'a {
    root.descendants()
        .filter_map(anchor_href)
        .filter_map(move |href| match resolve_href(href, base_url) {
            Ok(url) => Some(String::from(url)),
            Err(e) => {
                tracing::debug!("Skipping unresolvable href on {}: {}", base_url, e);
                None
            }
        })
}

/// Parses `body` and collects the links found on the page at `base_url`
///
/// The parsed document does not outlive this call, so the returned links can be
/// carried across await points.
pub fn links_in_page(body: &str, base_url: &Url) -> Vec<String> {
    let document = parse_document(body);
    extract_links(document.tree.root(), base_url).collect()
}

/// Returns the href of an anchor element, if the node is one
///
/// The parser keeps only the first occurrence of a repeated attribute, so this
/// is the first href in document order.
fn anchor_href<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    let element = node.value().as_element()?;
    if element.name() != "a" {
        return None;
    }
    element.attr("href")
}
