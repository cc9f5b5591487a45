use std::sync::LazyLock;

use maud::html;
use regex::Regex;

pub(crate) const FALLBACK_TITLE: &str = "Converted Markdown";

static TOP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.*)$").expect("valid regex"));

/// Text of the first `# heading` line, or the fallback title.
pub(crate) fn extract_title(markdown: &str) -> String {
    TOP_HEADING
        .captures_iter(markdown)
        .map(|caps| caps[1].trim().to_string())
        .find(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

pub(super) fn render_author(author: &str) -> String {
    html! {
        div { "Author: " (author) }
    }
    .into()
}

/// The command line wins over metadata; empty names count as absent.
pub(crate) fn resolve_author(cli: Option<&str>, metadata: Option<String>) -> Option<String> {
    cli.filter(|a| !a.is_empty())
        .map(str::to_string)
        .or(metadata)
        .filter(|a| !a.is_empty())
}
