use std::{collections::HashSet, sync::LazyLock};

use maud::{html, Markup};
use pulldown_cmark::{Event, Tag, TagEnd};
use regex::Regex;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

const TOC_MARKER: &str = "[TOC]";

#[derive(Debug)]
struct TocNode {
    level: usize,
    id: String,
    text: String,
    children: Vec<TocNode>,
}

pub(super) fn slugify(text: &str) -> String {
    let cleaned = NON_SLUG_CHARS.replace_all(text, "");
    let slug = SLUG_SEPARATORS
        .replace_all(cleaned.trim(), "-")
        .to_lowercase();
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

fn unique_id(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}_{n}");
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn heading_text(events: &[Event]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(&**t),
            _ => None,
        })
        .collect()
}

/// Gives every heading a unique id and collects them in document order.
/// Explicit `{#id}`s are reserved before any slug is generated.
fn assign_heading_ids(events: &mut [Event]) -> Vec<TocNode> {
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|e| match e {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    let mut claimed = HashSet::new();
    let mut headings = vec![];

    let mut i = 0;
    while i < events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[i] else {
            i += 1;
            continue;
        };
        let level = *level as usize;
        let explicit_id = id.as_ref().map(|id| id.to_string());

        let end = events[i..]
            .iter()
            .position(|e| matches!(e, Event::End(TagEnd::Heading(_))))
            .map_or(events.len(), |p| i + p);
        let text = heading_text(&events[i + 1..end]);
        let slug = match explicit_id {
            Some(id) if claimed.insert(id.clone()) => id,
            Some(id) => unique_id(&id, &used),
            None => unique_id(&slugify(&text), &used),
        };
        used.insert(slug.clone());

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(slug.clone().into());
        }
        headings.push(TocNode {
            level,
            id: slug,
            text,
            children: vec![],
        });
        i = end + 1;
    }
    headings
}

fn nest(nodes: &mut Vec<TocNode>, node: TocNode) {
    match nodes.last_mut() {
        Some(last) if last.level < node.level => nest(&mut last.children, node),
        _ => nodes.push(node),
    }
}

fn render_list(nodes: &[TocNode]) -> Markup {
    html! {
        ul {
            @for node in nodes {
                li {
                    a href={ "#" (node.id) } { (node.text) }
                    @if !node.children.is_empty() {
                        (render_list(&node.children))
                    }
                }
            }
        }
    }
}

/// End index of a paragraph starting at `start` that holds only the `[TOC]` marker.
fn marker_end(events: &[Event], start: usize) -> Option<usize> {
    if !matches!(events[start], Event::Start(Tag::Paragraph)) {
        return None;
    }
    let len = events[start + 1..]
        .iter()
        .position(|e| matches!(e, Event::End(TagEnd::Paragraph)))?;
    let mut text = String::new();
    for event in &events[start + 1..start + 1 + len] {
        match event {
            Event::Text(t) => text.push_str(t),
            _ => return None,
        }
    }
    (text.trim() == TOC_MARKER).then_some(start + 1 + len)
}

/// Adds heading ids and puts the table of contents in place of every `[TOC]`
/// paragraph, or at the top when there is none.
pub(super) fn insert_toc(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let headings = assign_heading_ids(&mut events);
    let has_headings = !headings.is_empty();

    let mut tree = vec![];
    for heading in headings {
        nest(&mut tree, heading);
    }
    let toc = html! { div.toc { (render_list(&tree)) } }.into_string() + "\n";

    let mut out = Vec::with_capacity(events.len() + 1);
    let mut replaced = false;
    let mut i = 0;
    while i < events.len() {
        if let Some(end) = marker_end(&events, i) {
            out.push(Event::Html(toc.clone().into()));
            replaced = true;
            i = end + 1;
        } else {
            out.push(events[i].clone());
            i += 1;
        }
    }
    if !replaced && has_headings {
        out.insert(0, Event::Html(toc.into()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  What's new?  "), "whats-new");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("!!!"), "section");
    }

    #[test]
    fn duplicate_slugs_get_suffixes() {
        let mut used = HashSet::new();
        for expected in ["intro", "intro_1", "intro_2"] {
            let slug = unique_id(&slugify("Intro"), &used);
            assert_eq!(slug, expected);
            used.insert(slug);
        }
    }

    #[test]
    fn generated_slugs_avoid_explicit_ids() {
        let events: Vec<Event> = pulldown_cmark::Parser::new_ext(
            "# Intro\n\n# X {#intro}\n\n# Y {#intro}\n",
            pulldown_cmark::Options::ENABLE_HEADING_ATTRIBUTES,
        )
        .collect();
        let ids: Vec<String> = insert_toc(events)
            .iter()
            .filter_map(|e| match e {
                Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["intro_1", "intro", "intro_2"]);
    }

    #[test]
    fn nesting_follows_levels() {
        let mut tree = vec![];
        for (level, id) in [(1, "a"), (2, "b"), (3, "c"), (2, "d"), (1, "e")] {
            nest(
                &mut tree,
                TocNode {
                    level,
                    id: id.to_string(),
                    text: id.to_string(),
                    children: vec![],
                },
            );
        }
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].children[0].id, "c");
        assert!(tree[1].children.is_empty());
    }
}
