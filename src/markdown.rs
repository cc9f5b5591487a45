use log::debug;
use pulldown_cmark::{html, Event, Parser, Tag, TagEnd};

mod extension;
mod toc;

pub(crate) use extension::Extensions;

/// Renders markdown into an HTML fragment with the given extensions.
pub(crate) fn render(markdown: &str, extensions: &Extensions) -> String {
    debug!("rendering markdown with {extensions:?}");
    let mut events: Vec<Event> = Parser::new_ext(markdown, extensions.options)
        .map(|event| match event {
            Event::SoftBreak if extensions.hard_breaks => Event::HardBreak,
            _ => event,
        })
        .collect();

    if extensions.code_hilite {
        events = wrap_code_blocks(events);
    }
    if extensions.toc {
        events = toc::insert_toc(events);
    }

    let mut body_html = String::new();
    html::push_html(&mut body_html, events.into_iter());
    body_html
}

fn wrap_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    events
        .into_iter()
        .flat_map(|event| match event {
            Event::Start(Tag::CodeBlock(_)) => {
                vec![Event::Html("<div class=\"codehilite\">\n".into()), event]
            }
            Event::End(TagEnd::CodeBlock) => vec![event, Event::Html("</div>\n".into())],
            _ => vec![event],
        })
        .collect()
}
