use std::{borrow::Cow, path::Path, sync::LazyLock};

use anyhow::bail;
use log::{debug, warn};
use regex::{Captures, Regex};

use crate::generator::data::PageData;

pub(crate) const DEFAULT_TEMPLATE: &str = include_str!("../templates/default.html");

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(title|content|date|author_html)\}").expect("valid regex"));
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style>.*?</style>").expect("valid regex"));

/// Page shell with `{title}`-style placeholders; every other brace is left alone.
#[derive(Debug, Clone)]
pub(crate) struct Template {
    source: String,
}

impl Template {
    pub fn builtin() -> Template {
        Template {
            source: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Reads a user template, falling back to the built-in one on any problem.
    pub fn load(template_path: Option<&Path>) -> Template {
        let Some(template_path) = template_path else {
            return Template::builtin();
        };
        if !template_path.exists() {
            warn!("Template file {template_path:?} does not exist. Using the default template.");
            return Template::builtin();
        }

        match std::fs::read_to_string(template_path) {
            Ok(source) => {
                debug!("using template {template_path:?}");
                Template { source }
            }
            Err(e) => {
                warn!("Error reading template file {template_path:?}: {e}. Using the default template.");
                Template::builtin()
            }
        }
    }

    /// Drops inline `<style>...</style>` blocks. Linked stylesheets stay.
    pub fn strip_style(&mut self) {
        if let Cow::Owned(stripped) = STYLE_BLOCK.replace_all(&self.source, "") {
            self.source = stripped;
        }
    }

    pub fn render(&self, data: &PageData) -> anyhow::Result<String> {
        substitute(&self.source, data)
    }
}

/// Single pass: substituted values are never scanned for placeholders again.
fn substitute(source: &str, data: &PageData) -> anyhow::Result<String> {
    if !PLACEHOLDER
        .captures_iter(source)
        .any(|caps| &caps[1] == "content")
    {
        bail!("template is missing the required {{content}} placeholder");
    }

    Ok(PLACEHOLDER
        .replace_all(source, |caps: &Captures| {
            data.placeholder(&caps[1]).unwrap_or_default()
        })
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page<'a>(content: &'a str, author: Option<&'a str>) -> PageData<'a> {
        PageData::new("A <Title>", content, "2024-01-02 03:04:05".to_string(), author)
    }

    #[test]
    fn builtin_template_has_all_placeholders() {
        for name in ["{title}", "{content}", "{date}", "{author_html}"] {
            assert!(DEFAULT_TEMPLATE.contains(name), "{name}");
        }
        assert!(DEFAULT_TEMPLATE.contains("<style>"));
    }

    #[test]
    fn braces_keep_css_intact() {
        let html = Template::builtin().render(&page("<p>hi</p>", None)).unwrap();
        assert!(html.contains("<title>A &lt;Title&gt;</title>"));
        assert!(html.contains("<div>Generated on: 2024-01-02 03:04:05</div>"));
        assert!(html.contains("<p>hi</p>"));
        assert!(html.contains("        a {\n            color: #0366d6;"));
        assert!(!html.contains("Author:"));
    }

    #[test]
    fn substituted_content_is_not_rescanned() {
        let html = substitute("<main>{content}</main>", &page("{title}", None)).unwrap();
        assert_eq!(html, "<main>{title}</main>");
    }

    #[test]
    fn unknown_braces_pass_through() {
        let html = substitute("{content} {unknown} {{title}}", &page("x", None)).unwrap();
        assert_eq!(html, "x {unknown} {A &lt;Title&gt;}");
    }

    #[test]
    fn missing_content_placeholder_is_fatal() {
        let err = substitute("<title>{title}</title>", &page("x", None)).unwrap_err();
        assert!(err.to_string().contains("{content}"));
    }

    #[test]
    fn strip_style_removes_every_inline_block() {
        let mut template = Template {
            source: "<style>a{}</style><p>{content}</p><STYLE>b{}</STYLE><style>\nc{}\n</style>"
                .to_string(),
        };
        template.strip_style();
        assert_eq!(template.source, "<p>{content}</p><STYLE>b{}</STYLE>");

        let mut builtin = Template::builtin();
        builtin.strip_style();
        assert!(!builtin.source.contains("<style>"));
        assert!(!builtin.source.contains("font-family"));
        assert!(builtin.source.contains("{content}"));
    }

    #[test]
    fn load_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Template::load(None).source, DEFAULT_TEMPLATE);
        assert_eq!(
            Template::load(Some(dir.path().join("missing.html").as_path())).source,
            DEFAULT_TEMPLATE
        );
        // a directory exists but cannot be read as a file
        assert_eq!(Template::load(Some(dir.path())).source, DEFAULT_TEMPLATE);
    }

    #[test]
    fn load_reads_user_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<body>{content}</body>").unwrap();
        let template = Template::load(Some(path.as_path()));
        assert_eq!(
            template.render(&page("<p>x</p>", None)).unwrap(),
            "<body><p>x</p></body>"
        );
    }

    #[test]
    fn hbs_files_use_plain_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.hbs");
        fs::write(&path, "{{title}} {{{content}}} {content}").unwrap();
        let template = Template::load(Some(path.as_path()));
        assert_eq!(
            template.render(&page("<p>x</p>", None)).unwrap(),
            "{A &lt;Title&gt;} {{<p>x</p>}} <p>x</p>"
        );
    }
}
