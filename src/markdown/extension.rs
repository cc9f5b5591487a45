use std::str::FromStr;

use anyhow::bail;
use pulldown_cmark::Options;

/// Syntax extensions selectable by name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extension {
    Extra,
    Tables,
    Footnotes,
    AttrList,
    Strikethrough,
    TaskLists,
    Smarty,
    FencedCode,
    SaneLists,
    CodeHilite,
    Toc,
    Nl2br,
}

const KNOWN_NAMES: &str = "extra, tables, footnotes, attr_list, strikethrough, tasklist, smarty, \
                           fenced_code, sane_lists, codehilite, toc, nl2br";

impl FromStr for Extension {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> anyhow::Result<Self> {
        let short = name.strip_prefix("markdown.extensions.").unwrap_or(name);
        Ok(match short {
            "extra" => Extension::Extra,
            "tables" => Extension::Tables,
            "footnotes" => Extension::Footnotes,
            "attr_list" => Extension::AttrList,
            "strikethrough" | "strike" => Extension::Strikethrough,
            "tasklist" | "tasklists" => Extension::TaskLists,
            "smarty" => Extension::Smarty,
            "fenced_code" => Extension::FencedCode,
            "sane_lists" => Extension::SaneLists,
            "codehilite" => Extension::CodeHilite,
            "toc" => Extension::Toc,
            "nl2br" => Extension::Nl2br,
            _ => bail!("unknown markdown extension {name:?} (known: {KNOWN_NAMES})"),
        })
    }
}

/// Parser options plus the post-processing passes requested by the extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Extensions {
    pub options: Options,
    pub code_hilite: bool,
    pub toc: bool,
    pub hard_breaks: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Extensions {
            options: Options::empty(),
            code_hilite: false,
            toc: false,
            hard_breaks: false,
        }
    }
}

impl Extensions {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> anyhow::Result<Extensions> {
        let mut extensions = Extensions::default();
        for name in names.iter().map(|n| n.as_ref().trim()) {
            if name.is_empty() {
                continue;
            }
            extensions.enable(name.parse()?);
        }
        Ok(extensions)
    }

    fn enable(&mut self, extension: Extension) {
        match extension {
            Extension::Extra => {
                self.options.insert(Options::ENABLE_TABLES);
                self.options.insert(Options::ENABLE_FOOTNOTES);
                self.options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
            }
            Extension::Tables => self.options.insert(Options::ENABLE_TABLES),
            Extension::Footnotes => self.options.insert(Options::ENABLE_FOOTNOTES),
            Extension::AttrList => self.options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            Extension::Strikethrough => self.options.insert(Options::ENABLE_STRIKETHROUGH),
            Extension::TaskLists => self.options.insert(Options::ENABLE_TASKLISTS),
            Extension::Smarty => self.options.insert(Options::ENABLE_SMART_PUNCTUATION),
            // always part of CommonMark
            Extension::FencedCode | Extension::SaneLists => {}
            Extension::CodeHilite => self.code_hilite = true,
            Extension::Toc => self.toc = true,
            Extension::Nl2br => self.hard_breaks = true,
        }
    }
}
