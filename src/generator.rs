use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{bail, Context as _};
use chrono::Local;
use log::debug;

use crate::{
    context::Context,
    markdown::{self, Extensions},
    metadata::Metadata,
    renderer::Template,
};

pub(crate) mod data;
pub(crate) mod utils;

use data::PageData;
use utils::{extract_title, resolve_author};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn read_document(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        bail!("Input file '{}' does not exist", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("while reading {path:?}"))
}

fn write_document(path: &Path, html: &str) -> anyhow::Result<()> {
    let fd = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("while opening {path:?}"))?;
    let mut writer = BufWriter::new(fd);
    writer
        .write_all(html.as_bytes())
        .and_then(|_| writer.flush())
        .with_context(|| format!("while writing {path:?}"))?;
    Ok(())
}

/// Builds the final page. Fails only on a bad extension name or a broken template.
pub(crate) fn assemble(ctx: &Context, markdown_source: &str, date: String) -> anyhow::Result<String> {
    let title = extract_title(markdown_source);

    let extensions = Extensions::from_names(ctx.extensions.as_slice())
        .context("while converting markdown to HTML")?;
    let content = markdown::render(markdown_source, &extensions);

    let metadata = Metadata::load(ctx.metadata.as_deref());
    let author = resolve_author(ctx.author.as_deref(), metadata.author());

    let mut template = Template::load(ctx.template.as_deref());
    if ctx.no_style {
        template.strip_style();
    }

    let data = PageData::new(&title, &content, date, author.as_deref());
    template.render(&data)
}

/// Converts `ctx.input` and writes the page to `ctx.output`.
pub(crate) fn generate(ctx: &Context) -> anyhow::Result<()> {
    let markdown_source = read_document(&ctx.input)?;

    let date = Local::now().format(DATE_FORMAT).to_string();
    let page = assemble(ctx, &markdown_source, date)
        .with_context(|| format!("while generating from {:?}", ctx.input))?;

    debug!("writing {} bytes to {:?}", page.len(), ctx.output);
    write_document(&ctx.output, &page)
}
