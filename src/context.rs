use clap::ArgMatches;
use std::path::PathBuf;

pub(crate) const DEFAULT_EXTENSIONS: [&str; 2] = ["extra", "codehilite"];

/// Settings of a single conversion, resolved once from the command line.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub input: PathBuf,
    pub output: PathBuf,
    pub template: Option<PathBuf>,
    pub metadata: Option<PathBuf>,

    pub author: Option<String>,
    pub extensions: Vec<String>,
    pub no_style: bool,
}

impl Context {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Context> {
        let input: PathBuf = matches
            .get_one::<PathBuf>("input")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("input file is required"))?;
        let output = matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| input.with_extension("html"));

        Ok(Context {
            output,
            template: matches.get_one::<PathBuf>("template").cloned(),
            metadata: matches.get_one::<PathBuf>("metadata").cloned(),
            author: matches.get_one::<String>("author").cloned(),
            extensions: resolve_extensions(
                matches.get_one::<String>("extensions").map(String::as_str),
                matches.get_flag("toc"),
            ),
            no_style: matches.get_flag("no_style"),
            input,
        })
    }
}

/// `--extensions` replaces the defaults entirely; `--toc` always appends `toc`.
pub(crate) fn resolve_extensions(list: Option<&str>, toc: bool) -> Vec<String> {
    let mut extensions: Vec<String> = match list {
        Some(list) => list.split(',').map(|e| e.trim().to_string()).collect(),
        None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    };
    if toc {
        extensions.push("toc".to_string());
    }
    extensions
}
