use clap::{command, value_parser, Arg, ArgAction};
use context::Context;
use generator::generate;
use std::path::PathBuf;

mod context;
mod generator;
mod markdown;
mod metadata;
mod renderer;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = command!()
        .about("Convert a Markdown file to a standalone HTML page")
        .args([
            Arg::new("input")
                .help("Input markdown file")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output HTML file (default: input file with .html extension)")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("template")
                .short('t')
                .long("template")
                .help("Custom HTML template file")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("metadata")
                .short('m')
                .long("metadata")
                .help("Metadata JSON file for additional information")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("author")
                .short('a')
                .long("author")
                .help("Author name to include in the HTML"),
            Arg::new("extensions")
                .short('e')
                .long("extensions")
                .help("Comma-separated list of markdown extensions to use"),
            Arg::new("toc")
                .long("toc")
                .help("Include table of contents")
                .action(ArgAction::SetTrue),
            Arg::new("no_style")
                .long("no-style")
                .help("Exclude CSS styling")
                .action(ArgAction::SetTrue),
        ])
        .get_matches();

    let ctx = Context::from_matches(&matches)?;
    generate(&ctx)?;
    println!("HTML file successfully created: {}", ctx.output.display());

    Ok(())
}
