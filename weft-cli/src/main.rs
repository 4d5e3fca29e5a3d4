//! weft CLI - HTML tokenizing and tree construction tool
//!
//! Usage:
//!   weft tokens <file>        Print the token stream as JSON
//!   weft parse <file>         Print the document mode and parse errors
//!   weft dump <file>          Print the tree in html5lib test format
//!   weft serialize <file>     Parse and serialize back to HTML
//!
//! Examples:
//!   weft dump page.html
//!   weft dump --html '<table><b>x</table>'
//!   weft serialize --fragment tr --html '<td>cell'

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser as _, Subcommand};
use log::LevelFilter;
use owo_colors::OwoColorize;
use simple_logger::SimpleLogger;
use weft_common::warning::clear_warnings;
use weft_dom::{DomTree, Namespace, TreeAdapter};
use weft_html::{ParseResult, Parser, ParserOptions, dump_tree, serialize, tokenize};

/// weft - WHATWG HTML tokenizer and tree builder
#[derive(clap::Parser, Debug)]
#[command(name = "weft")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Show the tree for a file
    weft dump ./index.html

    # Tokens as JSON, with source offsets
    weft tokens --locations --html '<p class=a>Hi'

    # Parse as the contents of a <tr>
    weft dump --fragment tr --html '<td>cell'
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level for parser diagnostics
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    /// Load parser options from a JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Attach source locations to tokens and nodes
    #[arg(long, global = true)]
    locations: bool,

    /// Parse as if scripting were disabled (`<noscript>` content is markup)
    #[arg(long, global = true)]
    no_scripting: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream as JSON
    Tokens(Input),
    /// Print the document mode and every parse error
    Parse(Input),
    /// Print the tree in html5lib test format
    Dump(Input),
    /// Parse and serialize back to HTML
    Serialize(Input),
}

#[derive(clap::Args, Debug)]
struct Input {
    /// Path to an HTML file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse an HTML string directly instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Parse as a fragment in the context of this HTML element
    #[arg(long, value_name = "TAG")]
    fragment: Option<String>,
}

impl Input {
    fn read(&self) -> Result<String> {
        if let Some(html) = &self.html {
            return Ok(html.clone());
        }
        let Some(path) = &self.path else {
            anyhow::bail!("no input: pass a FILE or --html");
        };
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.log_level)
        .init()
        .context("installing logger")?;

    let options = load_options(&cli)?;
    log::debug!("parser options: {options:?}");

    match &cli.command {
        Command::Tokens(input) => {
            let html = input.read()?;
            let tokens = tokenize(&html, options.tokenizer_options());
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        Command::Parse(input) => {
            let result = parse(input, options)?;
            print_heading("Document");
            println!("mode: {}", result.quirks_mode);
            print_heading(&format!("Parse errors ({})", result.errors.len()));
            for error in &result.errors {
                println!("  {:>6}  {}", error.offset, error.code.yellow());
            }
        }
        Command::Dump(input) => {
            let result = parse(input, options)?;
            print!("{}", dump_tree(&result.adapter, &result.root));
        }
        Command::Serialize(input) => {
            let result = parse(input, options)?;
            println!("{}", serialize(&result.adapter, &result.root));
        }
    }

    clear_warnings();
    Ok(())
}

/// Options from `--config`, then the command-line switches on top.
fn load_options(cli: &Cli) -> Result<ParserOptions> {
    let mut options = match &cli.config {
        Some(path) => read_config(path)?,
        None => ParserOptions::default(),
    };
    if cli.locations {
        options = options.with_location_info(true);
    }
    if cli.no_scripting {
        options = options.with_scripting_enabled(false);
    }
    Ok(options)
}

fn read_config(path: &Path) -> Result<ParserOptions> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Parse the input as a document, or as a fragment when `--fragment` is set.
fn parse(input: &Input, options: ParserOptions) -> Result<ParseResult<DomTree>> {
    let html = input.read()?;
    let result = match &input.fragment {
        Some(tag) => {
            let mut tree = DomTree::new();
            let context = tree.create_element(tag, Namespace::Html, Vec::new());
            Parser::new(tree, options).parse_fragment(&html, Some(context))
        }
        None => Parser::new(DomTree::new(), options).parse(&html),
    };
    Ok(result)
}

fn print_heading(title: &str) {
    println!("{}", format!("=== {title} ===").bold());
}
