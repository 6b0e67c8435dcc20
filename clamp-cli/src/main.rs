//! Clamp CLI
//!
//! Clamps one element of an HTML document to a number of lines using the
//! flow layout, then prints the markup before and after.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clamp_core::{Animate, ClampOptions, ClampResult, ClampValue, clamp, clamp_deferred};
use clamp_css::{DEFAULT_VIEWPORT_WIDTH, FlowLayout};
use clamp_dom::{DomTree, NodeId};
use clamp_html::{ParseIssue, parse_document};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Clamp an element's text to a number of lines
#[derive(Parser, Debug)]
#[command(name = "clamp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Clamp the first element of a file to two lines
    clamp ./article.html

    # Clamp #summary to three lines in a 320px wide viewport
    clamp ./article.html --id summary --clamp 3 --width 320

    # Inline markup, cut at spaces only, printed as JSON
    clamp --html '<p>Some long text</p>' --split-on ' ' --json

    # Step through the truncation 25ms at a time (RUST_LOG=clamp_core=trace)
    clamp ./article.html --animate 25
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Id of the element to clamp (default: the first element)
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// Lines to keep: a count, "auto", or a height such as 60px
    #[arg(long, value_name = "N|auto|LENGTH")]
    clamp: Option<ClampValue>,

    /// Boundary to cut at, coarsest first; repeat for several
    #[arg(long = "split-on", value_name = "S")]
    split_on: Vec<String>,

    /// Marker appended where the text was cut
    #[arg(long, value_name = "S")]
    truncation_char: Option<String>,

    /// Markup placed between the cut text and the marker
    #[arg(long, value_name = "HTML")]
    truncation_html: Option<String>,

    /// Let the layout clamp lines itself instead of truncating the text
    #[arg(long)]
    native: bool,

    /// Pause this many milliseconds between truncation steps
    #[arg(long, value_name = "MS")]
    animate: Option<u64>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: f32,

    /// Read options from a JSON file; flags override its fields
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = build_options(&cli)?;
    let html = load_html(&cli)?;
    let (mut tree, issues) = parse_document(&html);
    let element = target_element(&tree, cli.id.as_deref())?;

    let layout = FlowLayout::new(cli.width).with_native_line_clamp(cli.native);
    debug!(?options, width = cli.width, native = cli.native, "clamping");

    let result = if options.animate.delay().is_some() {
        clamp_deferred(&mut tree, element, &layout, &options).await
    } else {
        clamp(&mut tree, element, &layout, &options)
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&tree, element, &result, &issues);
    }
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Options from the JSON file (or defaults) with command-line overrides.
fn build_options(cli: &Cli) -> Result<ClampOptions> {
    let mut options = match &cli.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing options in {}", path.display()))?
        }
        None => ClampOptions::default(),
    };

    if let Some(value) = &cli.clamp {
        options.clamp = value.clone();
    }
    if !cli.split_on.is_empty() {
        options.split_on_chars.clone_from(&cli.split_on);
    }
    if let Some(marker) = &cli.truncation_char {
        options.truncation_char.clone_from(marker);
    }
    if cli.truncation_html.is_some() {
        options.truncation_html.clone_from(&cli.truncation_html);
    }
    if let Some(ms) = cli.animate {
        options.animate = if ms == 0 {
            Animate::Off
        } else {
            Animate::Millis(ms)
        };
    }
    Ok(options)
}

fn load_html(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        Ok(html.clone())
    } else if let Some(path) = &cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        bail!("nothing to clamp: pass a file path or --html")
    }
}

fn target_element(tree: &DomTree, id: Option<&str>) -> Result<NodeId> {
    match id {
        Some(id) => tree
            .get_element_by_id(id)
            .with_context(|| format!("no element with id '{id}'")),
        None => tree
            .first_element()
            .context("the document contains no elements"),
    }
}

fn print_result(tree: &DomTree, element: NodeId, result: &ClampResult, issues: &[ParseIssue]) {
    println!("{}", "=== Original ===".bold().cyan());
    println!("{}", result.original);

    println!("\n{}", "=== Clamped ===".bold().cyan());
    match &result.clamped {
        Some(clamped) => println!("{clamped}"),
        None => match tree.attribute(element, "style") {
            Some(style) if style.contains("-webkit-line-clamp") => {
                println!("{}", "(native line clamp)".dimmed());
                println!("style=\"{style}\"");
            }
            _ => println!("{}", "(fits; unchanged)".dimmed()),
        },
    }

    if !issues.is_empty() {
        println!("\n{}", "=== Parse Issues ===".bold().yellow());
        for issue in issues {
            println!("  - {} (token {})", issue.message, issue.token_index);
        }
    }
}
