//! Command line interface for rendering AsyncAPI documents into a static HTML page.

use std::{
    env,
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::{self, Command, Stdio},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use libasyncpage::{AsyncPage, RenderOptions, highlight_html, parse_param};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Pager used when `$PAGER` is not set.
const DEFAULT_PAGER: &str = "less -R";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AsyncAPI document to render (JSON or YAML)
    #[arg(default_value = "asyncapi.yaml")]
    document: PathBuf,

    /// Directory the page is written to
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Text size limit handed to the diagram engine
    #[arg(long, env = "ASYNCPAGE_MAX_TEXT_SIZE")]
    max_text_size: Option<u32>,

    /// Generator parameter in name=value form, may be repeated
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,

    /// Print the page instead of writing it
    #[arg(long, default_value_t = false)]
    stdout: bool,

    /// Output the normalized document model as JSON instead of rendering
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Colorize printed output
    #[arg(long, default_value = "auto", value_parser = ["auto", "always", "never"], env = "ASYNCPAGE_COLOR")]
    color: String,

    /// Disable paging
    #[arg(long, default_value_t = false)]
    no_page: bool,

    /// Omit the settings comment at the top of the page
    #[arg(long, default_value_t = false)]
    no_frontmatter: bool,

    /// Only log warnings and errors
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    /// Resolve render options: defaults, then `--param` values, then `--max-text-size`.
    fn render_options(&self) -> Result<RenderOptions> {
        let params = self
            .params
            .iter()
            .map(|raw| parse_param(raw))
            .collect::<libasyncpage::Result<Vec<_>>>()?;
        let mut options = RenderOptions::from_params(params)?;
        if let Some(max_text_size) = self.max_text_size {
            options = options.with_max_text_size(max_text_size);
        }
        Ok(options)
    }
}

/// Install the tracing subscriber, honouring `RUST_LOG` when set.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "asyncpage={default_level},libasyncpage={default_level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if cli.raw && cli.stdout {
        bail!("--raw and --stdout cannot be used together");
    }

    let options = cli.render_options()?;
    debug!(?options, "resolved render options");

    let page = AsyncPage::new()
        .with_options(options)
        .with_frontmatter(!cli.no_frontmatter);

    if cli.raw {
        let json = page
            .raw_json(&cli.document)
            .with_context(|| format!("failed to load {}", cli.document.display()))?;
        return emit(cli, json, false);
    }

    if cli.stdout {
        let projection = page
            .render(&cli.document)
            .with_context(|| format!("failed to load {}", cli.document.display()))?;
        let Some(artifact) = projection.into_artifact() else {
            info!("document has no channels, nothing to print");
            return Ok(());
        };
        return emit(cli, artifact.into_contents(), true);
    }

    let written = page
        .generate(&cli.document, &cli.output)
        .with_context(|| format!("failed to generate page for {}", cli.document.display()))?;
    if let Some(path) = written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Print output, highlighting HTML and paging when attached to a terminal.
fn emit(cli: &Cli, output: String, is_html: bool) -> Result<()> {
    let terminal = io::stdout().is_terminal();
    let highlight = match cli.color.as_str() {
        "never" => false,
        "always" => true,
        _ => terminal,
    };

    let output = if highlight && is_html {
        highlight_html(&output)?
    } else {
        output
    };

    if terminal && !cli.no_page {
        page_output(output)
    } else {
        println!("{output}");
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

/// Pipe `content` through the user's pager, falling back to stdout if none can be found.
fn page_output(content: String) -> Result<()> {
    let pager = env::var("PAGER").unwrap_or_else(|_| DEFAULT_PAGER.to_string());
    let words = shell_words::split(&pager).with_context(|| format!("invalid PAGER: {pager}"))?;
    let Some((program, args)) = words.split_first() else {
        println!("{content}");
        return Ok(());
    };
    if which::which(program).is_err() {
        debug!(pager = %program, "pager not found, printing directly");
        println!("{content}");
        return Ok(());
    }

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start pager {program}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        // Quitting the pager early closes the pipe.
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            debug!(error = %e, "pager stopped reading");
        }
    }

    let status = child.wait().context("failed to wait for pager")?;
    if !status.success() {
        warn!(%status, "pager exited unsuccessfully");
    }
    Ok(())
}
