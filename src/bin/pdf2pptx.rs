//! CLI binary for edgequake-pdf2pptx.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdf2pptx::pipeline::input::{default_output_path, resolve_local};
use edgequake_pdf2pptx::{
    convert, extract_comments, inspect, ConversionConfig, ConversionProgressCallback,
    ConversionReport, ConversionWarning, ProgressCallback, RasterFormat, DEFAULT_DPI, MAX_DPI,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live progress bar plus one log line per
/// slide, with the number of comments that went into its notes.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Per-page wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
}

impl CliProgressCallback {
    /// Spinner until `on_conversion_start` tells us the page count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading comments…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} slides  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Rendering");
        self.bar.reset_eta();
    }

    fn elapsed_secs(&self, page_num: usize) -> f64 {
        self.start_times
            .lock()
            .ok()
            .and_then(|mut m| m.remove(&page_num))
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Building {total_pages} slides…"))
        ));
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        if let Ok(mut m) = self.start_times.lock() {
            m.insert(page_num, Instant::now());
        }
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, total: usize, comment_count: usize) {
        let notes = match comment_count {
            0 => dim("no notes"),
            1 => "1 comment".to_string(),
            n => format!("{n} comments"),
        };
        self.bar.println(format!(
            "  {} Slide {:>3}/{:<3}  {:<12}  {}",
            green("✓"),
            page_num,
            total,
            notes,
            dim(&format!("{:.1}s", self.elapsed_secs(page_num))),
        ));
        self.bar.inc(1);
    }

    fn on_warning(&self, warning: &ConversionWarning) {
        self.bar
            .println(format!("  {} {}", yellow("⚠"), yellow(&warning.to_string())));
    }

    fn on_conversion_complete(&self, _total_pages: usize, _slides_written: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert, deck lands in output/review.pptx
  pdf2pptx -i review.pdf

  # Explicit output, lower resolution, JPEG pictures
  pdf2pptx -i review.pdf -o decks/review.pptx --dpi 200 --format jpeg

  # Encrypted PDF
  pdf2pptx -i secret.pdf --password hunter2

  # Show the comments that would become speaker notes
  pdf2pptx -i review.pdf --extract-only

  # Same, as JSON keyed by 0-based page index
  pdf2pptx -i review.pdf --extract-only --json

  # Inspect PDF metadata
  pdf2pptx -i review.pdf --inspect-only

  # Machine-readable conversion report
  pdf2pptx -i review.pdf --json > report.json

WHAT BECOMES A SPEAKER NOTE:
  Text (sticky-note) and Highlight annotations that carry text. Links,
  ink, stamps, form widgets and the like are ignored. Several comments on
  one page are joined one per line, in the order they appear in the PDF.

ENVIRONMENT VARIABLES:
  PDF2PPTX_INPUT          Input PDF
  PDF2PPTX_OUTPUT         Output deck
  PDF2PPTX_DPI            Rendering DPI
  PDF2PPTX_FORMAT         png or jpeg
  PDF2PPTX_PASSWORD       PDF user password
  PDF2PPTX_SCRATCH_DIR    Parent of the temporary raster directory
  PDFIUM_LIB_PATH         Directory or file of an existing libpdfium
  RUST_LOG                Override the log filter (e.g. edgequake_pdf2pptx=debug)
"#;

/// Convert annotated PDFs to PowerPoint decks with comments as speaker notes.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2pptx",
    version,
    about = "Convert PDF pages to PowerPoint slides, with PDF comments as speaker notes",
    long_about = "Convert a PDF into a .pptx deck: every page becomes one full-bleed picture \
slide sized like the first page, and the sticky-note comments on each page become that \
slide's speaker notes.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input PDF file.
    #[arg(short = 'i', long = "pdf-input-path", env = "PDF2PPTX_INPUT")]
    input: PathBuf,

    /// Output .pptx path [default: output/<input stem>.pptx].
    #[arg(short = 'o', long = "ppt-output-path", env = "PDF2PPTX_OUTPUT")]
    output: Option<PathBuf>,

    /// Rendering DPI.
    #[arg(short, long, env = "PDF2PPTX_DPI", default_value_t = DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(1..=MAX_DPI as i64))]
    dpi: u32,

    /// Picture format embedded in the slides.
    #[arg(long, env = "PDF2PPTX_FORMAT", value_enum, default_value = "png")]
    format: FormatArg,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2PPTX_PASSWORD")]
    password: Option<String>,

    /// Parent directory for temporary page rasters.
    #[arg(long, env = "PDF2PPTX_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,

    /// Do not copy PDF title / author / subject into the deck.
    #[arg(long)]
    no_metadata: bool,

    /// Print the extracted comments per page, write nothing.
    #[arg(long, conflicts_with = "inspect_only")]
    extract_only: bool,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Structured JSON output instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Png,
    Jpeg,
}

impl From<FormatArg> for RasterFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Png => RasterFormat::Png,
            FormatArg::Jpeg => RasterFormat::Jpeg,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", red("✘"), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs; warnings still reach the user
    // through `on_warning`.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Input check ──────────────────────────────────────────────────────
    // Nothing in the library runs until the input is known to be a PDF.
    let input = resolve_local(&cli.input).context("Cannot use input PDF")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let password = cli.password.clone();
        let meta = tokio::task::block_in_place(|| inspect(&input, password.as_deref()))
            .context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some((w, h)) = meta.first_page_size {
                println!(
                    "Page 1:       {:.0} × {:.0} pt ({:.2} × {:.2} in)",
                    w,
                    h,
                    w / 72.0,
                    h / 72.0
                );
            }
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Extract-only mode ────────────────────────────────────────────────
    if cli.extract_only {
        let config = build_config(&cli, None)?;
        let comments = tokio::task::block_in_place(|| extract_comments(&input, &config));

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&comments).context("Failed to serialize comments")?
            );
        } else if comments.is_empty() {
            eprintln!("{} no comments found in {}", yellow("⚠"), input.display());
        } else {
            for (page, notes) in comments.iter() {
                println!("{}", bold(&format!("Page {}", page + 1)));
                for note in notes {
                    println!("  - {}", note.replace('\n', "\n    "));
                }
            }
            if !cli.quiet {
                eprintln!(
                    "{} {} comments on {} pages",
                    green("✔"),
                    comments.total_comments(),
                    comments.len()
                );
            }
        }
        return Ok(());
    }

    // ── Conversion ───────────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input));

    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    let report = convert(&input, &output_path, &config)
        .await
        .with_context(|| format!("Conversion of '{}' failed", input.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else if !cli.quiet {
        print_summary(&report, show_progress);
    }
    Ok(())
}

fn print_summary(report: &ConversionReport, warnings_shown: bool) {
    if report.comment_count == 0 {
        eprintln!(
            "{} no comments found; slides have no speaker notes",
            yellow("⚠")
        );
    }
    if !warnings_shown {
        for w in &report.warnings {
            eprintln!("{} {}", yellow("⚠"), w);
        }
    }
    eprintln!(
        "{}  {} slides  {} with notes  {}ms  →  {}",
        green("✔"),
        report.slide_count,
        report.slides_with_notes,
        report.total_duration_ms,
        bold(&report.output_path.display().to_string()),
    );
    eprintln!(
        "   {}",
        dim(&format!(
            "{:.2} × {:.2} in @ {} DPI  ({} comments)",
            report.slide_width_emu as f64 / 914_400.0,
            report.slide_height_emu as f64 / 914_400.0,
            report.dpi,
            report.comment_count
        ))
    );
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .dpi(cli.dpi)
        .raster_format(cli.format.into())
        .include_metadata(!cli.no_metadata);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(ref dir) = cli.scratch_dir {
        builder = builder.scratch_dir(dir.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
