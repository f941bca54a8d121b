//! sheetplot CLI - charts from spreadsheets

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sheetplot::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetplot")]
#[command(author, version, about = "Render charts from spreadsheet data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one chart per region
    Render {
        /// Input spreadsheet file (xlsx, csv)
        input: PathBuf,

        /// Chart type: bar, stacked-bar, line, pie, table
        #[arg(short, long)]
        chart: ChartType,

        /// Region key, e.g. wet-tropics (repeatable)
        #[arg(short, long = "region", required = true)]
        regions: Vec<Region>,

        /// Output width in pixels (0 or omitted: derived)
        #[arg(long, default_value_t = 0)]
        width: u32,

        /// Output height in pixels (0 or omitted: derived)
        #[arg(long, default_value_t = 0)]
        height: u32,

        /// Output format: svg, png, csv, html, docx, emf, eps
        #[arg(short, long, default_value = "svg")]
        format: Format,

        /// Chart parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Output file for a single region (default: stdout)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Directory receiving one `<region>.<ext>` file per region
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Skip loading system fonts; PNG text is not drawn
        #[arg(long)]
        no_system_fonts: bool,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input spreadsheet file
        input: PathBuf,
    },

    /// Print the value a selector resolves to
    Select {
        /// Input spreadsheet file
        input: PathBuf,

        /// `[Sheet!]A1` reference
        selector: String,

        /// Print the raw value instead of the display rendering
        #[arg(long)]
        raw: bool,
    },
}

struct RenderArgs {
    request: ChartRequest,
    output: Option<PathBuf>,
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            chart,
            regions,
            width,
            height,
            format,
            params,
            output,
            out_dir,
            no_system_fonts,
        } => {
            let mut request = ChartRequest::new(chart, format)
                .regions(regions)
                .dimensions(Dimensions::new(width, height))
                .raster(RasterOptions {
                    load_system_fonts: !no_system_fonts,
                });
            for (key, value) in params {
                request = request.param(key, value);
            }
            render(
                &input,
                RenderArgs {
                    request,
                    output,
                    out_dir,
                },
            )
        }
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Select {
            input,
            selector,
            raw,
        } => select(&input, &selector, raw),
    }
}

/// `RUST_LOG` controls verbosity; `log` records from the libraries are captured too
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn open(input: &Path) -> Result<Spreadsheet> {
    Spreadsheet::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn render(input: &Path, args: RenderArgs) -> Result<()> {
    let RenderArgs {
        request,
        output,
        out_dir,
    } = args;

    if out_dir.is_none() && request.regions.len() > 1 {
        bail!(
            "{} regions requested; use --out-dir to write one file per region",
            request.regions.len()
        );
    }

    let sheet = open(input)?;
    let source = sheet.source();
    let outputs = render_charts(&[&source], &request).with_context(|| {
        format!(
            "Failed to render {} as {}",
            request.chart_type.key(),
            request.format
        )
    })?;

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create '{}'", dir.display()))?;
        for (region, output) in request.regions.iter().zip(&outputs) {
            let path = dir.join(format!("{}.{}", region.key(), request.format.extension()));
            write_file(&path, output)?;
        }
    } else if let Some(path) = output {
        for output in &outputs {
            write_file(&path, output)?;
        }
    } else {
        let mut stdout = io::stdout().lock();
        for output in &outputs {
            stdout
                .write_all(output.content())
                .context("Failed to write to stdout")?;
        }
        stdout.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}

fn write_file(path: &Path, output: &Representation) -> Result<()> {
    std::fs::write(path, output.content())
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    eprintln!(
        "Wrote {} bytes ({}) to '{}'",
        output.content().len(),
        output.content_type(),
        path.display()
    );
    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let sheet = open(input)?;
    for (i, name) in sheet.source().sheet_names().iter().enumerate() {
        println!("{}: {}", i, display_name(name));
    }
    Ok(())
}

/// Names with surrounding whitespace are quoted so the whitespace is visible
fn display_name(name: &str) -> String {
    if name.trim() != name {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

fn select(input: &Path, selector: &str, raw: bool) -> Result<()> {
    let sheet = open(input)?;
    let value = sheet
        .source()
        .select(selector)
        .with_context(|| format!("Failed to resolve '{}'", selector))?;
    if raw {
        println!("{}", value.format("value")?);
    } else {
        println!("{}", value);
    }
    Ok(())
}
