mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use price_cards::{CardOptions, PaperSize, VerticalAnchor};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pcards", about = "Printable price card generator", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a price card PDF from a CSV file or Excel workbook
    Generate {
        /// Input .csv or .xlsx file (columns: producto, precio)
        #[arg(short, long)]
        input: PathBuf,

        /// Card background image (PNG or JPEG)
        #[arg(short, long)]
        background: PathBuf,

        /// Output PDF file; defaults to a timestamped name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Options file written by `init-config`
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Currency label placed before each price
        #[arg(long)]
        currency: Option<String>,

        /// Center the price and name block vertically
        #[arg(long)]
        centered: bool,

        /// Fail on unparseable prices or a missing background
        #[arg(long)]
        strict: bool,
    },

    /// Show how many cards fit on a page
    Grid {
        /// Options file written by `init-config`
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Also report how many pages this many cards need
        #[arg(long)]
        records: Option<usize>,
    },

    /// Write the default options as JSON
    InitConfig {
        /// Destination file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    A4,
    A5,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
        }
    }
}

async fn load_options(config: Option<&Path>, paper: Option<PaperArg>) -> Result<CardOptions> {
    let mut options = match config {
        Some(path) => CardOptions::load(path)
            .await
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => CardOptions::default(),
    };
    if let Some(paper) = paper {
        options.paper = paper.into();
    }
    Ok(options)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Generate {
            input,
            background,
            output,
            config,
            paper,
            currency,
            centered,
            strict,
        } => {
            let mut options = load_options(config.as_deref(), paper).await?;
            if let Some(currency) = currency {
                options.currency_label = currency;
            }
            if centered {
                options.anchor = VerticalAnchor::Centered;
            }
            if strict {
                options.strict = true;
            }

            let output = output.unwrap_or_else(|| {
                PathBuf::from(price_cards::session::output_file_name(&chrono::Local::now()))
            });

            let report = price_cards::generate_price_pdf(&input, &background, &output, &options)
                .await
                .with_context(|| format!("Failed to generate {}", output.display()))?;

            println!(
                "Generated {} cards on {} pages → {}",
                report.cards,
                report.pages,
                output.display()
            );
            if report.has_warnings() {
                println!(
                    "  {} of {} cards rendered with warnings",
                    report.cards_with_warnings(),
                    report.cards
                );
                if report.price_warnings > 0 {
                    println!("  Blank prices: {}", report.price_warnings);
                }
                if report.asset_warnings > 0 {
                    println!("  Background missing, placeholders drawn");
                }
            }
        }

        Commands::Grid {
            config,
            paper,
            records,
        } => {
            let options = load_options(config.as_deref(), paper).await?;
            options.validate()?;

            let (width, height) = options.paper.dimensions_pt();
            let grid = price_cards::compute_grid(width, height, &options.geometry);
            println!("Paper: {} ({} x {} pt)", options.paper.name(), width, height);
            println!(
                "  Card: {} x {} pt",
                options.geometry.width, options.geometry.height
            );
            println!("  Columns: {}", grid.columns);
            println!("  Rows per page: {}", grid.rows_per_page);
            println!("  Cards per page: {}", grid.cards_per_page);
            if let Some(records) = records {
                println!("  Pages for {} cards: {}", records, grid.page_count(records));
            }
        }

        Commands::InitConfig { path } => {
            CardOptions::default()
                .save(&path)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default options → {}", path.display());
        }
    }

    Ok(())
}
