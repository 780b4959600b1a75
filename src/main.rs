use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lut_compress::Tolerance;
use niivue_lut::assets::{AssetCategory, AssetLoader};
use niivue_lut::models::{AlphaRule, AppConfig};
use niivue_lut::output::{write_manifest, MANIFEST_FILE};
use niivue_lut::services::{check_file, ConversionReport, ConversionSettings, Converter};
use niivue_lut::sources::{CatalogSource, MipavFile, PaletteSource, SourceOutcome};

#[derive(Parser)]
#[command(name = "niivue-lut")]
#[command(about = "Convert dense colour lookup tables into NiiVue colormaps")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a bundled colormap definition (or the configured batch)
    Convert {
        /// Colormap name (e.g. "hot"); omit to convert the configured list
        name: Option<String>,

        /// Output directory for .json files
        #[arg(short, long)]
        outdir: Option<PathBuf>,

        /// Max allowed per-channel interpolation error
        #[arg(short, long, allow_negative_numbers = true)]
        tol: Option<i64>,

        /// Write human-readable JSON
        #[arg(long)]
        pretty: bool,

        /// Alpha channel rule
        #[arg(long, value_enum)]
        alpha: Option<AlphaRule>,
    },
    /// Convert every MIPAV .txt palette in a folder
    Mipav {
        /// Folder with 256-line "R G B" text files
        src: PathBuf,

        /// Folder for the NiiVue .json files
        dst: PathBuf,

        /// Max allowed per-channel interpolation error
        #[arg(allow_negative_numbers = true)]
        precision: Option<i64>,

        /// Write human-readable JSON
        #[arg(long)]
        pretty: bool,

        /// Alpha channel rule
        #[arg(long, value_enum)]
        alpha: Option<AlphaRule>,
    },
    /// Write manifest.json listing the colormaps in a folder
    Manifest {
        /// Folder containing .json colormaps
        dir: PathBuf,
    },
    /// Validate a NiiVue colormap file
    Check {
        /// NiiVue .json colormap
        file: PathBuf,

        /// MIPAV palette the file must reproduce
        #[arg(long)]
        palette: Option<PathBuf>,

        /// Max allowed per-channel error against --palette
        #[arg(short, long, allow_negative_numbers = true)]
        tol: Option<i64>,

        /// Alpha rule used when the file was converted
        #[arg(long, value_enum)]
        alpha: Option<AlphaRule>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract colormap definitions
        #[arg(long)]
        colormaps: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            name,
            outdir,
            tol,
            pretty,
            alpha,
        }) => run_convert_command(name.as_deref(), outdir, tol, pretty, alpha),
        Some(Commands::Mipav {
            src,
            dst,
            precision,
            pretty,
            alpha,
        }) => run_mipav_command(&src, dst, precision, pretty, alpha),
        Some(Commands::Manifest { dir }) => run_manifest_command(&dir),
        Some(Commands::Check {
            file,
            palette,
            tol,
            alpha,
        }) => run_check_command(&file, palette.as_deref(), tol, alpha),
        Some(Commands::Init {
            colormaps,
            config,
            all,
            force,
            list,
        }) => run_init_command(colormaps, config, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "niivue_lut=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Configuration file values with command-line overrides applied
fn resolve_settings(
    loader: &AssetLoader,
    outdir: Option<PathBuf>,
    tol: Option<i64>,
    pretty: bool,
    alpha: Option<AlphaRule>,
) -> anyhow::Result<(AppConfig, ConversionSettings)> {
    let tolerance = tol.map(Tolerance::new).transpose()?;
    let config = AppConfig::load_from_assets(loader);
    let mut settings = ConversionSettings::from_config_with_tolerance(&config, tolerance)
        .context("Invalid tolerance in config")?;
    if let Some(alpha) = alpha {
        settings.alpha = alpha;
    }
    if let Some(outdir) = outdir {
        settings.output_dir = outdir;
    }
    settings.pretty |= pretty;
    Ok((config, settings))
}

/// Convert one named definition, or the configured batch
fn run_convert_command(
    name: Option<&str>,
    outdir: Option<PathBuf>,
    tol: Option<i64>,
    pretty: bool,
    alpha: Option<AlphaRule>,
) -> anyhow::Result<()> {
    init_tracing();

    let loader = AssetLoader::from_env();
    let (config, settings) = resolve_settings(&loader, outdir, tol, pretty, alpha)?;
    let converter = Converter::new(settings);

    if let Some(name) = name {
        let outcome = converter.convert_one(&CatalogSource::new(loader, name));
        let mut report = ConversionReport::new();
        report.record(outcome);
        println!("{report}");
        if !report.is_success() {
            std::process::exit(2);
        }
        return Ok(());
    }

    let names = if config.colormaps.is_empty() {
        println!("No colormap list configured, processing every available definition.");
        loader.list_colormaps()
    } else {
        config.colormaps.clone()
    };
    let sources: Vec<Box<dyn PaletteSource>> = names
        .iter()
        .map(|n| Box::new(CatalogSource::new(loader.clone(), n)) as Box<dyn PaletteSource>)
        .collect();

    let report = converter.convert_all(&sources);
    println!("{report}");
    Ok(())
}

/// Convert a folder of MIPAV text palettes
fn run_mipav_command(
    src: &Path,
    dst: PathBuf,
    precision: Option<i64>,
    pretty: bool,
    alpha: Option<AlphaRule>,
) -> anyhow::Result<()> {
    init_tracing();

    if !src.is_dir() {
        bail!("Source folder {} is not a directory", src.display());
    }

    let loader = AssetLoader::from_env();
    let (_, settings) = resolve_settings(&loader, Some(dst), precision, pretty, alpha)?;
    let files = MipavFile::discover(src)
        .with_context(|| format!("Failed to list {}", src.display()))?;
    if files.is_empty() {
        println!("No .txt palettes found in {}", src.display());
        return Ok(());
    }

    let sources: Vec<Box<dyn PaletteSource>> = files
        .into_iter()
        .map(|f| Box::new(f) as Box<dyn PaletteSource>)
        .collect();
    let report = Converter::new(settings).convert_all(&sources);
    println!("{report}");
    Ok(())
}

fn run_manifest_command(dir: &Path) -> anyhow::Result<()> {
    let entries = write_manifest(dir)?;
    println!(
        "Wrote {} with {} entries.",
        dir.join(MANIFEST_FILE).display(),
        entries.len()
    );
    Ok(())
}

/// Validate a colormap file, optionally against the palette it came from
fn run_check_command(
    file: &Path,
    palette: Option<&Path>,
    tol: Option<i64>,
    alpha: Option<AlphaRule>,
) -> anyhow::Result<()> {
    let tolerance = match tol {
        Some(t) => Tolerance::new(t)?,
        None => Tolerance::default(),
    };

    let reference = match palette {
        Some(path) => match MipavFile::new(path).load(alpha.unwrap_or_default())? {
            SourceOutcome::Palette(p) => Some(p),
            SourceOutcome::Unsupported(reason) => bail!("{}: {reason}", path.display()),
        },
        None => None,
    };

    let report = check_file(file, reference.as_ref(), tolerance)
        .with_context(|| format!("Invalid colormap {}", file.display()))?;

    println!("{}: {} control points", file.display(), report.nodes);
    if let Some(err) = report.max_error {
        println!(
            "  max error: R {:.2}  G {:.2}  B {:.2}  A {:.2}  (tolerance {tolerance})",
            err[0], err[1], err[2], err[3]
        );
    }
    if !report.passed() {
        println!("  FAILED: palette not reproduced within tolerance");
        std::process::exit(1);
    }
    println!("  OK");
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    colormaps: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Colormaps:");
        for f in AssetLoader::list_embedded(AssetCategory::Colormaps) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || colormaps {
        categories.push(AssetCategory::Colormaps);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --colormaps, or --config");
        eprintln!("\nRun 'niivue-lut init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let report = AssetLoader::from_env().init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let colormaps_dir = std::env::var("COLORMAPS_DIR").ok();

    println!("niivue-lut v{VERSION}");
    println!("Dense lookup tables to NiiVue control-point colormaps\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  COLORMAPS_DIR = {}",
        colormaps_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");
    let loader = AssetLoader::from_env();

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:    {config_source}");

    let available = loader.list_colormaps().len();
    let embedded = AssetLoader::list_embedded(AssetCategory::Colormaps).len();
    match colormaps_dir {
        Some(ref path) if Path::new(path).exists() => {
            println!("  Colormaps: {path} ({available} available, {embedded} embedded)")
        }
        _ => println!("  Colormaps: embedded ({embedded} definitions)"),
    }

    println!("\nCommands:");
    println!("  niivue-lut convert    Convert bundled colormap definitions");
    println!("  niivue-lut mipav      Convert a folder of MIPAV .txt palettes");
    println!("  niivue-lut manifest   Write manifest.json for a folder");
    println!("  niivue-lut check      Validate a NiiVue colormap file");
    println!("  niivue-lut init       Extract embedded assets");
    println!("\nRun 'niivue-lut --help' for more details.");
}
