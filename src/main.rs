use legacy_compat::block::Block;
use legacy_compat::config::ProjectLayout;
use legacy_compat::fonts::{checker, cmap, metrics::FontMetrics, svg, FontData};
use legacy_compat::{diagnostics, report, survey, Result};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "legacy-compat")]
#[command(about = "Symbols for Legacy Computing compatibility tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate index.html from the CSV compatibility data.
    Report {
        /// Project root holding sections/, terminal-emulators/, svgs/ and templates/.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output file (default: <root>/index.html).
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// Template directory (default: <root>/templates, builtin if absent).
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// Check whether a font maps every codepoint of a block.
    CheckFont {
        /// Path to the font file (.ttf, .otf).
        font: PathBuf,

        #[arg(long, value_enum, default_value = "legacy_computing")]
        block: Block,

        /// Only output summary and exit code.
        #[arg(short, long)]
        quiet: bool,

        /// Show status for each codepoint.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Record per-codepoint support of a terminal emulator.
    Survey {
        /// Name of the terminal emulator.
        terminal_name: String,

        #[arg(value_enum)]
        block: Block,

        /// Output CSV (default: <terminal_name>.csv).
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Render glyphs of an extracted font to one SVG per codepoint.
    Glyphs {
        /// Font program extracted from the reference PDF.
        #[arg(long)]
        font: PathBuf,

        /// ToUnicode CMap of that font, as text.
        #[arg(long)]
        cmap: PathBuf,

        #[arg(long, value_enum)]
        block: Block,

        /// Output directory (default: svgs/<block>).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print font metrics used to size glyph SVGs.
    FontMetrics { font: PathBuf },
}

fn check_font(font: PathBuf, block: Block, quiet: bool, verbose: bool) -> ExitCode {
    let data = match FontData::read(&font) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(2);
        }
    };
    let face = match data.face() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(2);
        }
    };

    let coverage = checker::check_font(&face, block);
    if verbose {
        print!("{}", coverage.listing());
    }
    if !quiet {
        print!("\n{}", coverage.summary(block));
    }

    if coverage.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn run_survey(terminal_name: String, block: Block, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.csv", terminal_name)));
    let range = block.range();

    println!("\nTesting {} (U+{:04X} - U+{:04X})", block.name(), range.start(), range.end());
    println!("Terminal: {}", terminal_name);
    println!("Output: {}", output.display());
    println!("\n{}", survey::HELP);
    println!("{}", "-".repeat(40));

    let mut session = survey::Survey::new(block);
    let stdin = std::io::stdin();
    survey::run(&mut session, stdin.lock(), std::io::stdout())?;

    if session.results().is_empty() {
        println!("\nNo results to save.");
    } else {
        survey::save_results(session.results(), &output)?;
        println!("\nSaved {} results to {}", session.results().len(), output.display());
    }
    Ok(())
}

fn run_glyphs(font: PathBuf, cmap_path: PathBuf, block: Block, out: Option<PathBuf>) -> Result<()> {
    let out = out.unwrap_or_else(|| PathBuf::from("svgs").join(block.id()));

    let cmap_text = std::fs::read_to_string(&cmap_path).with_context(|| {
        diagnostics::error_message(format!("read CMap {}", cmap_path.display()))
    })?;
    let mapping = cmap::parse_cmap(&cmap_text)?;
    log::info!("Found {} character mappings", mapping.len());

    let data = FontData::read(&font)?;
    let face = data.face()?;
    let summary = svg::export_glyphs(&face, &mapping, block, &out)?;

    println!("Generated: {} SVGs", summary.generated);
    println!("Skipped (empty): {}", summary.skipped);
    println!("Output directory: {}", out.display());
    Ok(())
}

fn execute(cli: Cli) -> Result<ExitCode> {
    match cli.cmd {
        Commands::Report { root, out, templates } => {
            let mut layout = ProjectLayout::new(root);
            if let Some(out) = out {
                layout = layout.with_output(out);
            }
            if let Some(templates) = templates {
                layout = layout.with_templates(templates);
            }
            report::generate(&layout)?;
            eprintln!("Wrote {}", layout.output.display());
        }
        Commands::CheckFont { font, block, quiet, verbose } => {
            return Ok(check_font(font, block, quiet, verbose));
        }
        Commands::Survey { terminal_name, block, output } => run_survey(terminal_name, block, output)?,
        Commands::Glyphs { font, cmap, block, out } => run_glyphs(font, cmap, block, out)?,
        Commands::FontMetrics { font } => {
            let data = FontData::read(&font)?;
            println!("{}", FontMetrics::from_face(&data.face()?));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error encountered: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
