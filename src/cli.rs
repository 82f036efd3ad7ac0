//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::compose::compose_grid;
use crate::models::{GridConfig, Warning};
use crate::output::{export_fragments, save_png};
use crate::script::{parse_script, run_script};
use crate::session::Session;
use crate::tiler::{decode_image, tile, TilerError};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Puzzlegrid - slice images into puzzle tiles and replay action scripts
#[derive(Parser)]
#[command(name = "pzg")]
#[command(about = "Puzzlegrid - slice images into puzzle tiles and replay action scripts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Slice an image into per-cell fragment PNGs
    Slice {
        /// Input image file
        input: PathBuf,

        /// Output directory.
        /// If omitted: {input stem}_tiles/
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Grid rows
        #[arg(long, default_value_t = 10)]
        rows: u32,

        /// Grid columns
        #[arg(long, default_value_t = 10)]
        cols: u32,

        /// Square canvas side the source is scaled to before slicing
        #[arg(long, default_value_t = 500)]
        size: u32,
    },

    /// Replay a JSONL action script and render the final grid to a PNG
    Run {
        /// Script file, one JSON command per line
        script: PathBuf,

        /// Image to upload before the script runs
        #[arg(long)]
        image: Option<PathBuf>,

        /// Output PNG path.
        /// If omitted: {script stem}.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Grid rows
        #[arg(long, default_value_t = 10)]
        rows: u32,

        /// Grid columns
        #[arg(long, default_value_t = 10)]
        cols: u32,

        /// Square canvas side uploads are scaled to
        #[arg(long, default_value_t = 500)]
        size: u32,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Slice { input, output, rows, cols, size } => {
            run_slice(&input, output, GridConfig { rows, cols, canvas_size: size })
        }
        Commands::Run { script, image, output, strict, rows, cols, size } => run_run(
            &script,
            image.as_deref(),
            output,
            strict,
            GridConfig { rows, cols, canvas_size: size },
        ),
    }
}

/// Execute the slice command
fn run_slice(input: &Path, output: Option<PathBuf>, config: GridConfig) -> ExitCode {
    let bytes = match fs::read(input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let decoded = match decode_image(&bytes) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let fragments = match tile(&decoded, config.rows, config.cols, config.canvas_size) {
        Ok(f) => f,
        Err(e @ TilerError::InvalidDimensions { .. }) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let dir = output.unwrap_or_else(|| default_slice_dir(input));
    match export_fragments(&fragments, config.rows, config.cols, &dir) {
        Ok(paths) => {
            println!("Wrote {} fragments to {}", paths.len(), dir.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the run command
fn run_run(
    script_path: &Path,
    image: Option<&Path>,
    output: Option<PathBuf>,
    strict: bool,
    config: GridConfig,
) -> ExitCode {
    let mut session = Session::new(config);

    if let Some(image_path) = image {
        let bytes = match fs::read(image_path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Error: Cannot open image file '{}': {}", image_path.display(), e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };
        if let Err(e) = session.load_image(&bytes) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let script_file = match fs::File::open(script_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: Cannot open script file '{}': {}", script_path.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let parsed = parse_script(script_file);
    if let Some(code) = report_warnings(&parsed.warnings, strict) {
        return code;
    }

    let base_dir = script_path.parent().unwrap_or_else(|| Path::new("."));
    let run_warnings = run_script(&mut session, &parsed.lines, base_dir);
    if let Some(code) = report_warnings(&run_warnings, strict) {
        return code;
    }

    let sheet = match compose_grid(session.current_grid()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let out_path = output.unwrap_or_else(|| script_path.with_extension("png"));
    if let Err(e) = save_png(&sheet, &out_path) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Rendered {}x{} grid to {}",
        session.current_grid().rows(),
        session.current_grid().cols(),
        out_path.display()
    );
    ExitCode::from(EXIT_SUCCESS)
}

/// Print warnings; in strict mode they are errors and abort the run.
fn report_warnings(warnings: &[Warning], strict: bool) -> Option<ExitCode> {
    if warnings.is_empty() {
        return None;
    }
    if strict {
        for warning in warnings {
            eprintln!("Error: line {}: {}", warning.line, warning.message);
        }
        Some(ExitCode::from(EXIT_ERROR))
    } else {
        for warning in warnings {
            eprintln!("Warning: line {}: {}", warning.line, warning.message);
        }
        None
    }
}

fn default_slice_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}_tiles", stem))
}
