//! Orrery CLI - normalize the solar-system spreadsheet and serve the result
//!
//! # Main Commands
//!
//! ```bash
//! orrery transform solar_system.csv    # Spreadsheet → celestial_bodies.json
//! orrery serve --dir public            # Static server with CORS (port 8080)
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! orrery parse solar_system.csv        # Just parse CSV to JSON rows
//! orrery check celestial_bodies.json   # Re-validate a written atlas
//! ```

use clap::{Parser, Subcommand};
use orrery::{
    parse_csv_file_auto, transform_csv, validate_body, Atlas, TransformOptions,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Normalize a celestial-body spreadsheet into a JSON atlas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output the raw rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Full pipeline: spreadsheet → normalized celestial-body atlas
    Transform {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: celestial_bodies.json; "-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip schema and invariant validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Validate a written atlas document (schema + invariants)
    Check {
        /// Atlas JSON file
        input: PathBuf,
    },

    /// Serve a directory over HTTP with permissive CORS
    Serve {
        /// Port to listen on (default: $ORRERY_PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory to serve (default: $ORRERY_SERVE_DIR or "public")
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Transform {
            input,
            output,
            no_validate,
        } => cmd_transform(&input, output.as_deref(), no_validate),

        Commands::Check { input } => cmd_check(&input),

        Commands::Serve { port, dir } => cmd_serve(port, dir).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_csv_file_auto(input)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.delimiter));
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_transform(
    input: &Path,
    output: Option<&Path>,
    no_validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let options = TransformOptions {
        skip_validation: no_validate,
    };

    let result = transform_csv(input, options)?;

    eprintln!("   Encoding: {}", result.csv_info.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.csv_info.delimiter));
    eprintln!("   Rows: {}", result.csv_info.row_count);
    eprintln!("   Columns: {}", result.csv_info.headers.join(", "));

    eprintln!("\n⚙️  Normalized: {} bodies", result.bodies.len());

    if !result.skipped.is_empty() {
        eprintln!("   ⚠️  {} rows skipped:", result.skipped.len());
        for skip in result.skipped.iter().take(5) {
            eprintln!("      • row {}: {}", skip.row, skip.reason);
        }
    }

    if !no_validate {
        eprintln!("\n✔️  Validation:");
        if result.invalid_count > 0 {
            eprintln!("   ✅ Valid: {}", result.valid_count);
            eprintln!("   ❌ Invalid: {}", result.invalid_count);
            for (key, errors) in result.validation_errors.iter().take(5) {
                eprintln!("\n   {}:", key);
                for err in errors.iter().take(3) {
                    eprintln!("     - {}", err);
                }
            }
        } else {
            eprintln!("   ✅ All {} records valid!", result.valid_count);
        }

        for err in result.invariant_errors.iter().take(5) {
            eprintln!("   ❌ Invariant: {}", err);
        }
    }

    let json = orrery::atlas_to_json(&result.bodies)?;
    match output {
        Some(p) if p.as_os_str() == "-" => println!("{}", json),
        Some(p) => {
            fs::write(p, &json)?;
            eprintln!("💾 Atlas written to: {}", p.display());
        }
        None => {
            let default = Path::new("celestial_bodies.json");
            fs::write(default, &json)?;
            eprintln!("💾 Atlas written to: {}", default.display());
        }
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Checking: {}", input.display());

    let content = fs::read_to_string(input)?;
    let atlas: Atlas = serde_json::from_str(&content)?;

    let mut valid = 0;
    let mut invalid = 0;

    for (key, body) in &atlas {
        let value = serde_json::to_value(body)?;
        match validate_body(&value) {
            Ok(()) => valid += 1,
            Err(errors) => {
                invalid += 1;
                if invalid <= 5 {
                    eprintln!("\n❌ {} invalid:", key);
                    for err in errors.iter().take(3) {
                        eprintln!("   - {}", err);
                    }
                }
            }
        }
    }

    let invariant_errors = orrery::check_atlas_invariants(&atlas);
    for err in &invariant_errors {
        eprintln!("❌ Invariant: {}", err);
    }

    eprintln!("\n📊 Results: {} valid, {} invalid, {} invariant violations",
        valid, invalid, invariant_errors.len());

    if invalid > 0 || !invariant_errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

async fn cmd_serve(port: Option<u16>, dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let port = port
        .or_else(|| std::env::var("ORRERY_PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(8080);
    let dir = dir
        .or_else(|| std::env::var("ORRERY_SERVE_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("public"));

    orrery::server::start_server(port, &dir).await?;
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
