//! SWIM Service Description Validator CLI
//!
//! Command-line interface for validating a service description against the
//! DESCRIPTION-V2 schema.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use swim_validate::{
    json_report, load_json, load_schema, locate_schema, render_error, validate_instance,
    SchemaOrigin, ValidateError, SUCCESS_MESSAGE,
};

#[derive(Parser)]
#[command(name = "swim-validate")]
#[command(
    about = "Validate SWIM Service Description JSON documents against the DESCRIPTION-V2 schema."
)]
#[command(after_help = "Examples:
  swim-validate service.json
  swim-validate service.json --schema custom-schema.json")]
#[command(version)]
struct Cli {
    /// Path to the JSON document to validate
    json_document: PathBuf,

    /// Path to the schema file (default: service-metadata-schema/description/DESCRIPTION-V2.json)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress progress output, only show the result
    #[arg(short, long)]
    quiet: bool,

    /// Output the result as JSON (for automation)
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Progress lines go to stdout only in text mode.
    fn progress(&self, msg: &str) {
        if !self.quiet && !self.json {
            println!("{}", msg);
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        // usage errors exit with 1 like every other failure
        Err(e) => {
            e.print().ok();
            return ExitCode::FAILURE;
        }
    };

    let result = run(&cli);

    if cli.json {
        println!("{}", json_report(&result));
    } else {
        match &result {
            Ok(()) => println!("{}", SUCCESS_MESSAGE),
            Err(e) => eprintln!("{}", render_error(e)),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(e.exit_code() as u8),
    }
}

fn run(cli: &Cli) -> Result<(), ValidateError> {
    let location = locate_schema(cli.schema.as_deref(), Path::new("."))?;

    if cli.verbose && !cli.json {
        match location.origin {
            SchemaOrigin::Submodule => {
                println!("Using schema from submodule: {}", location.path.display())
            }
            SchemaOrigin::Explicit => println!("Using schema: {}", location.path.display()),
        }
    }

    cli.progress(&format!(
        "Loading JSON document: {}",
        cli.json_document.display()
    ));
    let instance = load_json(&cli.json_document)?;

    cli.progress(&format!("Loading schema: {}", location.path.display()));
    let schema = load_schema(&location.path)?;

    cli.progress("Validating...");
    validate_instance(&schema, &instance)
}
