// factrack CLI - facility reporting reconciliation

mod exit_codes;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{
    EXIT_CHECK_NO_MATCH, EXIT_RECON_INCOMPLETE, EXIT_RECON_INVALID_CONFIG, EXIT_RECON_RUNTIME,
    EXIT_SUCCESS, EXIT_USAGE,
};
use factrack_recon::engine::load_roster_rows;
use factrack_recon::{ReconConfig, ReconInput, ReconResult};

#[derive(Parser)]
#[command(name = "factrack")]
#[command(about = "Track facility reporting against a master list")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  factrack run weekly.recon.toml
  factrack run weekly.recon.toml --json
  factrack run weekly.recon.toml --output result.json --csv result.csv")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write a flat CSV export (bucket,master,reported,comment) to file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  factrack validate weekly.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },

    /// Deduplicate a facility list file, one name per line to stdout
    Dedupe {
        /// List file (newline/comma/semicolon separated)
        file: PathBuf,
    },

    /// Check whether two facility names denote the same facility
    #[command(after_help = "\
Examples:
  factrack check \"Ober Kamoth Sub County Hospital\" \"Ober Kamoth Health Centre\"")]
    Check {
        name_a: String,
        name_b: String,
    },
}

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output, csv } => cmd_run(config, json, output, csv),
        Commands::Validate { config } => cmd_validate(config),
        Commands::Dedupe { file } => cmd_dedupe(file),
        Commands::Check { name_a, name_b } => cmd_check(&name_a, &name_b),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

fn load_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| recon_err(EXIT_USAGE, format!("cannot read config: {e}")))?;
    ReconConfig::from_toml(&config_str)
        .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string()))
}

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    // Resolve roster files relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut rosters: HashMap<String, Vec<String>> = HashMap::new();
    for (source_name, source_config) in &config.sources {
        let path = base_dir.join(&source_config.file);
        let data = std::fs::read_to_string(&path).map_err(|e| {
            recon_err(EXIT_RECON_RUNTIME, format!("cannot read {}: {e}", path.display()))
        })?;
        let names = load_roster_rows(source_name, &data, source_config)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.to_string()))?;
        rosters.insert(source_name.clone(), names);
    }

    let input = ReconInput { rosters };
    let result = factrack_recon::run(&config, &input)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.to_string()))?;

    // Output
    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("JSON serialization error: {e}")))?;

    // --output wins over the config's [output] json path
    let json_path = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = json_path {
        std::fs::write(path, &json_str)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(path) = csv_file {
        write_csv_export(&path, &result)?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "recon '{}': {} master / {} reported — {} matched, {} variation, {} missing, {} unmatched ({:.1}% reporting)",
        result.meta.config_name,
        s.total_master,
        s.total_reported,
        s.matched,
        s.matched_with_comment,
        s.missing,
        s.unmatched_reported,
        s.reporting_rate,
    );

    if s.missing > 0 || s.unmatched_reported > 0 {
        return Err(recon_err(
            EXIT_RECON_INCOMPLETE,
            "missing or unmatched facilities found",
        ));
    }

    Ok(())
}

fn write_csv_export(path: &Path, result: &ReconResult) -> Result<(), CliError> {
    let io_err =
        |e: csv::Error| recon_err(EXIT_RECON_RUNTIME, format!("cannot write CSV export: {e}"));

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot write CSV export: {e}")))?;
    writer
        .write_record(["bucket", "master", "reported", "comment"])
        .map_err(io_err)?;

    let report = &result.report;
    for m in &report.matched {
        let strategy = m.strategy.to_string();
        writer
            .write_record(["matched", m.master.as_str(), m.reported.as_str(), strategy.as_str()])
            .map_err(io_err)?;
    }
    for v in &report.matched_with_comment {
        writer
            .write_record(["matched_variation", v.master.as_str(), v.reported.as_str(), v.comment.as_str()])
            .map_err(io_err)?;
    }
    for name in &report.missing {
        writer.write_record(["missing", name.as_str(), "", ""]).map_err(io_err)?;
    }
    for u in &report.unmatched_reported {
        writer
            .write_record(["unmatched_reported", "", u.name.as_str(), u.comment.as_str()])
            .map_err(io_err)?;
    }

    writer
        .flush()
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot write CSV export: {e}")))?;
    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    println!("config OK: '{}' ({} sources)", config.name, config.sources.len());
    Ok(())
}

fn cmd_dedupe(file: PathBuf) -> Result<(), CliError> {
    let data = std::fs::read_to_string(&file)
        .map_err(|e| recon_err(EXIT_USAGE, format!("cannot read {}: {e}", file.display())))?;
    let names = factrack_recon::parse_list(&data);
    let deduped = factrack_recon::deduplicate(&names);
    let dropped = names.len() - deduped.len();
    for name in &deduped {
        println!("{name}");
    }
    eprintln!("{} names, {} duplicates dropped", deduped.len(), dropped);
    Ok(())
}

fn cmd_check(name_a: &str, name_b: &str) -> Result<(), CliError> {
    if let Some(strategy) = factrack_recon::match_names(name_a, name_b) {
        println!("match: {strategy}");
        return Ok(());
    }
    if let Some(comment) = factrack_recon::match_with_variation(name_a, name_b) {
        println!("no match, known variation: {comment}");
        return Err(recon_err(EXIT_CHECK_NO_MATCH, "names differ (variation detected)"));
    }
    println!("no match");
    Err(recon_err(EXIT_CHECK_NO_MATCH, "names differ"))
}
