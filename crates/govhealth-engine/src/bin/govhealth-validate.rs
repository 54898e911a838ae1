//! Assurance CLI: validates every organization in a JSON export and gates
//! CI on the result.  Exit code 0 when every organization passed, 1 when
//! any failed, 2 on input or usage errors.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use govhealth_engine::directory::{GovernanceDirectory, InMemoryDirectory};
use govhealth_engine::validation_pipeline::{validate, ValidationResult};

#[derive(Parser, Debug)]
#[command(name = "govhealth-validate", version, about = "Governance health assurance harness")]
struct Cli {
    /// Path to a JSON export of organization records.
    #[arg(long)]
    input: PathBuf,
    /// Validate a single organization instead of the whole export.
    #[arg(long)]
    org: Option<String>,
    /// Emit machine-readable JSON instead of formatted text.
    #[arg(long)]
    json: bool,
    /// Suppress per-dimension detail.
    #[arg(long)]
    brief: bool,
}

#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    results: &'a [ValidationResult],
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let directory = InMemoryDirectory::from_json_file(&cli.input)?;

    let records = match &cli.org {
        Some(org_id) => {
            let record = directory
                .organization(org_id)
                .ok_or_else(|| anyhow::anyhow!("unknown organization `{org_id}`"))?;
            vec![record]
        }
        None => directory.organizations(),
    };

    if records.is_empty() {
        anyhow::bail!("export contains no organizations");
    }

    let results: Vec<ValidationResult> = records
        .iter()
        .map(|record| validate(&record.profile, &record.findings, &record.tech_stack))
        .collect();
    let all_passed = results.iter().all(|result| result.passed);

    if cli.json {
        let envelope = JsonOut {
            ok: all_passed,
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        for result in &results {
            print!("{}", render_text(result, cli.brief));
        }
        println!(
            "{} organization(s) validated, {} passed",
            results.len(),
            results.iter().filter(|result| result.passed).count()
        );
    }

    Ok(all_passed)
}

fn render_text(result: &ValidationResult, brief: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: GHI {:.2} grade {} [{}]\n",
        result.organization_id,
        result.health_index.ghi,
        result.health_index.grade,
        if result.passed { "PASS" } else { "FAIL" },
    ));

    if !brief {
        for (dimension, score) in &result.health_index.dimensions {
            out.push_str(&format!("  {dimension:<16} {score:>6.2}\n"));
        }
        out.push_str(&format!(
            "  findings: {} unresolved ({} critical, {} high); stack: {} item(s), {} eol\n",
            result.audit_readiness.unresolved_total,
            result.audit_readiness.critical_count,
            result.audit_readiness.high_count,
            result.lifecycle_risk.item_total,
            result.lifecycle_risk.eol_count,
        ));
        for framework in &result.compliance.frameworks {
            out.push_str(&format!(
                "  applies: {}{}\n",
                framework.framework,
                if framework.mandatory { " (mandatory)" } else { "" },
            ));
        }
    }

    for issue in &result.issues {
        out.push_str(&format!("  issue: {issue}\n"));
    }

    out
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
