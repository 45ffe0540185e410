use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde_json::json;

use app_env::config::{public_subset, schema::SCHEMA, AppConfig, ConfigValidationError, RuntimeMode};
use app_env::lifecycle::Startup;
use app_env::observability::init_logging;

#[derive(Parser)]
#[command(name = "env-check")]
#[command(about = "Validate the application environment without starting it", long_about = None)]
struct Cli {
    /// Dotenv file to fill in variables the environment does not set.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Validate as this mode instead of the one APP_ENV selects.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<RuntimeMode>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List every variable the application reads and exit.
    #[arg(long)]
    describe: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_mode(s: &str) -> Result<RuntimeMode, String> {
    s.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.describe {
        describe(cli.format);
        return ExitCode::SUCCESS;
    }

    let startup = match Startup::from_process(cli.env_file.as_deref()) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let startup = match cli.mode {
        Some(mode) => startup.with_mode(mode),
        None => startup,
    };
    init_logging(startup.mode());

    match startup.finish() {
        Ok(config) => {
            report(&config, cli.format);
            ExitCode::SUCCESS
        }
        Err(e) => {
            match cli.format {
                Format::Text => eprintln!("{}", e),
                Format::Json => println!("{}", failure_json(&e)),
            }
            ExitCode::FAILURE
        }
    }
}

fn report(config: &AppConfig, format: Format) {
    let public = public_subset(config).to_map();
    let server = config.server().presence();

    match format {
        Format::Text => {
            println!("Environment OK ({})", config.mode());
            println!("public:");
            for (name, value) in &public {
                println!("  {} = {}", name, value);
            }
            println!("server:");
            for (name, set) in &server {
                println!("  {} {}", name, if *set { "set" } else { "unset" });
            }
        }
        Format::Json => {
            let server: serde_json::Map<_, _> = server
                .into_iter()
                .map(|(name, set)| (name.to_string(), json!(set)))
                .collect();
            let out = json!({
                "ok": true,
                "mode": config.mode(),
                "public": public,
                "server": server,
            });
            println!("{}", out);
        }
    }
}

fn failure_json(err: &ConfigValidationError) -> serde_json::Value {
    let violations: Vec<_> = err
        .violations()
        .iter()
        .map(|v| json!({ "field": v.field, "message": v.message }))
        .collect();
    json!({ "ok": false, "violations": violations })
}

fn describe(format: Format) {
    match format {
        Format::Text => {
            for field in SCHEMA {
                let presence = if field.is_required() {
                    "required".to_string()
                } else if let Some(default) = field.default_value() {
                    format!("default {}", default)
                } else {
                    "optional".to_string()
                };
                println!(
                    "{:<26} {:<7} {:<10} {:<28} {}",
                    field.name,
                    field.partition.as_str(),
                    field.kind.as_str(),
                    presence,
                    field.description
                );
            }
        }
        Format::Json => {
            let fields: Vec<_> = SCHEMA
                .iter()
                .map(|f| {
                    json!({
                        "name": f.name,
                        "partition": f.partition,
                        "kind": f.kind,
                        "required": f.is_required(),
                        "default": f.default_value(),
                        "description": f.description,
                    })
                })
                .collect();
            println!("{}", json!(fields));
        }
    }
}
