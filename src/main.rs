//! archcfg binary
//!
//! Validates arch_config.yaml and writes the normalized config and envoy.yaml.

use archcfg::cli::{Cli, Command, generate_config_template};
use archcfg::error::{AppError, AppResult};
use archcfg::generator::Generator;
use archcfg::telemetry;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    telemetry::init(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Configuration generation failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> AppResult<()> {
    let generator = Generator::new(cli.settings());

    match &cli.command {
        None => {
            let normalized = generator.run()?;
            tracing::info!(
                rendered_config_file = %generator.settings().rendered_config_file.display(),
                envoy_config_file = %generator.settings().envoy_config_file.display(),
                llm_providers = normalized.llm_providers().len(),
                "Configuration rendered"
            );
        }
        Some(Command::Validate) => {
            let normalized = generator.check()?;
            println!(
                "{} is valid: {} cluster(s), {} llm_provider(s), agent orchestrator: {}",
                generator.settings().config_file.display(),
                normalized.clusters.len(),
                normalized.llm_providers().len(),
                normalized.agent_orchestrator.as_deref().unwrap_or("none"),
            );
        }
        Some(Command::Init { output }) => {
            let template = generate_config_template();
            match output {
                Some(path) => {
                    std::fs::write(path, template).map_err(|source| AppError::ArtifactWrite {
                        path: path.clone(),
                        source,
                    })?;
                    eprintln!("Configuration template written to {path}");
                }
                None => print!("{template}"),
            }
        }
    }

    Ok(())
}
