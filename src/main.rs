use anyhow::Context;
use backend_docs::config::cli::OutputTarget;
use backend_docs::config::toml_config::TomlConfig;
use backend_docs::utils::error::ErrorSeverity;
use backend_docs::utils::{logger, validation::Validate};
use backend_docs::{CliConfig, DocsConfig, DocsError, JsonFileSource, Page, PageStorage, Preprocessor};
use clap::Parser;
use std::io::Read;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let toml = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let config = DocsConfig::resolve(
        cli.data_file.as_deref(),
        cli.verbose,
        cli.log_format.as_deref(),
        toml.as_ref(),
    );

    if config.json_logs() {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("Resolved config: {:?}", config);

    let validation = toml
        .as_ref()
        .map_or(Ok(()), Validate::validate)
        .and_then(|_| config.validate())
        .and_then(|_| cli.validate());
    if let Err(e) = validation {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!("Using data file: {}", config.data_file);
    let preprocessor = Preprocessor::new(JsonFileSource::from_config(&config));

    if let Err(e) = run(&cli, &preprocessor) {
        tracing::error!(
            "Preprocessing failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run(cli: &CliConfig, preprocessor: &Preprocessor<JsonFileSource>) -> Result<(), DocsError> {
    if cli.pages.is_empty() {
        let mut markdown = String::new();
        std::io::stdin().read_to_string(&mut markdown)?;
        let page = Page::new("<stdin>", markdown);
        let output = preprocessor.process_page(&page)?;
        PageStorage::new(OutputTarget::Stdout).write_page(&page, &output)?;
        return Ok(());
    }

    let storage = PageStorage::new(cli.output_target());
    for path in &cli.pages {
        let page = storage.read_page(path).map_err(|e| e.in_page(path.as_str()))?;
        let output = preprocessor.process_page(&page)?;
        if let Some(written) = storage.write_page(&page, &output)? {
            tracing::debug!("Wrote {}", written.display());
        }
    }

    tracing::info!("Processed {} page(s)", cli.pages.len());
    Ok(())
}
