use clap::Parser;
use std::path::Path;
use warranty_check::adapters::system::local_serial_number;
use warranty_check::config::cli::build_sinks;
use warranty_check::core::input::{collect_serials, SerialInput};
use warranty_check::core::reference::load_reference_map;
use warranty_check::core::RunReport;
use warranty_check::utils::logger;
use warranty_check::{build_client, CliConfig, HttpWarrantySource, WarrantyEngine, WarrantyError};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting warranty-check");
    tracing::debug!("CLI config: {:?}", config);

    match run(&config).await {
        Ok(report) => {
            if report.aborted {
                tracing::warn!("Stopped at the first invalid serial number (--quit-on-error)");
            }
            if let Some(output) = &config.output {
                tracing::info!("📁 Results saved to: {}", output);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ warranty-check failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run(config: &CliConfig) -> Result<RunReport, WarrantyError> {
    let settings = config.resolve()?;

    let input = SerialInput::select(config.input.as_deref().map(Path::new), &config.serials);
    let serials = collect_serials(input, local_serial_number)?;

    let client = build_client(&settings)?;
    let reference_source = settings.reference().into_source(client.clone());
    let reference = load_reference_map(reference_source.as_ref()).await?;

    // 輸出檔在第一筆查詢前建立
    let mut sinks = build_sinks(config)?;

    let source = HttpWarrantySource::from_config(client, &settings);
    let engine = WarrantyEngine::new(source, reference, !config.quit_on_error);
    engine.run(&serials, &mut sinks).await
}
