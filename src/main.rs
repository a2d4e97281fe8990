use anyhow::Context;
use clap::Parser;
use order_aggregator::core::report;
use order_aggregator::utils::error::ErrorSeverity;
use order_aggregator::utils::{logger, validation::Validate};
use order_aggregator::{
    AggregationError, CliConfig, ConfigProvider, OrderPipeline, OutputFormat, ReportEngine,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting order-report");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            run_report(&config).await
        }
        None => run_report(&cli).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Order report failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run_report<C>(config: &C) -> Result<(), AggregationError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let pipeline = OrderPipeline::from_config(config);
    tracing::info!(
        "Aggregating {} orders (timeout {:?})",
        pipeline.orders().len(),
        pipeline.timeout()
    );

    let engine = ReportEngine::new(pipeline);
    let show_details = config.show_details();

    match config.output_format() {
        // 文字模式在每個產品完成時立即輸出
        OutputFormat::Text => {
            engine
                .run_with(config.products(), |r| {
                    for line in report::render_text(r, show_details) {
                        println!("{}", line);
                    }
                })
                .await?;
        }
        format => {
            let reports = engine.run(config.products()).await?;
            println!("{}", report::render(&reports, format, show_details)?);
        }
    }

    Ok(())
}
