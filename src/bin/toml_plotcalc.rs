use clap::Parser;
use plotcalc::config::toml_config::TomlConfig;
use plotcalc::core::ConfigProvider;
use plotcalc::utils::{logger, validation::Validate};
use plotcalc::{EtlEngine, LocalStorage, PlotPipeline};

#[derive(Parser)]
#[command(name = "toml-plotcalc")]
#[command(about = "Plot reconciliation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "plotcalc.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override bundling setting from config
    #[arg(long)]
    bundle: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.monitoring_enabled() && !args.verbose {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based plot reconciliation");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(bundle) = args.bundle {
        let compression = config.load.compression.get_or_insert_with(|| {
            plotcalc::config::toml_config::CompressionConfig {
                enabled: false,
                filename: Some("plots_bundle.zip".to_string()),
            }
        });
        compression.enabled = bundle;
        tracing::info!("🔧 Bundling overridden to: {}", bundle);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config);
        return Ok(());
    }

    let source = LocalStorage::new(".");
    let sink = LocalStorage::new(config.output_path().to_string());
    let pipeline = PlotPipeline::new(source, sink, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Reconciliation completed");
            println!("✅ Plots reconciled");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Reconciliation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Sheet: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Bundle: {}", config.bundle_outputs());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    let defaults = config.pricing_defaults();
    println!("💰 Pricing Defaults:");
    match defaults.price_per_gaj {
        Some(rate) => println!("  Rate per Gaj: {}", rate),
        None => println!("  Rate per Gaj: none (rows without a rate stay unpriced)"),
    }
    match defaults.commission_percentage {
        Some(percentage) => println!("  Commission: {}%", percentage),
        None => println!("  Commission: none"),
    }

    println!();
    println!("💾 Output Files:");
    if config.bundle_outputs() {
        println!("  Bundle: {}", config.bundle_filename());
    }
    for format in config.output_formats() {
        println!("  {} -> {}", format, config.output_filename(format));
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
