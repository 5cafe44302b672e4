use clap::Parser;
use landmark_prep::core::ConfigProvider;
use landmark_prep::utils::error::ErrorSeverity;
use landmark_prep::utils::{logger, validation::Validate};
use landmark_prep::{
    CliArgs, FramePipeline, GesturePreprocessor, LocalStorage, PrepConfig, PrepEngine, PrepError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match PrepConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    args.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        report_and_exit(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No frames will be processed");
        return Ok(());
    }

    let preprocessor = match GesturePreprocessor::open(&config.preprocessor) {
        Ok(preprocessor) => preprocessor,
        Err(e) => report_and_exit(&e),
    };

    let storage = LocalStorage::new(".");
    let pipeline = match FramePipeline::new(storage, config, preprocessor) {
        Ok(pipeline) => pipeline,
        Err(e) => report_and_exit(&e),
    };
    let engine = PrepEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Preprocessing completed successfully!");
            println!("✅ Features saved to: {}", output_path);
        }
        Err(e) => report_and_exit(&e),
    }

    Ok(())
}

fn report_and_exit(e: &PrepError) -> ! {
    tracing::error!(
        "❌ Preprocessing failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &PrepConfig) {
    println!("📋 Configuration Summary:");
    if let (Ok(n), Ok(width)) = (config.num_landmarks(), config.features_per_frame()) {
        println!("  Landmarks: {} (features per frame: {})", n, width);
    }
    println!("  Degenerate scale: {:?}", config.preprocessor.degenerate_scale);
    match config.input_format() {
        Ok(format) => println!("  Input: {} ({:?})", config.input_path(), format),
        Err(_) => println!("  Input: {} (unknown format)", config.input_path()),
    }
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  On frame error: {:?}", config.frame_error_policy());
    println!();
}
