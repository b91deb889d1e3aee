use clap::Parser;
use fritz_phonebook::utils::{logger, validation::Validate};
use fritz_phonebook::{CliConfig, EtlEngine, EtlError, LocalStorage, PhonebookPipeline};

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Phonebook conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting fritz-phonebook");
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置，任何處理之前
    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let pipeline = PhonebookPipeline::new(LocalStorage::new(), config);
    let mut engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            println!("✅ Phonebook written with {} contacts", summary.contact_count);
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(e) => fail(&e),
    }
}
