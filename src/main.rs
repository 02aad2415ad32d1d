use anyhow::Context;
use clap::Parser;
use shipflex_offer::core::ConfigProvider;
use shipflex_offer::utils::{logger, validation::Validate};
use shipflex_offer::{
    load_catalog_from_path, CliConfig, Console, LocalStorage, OfferError, Shell, ShellSettings,
};
use std::io;

fn main() {
    // 參數錯誤屬於設定錯誤；--help / --version 照常以 0 結束
    let args = match CliConfig::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(5);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting ShipFlex offer assistant");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Err(e) = run(&args) {
        let exit_code = match e.downcast_ref::<OfferError>() {
            Some(err) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());

                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());
                err.exit_code()
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                6
            }
        };
        std::process::exit(exit_code);
    }
}

fn run(args: &CliConfig) -> anyhow::Result<()> {
    let config = args.resolve()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let settings = ShellSettings::from_config(&config)?;

    // 目錄是全有或全無：載入失敗就不進入選單
    let catalog = load_catalog_from_path(config.catalog_path())?;
    tracing::info!(
        "📦 Catalog ready: {} essential / {} extra categories",
        catalog.essential.len(),
        catalog.extra.len()
    );

    let terminal = Console::new(io::stdin().lock(), io::stdout(), config.display().clear_screen);
    let storage = LocalStorage::new(config.output_path().to_string());

    let mut shell = Shell::new(&catalog, terminal, storage, settings);
    shell
        .run()
        .context("interactive session ended unexpectedly")?;

    Ok(())
}
