use clap::{CommandFactory, FromArgMatches};
use fortune_server::config::explicit_server_flags;
use fortune_server::core::ConfigProvider;
use fortune_server::utils::{logger, validation::Validate};
use fortune_server::{AppState, CliConfig, FortuneError, FortuneServer, TomlConfig};

fn load_settings(
    cli: &CliConfig,
    overrides: &[&str],
) -> Result<Box<dyn ConfigProvider>, FortuneError> {
    let settings: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            let mut config = TomlConfig::from_file(path)?;
            config.apply_cli_overrides(cli, overrides);
            config.validate()?;
            Box::new(config)
        }
        None => {
            cli.validate()?;
            Box::new(cli.clone())
        }
    };
    Ok(settings)
}

fn exit_with(e: &FortuneError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = CliConfig::command().get_matches();
    let cli = CliConfig::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let overrides = explicit_server_flags(&matches);

    // 設定檔讀取失敗時 logger 尚未初始化，直接印到 stderr
    let settings = match load_settings(&cli, &overrides) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(cli.verbose, settings.json_logs());

    tracing::info!("Starting fortune-server");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }
    if let Some(path) = &cli.config {
        if !overrides.is_empty() {
            tracing::info!(
                "🔧 {} overridden from command line/environment: {}",
                path,
                overrides.join(", ")
            );
        }
    }

    let state = AppState::new(settings.static_dir());
    let address = settings.bind_address();

    let server = match FortuneServer::bind(&address, state) {
        Ok(server) => server.with_workers(settings.workers()),
        Err(e) => exit_with(&e),
    };

    tracing::info!("🚀 Listening on http://{}", address);

    if let Err(e) = server.run().await {
        exit_with(&e);
    }

    tracing::info!("👋 fortune-server stopped");
    Ok(())
}
