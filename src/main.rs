use anyhow::Context;
use clap::Parser;
use clinic_site::adapters::script::load_script;
use clinic_site::utils::{logger, validation::Validate};
use clinic_site::{CliConfig, Effect, SimulatedBackend, SiteConfig, SiteEngine, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting clinic-site");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match SiteConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(policy) = args.phone_policy {
        config.layout.phone_policy = policy.into();
        tracing::info!("🔧 Phone policy overridden to: {:?}", config.layout.phone_policy);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "✅ Configuration loaded: {} sections, {} forms, {} slides",
        config.layout.sections.len(),
        config.layout.forms.len(),
        config.layout.carousel.slides
    );

    let (mut engine, init_effects) = SiteEngine::start(
        config.site_name(),
        &config.layout,
        args.fragment.as_deref(),
        SimulatedBackend::new(),
        SystemClock,
    );
    init_effects.iter().for_each(print_effect);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - page-load effects only");
        return Ok(());
    }

    let Some(script_path) = args.script.as_deref() else {
        tracing::info!("No script given, nothing to replay");
        return Ok(());
    };

    let steps = load_script(script_path)
        .with_context(|| format!("failed to load event script '{}'", script_path))?;
    tracing::info!("▶️ Replaying {} steps from {}", steps.len(), script_path);

    let emitted = engine.run_script(&steps, args.realtime, print_effect).await;

    tracing::info!(
        "✅ Replay finished: {} effects, virtual time {:?}, {} timers pending",
        emitted,
        engine.now(),
        engine.scheduler().pending_count()
    );
    Ok(())
}

fn print_effect(effect: &Effect) {
    match serde_json::to_string(effect) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::warn!("Could not serialize effect {:?}: {}", effect, e),
    }
}
