use anyhow::Context;
use card_insight::config::{Command, OutputFormat};
use card_insight::core::report::cycles_to_csv;
use card_insight::domain::model::{EmailPreferenceUpdate, UserProfile};
use card_insight::domain::ports::{Clock, ConfigProvider};
use card_insight::utils::error::ErrorSeverity;
use card_insight::utils::validation::{parse_date, parse_utc_offset, Validate};
use card_insight::utils::logger;
use card_insight::{
    AppConfig, CliConfig, DigestPlanner, FixedClock, InsightService, LocalStorage, ReportEngine,
    SystemClock,
};
use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use serde::Serialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "card-insight.toml";

/// Either the wall clock or a pinned date from `--on`.
#[derive(Clone, Copy)]
enum RunClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock for RunClock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            RunClock::System(c) => c.now(),
            RunClock::Fixed(c) => c.now(),
        }
    }

    fn offset(&self) -> FixedOffset {
        match self {
            RunClock::System(c) => c.offset(),
            RunClock::Fixed(c) => c.offset(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting {} ({})", config.app.name, config.app.environment);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 權限不足
            ErrorSeverity::Medium => 2,   // 輸入錯誤
            ErrorSeverity::High => 1,     // 配置錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn load_config(cli: &CliConfig) -> anyhow::Result<AppConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => AppConfig::from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Failed to load config file '{}'", DEFAULT_CONFIG_FILE))?,
        None => AppConfig::default(),
    };

    // 應用命令列覆蓋設定
    if let Some(cycles) = cli.cycles {
        config.forecast.cycle_count = cycles;
    }
    if let Some(path) = &cli.output_path {
        config.output.path = path.clone();
    }

    Ok(config)
}

fn build_user(cli: &CliConfig) -> card_insight::Result<UserProfile> {
    let birth_date = cli
        .birth_date
        .as_deref()
        .map(|value| parse_date("birth_date", value))
        .transpose()?;

    let mut user = UserProfile::new(cli.email.clone(), cli.plan, birth_date);
    user.full_name = cli.name.clone();

    if let Some(timezone) = cli.timezone.as_deref() {
        parse_utc_offset("timezone", timezone)?;
        if let Some(profile) = user.profile.as_mut() {
            profile.timezone = Some(timezone.trim().to_string());
        }
    }
    Ok(user)
}

fn build_clock(cli: &CliConfig, config: &AppConfig) -> card_insight::Result<RunClock> {
    match cli.on.as_deref() {
        Some(value) => {
            let day = parse_date("on", value)?;
            tracing::info!("Using fixed date {}", day);
            Ok(RunClock::Fixed(FixedClock::on_in(day, config.utc_offset())))
        }
        None => Ok(RunClock::System(SystemClock::new(config.utc_offset()))),
    }
}

fn print_json<T: Serialize>(value: &T) -> card_insight::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: &CliConfig, config: AppConfig) -> card_insight::Result<()> {
    let mut user = build_user(cli)?;
    let clock = build_clock(cli, &config)?;
    let service = InsightService::new(clock);
    let cycle_count = config.cycle_count();

    match &cli.command {
        Command::Blueprint => print_json(&service.personal(&user)?)?,
        Command::Cycles { format } => {
            let cycles = service.forecast(&user, cycle_count)?.yearly_cycles;
            match format {
                OutputFormat::Json => print_json(&cycles)?,
                OutputFormat::Csv => print!("{}", String::from_utf8_lossy(&cycles_to_csv(&cycles)?)),
            }
        }
        Command::Today => print_json(&service.today(&user)?)?,
        Command::Compatibility { partner } => {
            let partner_birth_date = parse_date("partner", partner)?;
            print_json(&service.compatibility(&user, partner_birth_date)?)?
        }
        Command::Forecast => print_json(&service.forecast(&user, cycle_count)?)?,
        Command::Export => {
            let forecast = service.forecast(&user, cycle_count)?;
            let storage = LocalStorage::new(config.output_path().to_string());
            let engine = ReportEngine::new(storage, config.clone());

            let output_path = engine.export(&forecast).await?;
            tracing::info!("✅ Export completed");
            println!("📁 Output saved to: {}", output_path);
        }
        Command::Digest {
            dry_run,
            daily_enabled,
            cycle_enabled,
        } => {
            let storage = LocalStorage::new(config.output_path().to_string());
            let engine = ReportEngine::new(storage, config.clone());
            let planner = DigestPlanner::new(clock, config.digest_settings());

            user.email_preferences = engine.load_preferences(&user.email).await?;

            let update = EmailPreferenceUpdate {
                daily_digest_enabled: *daily_enabled,
                cycle_digest_enabled: *cycle_enabled,
            };
            if !update.is_empty() {
                update.apply(&mut user.email_preferences);
                engine.save_preferences(&user.email, &user.email_preferences).await?;
                tracing::info!(
                    "Digest switches for {}: daily={}, cycle={}",
                    user.email,
                    user.email_preferences.daily_digest_enabled,
                    user.email_preferences.cycle_digest_enabled
                );
            }

            let messages = planner.run(&user);

            if messages.is_empty() {
                println!("No digests due for {}", user.email);
                return Ok(());
            }

            if *dry_run {
                tracing::info!("🔍 DRY RUN MODE - digests are not queued");
                return print_json(&messages);
            }

            let written = engine.write_outbox(&messages).await?;
            planner.acknowledge(&mut user.email_preferences, &messages);
            engine.save_preferences(&user.email, &user.email_preferences).await?;

            for path in written {
                println!("📨 {}", path);
            }
        }
    }

    Ok(())
}
