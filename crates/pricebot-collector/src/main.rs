//! Price poller CLI.

use clap::{Parser, Subcommand};
use pricebot_collector::{gate, run_cycle, Scheduler};
use pricebot_core::{init_logging, AppConfig, CycleOutcome, LogConfig, LogFormat};
use pricebot_exchange::BitpinProvider;
use pricebot_notification::{TelegramConfig, TelegramSender};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "pricebot")]
#[command(about = "Bitpin price poller for Telegram channels", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 로그 레벨 (trace, debug, info, warn, error). 없으면 RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact). 없으면 LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// 데몬 모드: 주기적으로 시세를 조회하여 전송 (기본값)
    Run,

    /// 사이클 한 번만 실행
    Once {
        /// 전송하지 않고 리포트를 표준 출력으로 출력
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env().with_overrides(cli.log_level.clone(), cli.log_format);
    init_logging(&log_config)
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    // 필수 값이 없으면 시작하지 않음
    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "설정 로드 완료");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Once { dry_run: true } => {
            let source = BitpinProvider::from_config(&config)?;
            let report = source.fetch_report().await;
            tracing::info!(deliver = gate::should_deliver(&report), "dry run");
            println!("{}", report);
        }
        Commands::Once { dry_run: false } => {
            let source = BitpinProvider::from_config(&config)?;
            let sender = TelegramSender::new(TelegramConfig::from(&config.telegram))?;
            let outcome = run_cycle(&source, &sender).await;
            outcome.log();
            if let CycleOutcome::Failed { error } = outcome {
                anyhow::bail!("전송 실패: {}", error);
            }
        }
        Commands::Run => {
            let shutdown = CancellationToken::new();

            let signal_token = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    signal_token.cancel();
                }
            });

            let stats = Scheduler::from_config(&config)?.run(shutdown).await;
            stats.log_summary();
        }
    }

    Ok(())
}
