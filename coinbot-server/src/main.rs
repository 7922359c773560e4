use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use coinbot_core::settings::Settings;
use coinbot_core::tasks::daily_donation::run_daily_donation;
use coinbot_core::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = "coinbot")]
#[command(author, version, about = "coinbot - donates the daily coin quota on Bilibili")]
struct Args {
    /// Coins to donate today; overrides COINBOT_NUMBER_OF_COINS.
    #[arg(long)]
    coins: Option<u32>,

    /// Creators (mid) to prefer, comma separated; overrides COINBOT_SUPPORT_UP_IDS.
    #[arg(long, value_delimiter = ',')]
    support_up_ids: Option<Vec<u64>>,

    /// Like each video while donating; overrides COINBOT_SELECT_LIKE.
    #[arg(long)]
    select_like: Option<bool>,

    /// Seed for video selection, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("coinbot=info,coinbot_core=info"));
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
    // reqwest logs through the `log` crate.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("log bridge not installed: {e}");
    }
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(coins) = args.coins {
        settings.task.number_of_coins = coins;
    }
    if let Some(ids) = &args.support_up_ids {
        settings.task.support_up_ids = ids.clone();
    }
    if let Some(select_like) = args.select_like {
        settings.task.select_like = select_like;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let mut settings = Settings::from_env()?;
    apply_overrides(&mut settings, &args);
    info!(
        "coinbot starting. coins={}, cap={}, configured_ups={}, select_like={}",
        settings.task.number_of_coins,
        settings.task.max_coins_per_day,
        settings.task.support_up_ids.len(),
        settings.task.select_like
    );

    match run_daily_donation(&settings, args.seed).await {
        Ok(summary) => {
            info!(
                "done: status={:?}, succeeded={}, refused={}, skipped={}",
                summary.status, summary.succeeded, summary.rejected, summary.skipped
            );
            Ok(())
        }
        Err(e @ Error::CredentialInvalid(_)) => {
            error!("The Bilibili cookie is no longer valid. Copy a fresh one into BILI_COOKIE and rerun.");
            Err(e.into())
        }
        Err(e) => {
            error!("coin task failed: {:?}", e);
            Err(e.into())
        }
    }
}
