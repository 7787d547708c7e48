use anyhow::{Context, Result};
use atm_monitor::{config, logging, session, Fetcher, Monitor, MonitorConfig, SessionManager, TelegramNotifier};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    println!("{}", "=".repeat(60).blue());
    println!("{}", "NSE ATM Option-Chain Monitor".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!();

    let cfg = MonitorConfig::from_env()?;

    let client = session::build_client()?;
    let session = Arc::new(SessionManager::new(client.clone(), config::NSE_BASE_URL));
    let fetcher = Fetcher::new(
        client.clone(),
        session,
        config::NSE_BASE_URL,
        cfg.retry.clone(),
    );

    let expiry = match &cfg.expiry {
        Some(expiry) => expiry.clone(),
        None => fetcher
            .fetch_nearest_expiry(&cfg.symbol)
            .await
            .context("Failed to resolve nearest expiry")?,
    };

    info!(
        symbol = %cfg.symbol,
        %expiry,
        interval_secs = cfg.poll_interval.as_secs(),
        "starting monitor"
    );

    let notifier = TelegramNotifier::new(client, cfg.telegram_token.clone(), cfg.telegram_chat_id);
    let monitor = Monitor::new(
        fetcher,
        Box::new(notifier),
        cfg.symbol,
        expiry,
        cfg.poll_interval,
    );

    tokio::select! {
        _ = monitor.run() => {}
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Stopped by user.".yellow());
        }
    }

    Ok(())
}
