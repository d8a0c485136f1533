mod client;
mod config;
mod dashboard;
mod notifications;
mod session;
mod types;
mod view;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::client::{ApiClient, HttpTransport, RequestClient};
use crate::config::{ClientConfig, DEFAULT_CONFIG_FILE};
use crate::dashboard::{DashboardSync, Page, SyncOptions};
use crate::session::{SessionHandle, SledTokenStore};
use crate::view::{Field, TerminalView, ViewBindings};

#[derive(Parser)]
#[command(name = "bot-dashboard")]
#[command(author = "Trading Bot")]
#[command(version = "0.1.0")]
#[command(about = "Terminal dashboard for the trading bot service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and start the free trial
    Register {
        #[arg(short = 'n', long)]
        full_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Send a password reset link
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the bot status once
    Status,
    /// Keep the dashboard on screen, refreshing on the poll interval
    Watch {
        /// Page to open (overview, bot, api-keys, subscription, settings)
        #[arg(short, long, default_value = "overview")]
        page: Page,
    },
    /// Start the bot on a symbol
    Start {
        /// Trading pair, e.g. BTCUSDT
        symbol: String,
    },
    /// Stop the bot
    Stop,
    /// Bot trading settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Exchange API credentials
    ApiKeys {
        #[command(subcommand)]
        action: ApiKeysAction,
    },
    /// Show the payment wallet
    Wallet,
    /// Notify the service of a subscription payment
    Pay,
    /// Account profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Permanently delete the account
    DeleteAccount {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    /// Change any subset of the settings
    Save {
        #[arg(long)]
        order_size: Option<String>,
        #[arg(long)]
        leverage: Option<String>,
        #[arg(long)]
        stop_loss: Option<String>,
        #[arg(long)]
        take_profit: Option<String>,
        #[arg(long)]
        timeframe: Option<String>,
    },
    /// Save the default settings
    Reset,
}

#[derive(Subcommand)]
enum ApiKeysAction {
    /// Show whether keys are configured
    Status,
    Save {
        #[arg(long)]
        key: String,
        #[arg(long)]
        secret: String,
        #[arg(long)]
        testnet: bool,
    },
    Delete,
}

#[derive(Subcommand)]
enum ProfileAction {
    Show,
    Update {
        #[arg(short = 'n', long)]
        full_name: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    if cli.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let config = ClientConfig::load(&cli.config)?;
    config
        .validate()
        .map_err(|errors| anyhow!("Invalid configuration: {}", errors.join("; ")))?;

    let sync = connect(&config)?;
    let result = run(&sync, &config, cli.command).await;
    sync.shutdown().await;
    result
}

async fn run(sync: &Arc<DashboardSync>, config: &ClientConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            sync.fill(Field::LoginEmail, email).await;
            sync.fill(Field::LoginPassword, password).await;
            sync.login().await?;
        }
        Commands::Register { full_name, email, password } => {
            sync.fill(Field::RegisterName, full_name).await;
            sync.fill(Field::RegisterEmail, email).await;
            sync.fill(Field::RegisterPassword, password).await;
            sync.register().await?;
        }
        Commands::ForgotPassword { email } => {
            sync.fill(Field::ForgotEmail, email).await;
            sync.forgot_password().await?;
        }
        Commands::Logout => {
            sync.logout().await;
        }
        Commands::Status => {
            require_session(sync).await?;
            print_status(sync).await;
        }
        Commands::Watch { page } => {
            watch(sync, page).await?;
        }
        Commands::Start { symbol } => {
            require_session(sync).await?;
            sync.fill(Field::SymbolInput, symbol).await;
            sync.start_bot().await?;
        }
        Commands::Stop => {
            require_session(sync).await?;
            sync.stop_bot().await?;
        }
        Commands::Settings { action } => {
            require_session(sync).await?;
            run_settings(sync, action).await?;
        }
        Commands::ApiKeys { action } => {
            require_session(sync).await?;
            match action {
                ApiKeysAction::Save { key, secret, testnet } => {
                    sync.fill(Field::ApiKey, key).await;
                    sync.fill(Field::ApiSecret, secret).await;
                    sync.fill(Field::IsTestnet, testnet.to_string()).await;
                    sync.save_api_keys().await?;
                }
                ApiKeysAction::Status => {
                    let status = sync.load_api_keys_status().await?;
                    println!(
                        "API keys: {}{}",
                        if status.has_api_keys { "configured" } else { "not configured" },
                        if status.is_testnet { " (testnet)" } else { "" }
                    );
                }
                ApiKeysAction::Delete => sync.delete_api_keys().await?,
            }
        }
        Commands::Wallet => {
            require_session(sync).await?;
            sync.load_payment_info().await?;
            print_wallet(sync, config).await;
        }
        Commands::Pay => {
            require_session(sync).await?;
            sync.request_payment().await?;
        }
        Commands::Profile { action } => {
            require_session(sync).await?;
            run_profile(sync, action).await?;
        }
        Commands::DeleteAccount { yes } => {
            if !yes {
                bail!("Refusing to delete the account without --yes");
            }
            require_session(sync).await?;
            sync.delete_account().await?;
        }
    }

    Ok(())
}

fn connect(config: &ClientConfig) -> Result<Arc<DashboardSync>> {
    let transport = Arc::new(HttpTransport::new(&config.api_url));
    info!("Dashboard client for {}", transport.base_url());
    let requests = RequestClient::new(transport, SessionHandle::new());
    let store = Arc::new(SledTokenStore::open(&config.store_path)?);
    let view = ViewBindings::bind(Box::new(TerminalView::new()))?;

    Ok(DashboardSync::new(
        ApiClient::new(requests),
        store,
        view,
        SyncOptions::from(config),
    ))
}

async fn require_session(sync: &Arc<DashboardSync>) -> Result<()> {
    if !sync.restore().await {
        bail!("Not logged in. Run `bot-dashboard login` first.");
    }
    Ok(())
}

async fn watch(sync: &Arc<DashboardSync>, page: Page) -> Result<()> {
    require_session(sync).await?;
    if page != Page::Overview {
        sync.navigate(page).await;
    }
    info!("Watching the {} page. Press Ctrl+C to exit.", page);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
        _ = wait_for_logout(sync) => {
            warn!("Session ended while watching");
        }
    }

    let history = sync.notifications().get_recent(10).await;
    if !history.is_empty() {
        println!("\n=== Recent Notifications ===");
        for event in history.iter().rev() {
            println!(
                "{} [{}] {}",
                event.timestamp.format("%H:%M:%S"),
                event.severity.class(),
                event.message
            );
        }
    }
    Ok(())
}

async fn wait_for_logout(sync: &DashboardSync) {
    let mut check = tokio::time::interval(std::time::Duration::from_secs(1));
    loop {
        check.tick().await;
        if !sync.is_polling().await {
            return;
        }
    }
}

async fn run_settings(sync: &Arc<DashboardSync>, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            sync.load_bot_settings().await?;
            print_settings(sync).await;
        }
        SettingsAction::Save {
            order_size,
            leverage,
            stop_loss,
            take_profit,
            timeframe,
        } => {
            sync.load_bot_settings().await?;
            let changes = [
                (Field::OrderSize, order_size),
                (Field::Leverage, leverage),
                (Field::StopLoss, stop_loss),
                (Field::TakeProfit, take_profit),
                (Field::Timeframe, timeframe),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    sync.fill(field, value).await;
                }
            }
            sync.save_bot_settings().await?;
            print_settings(sync).await;
        }
        SettingsAction::Reset => {
            sync.reset_bot_settings().await;
            sync.save_bot_settings().await?;
            print_settings(sync).await;
        }
    }
    Ok(())
}

async fn run_profile(sync: &Arc<DashboardSync>, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => {
            sync.navigate(Page::Settings).await;
            print_profile(sync).await;
        }
        ProfileAction::Update { full_name, language } => {
            sync.navigate(Page::Settings).await;
            if let Some(name) = full_name {
                sync.fill(Field::FullName, name).await;
            }
            if let Some(language) = language {
                sync.fill(Field::Language, language).await;
            }
            sync.update_profile().await?;
            print_profile(sync).await;
        }
    }
    Ok(())
}

async fn print_status(sync: &DashboardSync) {
    let Some(status) = sync.latest_status().await else {
        println!("Bot status unavailable.");
        return;
    };

    println!("\n=== Bot Status ===");
    println!("State: {}", status.state);
    if let Some(symbol) = &status.symbol {
        println!("Symbol: {}", symbol);
    }
    if let Some(message) = &status.message {
        println!("Message: {}", message);
    }
    println!(
        "Trades: {} ({} won / {} lost)",
        status.total_trades, status.winning_trades, status.losing_trades
    );
    println!("Total PnL: ${:.2}", status.total_pnl);
    if let Some(synced) = sync.data().await.last_synced {
        println!("Last synced: {}", synced.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

async fn print_settings(sync: &DashboardSync) {
    let rows = [
        ("Order size (USDT)", Field::OrderSize),
        ("Leverage", Field::Leverage),
        ("Stop loss %", Field::StopLoss),
        ("Take profit %", Field::TakeProfit),
        ("Timeframe", Field::Timeframe),
    ];
    let values = sync
        .with_view(|view| {
            rows.iter()
                .map(|(label, field)| (*label, view.value(*field)))
                .collect::<Vec<_>>()
        })
        .await;

    println!("\n=== Bot Settings ===");
    for (label, value) in values {
        println!("{:<18} {}", label, value);
    }
}

async fn print_wallet(sync: &DashboardSync, config: &ClientConfig) {
    let Some(wallet) = sync.data().await.wallet else {
        return;
    };

    println!("\n=== Payment ===");
    println!("Wallet: {}", wallet.wallet_address);
    println!(
        "Amount: {} {}",
        wallet.amount.unwrap_or(config.subscription_price_usdt),
        wallet.currency.as_deref().unwrap_or("USDT")
    );
    if let Some(network) = &wallet.network {
        println!("Network: {}", network);
    }
    if let Some(note) = &wallet.note {
        println!("Note: {}", note);
    }
}

async fn print_profile(sync: &DashboardSync) {
    let (name, email, language) = sync
        .with_view(|view| {
            (
                view.value(Field::FullName),
                view.value(Field::Email),
                view.value(Field::Language),
            )
        })
        .await;

    println!("\n=== Profile ===");
    println!("Name: {}", name);
    println!("Email: {}", email);
    println!("Language: {}", language);
    if let Some(user) = sync.user().await {
        println!("Account: {} ({})", user.uid, user.role.label());
        println!("Email verified: {}", if user.email_verified { "yes" } else { "no" });
    }
}
