/// Every element the dashboard reads from or writes to, by logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    // Layout
    LandingPage,
    Dashboard,
    PageTitle,
    Notification,

    // Bot status
    StatusIndicator,
    BotStatus,
    CurrentSymbol,
    CurrentPosition,
    LastSignal,
    Uptime,
    StartBotButton,
    StopBotButton,

    // Statistics
    TotalTrades,
    WinRate,
    TotalPnl,
    StatsTotal,
    StatsWinning,
    StatsLosing,
    StatsProfit,
    StatsLoss,

    // Account
    UserName,
    UserEmail,
    SubscriptionStatus,
    RemainingTime,
    EndDate,

    // Auth forms
    LoginEmail,
    LoginPassword,
    LoginSubmit,
    RegisterName,
    RegisterEmail,
    RegisterPassword,
    RegisterSubmit,
    ForgotEmail,

    // Bot control form
    SymbolInput,
    OrderSize,
    Leverage,
    StopLoss,
    TakeProfit,
    Timeframe,

    // Credentials, payment, settings forms
    ApiKey,
    ApiSecret,
    IsTestnet,
    ApiKeysStatus,
    WalletAddress,
    FullName,
    Email,
    Language,
}

impl Field {
    pub const ALL: [Field; 47] = [
        Field::LandingPage,
        Field::Dashboard,
        Field::PageTitle,
        Field::Notification,
        Field::StatusIndicator,
        Field::BotStatus,
        Field::CurrentSymbol,
        Field::CurrentPosition,
        Field::LastSignal,
        Field::Uptime,
        Field::StartBotButton,
        Field::StopBotButton,
        Field::TotalTrades,
        Field::WinRate,
        Field::TotalPnl,
        Field::StatsTotal,
        Field::StatsWinning,
        Field::StatsLosing,
        Field::StatsProfit,
        Field::StatsLoss,
        Field::UserName,
        Field::UserEmail,
        Field::SubscriptionStatus,
        Field::RemainingTime,
        Field::EndDate,
        Field::LoginEmail,
        Field::LoginPassword,
        Field::LoginSubmit,
        Field::RegisterName,
        Field::RegisterEmail,
        Field::RegisterPassword,
        Field::RegisterSubmit,
        Field::ForgotEmail,
        Field::SymbolInput,
        Field::OrderSize,
        Field::Leverage,
        Field::StopLoss,
        Field::TakeProfit,
        Field::Timeframe,
        Field::ApiKey,
        Field::ApiSecret,
        Field::IsTestnet,
        Field::ApiKeysStatus,
        Field::WalletAddress,
        Field::FullName,
        Field::Email,
        Field::Language,
    ];

    /// Element id in the page markup.
    pub fn id(&self) -> &'static str {
        match self {
            Field::LandingPage => "landing-page",
            Field::Dashboard => "dashboard",
            Field::PageTitle => "page-title",
            Field::Notification => "notification",
            Field::StatusIndicator => "status-indicator",
            Field::BotStatus => "bot-status",
            Field::CurrentSymbol => "current-symbol",
            Field::CurrentPosition => "current-position",
            Field::LastSignal => "last-signal",
            Field::Uptime => "uptime",
            Field::StartBotButton => "start-bot-btn",
            Field::StopBotButton => "stop-bot-btn",
            Field::TotalTrades => "total-trades",
            Field::WinRate => "win-rate",
            Field::TotalPnl => "total-pnl",
            Field::StatsTotal => "stats-total",
            Field::StatsWinning => "stats-winning",
            Field::StatsLosing => "stats-losing",
            Field::StatsProfit => "stats-profit",
            Field::StatsLoss => "stats-loss",
            Field::UserName => "user-name",
            Field::UserEmail => "user-email",
            Field::SubscriptionStatus => "subscription-status",
            Field::RemainingTime => "remaining-time",
            Field::EndDate => "end-date",
            Field::LoginEmail => "login-email",
            Field::LoginPassword => "login-password",
            Field::LoginSubmit => "login-submit",
            Field::RegisterName => "register-name",
            Field::RegisterEmail => "register-email",
            Field::RegisterPassword => "register-password",
            Field::RegisterSubmit => "register-submit",
            Field::ForgotEmail => "forgot-email",
            Field::SymbolInput => "symbol-input",
            Field::OrderSize => "order-size",
            Field::Leverage => "leverage",
            Field::StopLoss => "stop-loss",
            Field::TakeProfit => "take-profit",
            Field::Timeframe => "timeframe",
            Field::ApiKey => "api-key",
            Field::ApiSecret => "api-secret",
            Field::IsTestnet => "is-testnet",
            Field::ApiKeysStatus => "api-keys-status",
            Field::WalletAddress => "wallet-address",
            Field::FullName => "full-name",
            Field::Email => "email",
            Field::Language => "language",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.id())
    }
}
