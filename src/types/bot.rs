use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotState {
    Running,
    #[default]
    Stopped,
    Error,
    #[serde(other)]
    Unknown,
}

impl BotState {
    pub fn is_running(&self) -> bool {
        matches!(self, BotState::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BotState::Running => "Running",
            BotState::Stopped => "Stopped",
            BotState::Error => "Error",
            BotState::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Server-side snapshot of one user's bot and trading totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BotStatus {
    #[serde(rename = "status", default)]
    pub state: BotState,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub position_side: Option<String>,
    #[serde(default)]
    pub last_signal: Option<String>,
    #[serde(rename = "uptime", default)]
    pub uptime_seconds: Option<u64>,
    #[serde(default)]
    pub total_trades: u64,
    #[serde(default)]
    pub winning_trades: u64,
    #[serde(default)]
    pub losing_trades: u64,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_pnl: Decimal,
    #[serde(default)]
    pub message: Option<String>,
}

impl BotStatus {
    pub fn uptime(&self) -> u64 {
        self.uptime_seconds.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotSettings {
    #[serde(with = "rust_decimal::serde::float")]
    pub order_size_usdt: Decimal,
    pub leverage: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub stop_loss_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub take_profit_percent: Decimal,
    pub timeframe: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            order_size_usdt: dec!(25),
            leverage: 10,
            stop_loss_percent: dec!(4),
            take_profit_percent: dec!(8),
            timeframe: "15m".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotControlRequest {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl BotControlRequest {
    pub fn start(symbol: &str) -> Self {
        Self {
            action: "start".to_string(),
            symbol: Some(symbol.to_string()),
        }
    }
}

/// Message to show after a bot action succeeded.
///
/// The server is not consistent about where it puts it: a bare string, `message`,
/// `detail` or `status_message`.
pub fn action_message(payload: &Value) -> Option<String> {
    if let Value::String(s) = payload {
        return (!s.is_empty()).then(|| s.clone());
    }
    ["message", "detail", "status_message"]
        .iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
