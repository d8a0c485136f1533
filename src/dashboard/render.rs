//! Pure render steps: snapshot in, view fragments out.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::types::{ApiKeysStatus, BotSettings, BotState, BotStatus, UserProfile};
use crate::view::{Field, ViewBindings};

const PLACEHOLDER: &str = "-";

pub fn format_uptime(seconds: u64) -> String {
    match seconds {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

/// Winning share in percent, one decimal. Zero trades means zero.
pub fn win_rate(winning: u64, total: u64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(winning) * Decimal::from(100) / Decimal::from(total))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_win_rate(winning: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", win_rate(winning, total))
}

/// Split PnL into a non-negative profit and a non-positive loss part.
pub fn pnl_buckets(pnl: Decimal) -> (Decimal, Decimal) {
    (pnl.max(Decimal::ZERO), pnl.min(Decimal::ZERO))
}

pub fn format_currency(amount: Decimal) -> String {
    format!(
        "${:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn pnl_class(pnl: Decimal) -> &'static str {
    if pnl > Decimal::ZERO {
        "positive"
    } else if pnl < Decimal::ZERO {
        "negative"
    } else {
        "neutral"
    }
}

pub fn remaining_time(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = end - now;
    if diff <= chrono::Duration::zero() {
        return "Expired".to_string();
    }

    let days = diff.num_days();
    let hours = diff.num_hours() % 24;
    match (days, hours) {
        (1, _) => "1 day".to_string(),
        (d, _) if d > 1 => format!("{} days", d),
        (_, 1) => "1 hour".to_string(),
        (_, h) if h > 1 => format!("{} hours", h),
        _ => "Ends today".to_string(),
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn render_session(view: &mut ViewBindings, logged_in: bool) {
    view.set_visible(Field::LandingPage, !logged_in);
    view.set_visible(Field::Dashboard, logged_in);
    view.flush();
}

pub fn render_bot_status(view: &mut ViewBindings, status: &BotStatus) {
    let running = status.state.is_running();
    let label = match status.state {
        BotState::Running | BotState::Error => status.state.label(),
        _ => BotState::Stopped.label(),
    };

    view.set_class(Field::StatusIndicator, "running", running);
    view.set_text(Field::StatusIndicator, label);
    view.set_text(Field::BotStatus, label);
    view.set_text(Field::CurrentSymbol, or_placeholder(&status.symbol));
    view.set_text(Field::CurrentPosition, or_placeholder(&status.position_side));
    view.set_text(Field::LastSignal, or_placeholder(&status.last_signal));
    view.set_text(Field::Uptime, format_uptime(status.uptime()));

    view.set_enabled(Field::StartBotButton, !running);
    view.set_enabled(Field::StopBotButton, running);
}

pub fn render_stats(view: &mut ViewBindings, status: &BotStatus) {
    let pnl = status.total_pnl;
    let (profit, loss) = pnl_buckets(pnl);

    view.set_text(Field::TotalTrades, status.total_trades.to_string());
    view.set_text(Field::WinRate, format_win_rate(status.winning_trades, status.total_trades));

    view.set_text(Field::TotalPnl, format_currency(pnl));
    for class in ["positive", "negative", "neutral"] {
        view.set_class(Field::TotalPnl, class, class == pnl_class(pnl));
    }

    view.set_text(Field::StatsTotal, status.total_trades.to_string());
    view.set_text(Field::StatsWinning, status.winning_trades.to_string());
    view.set_text(Field::StatsLosing, status.losing_trades.to_string());
    view.set_text(Field::StatsProfit, format_currency(profit));
    view.set_text(Field::StatsLoss, format_currency(loss.abs()));
}

/// Overwrite every fragment that depends on the bot snapshot.
pub fn render_snapshot(view: &mut ViewBindings, status: &BotStatus) {
    render_bot_status(view, status);
    render_stats(view, status);
    view.flush();
}

pub fn render_profile(view: &mut ViewBindings, user: &UserProfile, now: DateTime<Utc>) {
    view.set_text(Field::UserName, &user.full_name);
    view.set_text(Field::UserEmail, &user.email);
    view.set_text(Field::SubscriptionStatus, user.subscription_status.label());

    if let Some(end) = user.plan_end_date() {
        view.set_text(Field::RemainingTime, remaining_time(end, now));
        view.set_text(Field::EndDate, format_date(end));
    }
    view.flush();
}

pub fn render_profile_form(view: &mut ViewBindings, user: &UserProfile, default_language: &str) {
    view.set_value(Field::FullName, &user.full_name);
    view.set_value(Field::Email, &user.email);
    view.set_value(
        Field::Language,
        user.language.as_deref().unwrap_or(default_language),
    );
}

pub fn render_api_keys_status(view: &mut ViewBindings, status: &ApiKeysStatus) {
    let text = match (status.has_api_keys, status.is_testnet) {
        (false, _) => "Not configured",
        (true, true) => "Configured (testnet)",
        (true, false) => "Configured",
    };
    view.set_text(Field::ApiKeysStatus, text);
    view.set_class(Field::ApiKeysStatus, "configured", status.has_api_keys);
    view.flush();
}

pub fn render_settings_form(view: &mut ViewBindings, settings: &BotSettings) {
    view.set_value(Field::OrderSize, settings.order_size_usdt.to_string());
    view.set_value(Field::Leverage, settings.leverage.to_string());
    view.set_value(Field::StopLoss, settings.stop_loss_percent.to_string());
    view.set_value(Field::TakeProfit, settings.take_profit_percent.to_string());
    view.set_value(Field::Timeframe, &settings.timeframe);
}

/// Read the settings form. Returns the ids of the fields that are not numeric.
pub fn read_settings_form(view: &ViewBindings) -> Result<BotSettings, Vec<&'static str>> {
    let mut invalid = Vec::new();

    let mut decimal = |field: Field| {
        let parsed = Decimal::from_str(view.value(field).trim()).ok();
        if parsed.is_none() {
            invalid.push(field.id());
        }
        parsed.unwrap_or_default()
    };
    let order_size_usdt = decimal(Field::OrderSize);
    let stop_loss_percent = decimal(Field::StopLoss);
    let take_profit_percent = decimal(Field::TakeProfit);

    let leverage = match view.value(Field::Leverage).trim().parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            invalid.push(Field::Leverage.id());
            0
        }
    };

    if !invalid.is_empty() {
        return Err(invalid);
    }

    Ok(BotSettings {
        order_size_usdt,
        leverage,
        stop_loss_percent,
        take_profit_percent,
        timeframe: view.value(Field::Timeframe).trim().to_string(),
    })
}

fn or_placeholder(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => PLACEHOLDER,
    }
}
