use chrono::{DateTime, Utc};

use super::page::Page;
use crate::types::{BotSettings, BotStatus, UserProfile, WalletInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncPhase::LoggedOut => write!(f, "LoggedOut"),
            SyncPhase::LoggingIn => write!(f, "LoggingIn"),
            SyncPhase::LoggedIn => write!(f, "LoggedIn"),
        }
    }
}

/// Everything the controller knows about the account for the lifetime of a login.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub phase: SyncPhase,
    pub page: Page,
    pub user: Option<UserProfile>,
    pub status: Option<BotStatus>,
    pub settings: Option<BotSettings>,
    pub wallet: Option<WalletInfo>,
    pub last_synced: Option<DateTime<Utc>>,
}

impl DashboardData {
    /// Drop all per-login state.
    pub fn reset(&mut self) {
        *self = DashboardData::default();
    }
}
