use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Trial,
    Active,
    Expired,
    Cancelled,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::User => "User",
            UserRole::Admin => "Admin",
        }
    }
}

impl SubscriptionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "Trial",
            _ => "Premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub subscription_end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub trial_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub language: Option<String>,
}

impl UserProfile {
    /// The date the current plan runs out: trial end for trial users, subscription end otherwise.
    pub fn plan_end_date(&self) -> Option<DateTime<Utc>> {
        match self.subscription_status {
            SubscriptionStatus::Trial => self.trial_end_date,
            _ => self.subscription_end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiKeysRequest {
    pub api_key: String,
    pub api_secret: String,
    pub is_testnet: bool,
}

/// Whether the account has exchange credentials on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ApiKeysStatus {
    #[serde(default)]
    pub has_api_keys: bool,
    #[serde(default)]
    pub is_testnet: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WalletInfo {
    pub wallet_address: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentNotification {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}
