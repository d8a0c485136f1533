use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ClientError, ClientResult};
use super::request::RequestClient;
use super::transport::Method;
use crate::types::{
    ApiKeysRequest, ApiKeysStatus, AuthResponse, BotControlRequest, BotSettings, BotStatus,
    ForgotPasswordRequest, LoginRequest, PaymentNotification, ProfileUpdate, RegisterRequest,
    UserProfile, WalletInfo,
};

pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";
pub const FORGOT_PASSWORD: &str = "/api/auth/forgot-password";
pub const PROFILE: &str = "/api/user/profile";
pub const ACCOUNT: &str = "/api/user/account";
pub const API_KEYS: &str = "/api/user/api-keys";
pub const API_KEYS_STATUS: &str = "/api/user/api-keys/status";
pub const BOT_STATUS: &str = "/api/bot/status";
pub const BOT_START: &str = "/api/bot/start";
pub const BOT_STOP: &str = "/api/bot/stop";
pub const BOT_SETTINGS: &str = "/api/bot/settings";
pub const PAYMENT_WALLET: &str = "/api/payment/wallet";
pub const PAYMENT_REQUEST: &str = "/api/payment/request";

fn decode<T: DeserializeOwned>(path: &str, payload: Value) -> ClientResult<T> {
    serde_json::from_value(payload)
        .map_err(|e| ClientError::InvalidResponse(format!("{}: {}", path, e)))
}

/// Typed endpoints of the dashboard service.
#[derive(Clone)]
pub struct ApiClient {
    requests: RequestClient,
}

impl ApiClient {
    pub fn new(requests: RequestClient) -> Self {
        Self { requests }
    }

    pub fn requests(&self) -> &RequestClient {
        &self.requests
    }

    // === Auth ===

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        let payload = self.requests.call(LOGIN, Method::Post, Some(request)).await?;
        decode(LOGIN, payload)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let payload = self.requests.call(REGISTER, Method::Post, Some(request)).await?;
        decode(REGISTER, payload)
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ClientResult<Value> {
        self.requests.call(FORGOT_PASSWORD, Method::Post, Some(request)).await
    }

    // === Account ===

    pub async fn profile(&self) -> ClientResult<UserProfile> {
        let payload = self.requests.send(PROFILE, Method::Get).await?;
        decode(PROFILE, payload)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<Value> {
        self.requests.call(PROFILE, Method::Put, Some(update)).await
    }

    pub async fn delete_account(&self) -> ClientResult<Value> {
        self.requests.send(ACCOUNT, Method::Delete).await
    }

    pub async fn save_api_keys(&self, keys: &ApiKeysRequest) -> ClientResult<Value> {
        self.requests.call(API_KEYS, Method::Post, Some(keys)).await
    }

    pub async fn delete_api_keys(&self) -> ClientResult<Value> {
        self.requests.send(API_KEYS, Method::Delete).await
    }

    pub async fn api_keys_status(&self) -> ClientResult<ApiKeysStatus> {
        let payload = self.requests.send(API_KEYS_STATUS, Method::Get).await?;
        decode(API_KEYS_STATUS, payload)
    }

    // === Bot ===

    pub async fn bot_status(&self) -> ClientResult<BotStatus> {
        let payload = self.requests.send(BOT_STATUS, Method::Get).await?;
        decode(BOT_STATUS, payload)
    }

    pub async fn start_bot(&self, symbol: &str) -> ClientResult<Value> {
        let request = BotControlRequest::start(symbol);
        self.requests.call(BOT_START, Method::Post, Some(&request)).await
    }

    pub async fn stop_bot(&self) -> ClientResult<Value> {
        self.requests.send(BOT_STOP, Method::Post).await
    }

    pub async fn bot_settings(&self) -> ClientResult<BotSettings> {
        let payload = self.requests.send(BOT_SETTINGS, Method::Get).await?;
        decode(BOT_SETTINGS, payload)
    }

    pub async fn save_bot_settings(&self, settings: &BotSettings) -> ClientResult<Value> {
        self.requests.call(BOT_SETTINGS, Method::Post, Some(settings)).await
    }

    // === Payment ===

    pub async fn wallet(&self) -> ClientResult<WalletInfo> {
        let payload = self.requests.send(PAYMENT_WALLET, Method::Get).await?;
        decode(PAYMENT_WALLET, payload)
    }

    pub async fn request_payment(&self, notification: &PaymentNotification) -> ClientResult<Value> {
        self.requests
            .call(PAYMENT_REQUEST, Method::Post, Some(notification))
            .await
    }
}
