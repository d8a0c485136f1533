use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use super::page::Page;
use super::poller::{start_polling, PollHandle};
use super::render;
use super::state::{DashboardData, SyncPhase};
use crate::client::{ApiClient, ClientError, ClientResult};
use crate::notifications::{NotificationCenter, NotificationEvent, Severity};
use crate::session::{SessionHandle, TokenStore};
use crate::types::{
    action_message, ApiKeysRequest, ApiKeysStatus, AuthResponse, BotSettings, BotStatus, ForgotPasswordRequest,
    LoginRequest, PaymentNotification, ProfileUpdate, RegisterRequest, UserProfile,
};
use crate::view::{Field, SharedView, ViewBindings};

const MIN_PASSWORD_LEN: usize = 6;

/// Tunables for the sync loop and the account actions.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub poll_interval: Duration,
    pub notification_dismiss: Duration,
    pub subscription_price: Decimal,
    pub language: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            notification_dismiss: Duration::from_secs(5),
            subscription_price: dec!(10),
            language: "en".to_string(),
        }
    }
}

/// Keeps the view in step with the server-side bot and account state.
///
/// One instance per process. It owns the session lifecycle
/// (`LoggedOut -> LoggingIn -> LoggedIn -> LoggedOut`) and the polling timer
/// that runs while logged in.
pub struct DashboardSync {
    api: ApiClient,
    session: SessionHandle,
    store: Arc<dyn TokenStore>,
    view: SharedView,
    notifications: NotificationCenter,
    data: RwLock<DashboardData>,
    poller: Mutex<Option<PollHandle>>,
    options: SyncOptions,
}

impl DashboardSync {
    pub fn new(
        api: ApiClient,
        store: Arc<dyn TokenStore>,
        view: ViewBindings,
        options: SyncOptions,
    ) -> Arc<Self> {
        let session = api.requests().session().clone();
        let view = view.shared();
        let notifications = NotificationCenter::new(view.clone(), options.notification_dismiss);

        Arc::new(Self {
            api,
            session,
            store,
            view,
            notifications,
            data: RwLock::new(DashboardData::default()),
            poller: Mutex::new(None),
            options,
        })
    }

    // === Accessors ===

    pub async fn phase(&self) -> SyncPhase {
        self.data.read().await.phase
    }

    pub async fn page(&self) -> Page {
        self.data.read().await.page
    }

    pub async fn data(&self) -> DashboardData {
        self.data.read().await.clone()
    }

    pub async fn latest_status(&self) -> Option<BotStatus> {
        self.data.read().await.status.clone()
    }

    pub async fn user(&self) -> Option<UserProfile> {
        self.data.read().await.user.clone()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub async fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .map(PollHandle::is_active)
            .unwrap_or(false)
    }

    /// Run `f` against the bound view, e.g. to fill form fields or read fragments.
    pub async fn with_view<R>(&self, f: impl FnOnce(&mut ViewBindings) -> R) -> R {
        let mut view = self.view.lock().await;
        f(&mut view)
    }

    pub async fn fill(&self, field: Field, value: impl AsRef<str>) {
        self.view.lock().await.set_value(field, value);
    }

    // === Session lifecycle ===

    /// Resume a stored session, if any. Returns whether the user ends up logged in.
    pub async fn restore(self: &Arc<Self>) -> bool {
        let token = match self.store.load().await {
            Ok(token) => token,
            Err(e) => {
                error!("Failed to read stored session: {}", e);
                None
            }
        };

        let Some(token) = token else {
            render::render_session(&mut *self.view.lock().await, false);
            return false;
        };

        info!("Restoring stored session");
        let epoch = self.session.begin(token).await;
        self.enter_logged_in(epoch).await;
        self.load_profile_for(epoch).await.is_ok() && self.session.is_current(epoch).await
    }

    pub async fn login(self: &Arc<Self>) -> ClientResult<()> {
        let (email, password) = {
            let view = self.view.lock().await;
            (
                view.value(Field::LoginEmail).trim().to_string(),
                view.value(Field::LoginPassword),
            )
        };

        if email.is_empty() || password.is_empty() {
            return self.reject("Email and password are required.").await;
        }

        self.begin_auth(Field::LoginSubmit).await?;
        info!("Attempting login for {}", email);

        let result = self.api.login(&LoginRequest { email, password }).await;
        self.finish_auth(result, Field::LoginSubmit, "Logged in successfully!", login_error)
            .await
    }

    pub async fn register(self: &Arc<Self>) -> ClientResult<()> {
        let (full_name, email, password) = {
            let view = self.view.lock().await;
            (
                view.value(Field::RegisterName).trim().to_string(),
                view.value(Field::RegisterEmail).trim().to_string(),
                view.value(Field::RegisterPassword),
            )
        };

        if full_name.is_empty() || email.is_empty() || password.is_empty() {
            return self.reject("Please fill in all fields.").await;
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return self
                .reject(format!("Password must be at least {} characters.", MIN_PASSWORD_LEN))
                .await;
        }
        if !email.contains('@') {
            return self.reject("Please enter a valid email address.").await;
        }

        self.begin_auth(Field::RegisterSubmit).await?;
        info!("Registering account for {}", email);

        let request = RegisterRequest {
            full_name,
            email,
            password,
            language: self.options.language.clone(),
        };
        let result = self.api.register(&request).await;
        self.finish_auth(
            result,
            Field::RegisterSubmit,
            "Your account has been created! Your free trial has started.",
            register_error,
        )
        .await
    }

    pub async fn forgot_password(&self) -> ClientResult<()> {
        let email = self.view.lock().await.value(Field::ForgotEmail).trim().to_string();
        if email.is_empty() {
            return self.reject("Please enter your email address.").await;
        }

        let epoch = self.session.epoch().await;

        match self.api.forgot_password(&ForgotPasswordRequest { email }).await {
            Ok(_) => {
                self.notifications
                    .show(NotificationEvent::success(
                        "A password reset link has been sent to your email address.",
                    ))
                    .await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    pub async fn logout(&self) {
        self.end_session().await;
        self.notifications
            .show(NotificationEvent::info("Logged out successfully."))
            .await;
    }

    // === Status sync ===

    /// Fetch the status snapshot now and render it.
    pub async fn refresh_status(&self) -> ClientResult<BotStatus> {
        let epoch = self.session.epoch().await;
        self.sync_status(epoch).await
    }

    async fn poll_tick(&self, epoch: u64) {
        if !self.session.is_current(epoch).await {
            debug!("Skipping poll tick from a previous session");
            return;
        }
        if self.page().await != Page::Overview {
            return;
        }
        if let Err(e) = self.sync_status(epoch).await {
            warn!("Status poll failed: {}", e);
        }
    }

    async fn sync_status(&self, epoch: u64) -> ClientResult<BotStatus> {
        let status = self.api.bot_status().await?;

        if !self.session.is_current(epoch).await {
            debug!("Discarding status response from a previous session");
            return Ok(status);
        }

        {
            let mut data = self.data.write().await;
            data.status = Some(status.clone());
            data.last_synced = Some(Utc::now());
        }
        render::render_snapshot(&mut *self.view.lock().await, &status);
        Ok(status)
    }

    async fn refresh_quietly(&self) {
        if let Err(e) = self.refresh_status().await {
            warn!("Status refresh failed: {}", e);
        }
    }

    // === Bot control ===

    pub async fn start_bot(&self) -> ClientResult<()> {
        let symbol = self
            .view
            .lock()
            .await
            .value(Field::SymbolInput)
            .trim()
            .to_uppercase();

        if symbol.is_empty() {
            return self.reject("Please enter a trading symbol.").await;
        }

        info!("Starting bot for symbol: {}", symbol);
        let epoch = self.session.epoch().await;
        match self.api.start_bot(&symbol).await {
            Ok(payload) => {
                let message = action_message(&payload)
                    .unwrap_or_else(|| format!("Bot started for {}.", symbol));
                self.notifications.show(NotificationEvent::success(message)).await;
                self.refresh_quietly().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    pub async fn stop_bot(&self) -> ClientResult<()> {
        info!("Stopping bot");
        let epoch = self.session.epoch().await;
        match self.api.stop_bot().await {
            Ok(payload) => {
                let message = action_message(&payload).unwrap_or_else(|| "Bot stopped.".to_string());
                self.notifications.show(NotificationEvent::info(message)).await;
                self.refresh_quietly().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    pub async fn load_bot_settings(&self) -> ClientResult<BotSettings> {
        let epoch = self.session.epoch().await;
        let settings = self.api.bot_settings().await.map_err(|e| {
            warn!("Failed to load bot settings: {}", e);
            e
        })?;

        if !self.session.is_current(epoch).await {
            debug!("Discarding bot settings from a previous session");
            return Ok(settings);
        }
        self.data.write().await.settings = Some(settings.clone());
        render::render_settings_form(&mut *self.view.lock().await, &settings);
        Ok(settings)
    }

    pub async fn save_bot_settings(&self) -> ClientResult<()> {
        let form = render::read_settings_form(&*self.view.lock().await);
        let settings = match form {
            Ok(settings) => settings,
            Err(invalid) => {
                return self
                    .reject(format!("Please enter numeric values for: {}", invalid.join(", ")))
                    .await;
            }
        };

        let epoch = self.session.epoch().await;

        match self.api.save_bot_settings(&settings).await {
            Ok(_) => {
                info!(
                    "Bot settings saved: order_size={} leverage={}x sl={}% tp={}% tf={}",
                    settings.order_size_usdt,
                    settings.leverage,
                    settings.stop_loss_percent,
                    settings.take_profit_percent,
                    settings.timeframe
                );
                self.data.write().await.settings = Some(settings);
                self.notifications
                    .show(NotificationEvent::success("Bot settings saved successfully!"))
                    .await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    /// Put the default settings back into the form. Nothing is sent.
    pub async fn reset_bot_settings(&self) {
        render::render_settings_form(&mut *self.view.lock().await, &BotSettings::default());
    }

    // === Exchange credentials ===

    pub async fn save_api_keys(&self) -> ClientResult<()> {
        let keys = {
            let view = self.view.lock().await;
            ApiKeysRequest {
                api_key: view.value(Field::ApiKey).trim().to_string(),
                api_secret: view.value(Field::ApiSecret).trim().to_string(),
                is_testnet: view.value(Field::IsTestnet).trim() == "true",
            }
        };

        if keys.api_key.is_empty() || keys.api_secret.is_empty() {
            return self
                .reject("Please fill in both the API key and the API secret.")
                .await;
        }

        let epoch = self.session.epoch().await;

        match self.api.save_api_keys(&keys).await {
            Ok(_) => {
                {
                    let mut view = self.view.lock().await;
                    view.set_value(Field::ApiKey, "");
                    view.set_value(Field::ApiSecret, "");
                }
                self.notifications
                    .show(NotificationEvent::success("API keys saved successfully."))
                    .await;
                self.load_api_keys_status().await.ok();
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    /// Show whether exchange credentials are on file. Failures are logged only.
    pub async fn load_api_keys_status(&self) -> ClientResult<ApiKeysStatus> {
        let epoch = self.session.epoch().await;
        let status = self.api.api_keys_status().await.map_err(|e| {
            warn!("Failed to load API key status: {}", e);
            e
        })?;

        if !self.session.is_current(epoch).await {
            debug!("Discarding API key status from a previous session");
            return Ok(status);
        }
        render::render_api_keys_status(&mut *self.view.lock().await, &status);
        Ok(status)
    }

    pub async fn delete_api_keys(&self) -> ClientResult<()> {
        let epoch = self.session.epoch().await;
        match self.api.delete_api_keys().await {
            Ok(_) => {
                self.notifications
                    .show(NotificationEvent::info("API keys deleted."))
                    .await;
                self.load_api_keys_status().await.ok();
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    // === Payment ===

    pub async fn load_payment_info(&self) -> ClientResult<()> {
        let epoch = self.session.epoch().await;
        let wallet = self.api.wallet().await.map_err(|e| {
            warn!("Failed to load payment info: {}", e);
            e
        })?;

        if !self.session.is_current(epoch).await {
            debug!("Discarding payment info from a previous session");
            return Ok(());
        }
        self.view
            .lock()
            .await
            .set_value(Field::WalletAddress, &wallet.wallet_address);
        self.data.write().await.wallet = Some(wallet);
        Ok(())
    }

    pub async fn request_payment(&self) -> ClientResult<()> {
        let notification = PaymentNotification {
            amount: self.options.subscription_price,
            message: Some("Monthly subscription payment".to_string()),
            transaction_hash: None,
        };

        let epoch = self.session.epoch().await;

        match self.api.request_payment(&notification).await {
            Ok(_) => {
                self.notifications
                    .show(NotificationEvent::success(
                        "Payment notification sent. It will be confirmed within 24 hours.",
                    ))
                    .await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    // === Account ===

    /// Fetch and render the profile. Any failure ends the session it was requested in.
    pub async fn load_user_profile(&self) -> ClientResult<UserProfile> {
        let epoch = self.session.epoch().await;
        self.load_profile_for(epoch).await
    }

    async fn load_profile_for(&self, epoch: u64) -> ClientResult<UserProfile> {
        let result = self.api.profile().await;

        if !self.session.is_current(epoch).await {
            debug!("Discarding profile response from a previous session");
            return result;
        }

        match result {
            Ok(user) => {
                render::render_profile(&mut *self.view.lock().await, &user, Utc::now());
                self.data.write().await.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                error!("Failed to load user profile: {}", e);
                self.expire_session().await;
                Err(ClientError::SessionInvalid(e.message()))
            }
        }
    }

    pub async fn update_profile(&self) -> ClientResult<()> {
        let update = {
            let view = self.view.lock().await;
            let language = view.value(Field::Language).trim().to_string();
            ProfileUpdate {
                full_name: view.value(Field::FullName).trim().to_string(),
                language: if language.is_empty() {
                    self.options.language.clone()
                } else {
                    language
                },
            }
        };

        if update.full_name.is_empty() {
            return self.reject("Please enter your full name.").await;
        }

        let epoch = self.session.epoch().await;

        match self.api.update_profile(&update).await {
            Ok(_) => {
                self.notifications
                    .show(NotificationEvent::success("Profile updated successfully."))
                    .await;
                self.load_user_profile().await.map(|_| ())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    pub async fn delete_account(&self) -> ClientResult<()> {
        let epoch = self.session.epoch().await;
        match self.api.delete_account().await {
            Ok(_) => {
                self.end_session().await;
                self.notifications
                    .show(NotificationEvent::info("Your account has been deleted."))
                    .await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, epoch).await),
        }
    }

    // === Navigation ===

    pub async fn navigate(&self, page: Page) {
        self.data.write().await.page = page;
        {
            let mut view = self.view.lock().await;
            view.set_text(Field::PageTitle, page.title());
            view.flush();
        }

        match page {
            Page::Overview => self.refresh_quietly().await,
            Page::Bot => {
                self.load_bot_settings().await.ok();
            }
            Page::Subscription => {
                self.load_payment_info().await.ok();
            }
            Page::Settings => {
                if let Some(user) = self.user().await {
                    render::render_profile_form(
                        &mut *self.view.lock().await,
                        &user,
                        &self.options.language,
                    );
                }
            }
            Page::ApiKeys => {
                self.load_api_keys_status().await.ok();
            }
        }
    }

    // === Internals ===

    async fn begin_auth(&self, submit: Field) -> ClientResult<()> {
        let phase = {
            let mut data = self.data.write().await;
            let phase = data.phase;
            if phase == SyncPhase::LoggedOut {
                data.phase = SyncPhase::LoggingIn;
            }
            phase
        };

        match phase {
            SyncPhase::LoggedOut => {
                self.view.lock().await.set_enabled(submit, false);
                Ok(())
            }
            SyncPhase::LoggingIn => self.reject("A login is already in progress.").await,
            SyncPhase::LoggedIn => self.reject("You are already logged in.").await,
        }
    }

    async fn finish_auth(
        self: &Arc<Self>,
        result: ClientResult<AuthResponse>,
        submit: Field,
        welcome: &str,
        describe: fn(&ClientError) -> String,
    ) -> ClientResult<()> {
        self.view.lock().await.set_enabled(submit, true);

        let outcome = result.and_then(|resp| match resp.access_token {
            Some(token) if !token.is_empty() => {
                debug!("Issued {} token", resp.token_type.as_deref().unwrap_or("bearer"));
                Ok((token, resp.user))
            }
            _ => Err(ClientError::InvalidResponse(
                "no access token in response".to_string(),
            )),
        });

        let (token, user) = match outcome {
            Ok(ok) => ok,
            Err(e) => {
                self.data.write().await.phase = SyncPhase::LoggedOut;
                self.notifications
                    .show(NotificationEvent::error(describe(&e)))
                    .await;
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&token).await {
            error!("Failed to persist session token: {}", e);
        }
        let epoch = self.session.begin(token).await;
        self.data.write().await.user = user;

        info!("Login successful");
        self.enter_logged_in(epoch).await;
        self.notifications.show(NotificationEvent::success(welcome)).await;

        self.load_profile_for(epoch).await.map(|_| ())
    }

    async fn enter_logged_in(self: &Arc<Self>, epoch: u64) {
        {
            let mut data = self.data.write().await;
            data.phase = SyncPhase::LoggedIn;
            data.page = Page::Overview;
        }
        {
            let mut view = self.view.lock().await;
            view.set_text(Field::PageTitle, Page::Overview.title());
            render::render_session(&mut view, true);
        }

        self.start_status_polling(epoch).await;
        self.refresh_quietly().await;
    }

    async fn start_status_polling(self: &Arc<Self>, epoch: u64) {
        let weak = Arc::downgrade(self);
        let handle = start_polling(self.options.poll_interval, move || {
            let weak = weak.clone();
            async move {
                if let Some(sync) = weak.upgrade() {
                    sync.poll_tick(epoch).await;
                }
            }
        });

        if let Some(previous) = self.poller.lock().await.replace(handle) {
            previous.stop();
        }
    }

    /// Stop polling before the process exits. The stored token is kept.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.poller.lock().await.take() {
            handle.stop();
        }
    }

    /// Leave `LoggedIn`: stop polling, forget the token, reset per-login state.
    async fn end_session(&self) {
        if let Some(handle) = self.poller.lock().await.take() {
            handle.stop();
        }
        if let Err(e) = self.store.clear().await {
            error!("Failed to clear stored session: {}", e);
        }
        self.session.clear().await;
        self.data.write().await.reset();

        render::render_session(&mut *self.view.lock().await, false);
        info!("Session ended");
    }

    async fn expire_session(&self) {
        if self.phase().await == SyncPhase::LoggedOut {
            return;
        }
        self.end_session().await;
        self.notifications
            .show(NotificationEvent::warning(
                "Your session has expired. Please log in again.",
            ))
            .await;
    }

    /// Surface a user action that failed in session `epoch`. A rejected token ends that
    /// session; failures from an earlier session are only logged.
    async fn fail(&self, err: ClientError, epoch: u64) -> ClientError {
        let err = err.into_session_error();
        if !self.session.is_current(epoch).await {
            debug!("Ignoring failure from a previous session: {}", err);
            return err;
        }

        let logged_in = self.phase().await != SyncPhase::LoggedOut;
        if logged_in && matches!(err, ClientError::SessionInvalid(_)) {
            self.expire_session().await;
        } else {
            self.notifications.notify(err.message(), Severity::Error).await;
        }
        err
    }

    async fn reject<T>(&self, message: impl Into<String>) -> ClientResult<T> {
        let message = message.into();
        self.notifications.notify(message.clone(), Severity::Error).await;
        Err(ClientError::Validation(message))
    }
}

fn login_error(err: &ClientError) -> String {
    let message = err.message();
    match err {
        ClientError::Connectivity(_) => message,
        _ if message.contains("Invalid email or password") => {
            "Incorrect email or password.".to_string()
        }
        _ if message.contains("blocked") => {
            "Your account has been blocked. Please contact support.".to_string()
        }
        _ => format!("Login failed: {}", message),
    }
}

fn register_error(err: &ClientError) -> String {
    let message = err.message();
    match err {
        ClientError::Connectivity(_) => message,
        _ if message.contains("already exists") => {
            "This email address is already in use.".to_string()
        }
        _ if message.contains("password") => {
            "Password is too weak. Use at least 6 characters.".to_string()
        }
        _ if message.contains("email") => "Invalid email address.".to_string(),
        _ if message.contains("Failed to create") => {
            "Account could not be created. Please check your details.".to_string()
        }
        _ => format!("Registration failed: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::{
        ACCOUNT, API_KEYS, API_KEYS_STATUS, BOT_SETTINGS, BOT_START, BOT_STATUS, BOT_STOP,
        FORGOT_PASSWORD, LOGIN, PAYMENT_REQUEST, PAYMENT_WALLET, PROFILE, REGISTER,
    };
    use crate::client::testing::ScriptedTransport;
    use crate::client::{HttpResponse, Method, RequestClient};
    use crate::session::MemoryTokenStore;
    use crate::view::MemoryView;
    use serde_json::{json, Value};

    struct Harness {
        sync: Arc<DashboardSync>,
        transport: ScriptedTransport,
        store: MemoryTokenStore,
    }

    fn harness(store: MemoryTokenStore) -> Harness {
        let transport = ScriptedTransport::new();
        let requests = RequestClient::new(Arc::new(transport.clone()), SessionHandle::new());
        let view = ViewBindings::bind(Box::new(MemoryView::complete())).unwrap();
        let sync = DashboardSync::new(
            ApiClient::new(requests),
            Arc::new(store.clone()),
            view,
            SyncOptions::default(),
        );
        Harness { sync, transport, store }
    }

    fn user() -> Value {
        json!({
            "uid": "u-1",
            "email": "ada@example.com",
            "full_name": "Ada",
            "role": "user",
            "subscription_status": "trial",
            "trial_end_date": "2099-01-01T00:00:00"
        })
    }

    fn status(state: &str, symbol: Option<&str>) -> Value {
        json!({
            "status": state,
            "symbol": symbol,
            "uptime": 65,
            "total_trades": 10,
            "winning_trades": 7,
            "losing_trades": 3,
            "total_pnl": 42.5
        })
    }

    /// A service that accepts ada@example.com and reports a stopped bot.
    fn serve_account(transport: &ScriptedTransport) {
        transport.respond(
            Method::Post,
            LOGIN,
            HttpResponse::json(
                200,
                json!({"access_token": "tok-123", "token_type": "bearer", "user": user()}),
            ),
        );
        transport.respond(Method::Get, PROFILE, HttpResponse::json(200, user()));
        transport.respond(Method::Get, BOT_STATUS, HttpResponse::json(200, status("stopped", None)));
    }

    async fn logged_in() -> Harness {
        let h = harness(MemoryTokenStore::new());
        serve_account(&h.transport);
        h.sync.fill(Field::LoginEmail, "ada@example.com").await;
        h.sync.fill(Field::LoginPassword, "secret1").await;
        h.sync.login().await.unwrap();
        h
    }

    async fn text(sync: &DashboardSync, field: Field) -> String {
        sync.with_view(|view| view.text(field)).await
    }

    async fn enabled(sync: &DashboardSync, field: Field) -> bool {
        sync.with_view(|view| view.is_enabled(field)).await
    }

    async fn has_severity(sync: &DashboardSync, severity: Severity) -> bool {
        sync.notifications()
            .get_recent(100)
            .await
            .iter()
            .any(|n| n.severity == severity)
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_stores_token_and_starts_polling() {
        let h = logged_in().await;

        assert_eq!(h.store.load().await.unwrap().as_deref(), Some("tok-123"));
        assert_eq!(h.sync.session().token().await.as_deref(), Some("tok-123"));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert_eq!(h.sync.page().await, Page::Overview);
        assert!(h.sync.is_polling().await);
        assert!(enabled(&h.sync, Field::LoginSubmit).await);

        // Immediate refresh on entry, authorized with the new token.
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 1);
        let status_call = h
            .transport
            .calls()
            .into_iter()
            .find(|c| c.path == BOT_STATUS)
            .unwrap();
        assert_eq!(status_call.header("Authorization"), Some("Bearer tok-123"));

        assert_eq!(text(&h.sync, Field::UserName).await, "Ada");
        assert_eq!(text(&h.sync, Field::BotStatus).await, "Stopped");
        assert_eq!(text(&h.sync, Field::WinRate).await, "70.0%");
        assert!(h.sync.with_view(|v| v.is_visible(Field::Dashboard)).await);
        assert!(!h.sync.with_view(|v| v.is_visible(Field::LandingPage)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_login_stores_nothing() {
        let h = harness(MemoryTokenStore::new());
        h.transport.respond(
            Method::Post,
            LOGIN,
            HttpResponse::json(401, json!({"detail": "Invalid email or password"})),
        );
        h.sync.fill(Field::LoginEmail, "ada@example.com").await;
        h.sync.fill(Field::LoginPassword, "wrong-pass").await;

        let err = h.sync.login().await.unwrap_err();
        assert!(matches!(err, ClientError::Request { status: 401, .. }));

        assert_eq!(h.store.load().await.unwrap(), None);
        assert_eq!(h.sync.session().token().await, None);
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedOut);
        assert!(!h.sync.is_polling().await);
        assert!(enabled(&h.sync, Field::LoginSubmit).await);

        let shown = h.sync.notifications().current().await.unwrap();
        assert_eq!(shown.severity, Severity::Error);
        assert_eq!(shown.message, "Incorrect email or password.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_requires_both_fields() {
        let h = harness(MemoryTokenStore::new());
        h.sync.fill(Field::LoginEmail, "ada@example.com").await;

        let err = h.sync.login().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(h.transport.calls().is_empty());
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_rejects_short_password() {
        let h = harness(MemoryTokenStore::new());
        h.sync.fill(Field::RegisterName, "Ada").await;
        h.sync.fill(Field::RegisterEmail, "ada@example.com").await;
        h.sync.fill(Field::RegisterPassword, "123").await;

        let err = h.sync.register().await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Validation("Password must be at least 6 characters.".to_string())
        );
        assert!(h.transport.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_login_rejected_while_first_in_flight() {
        let h = harness(MemoryTokenStore::new());
        serve_account(&h.transport);
        h.transport.respond_after(
            Method::Post,
            LOGIN,
            HttpResponse::json(200, json!({"access_token": "tok-123", "user": user()})),
            Duration::from_secs(1),
        );
        h.sync.fill(Field::LoginEmail, "ada@example.com").await;
        h.sync.fill(Field::LoginPassword, "secret1").await;

        let sync = h.sync.clone();
        let first = tokio::spawn(async move { sync.login().await });
        while h.sync.phase().await != SyncPhase::LoggingIn {
            tokio::task::yield_now().await;
        }
        assert!(!enabled(&h.sync, Field::LoginSubmit).await);

        let err = h.sync.login().await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Validation("A login is already in progress.".to_string())
        );

        first.await.unwrap().unwrap();
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert_eq!(h.transport.count(Method::Post, LOGIN), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_failure_keeps_session() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Get,
            BOT_STATUS,
            HttpResponse::json(500, json!({"detail": "Internal server error"})),
        );

        tokio::time::sleep(Duration::from_secs(25)).await;

        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 3);
        assert_eq!(h.store.load().await.unwrap().as_deref(), Some("tok-123"));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert_eq!(h.sync.page().await, Page::Overview);
        assert!(h.sync.is_polling().await);
        assert!(!has_severity(&h.sync, Severity::Error).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_unreachable_server_is_silent() {
        let h = logged_in().await;
        h.transport.unreachable(Method::Get, BOT_STATUS);

        tokio::time::sleep(Duration::from_secs(11)).await;

        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 2);
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert!(!has_severity(&h.sync, Severity::Error).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_stops_polling() {
        let h = logged_in().await;
        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 3);

        h.sync.logout().await;
        assert!(!h.sync.is_polling().await);
        assert_eq!(h.store.load().await.unwrap(), None);
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedOut);
        assert!(h.sync.latest_status().await.is_none());
        assert!(h.sync.user().await.is_none());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 3);
        assert!(h.sync.with_view(|v| v.is_visible(Field::LandingPage)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_status_after_logout_is_ignored() {
        let h = logged_in().await;
        h.transport.respond_after(
            Method::Get,
            BOT_STATUS,
            HttpResponse::json(200, status("running", Some("LATEUSDT"))),
            Duration::from_secs(3),
        );

        // The 10s tick is in flight until 13s; log out in between.
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 2);
        h.sync.logout().await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(h.sync.latest_status().await.is_none());
        assert_ne!(text(&h.sync, Field::CurrentSymbol).await, "LATEUSDT");
        assert_ne!(text(&h.sync, Field::BotStatus).await, "Running");
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_profile_after_logout_is_ignored() {
        let h = harness(MemoryTokenStore::new());
        serve_account(&h.transport);
        h.transport.respond_after(
            Method::Get,
            PROFILE,
            HttpResponse::json(200, user()),
            Duration::from_secs(3),
        );
        h.sync.fill(Field::LoginEmail, "ada@example.com").await;
        h.sync.fill(Field::LoginPassword, "secret1").await;

        let sync = h.sync.clone();
        let login = tokio::spawn(async move { sync.login().await });
        while h.transport.count(Method::Get, PROFILE) == 0 {
            tokio::task::yield_now().await;
        }
        h.sync.logout().await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        login.await.unwrap().ok();

        assert_eq!(h.sync.phase().await, SyncPhase::LoggedOut);
        assert!(h.sync.user().await.is_none());
        assert_ne!(text(&h.sync, Field::UserName).await, "Ada");
        assert_ne!(text(&h.sync, Field::UserEmail).await, "ada@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_profile_failure_keeps_newer_session() {
        let h = harness(MemoryTokenStore::new());
        serve_account(&h.transport);
        h.transport.respond_after(
            Method::Get,
            PROFILE,
            HttpResponse::json(500, json!({"detail": "Internal server error"})),
            Duration::from_secs(3),
        );
        h.sync.fill(Field::LoginEmail, "ada@example.com").await;
        h.sync.fill(Field::LoginPassword, "secret1").await;

        let sync = h.sync.clone();
        let first = tokio::spawn(async move { sync.login().await });
        while h.transport.count(Method::Get, PROFILE) == 0 {
            tokio::task::yield_now().await;
        }
        h.sync.logout().await;

        h.transport.respond(
            Method::Post,
            LOGIN,
            HttpResponse::json(200, json!({"access_token": "tok-456", "user": user()})),
        );
        h.transport.respond(Method::Get, PROFILE, HttpResponse::json(200, user()));
        h.sync.login().await.unwrap();

        // The first session's profile fails only after the second one is in place.
        assert!(first.await.unwrap().is_err());

        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert_eq!(h.store.load().await.unwrap().as_deref(), Some("tok-456"));
        assert_eq!(h.sync.session().token().await.as_deref(), Some("tok-456"));
        assert!(h.sync.is_polling().await);
        assert_eq!(text(&h.sync, Field::UserName).await, "Ada");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_action_failure_keeps_newer_session() {
        let h = logged_in().await;
        h.transport.respond_after(
            Method::Post,
            BOT_STOP,
            HttpResponse::json(401, json!({"detail": "Could not validate credentials"})),
            Duration::from_secs(3),
        );

        let sync = h.sync.clone();
        let stop = tokio::spawn(async move { sync.stop_bot().await });
        while h.transport.count(Method::Post, BOT_STOP) == 0 {
            tokio::task::yield_now().await;
        }
        h.sync.logout().await;

        h.transport.respond(
            Method::Post,
            LOGIN,
            HttpResponse::json(200, json!({"access_token": "tok-456", "user": user()})),
        );
        h.sync.login().await.unwrap();

        let err = stop.await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::SessionInvalid(_)));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert_eq!(h.store.load().await.unwrap().as_deref(), Some("tok-456"));
        assert!(h.sync.is_polling().await);
        assert!(!has_severity(&h.sync, Severity::Warning).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_polling_and_keeps_token() {
        let h = logged_in().await;
        assert!(h.sync.is_polling().await);

        h.sync.shutdown().await;
        assert!(!h.sync.is_polling().await);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 1);
        assert_eq!(h.store.load().await.unwrap().as_deref(), Some("tok-123"));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_only_on_overview() {
        let h = logged_in().await;
        h.sync.navigate(Page::ApiKeys).await;

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 1);

        h.sync.navigate(Page::Overview).await;
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_bot_without_login() {
        let h = harness(MemoryTokenStore::new());
        h.transport.respond(
            Method::Post,
            BOT_START,
            HttpResponse::json(200, json!({"message": "Bot started for BTCUSDT"})),
        );
        h.transport.respond(
            Method::Get,
            BOT_STATUS,
            HttpResponse::json(200, status("running", Some("BTCUSDT"))),
        );

        let err = h.sync.start_bot().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(h.transport.calls().is_empty());
        assert_eq!(
            h.sync.notifications().current().await.unwrap().severity,
            Severity::Error
        );

        h.sync.fill(Field::SymbolInput, " btcusdt ").await;
        h.sync.start_bot().await.unwrap();

        let start = &h.transport.calls()[0];
        assert_eq!(start.path, BOT_START);
        assert_eq!(start.header("Authorization"), None);
        let body: Value = serde_json::from_str(start.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["symbol"], "BTCUSDT");

        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 1);
        assert!(h.sync.latest_status().await.unwrap().state.is_running());
        assert_eq!(text(&h.sync, Field::BotStatus).await, "Running");
        assert_eq!(text(&h.sync, Field::CurrentSymbol).await, "BTCUSDT");
        assert!(!enabled(&h.sync, Field::StartBotButton).await);
        assert!(enabled(&h.sync, Field::StopBotButton).await);

        let shown = h.sync.notifications().current().await.unwrap();
        assert_eq!(shown.severity, Severity::Success);
        assert_eq!(shown.message, "Bot started for BTCUSDT");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_token_on_action_logs_out() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Post,
            BOT_STOP,
            HttpResponse::json(401, json!({"detail": "Could not validate credentials"})),
        );

        let err = h.sync.stop_bot().await.unwrap_err();
        assert!(matches!(err, ClientError::SessionInvalid(_)));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedOut);
        assert_eq!(h.store.load().await.unwrap(), None);
        assert!(!h.sync.is_polling().await);
        assert_eq!(
            h.sync.notifications().current().await.unwrap().severity,
            Severity::Warning
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_failure_is_shown_and_session_kept() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Post,
            BOT_START,
            HttpResponse::json(400, json!({"detail": "Please add your API keys first"})),
        );
        h.sync.fill(Field::SymbolInput, "ETHUSDT").await;

        let err = h.sync.start_bot().await.unwrap_err();
        assert!(matches!(err, ClientError::Request { status: 400, .. }));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);

        let shown = h.sync.notifications().current().await.unwrap();
        assert_eq!(shown.severity, Severity::Error);
        assert_eq!(shown.message, "Please add your API keys first");
    }

    #[tokio::test(start_paused = true)]
    async fn test_profile_failure_ends_session() {
        let h = harness(MemoryTokenStore::new());
        serve_account(&h.transport);
        h.transport.respond(
            Method::Get,
            PROFILE,
            HttpResponse::json(500, json!({"detail": "Internal server error"})),
        );
        h.sync.fill(Field::LoginEmail, "ada@example.com").await;
        h.sync.fill(Field::LoginPassword, "secret1").await;

        let err = h.sync.login().await.unwrap_err();
        assert!(matches!(err, ClientError::SessionInvalid(_)));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedOut);
        assert_eq!(h.store.load().await.unwrap(), None);
        assert!(!h.sync.is_polling().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_uses_stored_token() {
        let h = harness(MemoryTokenStore::with_token("tok-stored"));
        serve_account(&h.transport);

        assert!(h.sync.restore().await);
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert!(h
            .transport
            .calls()
            .iter()
            .all(|c| c.header("Authorization") == Some("Bearer tok-stored")));
        assert_eq!(text(&h.sync, Field::UserEmail).await, "ada@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_without_token_shows_landing() {
        let h = harness(MemoryTokenStore::new());

        assert!(!h.sync.restore().await);
        assert!(h.transport.calls().is_empty());
        assert!(h.sync.with_view(|v| v.is_visible(Field::LandingPage)).await);
        assert!(!h.sync.with_view(|v| v.is_visible(Field::Dashboard)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_settings_form() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Get,
            BOT_SETTINGS,
            HttpResponse::json(
                200,
                json!({
                    "order_size_usdt": 50.0,
                    "leverage": 5,
                    "stop_loss_percent": 2.5,
                    "take_profit_percent": 6.0,
                    "timeframe": "1h"
                }),
            ),
        );
        h.transport.respond(
            Method::Post,
            BOT_SETTINGS,
            HttpResponse::json(200, json!({"message": "Settings updated"})),
        );

        h.sync.navigate(Page::Bot).await;
        assert_eq!(h.sync.with_view(|v| v.value(Field::Leverage)).await, "5");
        assert_eq!(h.sync.with_view(|v| v.value(Field::Timeframe)).await, "1h");

        h.sync.fill(Field::Leverage, "ten").await;
        let err = h.sync.save_bot_settings().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(h.transport.count(Method::Post, BOT_SETTINGS), 0);

        h.sync.fill(Field::Leverage, "8").await;
        h.sync.save_bot_settings().await.unwrap();
        assert_eq!(h.transport.count(Method::Post, BOT_SETTINGS), 1);
        assert_eq!(h.sync.data().await.settings.unwrap().leverage, 8);

        h.sync.reset_bot_settings().await;
        assert_eq!(h.sync.with_view(|v| v.value(Field::Leverage)).await, "10");
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_api_keys_clears_form() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Post,
            API_KEYS,
            HttpResponse::json(200, json!({"message": "API keys saved"})),
        );

        let err = h.sync.save_api_keys().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        h.sync.fill(Field::ApiKey, "key").await;
        h.sync.fill(Field::ApiSecret, "secret").await;
        h.sync.fill(Field::IsTestnet, "true").await;
        h.sync.save_api_keys().await.unwrap();

        let call = h
            .transport
            .calls()
            .into_iter()
            .find(|c| c.path == API_KEYS)
            .unwrap();
        let body: Value = serde_json::from_str(call.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["is_testnet"], true);
        assert_eq!(h.sync.with_view(|v| v.value(Field::ApiKey)).await, "");
        assert_eq!(h.sync.with_view(|v| v.value(Field::ApiSecret)).await, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_api_keys_page_shows_status() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Get,
            API_KEYS_STATUS,
            HttpResponse::json(200, json!({"has_api_keys": false})),
        );

        h.sync.navigate(Page::ApiKeys).await;
        assert_eq!(h.transport.count(Method::Get, API_KEYS_STATUS), 1);
        assert_eq!(text(&h.sync, Field::ApiKeysStatus).await, "Not configured");

        h.transport.respond(
            Method::Post,
            API_KEYS,
            HttpResponse::json(200, json!({"message": "API keys saved"})),
        );
        h.transport.respond(
            Method::Get,
            API_KEYS_STATUS,
            HttpResponse::json(200, json!({"has_api_keys": true, "is_testnet": false})),
        );
        h.sync.fill(Field::ApiKey, "key").await;
        h.sync.fill(Field::ApiSecret, "secret").await;
        h.sync.save_api_keys().await.unwrap();

        assert_eq!(h.transport.count(Method::Get, API_KEYS_STATUS), 2);
        assert_eq!(text(&h.sync, Field::ApiKeysStatus).await, "Configured");
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_logs_in() {
        let h = harness(MemoryTokenStore::new());
        serve_account(&h.transport);
        h.transport.respond(
            Method::Post,
            REGISTER,
            HttpResponse::json(200, json!({"access_token": "tok-new", "user": user()})),
        );
        h.sync.fill(Field::RegisterName, " Ada ").await;
        h.sync.fill(Field::RegisterEmail, "ada@example.com").await;
        h.sync.fill(Field::RegisterPassword, "secret1").await;

        h.sync.register().await.unwrap();

        let call = h
            .transport
            .calls()
            .into_iter()
            .find(|c| c.path == REGISTER)
            .unwrap();
        let body: Value = serde_json::from_str(call.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["full_name"], "Ada");
        assert_eq!(body["language"], "en");

        assert_eq!(h.store.load().await.unwrap().as_deref(), Some("tok-new"));
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
        assert!(h.sync.is_polling().await);
        assert!(enabled(&h.sync, Field::RegisterSubmit).await);
        assert_eq!(
            h.sync.notifications().current().await.unwrap().severity,
            Severity::Success
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_forgot_password() {
        let h = harness(MemoryTokenStore::new());
        h.transport.respond(
            Method::Post,
            FORGOT_PASSWORD,
            HttpResponse::json(200, json!({"message": "Reset email sent"})),
        );

        let err = h.sync.forgot_password().await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Validation("Please enter your email address.".to_string())
        );
        assert!(h.transport.calls().is_empty());

        h.sync.fill(Field::ForgotEmail, "ada@example.com").await;
        h.sync.forgot_password().await.unwrap();

        let call = &h.transport.calls()[0];
        assert_eq!(call.path, FORGOT_PASSWORD);
        let body: Value = serde_json::from_str(call.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "ada@example.com");

        let shown = h.sync.notifications().current().await.unwrap();
        assert_eq!(shown.severity, Severity::Success);
        assert_eq!(
            shown.message,
            "A password reset link has been sent to your email address."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscription_page_and_payment() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Get,
            PAYMENT_WALLET,
            HttpResponse::json(
                200,
                json!({"wallet_address": "TXyz123", "currency": "USDT", "network": "TRC20"}),
            ),
        );
        h.transport.respond(
            Method::Post,
            PAYMENT_REQUEST,
            HttpResponse::json(200, json!({"message": "Payment notification received"})),
        );

        h.sync.navigate(Page::Subscription).await;
        assert_eq!(h.sync.page().await, Page::Subscription);
        assert_eq!(h.sync.with_view(|v| v.value(Field::WalletAddress)).await, "TXyz123");
        assert_eq!(h.sync.data().await.wallet.unwrap().wallet_address, "TXyz123");

        h.sync.request_payment().await.unwrap();

        let call = h
            .transport
            .calls()
            .into_iter()
            .find(|c| c.path == PAYMENT_REQUEST)
            .unwrap();
        let body: Value = serde_json::from_str(call.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["amount"], 10.0);
        assert_eq!(body["message"], "Monthly subscription payment");
        assert_eq!(
            h.sync.notifications().current().await.unwrap().severity,
            Severity::Success
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_profile_reloads_profile() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Put,
            PROFILE,
            HttpResponse::json(200, json!({"message": "Profile updated"})),
        );
        assert_eq!(h.transport.count(Method::Get, PROFILE), 1);

        h.sync.fill(Field::FullName, "  ").await;
        let err = h.sync.update_profile().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(h.transport.count(Method::Put, PROFILE), 0);

        h.sync.fill(Field::FullName, "Ada Lovelace").await;
        h.sync.update_profile().await.unwrap();

        let call = h
            .transport
            .calls()
            .into_iter()
            .find(|c| c.method == Method::Put)
            .unwrap();
        let body: Value = serde_json::from_str(call.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["full_name"], "Ada Lovelace");
        assert_eq!(body["language"], "en");
        assert_eq!(h.transport.count(Method::Get, PROFILE), 2);
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedIn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_account_ends_session() {
        let h = logged_in().await;
        h.transport.respond(
            Method::Delete,
            ACCOUNT,
            HttpResponse::json(200, json!({"message": "Account deleted"})),
        );

        h.sync.delete_account().await.unwrap();

        assert_eq!(h.transport.count(Method::Delete, ACCOUNT), 1);
        assert_eq!(h.sync.phase().await, SyncPhase::LoggedOut);
        assert_eq!(h.store.load().await.unwrap(), None);
        assert_eq!(h.sync.session().token().await, None);
        assert!(!h.sync.is_polling().await);
        assert!(h.sync.user().await.is_none());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(h.transport.count(Method::Get, BOT_STATUS), 1);
        assert!(h.sync.with_view(|v| v.is_visible(Field::LandingPage)).await);
    }

    #[test]
    fn test_login_error_messages() {
        let bad = ClientError::Request { status: 401, message: "Invalid email or password".to_string() };
        assert_eq!(login_error(&bad), "Incorrect email or password.");
        assert_eq!(login_error(&ClientError::connectivity()), crate::client::CONNECTIVITY_MESSAGE);

        let taken = ClientError::Request { status: 400, message: "User already exists".to_string() };
        assert_eq!(register_error(&taken), "This email address is already in use.");
    }
}
