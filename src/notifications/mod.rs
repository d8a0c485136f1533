use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::view::{Field, SharedView, ViewBindings};

const SHOW_CLASS: &str = "show";

/// Notification severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Info,
        Severity::Warning,
    ];

    /// CSS class carried by the notification element.
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

/// A transient message shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub severity: Severity,
}

impl NotificationEvent {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }
}

/// Shows one notification at a time and dismisses it after a fixed delay.
#[derive(Clone)]
pub struct NotificationCenter {
    view: SharedView,
    current: Arc<RwLock<Option<NotificationEvent>>>,
    history: Arc<RwLock<VecDeque<NotificationEvent>>>,
    dismiss_after: Duration,
    max_history: usize,
}

impl NotificationCenter {
    pub fn new(view: SharedView, dismiss_after: Duration) -> Self {
        Self {
            view,
            current: Arc::new(RwLock::new(None)),
            history: Arc::new(RwLock::new(VecDeque::new())),
            dismiss_after,
            max_history: 100,
        }
    }

    /// Display `event`, replacing whatever is currently shown.
    pub async fn show(&self, event: NotificationEvent) {
        match event.severity {
            Severity::Error => error!("{}", event.message),
            Severity::Warning => warn!("{}", event.message),
            Severity::Success | Severity::Info => info!("{}", event.message),
        }

        {
            let mut view = self.view.lock().await;
            paint(&mut view, &event);
        }

        *self.current.write().await = Some(event.clone());

        let mut history = self.history.write().await;
        history.push_front(event.clone());
        if history.len() > self.max_history {
            history.pop_back();
        }
        drop(history);

        let center = self.clone();
        let id = event.id;
        tokio::spawn(async move {
            tokio::time::sleep(center.dismiss_after).await;
            center.dismiss(&id).await;
        });
    }

    pub async fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.show(NotificationEvent::new(message, severity)).await;
    }

    /// Hide the notification with `id` if it is still the one on screen.
    async fn dismiss(&self, id: &str) {
        let mut current = self.current.write().await;
        if current.as_ref().map(|e| e.id.as_str()) != Some(id) {
            return;
        }
        *current = None;
        drop(current);

        let mut view = self.view.lock().await;
        view.set_class(Field::Notification, SHOW_CLASS, false);
        view.set_visible(Field::Notification, false);
        view.flush();
    }

    #[cfg(test)]
    pub async fn current(&self) -> Option<NotificationEvent> {
        self.current.read().await.clone()
    }

    pub async fn get_recent(&self, limit: usize) -> Vec<NotificationEvent> {
        self.history.read().await.iter().take(limit).cloned().collect()
    }
}

fn paint(view: &mut ViewBindings, event: &NotificationEvent) {
    view.set_text(Field::Notification, &event.message);
    for severity in Severity::ALL {
        view.set_class(Field::Notification, severity.class(), severity == event.severity);
    }
    view.set_class(Field::Notification, SHOW_CLASS, true);
    view.set_visible(Field::Notification, true);
    view.flush();
}
