use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Overview,
    Bot,
    ApiKeys,
    Subscription,
    Settings,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Bot => "Bot Control",
            Page::ApiKeys => "API Keys",
            Page::Subscription => "Subscription",
            Page::Settings => "Settings",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Bot => "bot",
            Page::ApiKeys => "api-keys",
            Page::Subscription => "subscription",
            Page::Settings => "settings",
        }
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overview" => Ok(Page::Overview),
            "bot" => Ok(Page::Bot),
            "api-keys" | "apikeys" => Ok(Page::ApiKeys),
            "subscription" => Ok(Page::Subscription),
            "settings" => Ok(Page::Settings),
            other => Err(format!("Unknown page: {}", other)),
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
