use super::{Field, MemoryView, View};

const STATUS_ROWS: [(&str, Field); 6] = [
    ("Bot", Field::BotStatus),
    ("Symbol", Field::CurrentSymbol),
    ("Position", Field::CurrentPosition),
    ("Last signal", Field::LastSignal),
    ("Uptime", Field::Uptime),
    ("Win rate", Field::WinRate),
];

const STATS_ROWS: [(&str, Field); 6] = [
    ("Total PnL", Field::TotalPnl),
    ("Trades", Field::StatsTotal),
    ("Winning", Field::StatsWinning),
    ("Losing", Field::StatsLosing),
    ("Profit", Field::StatsProfit),
    ("Loss", Field::StatsLoss),
];

/// Prints the dashboard to stdout whenever the visible state changed.
#[derive(Debug)]
pub struct TerminalView {
    inner: MemoryView,
    last_frame: String,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            inner: MemoryView::complete(),
            last_frame: String::new(),
        }
    }

    pub fn frame(&self) -> String {
        let mut out = String::new();

        if !self.inner.is_visible(Field::Dashboard) {
            out.push_str("Not logged in.\n");
        } else {
            let user = self.inner.text(Field::UserName);
            if !user.is_empty() {
                out.push_str(&format!(
                    "{} <{}> | {} | {}\n",
                    user,
                    self.inner.text(Field::UserEmail),
                    self.inner.text(Field::SubscriptionStatus),
                    self.inner.text(Field::RemainingTime),
                ));
            }
            out.push_str(&format!("== {} ==\n", self.inner.text(Field::PageTitle)));
            for (label, field) in STATUS_ROWS.iter().chain(STATS_ROWS.iter()) {
                out.push_str(&format!("{:<12} {}\n", label, self.inner.text(*field)));
            }
        }

        if self.inner.is_visible(Field::Notification) {
            out.push_str(&format!(">> {}\n", self.inner.text(Field::Notification)));
        }
        out
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TerminalView {
    fn contains(&self, field: Field) -> bool {
        self.inner.contains(field)
    }

    fn set_text(&mut self, field: Field, text: &str) {
        self.inner.set_text(field, text);
    }

    fn text(&self, field: Field) -> String {
        self.inner.text(field)
    }

    fn set_value(&mut self, field: Field, value: &str) {
        self.inner.set_value(field, value);
    }

    fn value(&self, field: Field) -> String {
        self.inner.value(field)
    }

    fn set_enabled(&mut self, field: Field, enabled: bool) {
        self.inner.set_enabled(field, enabled);
    }

    fn is_enabled(&self, field: Field) -> bool {
        self.inner.is_enabled(field)
    }

    fn set_class(&mut self, field: Field, class: &str, on: bool) {
        self.inner.set_class(field, class, on);
    }

    fn has_class(&self, field: Field, class: &str) -> bool {
        self.inner.has_class(field, class)
    }

    fn set_visible(&mut self, field: Field, visible: bool) {
        self.inner.set_visible(field, visible);
    }

    fn is_visible(&self, field: Field) -> bool {
        self.inner.is_visible(field)
    }

    fn flush(&mut self) {
        let frame = self.frame();
        if frame != self.last_frame {
            println!("{}", frame);
            self.last_frame = frame;
        }
    }
}
