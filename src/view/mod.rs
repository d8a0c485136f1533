pub mod field;
pub mod memory;
pub mod terminal;

pub use field::Field;
pub use memory::MemoryView;
pub use terminal::TerminalView;

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// The bound view, shared by the controller and the notification center.
pub type SharedView = Arc<Mutex<ViewBindings>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("view is missing required elements: {}", .0.iter().map(|f| f.id()).collect::<Vec<_>>().join(", "))]
    MissingFields(Vec<Field>),
}

/// A rendering surface addressed by logical field.
pub trait View: Send + Sync {
    fn contains(&self, field: Field) -> bool;

    fn set_text(&mut self, field: Field, text: &str);
    fn text(&self, field: Field) -> String;

    /// Form value (input contents). Checkboxes use `"true"`/`"false"`.
    fn set_value(&mut self, field: Field, value: &str);
    fn value(&self, field: Field) -> String;

    fn set_enabled(&mut self, field: Field, enabled: bool);
    fn is_enabled(&self, field: Field) -> bool;

    fn set_class(&mut self, field: Field, class: &str, on: bool);
    fn has_class(&self, field: Field, class: &str) -> bool;

    fn set_visible(&mut self, field: Field, visible: bool);
    fn is_visible(&self, field: Field) -> bool;

    /// Called once at the end of every render step.
    fn flush(&mut self) {}
}

/// A view whose elements were checked once against the full field set.
///
/// Everything after `bind` can address any `Field` without further checks.
pub struct ViewBindings {
    view: Box<dyn View>,
}

impl ViewBindings {
    pub fn bind(view: Box<dyn View>) -> Result<Self, BindingError> {
        let missing: Vec<Field> = Field::ALL
            .iter()
            .copied()
            .filter(|field| !view.contains(*field))
            .collect();

        if !missing.is_empty() {
            return Err(BindingError::MissingFields(missing));
        }
        Ok(Self { view })
    }

    pub fn shared(self) -> SharedView {
        Arc::new(Mutex::new(self))
    }

    pub fn set_text(&mut self, field: Field, text: impl AsRef<str>) {
        self.view.set_text(field, text.as_ref());
    }

    pub fn text(&self, field: Field) -> String {
        self.view.text(field)
    }

    pub fn set_value(&mut self, field: Field, value: impl AsRef<str>) {
        self.view.set_value(field, value.as_ref());
    }

    pub fn value(&self, field: Field) -> String {
        self.view.value(field)
    }

    pub fn set_enabled(&mut self, field: Field, enabled: bool) {
        self.view.set_enabled(field, enabled);
    }

    pub fn is_enabled(&self, field: Field) -> bool {
        self.view.is_enabled(field)
    }

    pub fn set_class(&mut self, field: Field, class: &str, on: bool) {
        self.view.set_class(field, class, on);
    }

    pub fn has_class(&self, field: Field, class: &str) -> bool {
        self.view.has_class(field, class)
    }

    pub fn set_visible(&mut self, field: Field, visible: bool) {
        self.view.set_visible(field, visible);
    }

    pub fn is_visible(&self, field: Field) -> bool {
        self.view.is_visible(field)
    }

    pub fn flush(&mut self) {
        self.view.flush();
    }
}
