use std::collections::{BTreeSet, HashMap};

use super::{Field, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub value: String,
    pub enabled: bool,
    pub visible: bool,
    pub classes: BTreeSet<String>,
}

impl Default for Fragment {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: String::new(),
            enabled: true,
            visible: true,
            classes: BTreeSet::new(),
        }
    }
}

/// Fragment map standing in for a document. Writes to absent fields are dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    fragments: HashMap<Field, Fragment>,
}

impl MemoryView {
    pub fn complete() -> Self {
        Self::with_fields(&Field::ALL)
    }

    pub fn with_fields(fields: &[Field]) -> Self {
        Self {
            fragments: fields.iter().map(|f| (*f, Fragment::default())).collect(),
        }
    }

    pub fn fragment(&self, field: Field) -> Option<&Fragment> {
        self.fragments.get(&field)
    }

    fn edit(&mut self, field: Field, apply: impl FnOnce(&mut Fragment)) {
        if let Some(fragment) = self.fragments.get_mut(&field) {
            apply(fragment);
        }
    }
}

impl View for MemoryView {
    fn contains(&self, field: Field) -> bool {
        self.fragments.contains_key(&field)
    }

    fn set_text(&mut self, field: Field, text: &str) {
        self.edit(field, |f| f.text = text.to_string());
    }

    fn text(&self, field: Field) -> String {
        self.fragment(field).map(|f| f.text.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, field: Field, value: &str) {
        self.edit(field, |f| f.value = value.to_string());
    }

    fn value(&self, field: Field) -> String {
        self.fragment(field).map(|f| f.value.clone()).unwrap_or_default()
    }

    fn set_enabled(&mut self, field: Field, enabled: bool) {
        self.edit(field, |f| f.enabled = enabled);
    }

    fn is_enabled(&self, field: Field) -> bool {
        self.fragment(field).map(|f| f.enabled).unwrap_or(false)
    }

    fn set_class(&mut self, field: Field, class: &str, on: bool) {
        self.edit(field, |f| {
            if on {
                f.classes.insert(class.to_string());
            } else {
                f.classes.remove(class);
            }
        });
    }

    fn has_class(&self, field: Field, class: &str) -> bool {
        self.fragment(field)
            .map(|f| f.classes.contains(class))
            .unwrap_or(false)
    }

    fn set_visible(&mut self, field: Field, visible: bool) {
        self.edit(field, |f| f.visible = visible);
    }

    fn is_visible(&self, field: Field) -> bool {
        self.fragment(field).map(|f| f.visible).unwrap_or(false)
    }
}
