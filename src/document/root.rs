//! Root document element
//!
//! The synchronizer only needs class toggles and custom properties, so the
//! root is a small trait. `StyleRoot` is the in-memory implementation used
//! natively and in tests; it renders to a `:root` CSS block.

use std::collections::{BTreeMap, BTreeSet};

/// The top-level element global theme state is written to
pub trait RootElement: Send {
    /// Add or remove a class
    fn set_class(&mut self, class: &str, enabled: bool);

    fn has_class(&self, class: &str) -> bool;

    /// Set a custom property such as `--mood-accent`
    fn set_property(&mut self, name: &str, value: &str);

    fn remove_property(&mut self, name: &str);

    fn property(&self, name: &str) -> Option<String>;
}

/// In-memory root element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRoot {
    classes: BTreeSet<String>,
    properties: BTreeMap<String, String>,
    /// Number of mutating writes that actually changed something
    writes: u64,
}

impl StyleRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Render as CSS
    ///
    /// ```text
    /// /* class="dark" */
    /// :root {
    ///   --mood-accent: #34d399;
    /// }
    /// ```
    pub fn to_css(&self) -> String {
        let classes: Vec<&str> = self.classes().collect();
        let mut css = format!("/* class=\"{}\" */\n:root {{\n", classes.join(" "));
        for (name, value) in self.properties() {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n");
        css
    }
}

impl RootElement for StyleRoot {
    fn set_class(&mut self, class: &str, enabled: bool) {
        let changed = if enabled {
            self.classes.insert(class.to_string())
        } else {
            self.classes.remove(class)
        };
        if changed {
            self.writes += 1;
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn set_property(&mut self, name: &str, value: &str) {
        if self.properties.get(name).map(String::as_str) != Some(value) {
            self.properties.insert(name.to_string(), value.to_string());
            self.writes += 1;
        }
    }

    fn remove_property(&mut self, name: &str) {
        if self.properties.remove(name).is_some() {
            self.writes += 1;
        }
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}
