use serde::Serialize;

/// The closed set of category values the selection control offers.
///
/// The empty selection ("any category") is always accepted in addition to the
/// configured entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryOptions {
    options: Vec<String>,
}

impl CategoryOptions {
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn accepts(&self, value: &str) -> bool {
        value.is_empty() || self.canonical(value).is_some()
    }

    /// Returns the configured spelling for `value`, compared case-insensitively.
    pub fn canonical(&self, value: &str) -> Option<&str> {
        let wanted = value.to_lowercase();
        self.options
            .iter()
            .find(|option| option.to_lowercase() == wanted)
            .map(String::as_str)
    }
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self::new(crate::config::default_categories())
    }
}
