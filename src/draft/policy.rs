use crate::form::accessor::FormEntry;

/// Name of the anti-forgery token field rendered into every backend form.
pub const CSRF_TOKEN_FIELD: &str = "csrf_token";

/// Decides which form entries never reach the store.
///
/// The anti-forgery token and any file payload are always excluded; file
/// entries are recognised by their value, not by their name.
#[derive(Debug, Clone, Default)]
pub struct ExclusionPolicy {
    extra_names: Vec<String>,
}

impl ExclusionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_excluded_names<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.extra_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn excludes(&self, entry: &FormEntry) -> bool {
        entry.name == CSRF_TOKEN_FIELD
            || entry.value.is_file()
            || self.extra_names.iter().any(|n| *n == entry.name)
    }
}
