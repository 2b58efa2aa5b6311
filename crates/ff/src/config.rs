//! Context configuration.

use std::path::PathBuf;

use ff_store::Layout;

/// Default storage root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "./data";

/// Configuration for a [`Context`](crate::Context).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Directory holding `identity.json`, `feed/` and `blob/`.
    pub root: PathBuf,
}

impl ContextConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.root.clone())
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_root() {
        let config = ContextConfig::default();
        assert_eq!(config.root, Path::new("./data"));
        assert_eq!(
            config.layout().identity_path(),
            Path::new("./data/identity.json")
        );
    }
}
