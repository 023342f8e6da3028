//! Version tags naming the two logical stores.

/// Default tag of the static-assets store.
pub const DEFAULT_STATIC_VERSION: &str = "valor-3d-v2-optimized";

/// Default tag of the texture store.
pub const DEFAULT_TEXTURE_VERSION: &str = "valor-textures-v2";

/// Names of the static-assets and texture stores.
///
/// Bumping `static_tag` makes the next activation re-populate the manifest
/// under the new name and retire the old store. `texture_tag` is
/// independent, so cached textures survive static bumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheVersions {
    pub static_tag: String,
    pub texture_tag: String,
}

impl Default for CacheVersions {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_VERSION, DEFAULT_TEXTURE_VERSION)
    }
}

impl CacheVersions {
    pub fn new(static_tag: impl Into<String>, texture_tag: impl Into<String>) -> Self {
        Self {
            static_tag: static_tag.into(),
            texture_tag: texture_tag.into(),
        }
    }

    /// Whether a store with this name belongs to the running version.
    pub fn is_current(&self, name: &str) -> bool {
        name == self.static_tag || name == self.texture_tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_current() {
        let versions = CacheVersions::new("app-v3", "tex-v1");
        assert!(versions.is_current("app-v3"));
        assert!(versions.is_current("tex-v1"));
        assert!(!versions.is_current("app-v2"));
        assert!(!versions.is_current(""));
    }

    #[test]
    fn test_defaults() {
        let versions = CacheVersions::default();
        assert_eq!(versions.static_tag, "valor-3d-v2-optimized");
        assert_eq!(versions.texture_tag, "valor-textures-v2");
    }
}
