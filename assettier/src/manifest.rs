//! The static-asset manifest: app-shell paths pre-cached at install.

use reqwest::Url;

use crate::fetch::{AssetRequest, FetchError};

/// App-shell paths of the reference deployment.
pub const DEFAULT_STATIC_PATHS: &[&str] = &[
    "/",
    "/index.html",
    "/main.css",
    "/valerlogo.gltf",
    "/world-logo.svg",
    "/build/three.module.js",
    "/jsm/loaders/GLTFLoader.js",
    "/jsm/controls/OrbitControls.js",
    "/texture-worker.js",
    "/pmrem-cache.js",
    "/lod-selector.js",
];

/// Ordered list of static-asset paths.
///
/// Membership is decided on the URL path alone, so the same manifest
/// applies regardless of which origin serves the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    paths: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_PATHS.iter().copied())
    }
}

impl Manifest {
    /// Build a manifest from paths, dropping blanks and duplicates while
    /// keeping the first occurrence's position.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for path in paths {
            let path = path.as_ref().trim();
            if !path.is_empty() && !unique.iter().any(|p| p == path) {
                unique.push(path.to_string());
            }
        }
        Self { paths: unique }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether a URL path is listed.
    pub fn contains_path(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Resolve every path against `origin`, in manifest order.
    pub fn requests(&self, origin: &Url) -> Result<Vec<AssetRequest>, FetchError> {
        self.paths
            .iter()
            .map(|path| AssetRequest::resolve(origin, path))
            .collect()
    }
}
