//! Request classification by URL shape.

use std::fmt;

use crate::fetch::AssetRequest;
use crate::manifest::Manifest;

/// Path segment marking texture assets.
const TEXTURE_SEGMENT: &str = "/textures/";

/// File extensions treated as textures wherever they live.
const TEXTURE_EXTENSIONS: &[&str] = &[".ktx2", ".webp", ".jpg"];

/// How an intercepted request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestClass {
    /// Not http/https; left to the host untouched.
    PassThrough,
    /// Long-lived texture: cache-first with write-back to the texture store.
    Texture,
    /// Manifest-listed app-shell asset: cache-first, no write-back.
    Static,
    /// Everything else: network-first with cache fallback.
    Dynamic,
}

impl RequestClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestClass::PassThrough => "pass-through",
            RequestClass::Texture => "texture",
            RequestClass::Static => "static",
            RequestClass::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for RequestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a URL path names a texture asset.
///
/// Matching is case-sensitive: `.JPG` is not a texture extension.
pub fn is_texture_path(path: &str) -> bool {
    path.contains(TEXTURE_SEGMENT) || TEXTURE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Classify a request. The first matching rule wins:
///
/// 1. non-network scheme → [`RequestClass::PassThrough`]
/// 2. texture path → [`RequestClass::Texture`]
/// 3. manifest path → [`RequestClass::Static`]
/// 4. otherwise → [`RequestClass::Dynamic`]
pub fn classify_request(request: &AssetRequest, manifest: &Manifest) -> RequestClass {
    if !request.is_network_scheme() {
        return RequestClass::PassThrough;
    }

    let path = request.path();
    if is_texture_path(path) {
        RequestClass::Texture
    } else if manifest.contains_path(path) {
        RequestClass::Static
    } else {
        RequestClass::Dynamic
    }
}
