//! Request interception and per-class cache strategies.
//!
//! | Class        | Match                                   | Strategy                         |
//! |--------------|-----------------------------------------|----------------------------------|
//! | pass-through | scheme is not http/https                | not intercepted                  |
//! | texture      | `/textures/` in path, `.ktx2/.webp/.jpg` | cache-first, write back on 200  |
//! | static       | path listed in the manifest             | cache-first, no write-back       |
//! | dynamic      | everything else                         | network-first, cache fallback    |
//!
//! Every intercepted request resolves to a response; when neither network
//! nor cache can answer, a 404 is synthesized.

mod classify;
mod strategy;

pub use classify::{classify_request, is_texture_path, RequestClass};
pub use strategy::{
    CacheRouter, Interception, ResponseSource, RoutedResponse, NOT_FOUND, TEXTURE_NOT_FOUND,
};
