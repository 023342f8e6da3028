//! Control messages posted to the worker by its clients.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::LifecycleError;

/// A message from a client page.
///
/// Messages are JSON objects discriminated by their `type` field:
///
/// ```json
/// { "type": "CACHE_TEXTURES", "textures": ["/textures/rock.ktx2"] }
/// ```
///
/// Unrecognised types decode to [`ControlMessage::Unknown`] and are ignored
/// by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Eagerly populate the texture store with these URLs.
    #[serde(rename = "CACHE_TEXTURES")]
    CacheTextures {
        #[serde(default, deserialize_with = "null_as_empty")]
        textures: Vec<String>,
    },

    #[serde(other)]
    Unknown,
}

impl ControlMessage {
    pub fn cache_textures<I, S>(textures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ControlMessage::CacheTextures {
            textures: textures.into_iter().map(Into::into).collect(),
        }
    }

    /// Decode a message from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, LifecycleError> {
        serde_json::from_str(json).map_err(|e| LifecycleError::InvalidMessage(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, LifecycleError> {
        serde_json::to_string(self).map_err(|e| LifecycleError::InvalidMessage(e.to_string()))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
