//! Error types
//!
//! Nothing in the simulation itself fails. These cover the collaborators
//! around it: sound playback and settings parsing.

use core::fmt;

/// Failure to play a sound cue. Always logged and dropped by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioError {
    /// No audio context (insecure origin, unsupported browser, native build)
    Unavailable,
    /// The Web Audio graph could not be built
    NodeCreation(&'static str),
    /// Output is muted or at zero volume
    Muted,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "audio context unavailable"),
            Self::NodeCreation(node) => write!(f, "failed to create {node} node"),
            Self::Muted => write!(f, "audio muted"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Rejected settings payload
#[derive(Debug)]
pub enum SettingsError {
    /// Stored JSON did not parse
    Parse(serde_json::Error),
    /// A field is outside its allowed range
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid settings json: {err}"),
            Self::OutOfRange { field, value } => {
                write!(f, "settings field `{field}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
