//! Error types
//!
//! Nothing here is fatal during play: settings errors fall back to defaults,
//! audio errors are swallowed by the audio manager, and illegal transitions
//! are rejected without touching the session.

use std::fmt;

use crate::sim::GameState;

/// Failure to load, save or validate [`crate::Settings`]
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings i/o failed: {err}"),
            Self::Parse(err) => write!(f, "settings are not valid json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Failure reported by an audio backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioError {
    MissingAsset { file: String },
    Playback { file: String, reason: String },
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsset { file } => write!(f, "audio asset not found: {file}"),
            Self::Playback { file, reason } => write!(f, "could not play {file}: {reason}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// A game state change that the state machine does not allow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionError {
    pub from: GameState,
    pub to: GameState,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal game state transition: {:?} -> {:?}", self.from, self.to)
    }
}

impl std::error::Error for TransitionError {}
