//! Startup errors.
//!
//! Runtime problems (unknown difficulty, audio not ready, taps while idle)
//! degrade silently and never reach this type. `GameError` only covers
//! conditions that make the game impossible to set up.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error("difficulty table is empty")]
    EmptyProfileTable,

    #[error("default difficulty '{0}' is not in the table")]
    UnknownDefault(String),

    #[error("invalid difficulty table: {0}")]
    InvalidProfiles(String),

    /// A DOM call threw.
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
