//! # mpedit-core — Incremental highlighting and indentation for `MetaPost`
//!
//! This crate is the editing engine behind mpedit. It holds no terminal or
//! file code; the shell feeds it [`Edit`]s and reads back styled runs.
//!
//! - **[`style`]** — `StyleTag` and `StyledSpan`, the engine's output
//! - **[`lexicon`]** — the `MetaPost` keyword and datatype tables
//! - **[`classify`]** — the finite-state token classifier with carry-in
//! - **[`buffer`]** — `StyledBuffer`, a rope with one style tag per char
//! - **[`boundary`]** — widening an edit to whitespace boundaries
//! - **[`indent`]** — indentation queries for Enter and backspace
//! - **[`options`]** — `:set`-style editor options
//! - **[`history`]** — undo/redo of styled changes
//! - **[`engine`]** — `Engine`, which applies edits and keeps styles current

pub mod boundary;
pub mod buffer;
pub mod classify;
pub mod edit;
pub mod engine;
pub mod error;
pub mod history;
pub mod indent;
pub mod lexicon;
pub mod options;
pub mod position;
pub mod style;

pub use edit::Edit;
pub use engine::Engine;
pub use error::{EditError, OptionError};
pub use options::Options;
pub use position::Position;
pub use style::{StyleTag, StyledSpan};
