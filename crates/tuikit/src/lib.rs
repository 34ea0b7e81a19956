//! tuikit: terminal widgets for keyboard-driven applications
//!
//! This crate provides:
//! - Cell buffers with a clipped drawing pen (`Buffer`, `Region`)
//! - Color markup for styled text (`RichText`)
//! - A text editor with history, completion and wrapping (`EditBox`)
//! - Forms of labelled fields with focus traversal (`Form`)
//! - A scrolling frame with a scrollbar (`ScrollView`) and a log on top of it (`LogView`)
//! - TOML-loadable configuration for every widget
//!
//! Widgets draw into buffers and take decoded keys. The host owns the
//! terminal and the event loop; `Key` converts from crossterm key events
//! and `Color` into crossterm colors.

pub mod buffer;
pub mod config;
pub mod edit;
pub mod error;
pub mod event;
pub mod form;
pub mod geometry;
pub mod layout;
pub mod log_view;
pub mod rich_text;
pub mod scroll_view;
pub mod style;

// Re-export commonly used types
pub use buffer::{Buffer, Cell, Region};
pub use config::{
    EditBoxConfig, EnterAction, FormConfig, FormEditBoxConfig, LogViewConfig, Palette,
    ScrollViewConfig, TuiConfig,
};
pub use edit::{CommitStream, EditBox};
pub use error::{Error, Result};
pub use event::{EventResult, Key, KeyType, Modifiers};
pub use form::{
    FocusDirection, Form, FormButton, FormButtons, FormComponent, FormEditBox, FormField,
    FormRow, FormSelector, FormText,
};
pub use geometry::{Point, Rect};
pub use layout::{Constraint, Direction, Grid, Layout};
pub use log_view::{ContentMove, LogView};
pub use rich_text::{lpad, wrap_text, RichText, Span};
pub use scroll_view::ScrollView;
pub use style::{Color, Style};
