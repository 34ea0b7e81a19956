//! Forms: labelled fields stacked in a scroll view, with keyboard focus
//! moving between them
//!
//! A [`Form`] owns its fields and routes every key to the focused one.
//! Components implement [`FormComponent`]; the ones here cover passive
//! text, buttons, choice lists, text entry and rows that hold other
//! components.

mod button;
mod buttons;
mod component;
mod edit_box;
#[allow(clippy::module_inception)]
mod form;
mod row;
mod selector;
mod text;

pub use button::FormButton;
pub use buttons::FormButtons;
pub use component::{FocusDirection, FormComponent};
pub use edit_box::{BlurCheck, FormEditBox, TextCallback};
pub use form::{Form, FormBinding, FormField};
pub use row::FormRow;
pub use selector::{FormSelector, SelectionCallback};
pub use text::FormText;
