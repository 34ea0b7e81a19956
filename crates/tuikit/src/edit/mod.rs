//! Text editing
//!
//! [`EditBox`] is the editor proper. The other modules hold the pieces it is
//! built from: display-line layout, history recall, tab completion and the
//! commit stream.

mod commit;
mod edit_box;
mod history;
pub mod lines;
mod suggest;

pub use commit::CommitStream;
pub use edit_box::{Binding, EditBox};
pub use history::History;
pub use suggest::{take_common_prefix, AutoComplete, Suggestions};
