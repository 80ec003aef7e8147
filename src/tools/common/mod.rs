//! Built-in tools
//!
//! - `bash` - Execute shell commands in the workspace
//! - `todo` - Update the session todo list

pub mod bash;
pub mod todo;

pub use bash::{BashInput, BashTool};
pub use todo::TodoWriteInput;

/// Maximum bytes of tool output handed back to the model
pub const MAX_OUTPUT_BYTES: usize = 50_000;

/// Cut `text` to [`MAX_OUTPUT_BYTES`] on a char boundary, marking the cut
pub(crate) fn truncate_output(mut text: String) -> String {
    if text.len() <= MAX_OUTPUT_BYTES {
        return text;
    }

    let mut boundary = MAX_OUTPUT_BYTES;
    while boundary > 0 && !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    text.truncate(boundary);
    text.push_str("...");
    text
}
