//! Reading documents from files and stdin.

mod reader;

pub use reader::{InputReader, MAX_INPUT_SIZE, STDIN_PATH};
