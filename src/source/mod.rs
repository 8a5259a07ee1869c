mod collector;
pub use collector::*;

mod source_line;
pub use source_line::*;
