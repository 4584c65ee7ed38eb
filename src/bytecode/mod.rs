pub mod chunk;
pub mod disasm;
pub mod op;

pub use chunk::{Chunk, LineStart};
pub use op::OpCode;
