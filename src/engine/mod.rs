pub mod error;
pub mod frequency;
pub mod huffman;
pub mod pool;
pub mod reduce;

pub use error::*;
pub use frequency::*;
pub use huffman::*;
pub use pool::*;
pub use reduce::*;
