pub mod metadata;
pub mod reader;
pub mod record;
pub mod replay;

pub use crate::metadata::*;
pub use crate::reader::*;
pub use crate::record::*;
pub use crate::replay::*;
