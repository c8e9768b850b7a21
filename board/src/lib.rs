pub mod piece;
pub mod position;
pub mod side;
pub mod square;

pub use crate::piece::*;
pub use crate::position::*;
pub use crate::side::*;
pub use crate::square::*;
