pub mod analysis;
pub mod batch;
pub mod bucket;
pub mod cohort;
pub mod evaluator;
pub mod fate;
pub mod options;
pub mod pawn;
pub mod summary;
pub mod trace;

pub use analysis::*;
pub use batch::*;
pub use bucket::*;
pub use cohort::*;
pub use evaluator::*;
pub use fate::*;
pub use options::*;
pub use pawn::*;
pub use summary::*;
pub use trace::*;
