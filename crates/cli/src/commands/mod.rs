pub mod assign;
pub mod groups;
pub mod util;
pub mod verify;

pub use assign::*;
pub use groups::*;
pub use util::*;
pub use verify::*;
