pub mod clock;
pub mod duration;
pub mod fuzzy;

pub use clock::*;
pub use duration::*;
