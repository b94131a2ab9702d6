pub mod fix;
pub mod track;

pub use fix::*;
pub use track::*;
