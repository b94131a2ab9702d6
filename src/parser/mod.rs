pub mod coordinate;
pub mod gga;
pub mod rmc;
pub mod sentence;

pub use coordinate::*;
pub use gga::*;
pub use rmc::*;
pub use sentence::*;
