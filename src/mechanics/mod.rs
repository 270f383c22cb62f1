pub mod bounds;
pub mod stoch;

pub use bounds::*;
pub use stoch::*;
