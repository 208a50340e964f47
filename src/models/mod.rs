pub mod lookup;
pub mod macros;
pub mod schedule;

pub use lookup::*;
pub use schedule::*;
