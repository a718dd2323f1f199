mod align;
pub use align::*;

mod sweep;
pub use sweep::*;
