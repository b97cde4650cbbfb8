pub mod easing;
pub mod particles;
pub mod scroll;
pub mod shape;
pub mod signal;

pub use easing::*;
pub use particles::*;
pub use scroll::*;
pub use signal::*;
