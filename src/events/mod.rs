pub mod pointer;
pub mod window;

pub use pointer::wire_chase_zone;
pub use window::wire_resize;
