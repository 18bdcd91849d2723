pub mod annulus;
pub mod arc;
pub mod height;
pub mod ribbon;
pub mod shapes;
pub mod stacking;

pub use annulus::*;
pub use arc::*;
pub use height::*;
pub use ribbon::*;
pub use shapes::*;
pub use stacking::*;
