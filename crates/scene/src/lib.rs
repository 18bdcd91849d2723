pub mod commands;
pub mod feature;
pub mod markers;
pub mod prefs;
pub mod renderer;
pub mod symbology;
pub mod sync;

pub use commands::*;
pub use feature::*;
pub use markers::*;
pub use prefs::*;
pub use renderer::*;
pub use symbology::*;
pub use sync::*;
