pub mod debounce;
pub mod hover;
pub mod intent;
pub mod latest;
pub mod machine;
pub mod mode;
pub mod popup;

pub use debounce::*;
pub use hover::*;
pub use intent::*;
pub use latest::*;
pub use machine::*;
pub use mode::*;
pub use popup::*;
