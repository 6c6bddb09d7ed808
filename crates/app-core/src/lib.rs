pub mod bridge;
pub mod column;
pub mod constants;
pub mod duplicate;
pub mod input;
pub mod lines;
pub mod mode;
pub mod physics;
pub mod state;
pub mod surface;
pub mod tween;

pub use bridge::*;
pub use column::*;
pub use constants::*;
pub use duplicate::*;
pub use input::*;
pub use lines::*;
pub use mode::*;
pub use physics::*;
pub use state::*;
pub use surface::*;
pub use tween::*;
