pub mod config;
pub mod constants;
pub mod controller;
pub mod damper;
pub mod frame;
pub mod gamepad;
pub mod gesture;
pub mod hand;
pub mod head;
pub mod input;
pub mod joints;
pub mod mechanical;
pub mod pointer;
pub mod pose;
pub mod scene;
pub mod sim;
pub mod snapshot;
pub mod state;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use config::*;
pub use controller::*;
pub use damper::*;
pub use frame::*;
pub use gamepad::*;
pub use gesture::*;
pub use hand::*;
pub use head::*;
pub use input::*;
pub use joints::*;
pub use mechanical::*;
pub use pointer::*;
pub use pose::*;
pub use scene::*;
pub use snapshot::*;
pub use state::*;
