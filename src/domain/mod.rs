//! Domain modules split by discipline.
//! - `controls`: pointer aiming, camera rig, and key toggles.
//! - `presentation`: HUD, finish screen, and help/diagnostics overlays.
//! - `simulation`: course, ball body, motion governor, and game flow.

pub mod controls;
pub mod presentation;
pub mod simulation;

pub use controls::{InputPlugin, OrbitCamera};
pub use presentation::UiPlugin;
pub use simulation::SimPlugin;
