//! # Waymark Dialog
//!
//! Per-user conversation state machine.
//!
//! Each user talking to the bot in a private chat gets a [`Session`]: an
//! ordered stack of [`State`]s plus a single typed hand-off slot. The state
//! on top of the stack is active; it reacts to messages and callbacks by
//! returning a [`Transition`] that the session executes, so states never
//! mutate the stack (or reach into other frames) directly.
//!
//! The [`InteractiveMenu`] component owns the session map and bridges the
//! router to the active state of the right user.

pub mod menu;
pub mod session;
pub mod state;
pub mod states;

pub use menu::InteractiveMenu;
pub use session::Session;
pub use state::{RegistrationInfo, State, StateCx, Transition, TransitionData};
pub use states::{EnterOne, Hello};
