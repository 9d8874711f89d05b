pub mod actor;

pub use actor::{ActorUser, AppState};
