mod action;
mod agent;
mod event;
mod message;
mod sender;
mod textarea;
mod typing;

pub use action::*;
pub use agent::*;
pub use event::*;
pub use message::*;
pub use sender::*;
pub use textarea::*;
pub use typing::*;
