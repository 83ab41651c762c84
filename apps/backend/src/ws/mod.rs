pub mod game;
pub mod hub;
pub mod session;

pub use hub::{HubEvent, WsRegistry};
pub use session::upgrade;
