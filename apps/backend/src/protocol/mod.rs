//! Wire protocol shared by the server and clients.

pub mod events;
pub mod gating;
pub mod mirror;

pub use events::{ChatMessage, ClientEvent, Notice, NoticeKind, PlayerView, ServerEvent};
pub use mirror::Mirror;
