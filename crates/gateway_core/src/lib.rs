//! Gateway core: pure protocol and session state machines plus rendering.
mod effect;
pub mod format;
mod msg;
pub mod protocol;
pub mod render;
mod state;
mod types;
mod update;
pub mod url_input;

pub use effect::Effect;
pub use msg::Msg;
pub use protocol::{AtCommand, LineProtocol, Mode, ProtocolEvent};
pub use render::Screen;
pub use state::{PendingFetch, PendingKind, ScreenKind, SessionState};
pub use types::{FeedItem, FeedKind, FetchFailure, Link, PageData, RequestId};
pub use update::update;
pub use url_input::{validate_url, UrlError};
