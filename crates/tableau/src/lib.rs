mod client;
mod error;
mod session;
mod wire;

pub use client::{ServerConfig, SiteApi, TableauClient};
pub use error::{Result, TableauError};
pub use session::{Session, with_session};
