pub mod client;
pub mod config;
pub mod error;
pub mod selection;
pub mod transport;

pub use client::NavClient;
pub use config::ClientConfig;
pub use error::NavError;
pub use selection::SelectionCache;
pub use transport::{HttpTransport, Method, Request, Response, Transport};
