//! Condor Client - transport to the Conductor metadata API
//!
//! - [`Transport`]: the synchronous request seam the engine is written against
//! - [`HttpTransport`]: the blocking `reqwest` implementation
//! - [`ProviderConfig`]: endpoint, custom headers and timeout, loaded from TOML

pub mod config;
pub mod http;
pub mod transport;

pub use config::ProviderConfig;
pub use http::HttpTransport;
pub use transport::{HttpResponse, Method, Transport};
