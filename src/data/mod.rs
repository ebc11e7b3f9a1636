//! Statistics API integration.
//!
//! - endpoint table + environment settings (`endpoints`)
//! - transport seam and the `reqwest` implementation (`transport`)
//! - per-horizon fetch and JSON normalization (`fetcher`)
//! - operator directory loading (`directory`)

pub mod directory;
pub mod endpoints;
pub mod fetcher;
pub mod transport;

pub use directory::{default_directory, load_directory};
pub use endpoints::{ApiConfig, EndpointConfig, EndpointTable};
pub use fetcher::HorizonFetcher;
pub use transport::{FetchError, HttpTransport, Transport};
