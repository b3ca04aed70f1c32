//! Blocking HTTP transport for the provider's REST API.

mod http;

pub use http::{HttpTransport, TransportError};
