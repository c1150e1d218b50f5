//! The HTTP boundary: trait, production `reqwest` gateway, and the mock.

pub mod http;
pub mod mock;
pub mod traits;

pub use http::HttpGateway;
pub use mock::{MockGateway, RecordedCall};
pub use traits::{Gateway, GatewayError, GatewayResponse, Method};
