pub mod api;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiClient;
pub use error::*;
pub use request::RequestClient;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport, TransportError};
