pub mod transport;
#[cfg(feature = "http")]
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use transport::{BlockingTransport, Transport};
#[cfg(feature = "http")]
pub use http::{BlockingHttpTransport, HttpConfig, HttpTransport};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
