// miosync-api: Async Rust client for the MinIO admin API and S3 object lock.

pub mod admin;
pub mod error;
pub mod lock;
pub mod sign;
pub mod transport;

pub use admin::{AdminClient, Credentials};
pub use error::{AdminCode, Error};
pub use lock::LockMode;
pub use transport::{TlsMode, TransportConfig};
