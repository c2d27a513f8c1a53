//! # cfdash-client
//!
//! A small typed client for the parts of the Cloudflare v4 API a DNS
//! dashboard needs: listing zones and listing, creating, updating and
//! deleting DNS records in a zone.
//!
//! Requests authenticate with the account email and global API key
//! (`X-Auth-Email` / `X-Auth-Key`). Every call is attempted once; there is
//! no retry, pagination or rate-limit handling.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and mobile targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cfdash_client::{CloudflareClient, Credentials, DnsApi, RecordForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CloudflareClient::with_credentials(Credentials::new(
//!         "me@example.com",
//!         "global-api-key",
//!     ))?;
//!
//!     let domains = client.list_domains().await?;
//!     let zone = &domains[0];
//!
//!     let form = RecordForm::new("www", "A", "192.0.2.10", 3600);
//!     let record = client.create_dns_record(&zone.id, &form).await?;
//!     println!("{} {} -> {}", record.record_type, record.name, record.content);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError):
//!
//! - [`ClientError::Network`] / [`ClientError::Timeout`]: no response received
//! - [`ClientError::InvalidCredentials`]: the email/key pair was rejected
//! - [`ClientError::HttpStatus`]: any other non-2xx response
//! - [`ClientError::Api`]: a 2xx envelope with `success: false`
//! - [`ClientError::Parse`]: the body did not match the expected envelope

mod cloudflare;
mod config;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use cloudflare::CloudflareClient;
pub use config::{CF_API_BASE, ClientConfig};
pub use error::{ClientError, Result};
pub use traits::DnsApi;
pub use types::{
    AUTO_TTL, Credentials, DEFAULT_TTL, DnsRecord, DnsRecordType, Domain, RecordForm, TTL_RANGE,
    check_ttl,
};
pub use utils::log_sanitizer;
