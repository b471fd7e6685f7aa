//! Generation service clients for Fabula.
//!
//! # Example
//!
//! ```no_run
//! use fabula_core::FabulaConfig;
//! use fabula_interface::Health;
//! use fabula_models::ZegaClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FabulaConfig::load()?;
//! let client = ZegaClient::new(config.service())?;
//! let status = client.health().await?;
//! println!("{}", status.status());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod zega;

pub use zega::{UPSTREAM_BODY_LIMIT, ZegaClient};
