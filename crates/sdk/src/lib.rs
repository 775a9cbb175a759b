//! # Mono SDK
//!
//! Rust client for the Mono open banking API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mono_sdk::{MonoClient, MonoResult};
//!
//! #[tokio::main]
//! async fn main() -> MonoResult<()> {
//!     let client = MonoClient::builder()
//!         .secret_key("live_sk_xxxxxxxx")
//!         .build()?;
//!
//!     // Responses come back as pretty-printed JSON text
//!     let balance = client.accounts().balance("5feec8ce95e8dc6a52e53257").await?;
//!     println!("{}", balance);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{
    AddressVerification, CreditHistoryRequest, DriversLicenseVerification, NinVerification,
    PassportVerification, TinVerification, TransactionFilter, TransactionType,
};
pub use client::{MonoClient, MonoClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{MonoError, MonoResult};
