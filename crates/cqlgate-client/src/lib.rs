//! cqlgate client - typed values in, typed rows out.
//!
//! This crate converts application values ([`NativeValue`]) into the tagged
//! protocol values of [`cqlgate_proto`] and back, materializes result sets
//! into [`Row`]s, and destructures rows into Rust types.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use cqlgate_client::{Client, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Arc::new(MyTransport::dial("127.0.0.1:8080").await?);
//!     let client = Client::new(ClientConfig::localhost().with_default_keyspace("app"), transport);
//!
//!     let users: Vec<(String, i64)> = client
//!         .query("SELECT name, age FROM users", vec![])
//!         .exec_into()
//!         .await?;
//!
//!     println!("Found {} users", users.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod native;
pub mod params;
pub mod query;
pub mod rows;
pub mod scan;
pub mod transport;

pub use client::Client;
pub use codec::{decode, decode_row, encode, encode_values, DecodeError, EncodeError};
pub use config::ClientConfig;
pub use error::Error;
pub use native::NativeValue;
pub use params::QueryParams;
pub use query::{BatchQuery, Query};
pub use rows::{ColumnIndex, Row, Rows};
pub use scan::{FromNative, FromRow, ScanError, ScanTarget};
pub use transport::{Transport, TransportError};

/// Re-export protocol types.
pub use cqlgate_proto as proto;
