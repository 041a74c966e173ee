//! Async client for an email sign-in-code capture service.
//!
//! Given an email address, the client POSTs a lookup to a configured capture
//! endpoint, retries transiently on failure with a fixed delay schedule, and
//! reconciles the response's optional result variants (sign-in code, recovery
//! link, temporal sign-in link) into a single [`DisplayState`].
//!
//! ```no_run
//! use signcode::{Client, DisplayState, Outcome};
//!
//! # async fn run() -> Result<(), signcode::Error> {
//! let client = Client::builder("https://svc.example.com/capture")?.build()?;
//!
//! match client.submit("user@example.com").await? {
//!     Outcome::Found(bundle) => {
//!         for result in bundle.iter() {
//!             println!("{result:?}");
//!         }
//!     }
//!     Outcome::NotFound { email, detail } => {
//!         eprintln!("no recent code for {email} ({detail})");
//!     }
//!     Outcome::Superseded => {}
//! }
//!
//! assert!(!matches!(client.state(), DisplayState::InFlight { .. }));
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;
pub mod util;
pub mod validate;

pub use classify::classify;
pub use client::{Client, ClientBuilder, Outcome};
pub use error::{Error, ErrorKind, HttpError, Result, TransportErrorKind};
pub use retry::RetrySchedule;
pub use types::{DisplayState, LookupResult, ResultBundle, ResultTag};
