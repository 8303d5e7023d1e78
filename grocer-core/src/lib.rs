//! # Grocer Core
//!
//! Core types, errors, and traits shared by every grocer crate.
//!
//! - **Types**: Payloads returned by the analytics service (stats, products, forecasts, ...)
//! - **Errors**: One error enum covering transport, service and validation failures
//! - **Time**: Injectable clocks, the freshness window, and a bounded-wait helper
//! - **Traits**: [`AnalyticsSource`], the seam between data access and presentation
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use grocer_core::{Clock, FreshnessWindow, ManualClock};
//!
//! let clock = ManualClock::new();
//! let window = FreshnessWindow::new(Duration::from_secs(300));
//! let stored_at = clock.now();
//!
//! clock.advance(Duration::from_secs(299));
//! assert!(window.is_fresh(stored_at, clock.now()));
//!
//! clock.advance(Duration::from_secs(1));
//! assert!(!window.is_fresh(stored_at, clock.now()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod clock;
pub mod constants;
pub mod error;
pub mod freshness;
pub mod timeout;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::*;
pub use error::{GrocerError, Result};
pub use freshness::FreshnessWindow;
pub use timeout::with_timeout;
pub use traits::*;
pub use types::*;
