//! Instrument domain module.
//!
//! Client for the Claude-Light instrument: an RGB LED whose light is measured
//! by a ten-channel spectral sensor, reached through a single HTTP endpoint.
//!
//! - `reading.rs` - settings, channels and decoded readings
//! - `fetcher.rs` - one HTTP round trip per attempt
//! - `retry.rs` - bounded fixed-delay retry policy
//! - `facade.rs` - the four instrument shapes over one retried fetch

mod error;
pub mod facade;
pub mod fetcher;
pub mod reading;
pub mod retry;

pub use error::{InstrumentError, InstrumentResult};
pub use facade::{CallVariant, Instrument, Projection};
pub use fetcher::{Fetcher, HttpFetcher};
pub use reading::{Channel, InstrumentReading, InstrumentSetting};
pub use retry::RetryPolicy;
