//! Sensor producers
//!
//! Each submodule provides one [`Producer`](crate::cache::Producer) for a
//! named data source. Producers are thin adapters: they gather raw readings
//! and hand byte-encoded reports to the cache, which treats them as opaque.

pub mod classic;
pub mod components;

pub use classic::ClassicSensors;
pub use components::ComponentScan;
