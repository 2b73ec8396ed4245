//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the kernel.
//! - `adapters`: OS specific implementations (settings files, log directory).

pub mod adapters;
pub mod ports;
