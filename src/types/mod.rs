//! Core value types for session data.
//!
//! - [`LapTime`] / [`LapDelta`] hold durations as fixed-point microseconds so
//!   that fastest-lap ties compare exactly
//! - [`SessionKind`] maps to the provider's session identifiers
//! - [`TyreCompound`] maps the provider's compound strings
//!
//! ```rust
//! use paddock::types::{LapTime, SessionKind};
//!
//! let a = LapTime::from_secs_f64(90.123).unwrap();
//! let b = LapTime::from_secs_f64(91.0).unwrap();
//! assert_eq!(b.delta_to(a).to_string(), "+0.877");
//! assert_eq!(a.to_string(), "1:30.123");
//! assert_eq!("FP1".parse::<SessionKind>().unwrap(), SessionKind::Practice1);
//! ```

mod compound;
mod lap_time;
mod session_kind;

pub use compound::TyreCompound;
pub use lap_time::{LapDelta, LapTime};
pub use session_kind::SessionKind;

/// Provider driver identifier (the car number string)
pub type DriverId = String;
