//! Canopy Core
//!
//! Foundational primitives shared by every Canopy crate:
//!
//! - **Geometry**: points, sizes and rectangles in surface pixels
//! - **Color**: RGBA colors with hex parsing and HSL adjustments
//! - **Events**: pointer and lifecycle events delivered by the host UI
//! - **Debouncing**: coalescing of bursty pointer-move traffic
//!
//! # Example
//!
//! ```rust
//! use canopy_core::Color;
//!
//! let green = Color::parse_hex("#22C55E").unwrap();
//! let lighter = green.lighten(0.1);
//! assert!(lighter.to_hsl().2 > green.to_hsl().2);
//! ```

pub mod color;
pub mod debounce;
pub mod events;
pub mod geometry;
pub mod polygon;

pub use color::{Color, ColorError};
pub use debounce::Debouncer;
pub use events::{Event, EventData, EventType};
pub use geometry::{Point, Rect, Size};
