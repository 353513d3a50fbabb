//! Canopy Charts
//!
//! Animated, themeable charts drawn onto a [`canopy_paint::Surface`].
//!
//! # Features
//!
//! - **Kinds**: bar, line, donut, stacked bar, stream and treemap
//! - **Scales**: linear with nice domains, band and time, memoised per render
//! - **Vibes**: named motion and hover styles with particle decorations
//! - **Reconciliation**: shapes keyed by category so updates tween in place
//! - **Hover**: debounced pointer tracking with tooltip callbacks
//!
//! # Example
//!
//! ```rust
//! use canopy_charts::{Chart, ChartKind, ChartProps, DataPoint, Dataset};
//!
//! let data = Dataset::new(vec![
//!     DataPoint::labeled("Jan").with("value", 30.0),
//!     DataPoint::labeled("Feb").with("value", 50.0),
//! ])
//! .unwrap();
//! let mut chart = Chart::new(
//!     ChartKind::Bar,
//!     ChartProps {
//!         data: data.into(),
//!         ..Default::default()
//!     },
//! );
//! chart.mount(400.0, 300.0);
//! chart.settle();
//! assert!(chart.to_svg().starts_with("<svg"));
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod dimensions;
pub mod error;
pub mod format;
pub mod hover;
pub mod kind;
pub mod layout;
pub mod render;
pub mod scale;
pub mod scale_set;
pub mod steps;
pub mod strategies;
pub mod vibe;

pub use chart::{Chart, ChartProps, POINTER_DEBOUNCE_MS};
pub use config::{ChartConfig, ConfigOverrides, GridStyle, LegendPosition, LineCurve, MarginOverrides};
pub use data::{CategoryKey, ChartData, DataPoint, Dataset, TreeNode};
pub use dimensions::{DimensionResolver, Dimensions, Margins};
pub use error::{DataError, RenderError};
pub use hover::{HoverCallbacks, HoverInfo, TooltipState};
pub use kind::ChartKind;
pub use layout::Tiling;
pub use vibe::{resolve as resolve_vibe, Vibe, VibeStyle};
