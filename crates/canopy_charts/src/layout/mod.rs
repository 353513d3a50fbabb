//! Pure layouts: data in, positions out. No surface access.

pub mod pie;
pub mod stack;
pub mod treemap;

pub use pie::{pie, PieSlice};
pub use stack::{extent, stack, StackBand, StackLayer, StackOffset};
pub use treemap::{treemap, Tiling, TreemapCell, TreemapPadding};
