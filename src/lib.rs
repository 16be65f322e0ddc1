pub mod constants;
pub mod error;
pub mod history;
pub mod io;
pub mod replacement;
pub mod segmentation;

// Re-export commonly used items for convenience
pub use constants::*;
pub use error::InputError;
pub use history::{FrameSnapshot, History};
pub use replacement::{simulate, simulate_fifo, simulate_lru, Policy, Simulation};
pub use segmentation::{allocate, segments_from_sizes, Allocation, Placement, Segment};
