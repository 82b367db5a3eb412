//! Blueprints Core Library
//!
//! Platform-agnostic data model and logic for the blueprint viewer: fitting
//! a point path into a fixed viewport, directory lookups, and the view state
//! that decides when a selected blueprint gets drawn.

pub mod blueprint;
pub mod directory;
pub mod display;
pub mod fit;
#[cfg(not(target_arch = "wasm32"))]
pub mod lookup;
pub mod view;

pub use blueprint::{Blueprint, total_points};
pub use directory::{BlueprintDirectory, DirectoryError, DirectoryResult, MemoryDirectory};
pub use display::{DisplayEvent, DisplayPhase, DisplayState};
pub use fit::{FitTransform, bounding_box, compute_fit, guarded_span, map_point};
#[cfg(not(target_arch = "wasm32"))]
pub use lookup::{LookupEvent, LookupWorker};
pub use view::{NO_RESULTS_MESSAGE, StatusMessage, ViewEvent, ViewState, ViewUpdate};
