//! Runtime theme and layout configuration.
//!
//! Resolution is a pure lookup into the palette registry; application writes
//! the resolved colors into a shared [`StyleSurface`]; the controllers hold
//! the current selections and persist them. [`SiteContext`] ties the pieces
//! together for one client session.

pub mod appearance;
pub mod context;
pub mod layout;
pub mod resolver;
pub mod surface;

pub use appearance::{AppearanceController, AppearanceState, Lifecycle};
pub use context::SiteContext;
pub use layout::LayoutSelector;
pub use resolver::resolve;
pub use surface::{StyleSurface, SurfaceSnapshot};
