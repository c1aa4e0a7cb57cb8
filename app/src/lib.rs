//! Session shell around the `minado-core` engine: the game session with its
//! tick clock, the input-event dispatcher a host loop feeds, the per-frame
//! render feed, and best-record persistence.
//!
//! Rendering, input devices, and window lifecycle stay with the host; this
//! crate only consumes its discrete events and hands back view state.

pub use minado_core as engine;

pub use event::*;
pub use records::*;
pub use session::*;
pub use timer::*;
pub use view::*;

mod event;
mod records;
mod session;
mod timer;
mod view;
