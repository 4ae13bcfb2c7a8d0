pub mod engine;
pub mod states;

pub use engine::{CatalogView, ViewTransitionError};
pub use states::{LoadState, TransitionOutcome, ViewEvent, ViewEventKind};
