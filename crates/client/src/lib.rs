//! Catalog client - the fetch side of the catalog page.
//!
//! - **Sources** (`source`) - `CatalogSource` trait, reqwest-backed HTTP source, fixed in-memory source
//! - **Loader** (`loader`) - spawns the single fetch of a visit as an abortable task
//! - **Session** (`session`) - owns one visit's view and its pending load
//!
//! ```text
//! CatalogSession::open ──spawn──▶ load task ──GET──▶ catalog endpoint
//!        │                            │
//!        ▼                            ▼
//!   CatalogView ◀──── ViewEvent::CatalogLoaded / CatalogFailed (tagged with VisitId)
//! ```

pub mod loader;
pub mod session;
pub mod source;

pub use loader::{spawn_load, LoadHandle};
pub use session::CatalogSession;
pub use source::{CatalogSource, HttpCatalogSource, SourceError, StaticCatalogSource};
