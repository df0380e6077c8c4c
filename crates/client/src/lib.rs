//! Backend client for FinTrack.
//!
//! Talks to the FinTrack REST backend and turns its responses into
//! `fintrack-core` types.
//!
//! # Modules
//!
//! - `http` - `ApiClient`, route layout and status handling
//! - `session` - Persisted login sessions
//! - `state` - `AppState`: client plus current session
//! - `resources` - CRUD calls for every entity
//! - `reports` - Comparison, totals, movement and dashboard queries
//! - `view` - Request fencing, loading flags and write-then-refetch

pub mod http;
pub mod reports;
pub mod resources;
pub mod session;
pub mod state;
pub mod view;
mod wire;

pub use http::{ApiClient, Verb};
pub use reports::DashboardFetch;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, SessionUser};
pub use state::AppState;
pub use view::{LatestSlot, ListView, RequestSequencer, RequestTicket, Widget};
pub use wire::RawComparisonRow;
