//! In-memory table API for local development and tests.
//!
//! Serves the same REST surface as the real table API
//! (`/tables/{table}[/{id}[/{sortKey}]]`) from `Arc<RwLock<_>>` maps.
//! Data is not persisted and will be lost when the server stops.

mod server;

pub use server::MockTableApi;
