//! caseco_core - functional core for the CASECO site.
//!
//! Pure logic shared by the admin client, the auth session and the tooling:
//!
//! - [`tables`]: table names, composite keys and REST path addressing
//! - [`content`]: catalog, navigation and downloads data plus form validation
//! - [`auth`]: identity provider contracts and session types
//! - [`ui`]: carousel and navigation state machines with scoped timers
//! - [`site`]: page view models built from injected content

pub mod auth;
pub mod content;
pub mod site;
pub mod tables;
pub mod ui;
