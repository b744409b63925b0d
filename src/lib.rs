//! leadhq: terminal client for the HQ lead/employee CRM endpoint.
//!
//! ARCHITECTURE
//! ============
//! `net` speaks the script endpoint's JSON protocol, `state` holds the pure
//! record-browser state (filtering, pagination, drafts, session), `pages`
//! orchestrates one screen's worth of state against the API, and `cli` binds
//! all of it to a terminal.

pub mod cli;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;

pub use config::Config;
pub use error::ActionError;
