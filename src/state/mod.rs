//! Client-side record-browser state.
//!
//! DESIGN
//! ======
//! Everything here is synchronous and free of I/O: the record set, the
//! derived filtered view, pagination, the edit draft and the signed-in
//! identity. Pages own instances of these types and pass them explicitly, so
//! ordering is deterministic and the logic is testable without a network.

pub mod browser;
pub mod draft;
pub mod filter;
pub mod pagination;
pub mod schema;
pub mod session;
pub mod view;
