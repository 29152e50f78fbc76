//! Typed client for the clinic management REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every screen of the clinic front end is a thin layer over the remote API:
//! a form posts a draft record, a list loads a collection, and the session
//! token persisted at login authorizes both. This crate holds that shared
//! core so the terminal front end (`main.rs`) only wires flags and prompts.
//!
//! LAYOUT
//! ======
//! - `net`: wire types, endpoint table, the `Transport` seam and its `reqwest`
//!   implementation.
//! - `state`: session persistence, form controller, list fetcher, and the
//!   two-tab dashboard composer.
//! - `pages`: the concrete clinic screens (login/register, admin, appointments,
//!   medical records) built from the `state` pieces.
//! - `util`: field descriptors, busy/lifecycle guards, date/time validation.

pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
