//! Networking modules for the clinic REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the endpoint table and the `Transport` seam, `http` is the
//! `reqwest` transport used by the binary, and `types` defines the wire
//! records exchanged with the server.

pub mod api;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;
