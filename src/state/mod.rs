//! Client state: persisted session, form/list controllers, dashboards.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is written once by the auth flow and read by every controller
//! through a [`session::SessionReader`]. Controllers share one transport and
//! keep their state behind `Rc<RefCell<_>>` handles on a single thread; no
//! borrow is held across an await.

pub mod dashboard;
pub mod form;
pub mod list;
pub mod session;
pub mod storage;
