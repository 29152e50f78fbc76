//! List fetcher: one named remote collection with loading/error status.
//!
//! DESIGN
//! ======
//! The held collection is an `Rc<[T]>` snapshot that is replaced wholesale,
//! never edited in place, so a consumer's snapshot stays stable between loads.
//! Overlapping loads are allowed: status stays `Loading` until the last one
//! settles, and whichever response resolves last owns the snapshot.
//!
//! A failed load keeps the previously loaded snapshot (empty if none) and
//! reports `Error`; an empty collection is `Ready`.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;

use super::session::SessionReader;
use crate::error::{ClientError, MessagePolicy};
use crate::net::api::{self, ApiRequest, Endpoint, Transport};
use crate::net::types::Id;
use crate::util::busy::InFlight;
use crate::util::lifecycle::Lifecycle;

/// A remote collection item type and where it lives.
pub trait Resource: DeserializeOwned + Clone + 'static {
    const ENDPOINT: Endpoint;
    /// Message shown when loading the collection fails.
    const LOAD_FAILED: &'static str;

    fn id(&self) -> &Id;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Error(String),
}

struct ListState<T> {
    items: Rc<[T]>,
    settled: LoadStatus,
}

struct ListInner<T> {
    transport: Rc<dyn Transport>,
    session: SessionReader,
    state: RefCell<ListState<T>>,
    in_flight: InFlight,
    lifecycle: Lifecycle,
}

/// Shared handle to one collection; clones observe the same snapshot.
pub struct ListFetcher<T: Resource> {
    inner: Rc<ListInner<T>>,
}

impl<T: Resource> Clone for ListFetcher<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Resource> ListFetcher<T> {
    pub fn new(transport: Rc<dyn Transport>, session: SessionReader) -> Self {
        Self {
            inner: Rc::new(ListInner {
                transport,
                session,
                state: RefCell::new(ListState { items: Rc::from(Vec::new()), settled: LoadStatus::Idle }),
                in_flight: InFlight::default(),
                lifecycle: Lifecycle::default(),
            }),
        }
    }

    pub fn status(&self) -> LoadStatus {
        if self.inner.in_flight.is_active() {
            return LoadStatus::Loading;
        }
        self.inner.state.borrow().settled.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.is_active()
    }

    pub fn error(&self) -> Option<String> {
        match &self.inner.state.borrow().settled {
            LoadStatus::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Current snapshot; the same allocation until the next replacement.
    pub fn items(&self) -> Rc<[T]> {
        Rc::clone(&self.inner.state.borrow().items)
    }

    /// GET the collection and replace the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the request error (the snapshot is kept), or
    /// [`ClientError::Unmounted`] when torn down before the response arrived.
    pub async fn load(&self) -> Result<Rc<[T]>, ClientError> {
        let inner = &self.inner;
        let _loading = inner.in_flight.enter();
        let request = ApiRequest::get(T::ENDPOINT, inner.session.token());

        tracing::debug!(endpoint = T::ENDPOINT.path(), "loading collection");
        let outcome = api::execute::<Vec<T>>(inner.transport.as_ref(), request).await;

        if !inner.lifecycle.is_mounted() {
            tracing::debug!(endpoint = T::ENDPOINT.path(), "discarding load result after unmount");
            return Err(ClientError::Unmounted);
        }

        let mut state = inner.state.borrow_mut();
        match outcome {
            Ok(items) => {
                tracing::info!(endpoint = T::ENDPOINT.path(), count = items.len(), "collection loaded");
                let items: Rc<[T]> = Rc::from(items);
                state.items = Rc::clone(&items);
                state.settled = LoadStatus::Ready;
                Ok(items)
            }
            Err(err) => {
                tracing::warn!(endpoint = T::ENDPOINT.path(), error = %err, "collection load failed");
                state.settled = LoadStatus::Error(err.display_message(T::LOAD_FAILED, MessagePolicy::AlwaysFallback));
                Err(err)
            }
        }
    }

    /// Reload after a related mutation; the server's answer is authoritative.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn refresh(&self) -> Result<Rc<[T]>, ClientError> {
        self.load().await
    }

    /// Optimistically append a just-created record to a fresh snapshot.
    ///
    /// A record whose id is already present is not duplicated. The next
    /// `load`/`refresh` replaces this snapshot.
    pub fn append_local(&self, item: T) {
        if !self.inner.lifecycle.is_mounted() {
            return;
        }
        let mut state = self.inner.state.borrow_mut();
        if state.items.iter().any(|existing| existing.id() == item.id()) {
            return;
        }
        let next: Rc<[T]> = state.items.iter().cloned().chain(std::iter::once(item)).collect();
        state.items = next;
    }

    /// Tear down: responses arriving later are discarded.
    pub fn unmount(&self) {
        self.inner.lifecycle.unmount();
    }
}
