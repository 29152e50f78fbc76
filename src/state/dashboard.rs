//! Two-tab dashboard composing a form and a list per tab.
//!
//! DESIGN
//! ======
//! A successful submission updates the tab's list in two phases: the created
//! record is appended locally right away (advisory), then the list is
//! refreshed from the server (authoritative, replaces phase one). Tabs load
//! their list on first entry and keep it across switches; a failed first
//! load is retried on the next entry.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::cell::RefCell;

use super::form::{FormController, FormSchema};
use super::list::{ListFetcher, Resource};
use crate::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Primary,
    Secondary,
}

/// One tab's form and list, wired so submissions update the list.
pub struct Panel<F>
where
    F: FormSchema,
    F::Output: Resource,
{
    form: FormController<F>,
    list: ListFetcher<F::Output>,
}

impl<F> Panel<F>
where
    F: FormSchema,
    F::Output: Resource,
{
    pub fn new(form: FormController<F>, list: ListFetcher<F::Output>) -> Self {
        let sink = list.clone();
        form.on_success(move |record: &F::Output| sink.append_local(record.clone()));
        Self { form, list }
    }

    pub fn form(&self) -> &FormController<F> {
        &self.form
    }

    pub fn list(&self) -> &ListFetcher<F::Output> {
        &self.list
    }

    /// Submit the form, then refresh the list so it reflects server state.
    ///
    /// A failed refresh leaves the list's error status set but does not undo
    /// the successful submission.
    ///
    /// # Errors
    ///
    /// Returns the submission error; the list is untouched in that case.
    pub async fn submit(&self) -> Result<F::Output, ClientError> {
        let record = self.form.submit().await?;
        if let Err(e) = self.list.refresh().await {
            tracing::warn!(error = %e, "refresh after submit failed");
        }
        Ok(record)
    }

    fn unmount(&self) {
        self.form.unmount();
        self.list.unmount();
    }
}

#[derive(Debug)]
struct TabState {
    active: Tab,
    entered_primary: bool,
    entered_secondary: bool,
}

pub struct Dashboard<P, S>
where
    P: FormSchema,
    P::Output: Resource,
    S: FormSchema,
    S::Output: Resource,
{
    primary: Panel<P>,
    secondary: Panel<S>,
    tabs: RefCell<TabState>,
}

impl<P, S> Dashboard<P, S>
where
    P: FormSchema,
    P::Output: Resource,
    S: FormSchema,
    S::Output: Resource,
{
    pub fn new(primary: Panel<P>, secondary: Panel<S>) -> Self {
        Self {
            primary,
            secondary,
            tabs: RefCell::new(TabState { active: Tab::Primary, entered_primary: false, entered_secondary: false }),
        }
    }

    pub fn primary(&self) -> &Panel<P> {
        &self.primary
    }

    pub fn secondary(&self) -> &Panel<S> {
        &self.secondary
    }

    pub fn active(&self) -> Tab {
        self.tabs.borrow().active
    }

    pub fn has_entered(&self, tab: Tab) -> bool {
        let tabs = self.tabs.borrow();
        match tab {
            Tab::Primary => tabs.entered_primary,
            Tab::Secondary => tabs.entered_secondary,
        }
    }

    /// Enter the primary tab.
    ///
    /// # Errors
    ///
    /// Returns the primary list's load error.
    pub async fn mount(&self) -> Result<(), ClientError> {
        self.select(Tab::Primary).await
    }

    /// Switch tabs; entering a tab whose list has not loaded yet loads it.
    ///
    /// A tab counts as entered once its first load succeeds, so switching
    /// back to a tab whose load failed tries again.
    ///
    /// # Errors
    ///
    /// Returns the list load error. The tab switch itself always happens.
    pub async fn select(&self, tab: Tab) -> Result<(), ClientError> {
        self.tabs.borrow_mut().active = tab;
        if self.has_entered(tab) {
            return Ok(());
        }

        tracing::debug!(?tab, "loading tab list");
        match tab {
            Tab::Primary => {
                self.primary.list.load().await?;
            }
            Tab::Secondary => {
                self.secondary.list.load().await?;
            }
        }
        let mut tabs = self.tabs.borrow_mut();
        match tab {
            Tab::Primary => tabs.entered_primary = true,
            Tab::Secondary => tabs.entered_secondary = true,
        }
        Ok(())
    }

    /// Tear down both tabs; in-flight results are discarded.
    pub fn unmount(&self) {
        self.primary.unmount();
        self.secondary.unmount();
    }
}
