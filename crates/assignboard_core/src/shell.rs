//! Page-switching shell with history bookkeeping.
//!
//! # Responsibility
//! - Track which page is shown and the back stack that led there.
//! - Hand the accepted registration record to the success page.
//!
//! # Invariants
//! - History is never empty; the bottom entry is the landing page.
//! - Each page appears at most once; revisiting a page unwinds back to it.
//! - The submitted record is only held while `success` is current.

use crate::form::state::SubmitSink;
use crate::model::form::FormRecord;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Form,
    Success,
    Todo,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Success => "success",
            Self::Todo => "todo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "form" => Some(Self::Form),
            "success" => Some(Self::Success),
            "todo" => Some(Self::Todo),
            _ => None,
        }
    }

    /// URL path pushed to browser/app history.
    pub fn route_path(self) -> &'static str {
        match self {
            Self::Form => "/",
            Self::Success => "/success",
            Self::Todo => "/todo",
        }
    }

    pub fn from_route(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Form),
            "/success" => Some(Self::Success),
            "/todo" => Some(Self::Todo),
            _ => None,
        }
    }

    /// Footer caption: form and success belong to the same section.
    pub fn section_label(self) -> &'static str {
        match self {
            Self::Form | Self::Success => "Form Validation",
            Self::Todo => "To-Do List",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shell {
    history: Vec<Page>,
    submitted: Option<FormRecord>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Starts on the registration form.
    pub fn new() -> Self {
        Self::starting_at(Page::Form)
    }

    /// Starts on `page`, e.g. resolved from the initial URL.
    ///
    /// `success` without a record falls back to `form`.
    pub fn starting_at(page: Page) -> Self {
        let page = match page {
            Page::Success => Page::Form,
            other => other,
        };
        Self {
            history: vec![page],
            submitted: None,
        }
    }

    pub fn current(&self) -> Page {
        self.history.last().copied().unwrap_or(Page::Form)
    }

    pub fn history(&self) -> &[Page] {
        &self.history
    }

    pub fn submitted(&self) -> Option<&FormRecord> {
        self.submitted.as_ref()
    }

    /// Sidebar selection. Leaves any success view and drops its record.
    pub fn navigate(&mut self, page: Page) -> Page {
        if page == Page::Success && self.submitted.is_none() {
            return self.current();
        }
        if page != Page::Success {
            self.submitted = None;
        }
        self.visit(page);
        self.current()
    }

    /// Pops one history entry; stays put at the bottom of the stack.
    pub fn back(&mut self) -> Page {
        if self.history.len() > 1 {
            self.history.pop();
        }
        if self.current() != Page::Success {
            self.submitted = None;
        }
        // A success entry buried in history has no record to show anymore.
        while self.current() == Page::Success && self.submitted.is_none() && self.history.len() > 1
        {
            self.history.pop();
        }
        self.current()
    }

    /// "Go back to form" action on the success page.
    pub fn return_to_form(&mut self) -> Page {
        self.navigate(Page::Form)
    }

    fn visit(&mut self, page: Page) {
        if self.current() == page {
            return;
        }
        match self.history.iter().position(|entry| *entry == page) {
            Some(index) => self.history.truncate(index + 1),
            None => self.history.push(page),
        }
        debug!(
            "event=navigate module=shell status=ok page={} depth={}",
            page.as_str(),
            self.history.len()
        );
    }
}

impl SubmitSink for Shell {
    fn accept(&mut self, record: FormRecord) {
        self.submitted = Some(record);
        self.visit(Page::Success);
    }
}
