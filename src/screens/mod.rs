//! Screen view-models
//!
//! Each screen owns its list, detail or form state, calls the content
//! fetchers or REST services, and renders itself to text with the active
//! [`Palette`]. Shared building blocks live here:
//! - [`ListState`] for loading / refreshing / error flags
//! - [`matches_query`] for client-side search
//! - [`FieldErrors`] for form validation
//! - [`Render`] for text output

pub mod documents;
pub mod event_detail;
pub mod event_form;
pub mod events;
pub mod home;
pub mod intervenant_form;
pub mod news;
pub mod podcast_form;
pub mod podcasts;
pub mod projects;
pub mod team;

pub use documents::DocumentsScreen;
pub use event_detail::EventDetailScreen;
pub use event_form::{EventForm, EventFormScreen};
pub use events::{EventTab, EventsScreen};
pub use home::HomeScreen;
pub use intervenant_form::IntervenantFormScreen;
pub use news::{NewsDetailScreen, NewsScreen};
pub use podcast_form::PodcastFormScreen;
pub use podcasts::PodcastAdminScreen;
pub use projects::ProjectsScreen;
pub use team::TeamScreen;

use crate::theme::Palette;

/// What caused a list to (re)load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    Mount,
    Focus,
    Refresh,
}

/// Fetched records and the flags around them
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            refreshing: false,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn begin(&mut self, trigger: LoadTrigger) {
        match trigger {
            LoadTrigger::Refresh => self.refreshing = true,
            LoadTrigger::Mount | LoadTrigger::Focus => self.loading = true,
        }
        self.error = None;
    }

    /// Store the outcome; a failed reload keeps the previous items
    pub fn finish<E>(&mut self, result: Result<Vec<T>, E>, error_message: impl FnOnce(E) -> String) {
        match result {
            Ok(items) => self.items = items,
            Err(e) => self.error = Some(error_message(e)),
        }
        self.loading = false;
        self.refreshing = false;
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.refreshing
    }
}

/// Case-insensitive substring match; an empty query matches everything
pub fn matches_query(haystack: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Items whose search text matches `query`
pub fn filter_items<'a, T>(items: &'a [T], query: &str, text: impl Fn(&T) -> String) -> Vec<&'a T> {
    items.iter().filter(|item| matches_query(&text(item), query)).collect()
}

/// Field-keyed validation errors, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error for `field`, replacing any previous one
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.0.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = message,
            None => self.0.push((field, message)),
        }
    }

    pub fn remove(&mut self, field: &str) {
        self.0.retain(|(f, _)| *f != field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Result of pressing a form's submit button
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Client-side validation failed; nothing was sent
    Invalid(FieldErrors),
    /// A submission is already in flight
    Busy,
    Created(T),
    /// The request failed with this user-facing message
    Failed(String),
}

impl<T> SubmitOutcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

/// Text rendering of a screen
pub trait Render {
    fn render(&self, palette: &Palette) -> String;
}

/// Shared list body: spinner, error, empty message or rows
pub(crate) fn render_list<T>(
    palette: &Palette,
    title: &str,
    state: &ListState<T>,
    rows: &[&T],
    empty: &str,
    row: impl Fn(&T) -> String,
) -> String {
    let mut out = format!("{}\n", palette.heading(title));
    if state.loading && state.items.is_empty() {
        out.push_str("Chargement...\n");
        return out;
    }
    if let Some(error) = &state.error {
        out.push_str(&Palette::paint("#DC2626", error));
        out.push('\n');
    }
    if rows.is_empty() {
        if state.error.is_none() {
            out.push_str(empty);
            out.push('\n');
        }
        return out;
    }
    for item in rows {
        out.push_str(&palette.card_prefix());
        out.push_str(&row(item));
        out.push('\n');
    }
    out
}
