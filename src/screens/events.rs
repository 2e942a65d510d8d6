//! Event list with upcoming / past tabs

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::models::Evenement;
use crate::services::EventApi;
use crate::theme::Palette;

use super::{render_list, ListState, LoadTrigger, Render};

const LOAD_ERROR: &str = "Erreur lors du chargement des événements";

const MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

/// Short French month name (`janv.`, `févr.`...)
pub fn short_month(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTab {
    #[default]
    Upcoming,
    Past,
}

impl EventTab {
    pub fn label(self) -> &'static str {
        match self {
            EventTab::Upcoming => "À venir",
            EventTab::Past => "Passés",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            EventTab::Upcoming => "Aucun événement à venir pour le moment.",
            EventTab::Past => "Aucun événement passé.",
        }
    }

    /// Events starting today count as upcoming; undated events match no tab
    pub fn includes(self, event: &Evenement, today: NaiveDate) -> bool {
        match (self, event.start_date()) {
            (EventTab::Upcoming, Some(start)) => start >= today,
            (EventTab::Past, Some(start)) => start < today,
            (_, None) => false,
        }
    }
}

pub struct EventsScreen {
    api: Arc<dyn EventApi>,
    pub list: ListState<Evenement>,
    pub tab: EventTab,
    today: NaiveDate,
}

impl EventsScreen {
    pub fn new(api: Arc<dyn EventApi>) -> Self {
        Self {
            api,
            list: ListState::default(),
            tab: EventTab::default(),
            today: Local::now().date_naive(),
        }
    }

    /// Fix the reference date used to split the tabs
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn load(&mut self, trigger: LoadTrigger) {
        self.list.begin(trigger);
        let result = self.api.list_evenements().await;
        if let Err(e) = &result {
            tracing::error!("Failed to load events: {}", e);
        }
        self.list.finish(result, |_| LOAD_ERROR.to_string());
    }

    pub fn select_tab(&mut self, tab: EventTab) {
        self.tab = tab;
    }

    pub fn count(&self, tab: EventTab) -> usize {
        self.list.items.iter().filter(|e| tab.includes(e, self.today)).count()
    }

    pub fn visible(&self) -> Vec<&Evenement> {
        self.list
            .items
            .iter()
            .filter(|e| self.tab.includes(e, self.today))
            .collect()
    }

    pub fn image_url(&self, event: &Evenement) -> Option<String> {
        event.image.as_deref().filter(|p| !p.is_empty()).map(|p| self.api.image_url(p))
    }
}

fn event_row(event: &Evenement) -> String {
    let date = event
        .start_date()
        .map(|d| format!("{:>2} {:<5}", d.day(), short_month(d)))
        .unwrap_or_default();
    format!(
        "{}  {}  {}\n    {}\n    {}",
        date,
        event.type_badge(),
        event.start_time(),
        event.libelle,
        event.location()
    )
}

impl Render for EventsScreen {
    fn render(&self, palette: &Palette) -> String {
        let tabs = format!(
            "{} ({})   {} ({})",
            EventTab::Upcoming.label(),
            self.count(EventTab::Upcoming),
            EventTab::Past.label(),
            self.count(EventTab::Past)
        );
        let mut out = format!("{}\n", tabs);
        out.push_str(&render_list(
            palette,
            "Événements",
            &self.list,
            &self.visible(),
            self.tab.empty_message(),
            event_row,
        ));
        out
    }
}
