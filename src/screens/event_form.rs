//! Event creation form

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::{Evenement, Intervenant, ModeEvenement, NewEvenement, TypeEvenement};
use crate::platform::Notifier;
use crate::services::{Attachment, EventApi, SpeakerApi};
use crate::theme::Palette;

use super::{FieldErrors, Render, SubmitOutcome};

pub const SUCCESS_MESSAGE: &str = "L'événement a été créé avec succès !";
pub const FAILURE_MESSAGE: &str = "Une erreur est survenue lors de la création de l'événement";
pub const SPEAKERS_ERROR: &str = "Impossible de charger les intervenants";

/// Field values of the event form
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub libelle: String,
    pub description: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub heure_debut: NaiveTime,
    pub heure_fin: NaiveTime,
    pub mode: ModeEvenement,
    pub lieu: String,
    pub lien: String,
    /// `Autre` carries the free-text precision
    pub kind: TypeEvenement,
    pub image: Option<PathBuf>,
    pub intervenants: Vec<i64>,
}

impl EventForm {
    /// Empty form with dates and times set to `now` (minute precision)
    pub fn new(now: NaiveDateTime) -> Self {
        let time = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or_default();
        Self {
            libelle: String::new(),
            description: String::new(),
            date_debut: now.date(),
            date_fin: now.date(),
            heure_debut: time,
            heure_fin: time,
            mode: ModeEvenement::Presentiel,
            lieu: String::new(),
            lien: String::new(),
            kind: TypeEvenement::Atelier,
            image: None,
            intervenants: Vec::new(),
        }
    }

    /// Select or unselect a speaker
    pub fn toggle_intervenant(&mut self, id: i64) {
        match self.intervenants.iter().position(|&i| i == id) {
            Some(index) => {
                self.intervenants.remove(index);
            }
            None => self.intervenants.push(id),
        }
    }

    /// Check required fields and build the payload from trimmed values.
    ///
    /// Every failing field is reported, in form order.
    pub fn validate(&self) -> Result<NewEvenement, FieldErrors> {
        let mut errors = FieldErrors::new();
        let libelle = self.libelle.trim();
        let description = self.description.trim();
        let lieu = self.lieu.trim();
        let lien = self.lien.trim();

        if libelle.is_empty() {
            errors.insert("libelle", "Le libellé est obligatoire");
        }
        if description.is_empty() {
            errors.insert("description", "La description est obligatoire");
        }
        match self.mode {
            ModeEvenement::Presentiel if lieu.is_empty() => {
                errors.insert("lieu", "Le lieu est obligatoire pour un événement présentiel");
            }
            ModeEvenement::Enligne if lien.is_empty() => {
                errors.insert("lien", "Le lien est obligatoire pour un événement en ligne");
            }
            _ => {}
        }
        if let TypeEvenement::Autre(precision) = &self.kind {
            if precision.trim().is_empty() {
                errors.insert("type", "Veuillez préciser le type d'événement");
            }
        }
        if self.date_fin < self.date_debut {
            errors.insert("date_fin", "La date de fin doit être après la date de début");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let kind = match &self.kind {
            TypeEvenement::Autre(precision) => TypeEvenement::Autre(precision.trim().to_string()),
            other => other.clone(),
        };
        Ok(NewEvenement {
            libelle: libelle.to_string(),
            description: description.to_string(),
            date_debut: self.date_debut,
            date_fin: self.date_fin,
            heure_debut: self.heure_debut,
            heure_fin: self.heure_fin,
            kind,
            lieu: (self.mode == ModeEvenement::Presentiel).then(|| lieu.to_string()),
            lien: (self.mode == ModeEvenement::Enligne).then(|| lien.to_string()),
            intervenant_ids: self.intervenants.clone(),
        })
    }
}

pub struct EventFormScreen {
    events: Arc<dyn EventApi>,
    speakers: Arc<dyn SpeakerApi>,
    notifier: Arc<dyn Notifier>,
    pub form: EventForm,
    pub errors: FieldErrors,
    pub intervenants: Vec<Intervenant>,
    pub loading_intervenants: bool,
    pub submitting: bool,
}

impl EventFormScreen {
    pub fn new(events: Arc<dyn EventApi>, speakers: Arc<dyn SpeakerApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            events,
            speakers,
            notifier,
            form: EventForm::new(Local::now().naive_local()),
            errors: FieldErrors::new(),
            intervenants: Vec::new(),
            loading_intervenants: true,
            submitting: false,
        }
    }

    /// Load the speakers offered for selection
    pub async fn load_intervenants(&mut self) {
        self.loading_intervenants = true;
        match self.speakers.list_intervenants().await {
            Ok(intervenants) => self.intervenants = intervenants,
            Err(e) => {
                tracing::error!("Failed to load speakers: {}", e);
                self.notifier.alert("Erreur", SPEAKERS_ERROR);
            }
        }
        self.loading_intervenants = false;
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Evenement> {
        if self.submitting {
            return SubmitOutcome::Busy;
        }

        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.notifier.alert("Erreur", first);
                }
                self.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.errors.clear();

        self.submitting = true;
        let result = match &self.form.image {
            Some(path) => match Attachment::image(path).await {
                Ok(image) => self.events.create_evenement(&payload, Some(image)).await,
                Err(e) => Err(e),
            },
            None => self.events.create_evenement(&payload, None).await,
        };
        self.submitting = false;

        match result {
            Ok(created) => {
                tracing::info!("Event created: {:?}", created.id);
                self.notifier.alert("Succès", SUCCESS_MESSAGE);
                self.form = EventForm::new(Local::now().naive_local());
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                tracing::error!("Event creation failed: {}", e);
                let message = e.user_message(FAILURE_MESSAGE);
                self.notifier.alert("Erreur", &message);
                SubmitOutcome::Failed(message)
            }
        }
    }
}

impl Render for EventFormScreen {
    fn render(&self, palette: &Palette) -> String {
        let mut out = format!("{}\n", palette.heading("Nouvel événement"));
        let mode = match self.form.mode {
            ModeEvenement::Presentiel => format!("Présentiel ({})", self.form.lieu),
            ModeEvenement::Enligne => format!("En ligne ({})", self.form.lien),
        };
        out.push_str(&format!("Libellé: {}\n", self.form.libelle));
        out.push_str(&format!("Type: {}\n", self.form.kind));
        out.push_str(&format!("Mode: {}\n", mode));
        out.push_str(&format!(
            "Du {} {} au {} {}\n",
            self.form.date_debut.format("%d/%m/%Y"),
            self.form.heure_debut.format("%H:%M"),
            self.form.date_fin.format("%d/%m/%Y"),
            self.form.heure_fin.format("%H:%M")
        ));

        if self.loading_intervenants {
            out.push_str("Chargement des intervenants...\n");
        }
        for speaker in &self.intervenants {
            let selected = speaker.id.is_some_and(|id| self.form.intervenants.contains(&id));
            out.push_str(&format!("[{}] {}\n", if selected { "x" } else { " " }, speaker.full_name()));
        }
        for (field, message) in self.errors.iter() {
            out.push_str(&format!("{}: {}\n", field, message));
        }
        if self.submitting {
            out.push_str("Création en cours...\n");
        }
        out
    }
}
