//! Speaker creation form

use std::sync::Arc;

use crate::models::{Intervenant, NewIntervenant, Sexe};
use crate::platform::Notifier;
use crate::services::SpeakerApi;
use crate::theme::Palette;

use super::{FieldErrors, Render, SubmitOutcome};

pub const SUCCESS_MESSAGE: &str = "L'intervenant a été créé avec succès !";
pub const FAILURE_MESSAGE: &str = "Une erreur est survenue lors de la création de l'intervenant";

pub struct IntervenantFormScreen {
    api: Arc<dyn SpeakerApi>,
    notifier: Arc<dyn Notifier>,
    pub prenom: String,
    pub nom: String,
    pub sexe: Sexe,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl IntervenantFormScreen {
    pub fn new(api: Arc<dyn SpeakerApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            prenom: String::new(),
            nom: String::new(),
            sexe: Sexe::Homme,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn validate(&self) -> Result<NewIntervenant, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.prenom.trim().is_empty() {
            errors.insert("prenom", "Le prénom est obligatoire");
        }
        if self.nom.trim().is_empty() {
            errors.insert("nom", "Le nom est obligatoire");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewIntervenant {
            prenom: self.prenom.trim().to_string(),
            nom: self.nom.trim().to_string(),
            sexe: self.sexe,
        })
    }

    fn reset(&mut self) {
        self.prenom.clear();
        self.nom.clear();
        self.sexe = Sexe::Homme;
        self.errors.clear();
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Intervenant> {
        if self.submitting {
            return SubmitOutcome::Busy;
        }
        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.notifier.alert("Erreur", first);
                }
                self.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.submitting = true;
        let result = self.api.create_intervenant(&payload).await;
        self.submitting = false;

        match result {
            Ok(created) => {
                self.notifier.alert("Succès", SUCCESS_MESSAGE);
                self.reset();
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                tracing::error!("Speaker creation failed: {}", e);
                let message = e.user_message(FAILURE_MESSAGE);
                self.notifier.alert("Erreur", &message);
                SubmitOutcome::Failed(message)
            }
        }
    }
}

impl Render for IntervenantFormScreen {
    fn render(&self, palette: &Palette) -> String {
        let mut out = format!("{}\n", palette.heading("Nouvel intervenant"));
        out.push_str(&format!("Prénom: {}\nNom: {}\nSexe: {}\n", self.prenom, self.nom, self.sexe));
        for (_, message) in self.errors.iter() {
            out.push_str(&format!("{}\n", message));
        }
        out
    }
}
