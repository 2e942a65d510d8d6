//! Podcast upload form

use std::path::Path;
use std::sync::Arc;

use crate::models::{Categorie, Membre, NewPodcast, Podcast};
use crate::platform::Notifier;
use crate::services::{Attachment, PodcastApi, ServiceError};
use crate::theme::Palette;

use super::{FieldErrors, Render, SubmitOutcome};

pub const LIBELLE_MAX_LEN: usize = 245;
pub const SUCCESS_MESSAGE: &str = "Podcast enregistré avec succès 🎙️";
pub const SERVER_ERROR: &str = "Erreur serveur";
pub const SAVE_FAILED: &str = "Échec de l'enregistrement";
pub const OPTIONS_ERROR: &str = "Chargement des données échoué. Vérifiez votre connexion.";
pub const PICK_ERROR: &str = "Sélection du fichier échouée";

pub struct PodcastFormScreen {
    api: Arc<dyn PodcastApi>,
    notifier: Arc<dyn Notifier>,
    pub libelle: String,
    pub description: String,
    pub membre: Option<i64>,
    pub categorie: Option<i64>,
    pub fichier: Option<Attachment>,
    pub membres: Vec<Membre>,
    pub categories: Vec<Categorie>,
    pub errors: FieldErrors,
    pub loading_options: bool,
    pub submitting: bool,
}

impl PodcastFormScreen {
    pub fn new(api: Arc<dyn PodcastApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            libelle: String::new(),
            description: String::new(),
            membre: None,
            categorie: None,
            fichier: None,
            membres: Vec::new(),
            categories: Vec::new(),
            errors: FieldErrors::new(),
            loading_options: true,
            submitting: false,
        }
    }

    /// Load authors and categories together
    pub async fn load_options(&mut self) {
        self.loading_options = true;
        let result = futures::try_join!(self.api.list_membres(), self.api.list_categories());
        match result {
            Ok((membres, categories)) => {
                self.membres = membres;
                self.categories = categories;
            }
            Err(e) => {
                tracing::error!("Failed to load podcast form options: {}", e);
                self.notifier.alert("Erreur", OPTIONS_ERROR);
            }
        }
        self.loading_options = false;
    }

    /// Title, capped at 245 characters
    pub fn set_libelle(&mut self, value: &str) {
        self.libelle = value.chars().take(LIBELLE_MAX_LEN).collect();
        self.errors.remove("libelle");
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = value.to_string();
        self.errors.remove("description");
    }

    pub fn set_membre(&mut self, id: i64) {
        self.membre = Some(id);
        self.errors.remove("membre");
    }

    pub fn set_categorie(&mut self, id: i64) {
        self.categorie = Some(id);
        self.errors.remove("categorie");
    }

    /// Read the audio file to upload
    pub async fn pick_audio(&mut self, path: &Path, declared_mime: Option<&str>) -> bool {
        match Attachment::audio(path, declared_mime).await {
            Ok(attachment) => {
                self.fichier = Some(attachment);
                self.errors.remove("fichier");
                true
            }
            Err(e) => {
                tracing::error!("Audio selection failed: {}", e);
                self.notifier.alert("Erreur", PICK_ERROR);
                false
            }
        }
    }

    pub fn validate(&self) -> Result<(NewPodcast, Attachment), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.libelle.is_empty() {
            errors.insert("libelle", "Le titre est requis");
        }
        if self.description.is_empty() {
            errors.insert("description", "La description est requise");
        }
        if self.membre.is_none() {
            errors.insert("membre", "Auteur requis");
        }
        if self.categorie.is_none() {
            errors.insert("categorie", "Catégorie requise");
        }
        if self.fichier.is_none() {
            errors.insert("fichier", "Fichier audio requis");
        }

        match (self.membre, self.categorie, &self.fichier) {
            (Some(membre_id), Some(categorie_id), Some(fichier)) if errors.is_empty() => Ok((
                NewPodcast {
                    libelle: self.libelle.clone(),
                    description: self.description.clone(),
                    membre_id,
                    categorie_id,
                },
                fichier.clone(),
            )),
            _ => Err(errors),
        }
    }

    fn reset(&mut self) {
        self.libelle.clear();
        self.description.clear();
        self.membre = None;
        self.categorie = None;
        self.fichier = None;
        self.errors.clear();
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Podcast> {
        if self.submitting {
            return SubmitOutcome::Busy;
        }
        let (payload, fichier) = match self.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.submitting = true;
        let result = self.api.create_podcast(&payload, fichier).await;
        self.submitting = false;

        match result {
            Ok(created) => {
                self.notifier.alert("Succès", SUCCESS_MESSAGE);
                self.reset();
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                tracing::error!("Podcast upload failed: {}", e);
                let message = match &e {
                    ServiceError::Validation(_) | ServiceError::Status { .. } => e.user_message(SERVER_ERROR),
                    _ => SAVE_FAILED.to_string(),
                };
                self.notifier.alert("Erreur", &message);
                SubmitOutcome::Failed(message)
            }
        }
    }
}

impl Render for PodcastFormScreen {
    fn render(&self, palette: &Palette) -> String {
        if self.loading_options {
            return "Chargement des données...\n".to_string();
        }

        let mut out = format!("{}\n", palette.heading("Nouveau podcast"));
        let field = |label: &str, value: &str, key: &str| {
            let mut line = format!("{}: {}\n", label, value);
            if let Some(error) = self.errors.get(key) {
                line.push_str(&format!("  ! {}\n", Palette::paint("#DC2626", error)));
            }
            line
        };

        let membre = self
            .membre
            .and_then(|id| self.membres.iter().find(|m| m.id == id))
            .map(Membre::full_name)
            .unwrap_or_default();
        let categorie = self
            .categorie
            .and_then(|id| self.categories.iter().find(|c| c.id == id))
            .and_then(Categorie::display_name)
            .unwrap_or_default();
        let fichier = self.fichier.as_ref().map(|f| f.file_name.as_str()).unwrap_or_default();

        out.push_str(&field("Titre", &self.libelle, "libelle"));
        out.push_str(&field("Description", &self.description, "description"));
        out.push_str(&field("Auteur", &membre, "membre"));
        out.push_str(&field("Catégorie", categorie, "categorie"));
        out.push_str(&field("Fichier", fichier, "fichier"));
        if self.submitting {
            out.push_str("Envoi en cours...\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, RecordingNotifier};
    use std::io::Write;

    fn screen() -> (PodcastFormScreen, Arc<FakeBackend>, Arc<RecordingNotifier>) {
        let backend = Arc::new(FakeBackend::default());
        let notifier = Arc::new(RecordingNotifier::default());
        (PodcastFormScreen::new(backend.clone(), notifier.clone()), backend, notifier)
    }

    fn filled(screen: &mut PodcastFormScreen) {
        screen.set_libelle("Voix citoyennes");
        screen.set_description("Débat");
        screen.set_membre(1);
        screen.set_categorie(2);
    }

    #[tokio::test]
    async fn test_missing_audio_is_rejected_with_fichier_error() {
        let (mut screen, backend, notifier) = screen();
        filled(&mut screen);

        let outcome = screen.submit().await;

        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.get("fichier"), Some("Fichier audio requis"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(backend.calls().is_empty());
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_form_reports_every_field_and_editing_clears() {
        let (mut screen, _, _) = screen();

        screen.submit().await;
        assert_eq!(screen.errors.len(), 5);
        assert_eq!(screen.errors.get("membre"), Some("Auteur requis"));

        screen.set_categorie(4);
        assert!(!screen.errors.contains("categorie"));
        assert_eq!(screen.errors.len(), 4);
    }

    #[test]
    fn test_libelle_is_capped() {
        let (mut screen, _, _) = screen();

        screen.set_libelle(&"é".repeat(300));

        assert_eq!(screen.libelle.chars().count(), LIBELLE_MAX_LEN);
    }

    #[tokio::test]
    async fn test_submit_uploads_and_resets() {
        let (mut screen, backend, notifier) = screen();
        filled(&mut screen);
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"RIFF").unwrap();
        assert!(screen.pick_audio(file.path(), Some("application/octet-stream")).await);

        let outcome = screen.submit().await;

        assert!(outcome.is_created());
        assert_eq!(notifier.messages(), vec![SUCCESS_MESSAGE]);
        assert!(screen.fichier.is_none());
        assert!(screen.membre.is_none());
        let uploads = backend.created_podcasts.lock().unwrap();
        assert_eq!(uploads[0].0.membre_id, 1);
        assert_eq!(uploads[0].1.mime_type, "audio/wav");
    }

    #[tokio::test]
    async fn test_server_message_or_generic() {
        let (mut screen, backend, notifier) = screen();
        filled(&mut screen);
        screen.fichier = Some(Attachment::new("a.mp3", "audio/mpeg", vec![1]));
        backend.fail_with(422, "Le fichier doit être un audio.");

        assert_eq!(screen.submit().await, SubmitOutcome::Failed("Le fichier doit être un audio.".into()));

        backend.fail_with(500, "");
        assert_eq!(screen.submit().await, SubmitOutcome::Failed(SERVER_ERROR.into()));
        assert_eq!(notifier.messages().len(), 2);
        assert_eq!(screen.libelle, "Voix citoyennes");
    }

    #[tokio::test]
    async fn test_options_failure_alerts() {
        let (mut screen, backend, notifier) = screen();
        backend.fail_with(503, "indisponible");

        screen.load_options().await;

        assert!(!screen.loading_options);
        assert_eq!(notifier.messages(), vec![OPTIONS_ERROR]);
    }

    #[tokio::test]
    async fn test_pick_missing_file_alerts() {
        let (mut screen, _, notifier) = screen();

        assert!(!screen.pick_audio(Path::new("/nope/ep.mp3"), None).await);
        assert_eq!(notifier.messages(), vec![PICK_ERROR]);
    }
}
