//! Podcast service

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Method;

use super::{Attachment, RestClient, ServiceError};
use crate::models::{Categorie, Membre, NewPodcast, Podcast};

const LIST_ERROR: &str = "Impossible de charger les podcasts";
const CREATE_ERROR: &str = "Erreur serveur";
const DELETE_ERROR: &str = "Impossible de supprimer";
const OPTIONS_ERROR: &str = "Chargement des données échoué. Vérifiez votre connexion.";

/// Podcast, author and category endpoints
#[async_trait]
pub trait PodcastApi: Send + Sync {
    async fn list_podcasts(&self) -> Result<Vec<Podcast>, ServiceError>;

    /// `POST /podcasts` as multipart with the audio file under `fichier`
    async fn create_podcast(&self, podcast: &NewPodcast, fichier: Attachment) -> Result<Podcast, ServiceError>;

    async fn delete_podcast(&self, id: i64) -> Result<(), ServiceError>;

    async fn list_membres(&self) -> Result<Vec<Membre>, ServiceError>;

    async fn list_categories(&self) -> Result<Vec<Categorie>, ServiceError>;
}

#[async_trait]
impl PodcastApi for RestClient {
    async fn list_podcasts(&self) -> Result<Vec<Podcast>, ServiceError> {
        self.get_json(&format!("{}/podcasts", self.podcasts_base), LIST_ERROR)
            .await
    }

    async fn create_podcast(&self, podcast: &NewPodcast, fichier: Attachment) -> Result<Podcast, ServiceError> {
        let form = podcast
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part("fichier", fichier.into_part()?);

        let url = format!("{}/podcasts", self.podcasts_base);
        tracing::info!("Uploading podcast '{}'", podcast.libelle);
        self.send_write(self.request(Method::POST, &url).multipart(form), CREATE_ERROR)
            .await
    }

    async fn delete_podcast(&self, id: i64) -> Result<(), ServiceError> {
        self.delete(&format!("{}/podcasts/{}", self.podcasts_base, id), DELETE_ERROR)
            .await
    }

    async fn list_membres(&self) -> Result<Vec<Membre>, ServiceError> {
        self.get_json(&format!("{}/membres", self.podcasts_base), OPTIONS_ERROR)
            .await
    }

    async fn list_categories(&self) -> Result<Vec<Categorie>, ServiceError> {
        self.get_json(&format!("{}/categories", self.podcasts_base), OPTIONS_ERROR)
            .await
    }
}
