//! Event service

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Method;

use super::{Attachment, RestClient, ServiceError};
use crate::models::{Evenement, NewEvenement};

const LIST_ERROR: &str = "Erreur lors de la récupération des événements";
const GET_ERROR: &str = "Erreur lors de la récupération de l'événement";
const CREATE_ERROR: &str = "Erreur lors de la création de l'événement";

/// Event endpoints
#[async_trait]
pub trait EventApi: Send + Sync {
    /// `GET /evenements`
    async fn list_evenements(&self) -> Result<Vec<Evenement>, ServiceError>;

    /// `GET /evenements/{id}`
    async fn get_evenement(&self, id: i64) -> Result<Evenement, ServiceError>;

    /// `POST /evenements` as multipart, with an optional image
    async fn create_evenement(
        &self,
        evenement: &NewEvenement,
        image: Option<Attachment>,
    ) -> Result<Evenement, ServiceError>;

    /// Public URL of a stored event image
    fn image_url(&self, path: &str) -> String;
}

#[async_trait]
impl EventApi for RestClient {
    async fn list_evenements(&self) -> Result<Vec<Evenement>, ServiceError> {
        self.get_json(&format!("{}/evenements", self.api_base), LIST_ERROR).await
    }

    async fn get_evenement(&self, id: i64) -> Result<Evenement, ServiceError> {
        self.get_json(&format!("{}/evenements/{}", self.api_base, id), GET_ERROR)
            .await
    }

    async fn create_evenement(
        &self,
        evenement: &NewEvenement,
        image: Option<Attachment>,
    ) -> Result<Evenement, ServiceError> {
        let mut form = evenement
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        if let Some(image) = image {
            form = form.part("image", image.into_part()?);
        }

        let url = format!("{}/evenements", self.api_base);
        tracing::info!("Creating event '{}'", evenement.libelle);
        self.send_write(self.request(Method::POST, &url).multipart(form), CREATE_ERROR)
            .await
    }

    fn image_url(&self, path: &str) -> String {
        RestClient::image_url(self, path)
    }
}
