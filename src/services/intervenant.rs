//! Speaker service

use async_trait::async_trait;
use reqwest::Method;

use super::{RestClient, ServiceError};
use crate::models::{Intervenant, NewIntervenant};

const LIST_ERROR: &str = "Erreur lors de la récupération des intervenants";
const GET_ERROR: &str = "Erreur lors de la récupération de l'intervenant";
const CREATE_ERROR: &str = "Erreur lors de la création de l'intervenant";

/// Speaker endpoints
#[async_trait]
pub trait SpeakerApi: Send + Sync {
    async fn list_intervenants(&self) -> Result<Vec<Intervenant>, ServiceError>;

    async fn get_intervenant(&self, id: i64) -> Result<Intervenant, ServiceError>;

    /// `POST /intervenants` with a JSON body
    async fn create_intervenant(&self, intervenant: &NewIntervenant) -> Result<Intervenant, ServiceError>;
}

#[async_trait]
impl SpeakerApi for RestClient {
    async fn list_intervenants(&self) -> Result<Vec<Intervenant>, ServiceError> {
        self.get_json(&format!("{}/intervenants", self.api_base), LIST_ERROR)
            .await
    }

    async fn get_intervenant(&self, id: i64) -> Result<Intervenant, ServiceError> {
        self.get_json(&format!("{}/intervenants/{}", self.api_base, id), GET_ERROR)
            .await
    }

    async fn create_intervenant(&self, intervenant: &NewIntervenant) -> Result<Intervenant, ServiceError> {
        let url = format!("{}/intervenants", self.api_base);
        tracing::info!("Creating speaker '{} {}'", intervenant.prenom, intervenant.nom);
        self.send_write(self.request(Method::POST, &url).json(intervenant), CREATE_ERROR)
            .await
    }
}
