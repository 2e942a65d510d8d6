//! Shared test helpers

use std::sync::Mutex;

use axum::Router;
use tokio::net::TcpListener;

use crate::platform::{Notifier, ShareSheet};

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Notifier that records every alert
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.alerts().into_iter().map(|(_, m)| m).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

/// Share sheet that records shared paths
#[derive(Debug)]
pub struct RecordingShare {
    available: bool,
    shared: Mutex<Vec<std::path::PathBuf>>,
}

impl RecordingShare {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            shared: Mutex::new(Vec::new()),
        }
    }

    pub fn shared(&self) -> Vec<std::path::PathBuf> {
        self.shared.lock().unwrap().clone()
    }
}

impl ShareSheet for RecordingShare {
    fn is_available(&self) -> bool {
        self.available
    }

    fn share(&self, path: &std::path::Path) -> anyhow::Result<()> {
        self.shared.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Mock GraphQL endpoint.
///
/// Each request body (query text plus variables) is matched against the
/// keys in order; the first key it contains selects the `data` payload.
/// Unmatched requests get a 500.
pub async fn spawn_cms(routes: Vec<(&'static str, serde_json::Value)>) -> String {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Json;
    use std::sync::Arc;

    let routes = Arc::new(routes);
    let app = Router::new().route(
        "/graphql",
        post(move |Json(body): Json<serde_json::Value>| {
            let routes = Arc::clone(&routes);
            async move {
                let haystack = body.to_string();
                match routes.iter().find(|(key, _)| haystack.contains(key)) {
                    Some((_, data)) => Ok(Json(serde_json::json!({ "data": data }))),
                    None => Err(StatusCode::INTERNAL_SERVER_ERROR),
                }
            }
        }),
    );
    format!("{}/graphql", spawn_server(app).await)
}

/// Content client pointed at `endpoint` for both CMS roles
pub fn content_client(endpoint: &str) -> crate::content::ContentClient {
    crate::content::ContentClient::with_endpoints(reqwest::Client::new(), endpoint, endpoint)
}

/// In-memory REST backend recording every call.
///
/// `fail_with(422, msg)` makes every call fail with a validation error;
/// any other status fails with `ServiceError::Status`.
#[derive(Default)]
pub struct FakeBackend {
    pub evenements: Mutex<Vec<crate::models::Evenement>>,
    pub intervenants: Mutex<Vec<crate::models::Intervenant>>,
    pub podcasts: Mutex<Vec<crate::models::Podcast>>,
    pub membres: Mutex<Vec<crate::models::Membre>>,
    pub categories: Mutex<Vec<crate::models::Categorie>>,
    pub calls: Mutex<Vec<String>>,
    pub created_events: Mutex<Vec<(crate::models::NewEvenement, Option<crate::services::Attachment>)>>,
    pub created_podcasts: Mutex<Vec<(crate::models::NewPodcast, crate::services::Attachment)>>,
    failure: Mutex<Option<(u16, String)>>,
}

impl FakeBackend {
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), crate::services::ServiceError> {
        use crate::services::ServiceError;

        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some((422, message)) => Err(ServiceError::Validation(message)),
            Some((status, message)) => Err(ServiceError::Status { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl crate::services::EventApi for FakeBackend {
    async fn list_evenements(&self) -> Result<Vec<crate::models::Evenement>, crate::services::ServiceError> {
        self.record("list_evenements".into())?;
        Ok(self.evenements.lock().unwrap().clone())
    }

    async fn get_evenement(&self, id: i64) -> Result<crate::models::Evenement, crate::services::ServiceError> {
        self.record(format!("get_evenement {}", id))?;
        self.evenements
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == Some(id))
            .cloned()
            .ok_or(crate::services::ServiceError::Status {
                status: 404,
                message: "Erreur lors de la récupération de l'événement".into(),
            })
    }

    async fn create_evenement(
        &self,
        evenement: &crate::models::NewEvenement,
        image: Option<crate::services::Attachment>,
    ) -> Result<crate::models::Evenement, crate::services::ServiceError> {
        self.record("create_evenement".into())?;
        self.created_events.lock().unwrap().push((evenement.clone(), image));
        let created: crate::models::Evenement = serde_json::from_value(serde_json::json!({
            "id": 100,
            "libelle": evenement.libelle,
            "description": evenement.description,
            "date_debut": evenement.date_debut.to_string(),
            "date_fin": evenement.date_fin.to_string(),
        }))
        .unwrap();
        self.evenements.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn image_url(&self, path: &str) -> String {
        format!("http://backend.test/storage/{}", path)
    }
}

#[async_trait::async_trait]
impl crate::services::SpeakerApi for FakeBackend {
    async fn list_intervenants(&self) -> Result<Vec<crate::models::Intervenant>, crate::services::ServiceError> {
        self.record("list_intervenants".into())?;
        Ok(self.intervenants.lock().unwrap().clone())
    }

    async fn get_intervenant(&self, id: i64) -> Result<crate::models::Intervenant, crate::services::ServiceError> {
        self.record(format!("get_intervenant {}", id))?;
        self.intervenants
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == Some(id))
            .cloned()
            .ok_or(crate::services::ServiceError::Status {
                status: 404,
                message: "Erreur lors de la récupération de l'intervenant".into(),
            })
    }

    async fn create_intervenant(
        &self,
        intervenant: &crate::models::NewIntervenant,
    ) -> Result<crate::models::Intervenant, crate::services::ServiceError> {
        self.record(format!("create_intervenant {} {}", intervenant.prenom, intervenant.nom))?;
        let mut created: crate::models::Intervenant =
            serde_json::from_value(serde_json::to_value(intervenant).unwrap()).unwrap();
        created.id = Some(self.intervenants.lock().unwrap().len() as i64 + 1);
        self.intervenants.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

#[async_trait::async_trait]
impl crate::services::PodcastApi for FakeBackend {
    async fn list_podcasts(&self) -> Result<Vec<crate::models::Podcast>, crate::services::ServiceError> {
        self.record("list_podcasts".into())?;
        Ok(self.podcasts.lock().unwrap().clone())
    }

    async fn create_podcast(
        &self,
        podcast: &crate::models::NewPodcast,
        fichier: crate::services::Attachment,
    ) -> Result<crate::models::Podcast, crate::services::ServiceError> {
        self.record("create_podcast".into())?;
        self.created_podcasts.lock().unwrap().push((podcast.clone(), fichier));
        let created: crate::models::Podcast = serde_json::from_value(serde_json::json!({
            "id": 500,
            "libelle": podcast.libelle,
            "description": podcast.description,
        }))
        .unwrap();
        self.podcasts.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_podcast(&self, id: i64) -> Result<(), crate::services::ServiceError> {
        self.record(format!("delete_podcast {}", id))?;
        self.podcasts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_membres(&self) -> Result<Vec<crate::models::Membre>, crate::services::ServiceError> {
        self.record("list_membres".into())?;
        Ok(self.membres.lock().unwrap().clone())
    }

    async fn list_categories(&self) -> Result<Vec<crate::models::Categorie>, crate::services::ServiceError> {
        self.record("list_categories".into())?;
        Ok(self.categories.lock().unwrap().clone())
    }
}

/// Event record from a few fields
pub fn evenement(id: i64, libelle: &str, date_debut: &str) -> crate::models::Evenement {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "libelle": libelle,
        "date_debut": date_debut,
        "date_fin": date_debut,
    }))
    .unwrap()
}

/// Podcast record with author and category
pub fn podcast(id: i64, libelle: &str, author: (&str, &str), categorie: &str) -> crate::models::Podcast {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "libelle": libelle,
        "fichier": format!("https://cdn.example.org/{}.mp3", id),
        "membre": {"id": id, "prenom": author.0, "nom": author.1},
        "categorie": {"id": id, "nom": categorie},
    }))
    .unwrap()
}
