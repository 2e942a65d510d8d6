//! Application context
//!
//! Holds the clients and platform capabilities shared by every screen and
//! hands out screens wired to them.

use std::sync::Arc;

use crate::audio::{create_backend, AudioController, AudioError};
use crate::config::Config;
use crate::content::ContentClient;
use crate::platform::{ConsoleLinkOpener, ConsoleNotifier, ConsoleShare, Downloader, LinkOpener, Notifier, ShareSheet};
use crate::screens::{
    DocumentsScreen, EventDetailScreen, EventFormScreen, EventsScreen, HomeScreen, IntervenantFormScreen,
    NewsDetailScreen, NewsScreen, PodcastAdminScreen, PodcastFormScreen, ProjectsScreen, TeamScreen,
};
use crate::services::RestClient;
use crate::theme::ThemeContext;

/// Shared application state
#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub theme: ThemeContext,
    pub content: ContentClient,
    pub rest: Arc<RestClient>,
    pub notifier: Arc<dyn Notifier>,
    pub share: Arc<dyn ShareSheet>,
    pub links: Arc<dyn LinkOpener>,
    pub downloader: Downloader,
}

impl App {
    /// Build the context with console capabilities
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let content = ContentClient::new(&config.cms)?;
        let rest = Arc::new(RestClient::new(&config.rest)?);
        let downloader = Downloader::new(config.documents.cache_dir.clone());
        let theme = ThemeContext::new(config.theme.scheme);

        tracing::debug!("CMS endpoint: {}", config.cms.endpoint);
        tracing::debug!("REST API base: {}", rest.api_base());

        Ok(Self {
            config,
            theme,
            content,
            rest,
            notifier: Arc::new(ConsoleNotifier),
            share: Arc::new(ConsoleShare),
            links: Arc::new(ConsoleLinkOpener),
            downloader,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_share(mut self, share: Arc<dyn ShareSheet>) -> Self {
        self.share = share;
        self
    }

    pub fn home(&self) -> HomeScreen {
        HomeScreen::new(self.content.clone())
    }

    pub fn news(&self) -> NewsScreen {
        NewsScreen::new(self.content.clone())
    }

    pub fn news_detail(&self, uri: &str) -> NewsDetailScreen {
        NewsDetailScreen::new(self.content.clone(), uri)
    }

    pub fn events(&self) -> EventsScreen {
        EventsScreen::new(self.rest.clone())
    }

    pub fn event_detail(&self, id: i64) -> EventDetailScreen {
        EventDetailScreen::new(self.rest.clone(), id)
    }

    pub fn event_form(&self) -> EventFormScreen {
        EventFormScreen::new(self.rest.clone(), self.rest.clone(), self.notifier.clone())
    }

    pub fn intervenant_form(&self) -> IntervenantFormScreen {
        IntervenantFormScreen::new(self.rest.clone(), self.notifier.clone())
    }

    /// Podcast admin with the configured audio backend
    pub fn podcasts(&self) -> Result<PodcastAdminScreen, AudioError> {
        let backend = create_backend(&self.config.audio)?;
        let audio = AudioController::new(backend, self.notifier.clone());
        Ok(PodcastAdminScreen::new(self.rest.clone(), self.notifier.clone(), audio))
    }

    pub fn podcast_form(&self) -> PodcastFormScreen {
        PodcastFormScreen::new(self.rest.clone(), self.notifier.clone())
    }

    pub fn team(&self) -> TeamScreen {
        TeamScreen::new(self.content.clone())
    }

    pub fn projects(&self) -> ProjectsScreen {
        ProjectsScreen::new(self.content.clone())
    }

    pub fn documents(&self) -> DocumentsScreen {
        DocumentsScreen::new(self.downloader.clone(), self.share.clone(), self.notifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{LoadTrigger, Render};
    use crate::testing::{spawn_server, RecordingNotifier};
    use crate::theme::ColorScheme;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    #[test]
    fn test_app_from_default_config() {
        let app = App::new(Config::default()).unwrap();

        assert_eq!(app.theme.scheme(), ColorScheme::Light);
        assert_eq!(app.downloader.cache_dir(), app.config.documents.cache_dir.as_path());
        assert!(app.podcasts().is_ok());
        assert_eq!(app.documents().visible().len(), 8);
    }

    #[test]
    fn test_dark_scheme_from_config() {
        let mut config = Config::default();
        config.theme.scheme = ColorScheme::Dark;

        let app = App::new(config).unwrap();

        assert_eq!(app.theme.scheme(), ColorScheme::Dark);
        assert_eq!(app.theme.toggle(), ColorScheme::Light);
    }

    #[tokio::test]
    async fn test_events_screen_uses_rest_backend() {
        let router = Router::new().route(
            "/api/evenements",
            get(|| async { Json(json!({"data": [{"id": 1, "libelle": "Forum", "date_debut": "2099-05-01", "date_fin": "2099-05-01"}]})) }),
        );
        let base = spawn_server(router).await;
        let mut config = Config::default();
        config.rest.base_url = base;
        let notifier = Arc::new(RecordingNotifier::default());
        let app = App::new(config).unwrap().with_notifier(notifier.clone());

        let mut screen = app.events();
        screen.load(LoadTrigger::Mount).await;

        assert_eq!(screen.list.items.len(), 1);
        assert!(screen.render(app.theme.palette()).contains("Forum"));
        assert!(notifier.alerts().is_empty());
    }
}
