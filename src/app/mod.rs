use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{AppConfig, SiteConfig},
    database::DbManager,
    templ_manager::TemplateManager,
    EmailClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    /// Connects to the database eagerly and binds the listener.
    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let dm = DbManager::init(&config.db_config).await?;
        Self::build_with_db(config, dm).await
    }

    /// Builds the `App` around an already created `DbManager`.
    pub async fn build_with_db(config: AppConfig, dm: DbManager) -> Result<Self> {
        let sender = config.email_config.valid_sender()?;
        let tm = TemplateManager::init();
        let email_client = EmailClient::new(
            &config.email_config.url,
            sender,
            config.email_config.auth_token.clone(),
            config.email_config.timeout(),
        )?;

        let app_state = AppState::new(dm, tm, email_client, config.site_config);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub database_mgr: DbManager,
    pub templ_mgr: TemplateManager,
    pub email_client: EmailClient,
    pub site: SiteConfig,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(
        database_mgr: DbManager,
        templ_mgr: TemplateManager,
        email_client: EmailClient,
        site: SiteConfig,
    ) -> Self {
        AppState(Arc::new(InternalState {
            database_mgr,
            templ_mgr,
            email_client,
            site,
        }))
    }
}
