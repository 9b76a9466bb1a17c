use anyhow::Result;
use auth_gateway::{RequestAuthenticator, UserDirectory};
use auth_identity::IdentityClient;
use config_engine::ClientConfig;
use error_common::PlantGuardError;
use indicatif::{ProgressBar, ProgressStyle};
use session_manager::{NavigationStack, SessionManager};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Wiring shared by every command
pub struct App {
    pub session: Arc<SessionManager>,
    pub directory: UserDirectory,
    pub navigation: Arc<NavigationStack>,
    listener: JoinHandle<()>,
}

impl App {
    /// Open the store, build the clients and restore any stored session
    pub async fn bootstrap(config: &ClientConfig) -> Result<Self> {
        let store = credential_store::open_store(&config.store)
            .await
            .map_err(user_error)?;
        let authority = IdentityClient::new(config.authority.clone()).map_err(user_error)?;
        let authenticator =
            Arc::new(RequestAuthenticator::new(&config.authority, store.clone()).map_err(user_error)?);

        let navigation = Arc::new(NavigationStack::new());
        let session = Arc::new(SessionManager::new(Arc::new(authority), store, navigation.clone()));
        let listener = session.spawn_event_listener(authenticator.subscribe());

        session.restore().await.map_err(user_error)?;

        Ok(Self {
            session,
            directory: UserDirectory::new(authenticator),
            navigation,
            listener,
        })
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Wrap a crate error so the command boundary can recover its user message
pub fn user_error<E: Into<PlantGuardError>>(err: E) -> anyhow::Error {
    anyhow::Error::new(err.into())
}

/// Advice printed under an error message, if any applies
pub fn follow_up(error: &PlantGuardError) -> Option<&'static str> {
    error
        .ends_session()
        .then_some("Your session has ended; sign in again with `plantguard login`.")
}

/// Run `future` behind a terminal spinner
pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}
