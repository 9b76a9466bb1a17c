use crate::error::{Result, SessionError};
use crate::navigation::Navigator;
use crate::routes::{route_for, Route};
use crate::state::SessionState;
use auth_gateway::SessionEvent;
use auth_identity::{IdentityAuthority, RecoveryFlow, RegistrationProfile};
use credential_store::{CredentialSet, CredentialStore, Role};
use logger_redacted::{redacted_info, redacted_warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;

/// Owns the session lifecycle for one client
///
/// One instance is shared (`Arc`) by everything that needs the session. At
/// most one login or registration attempt runs at a time; a second call
/// while one is in flight fails with [`SessionError::AttemptInProgress`].
pub struct SessionManager {
    authority: Arc<dyn IdentityAuthority>,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
    in_flight: AtomicBool,
    /// Bumped each time the stored session is torn down (logout, invalidation)
    teardowns: AtomicU64,
    /// Serializes credential writes with logout
    transition: Mutex<()>,
    recovery: Mutex<RecoveryFlow>,
}

/// Held for the duration of an attempt
///
/// Dropping it without [`AttemptGuard::settle`] puts the state back to what
/// it was before the attempt, unless the session was torn down meanwhile, in
/// which case it lands on `Unauthenticated`. The in-flight flag is always
/// released.
struct AttemptGuard<'a> {
    manager: &'a SessionManager,
    prior: Option<SessionState>,
    teardowns_at_start: u64,
}

impl AttemptGuard<'_> {
    fn settle(mut self) {
        self.prior = None;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if let Some(prior) = self.prior.take() {
            let torn_down = self.manager.teardowns.load(Ordering::Acquire) != self.teardowns_at_start;
            if torn_down {
                let replaced = self.manager.state.send_replace(SessionState::Unauthenticated);
                // Logout already navigated; an invalidation seen mid-attempt did not
                if prior.is_authenticated() && replaced == SessionState::Authenticating {
                    tracing::warn!("session ended during the attempt; returning to login");
                    self.manager.navigator.reset_to_route(Route::Login);
                }
            } else {
                self.manager.state.send_replace(prior);
            }
        }
        self.manager.in_flight.store(false, Ordering::Release);
    }
}

impl SessionManager {
    pub fn new(
        authority: Arc<dyn IdentityAuthority>,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            authority,
            store,
            navigator,
            state,
            in_flight: AtomicBool::new(false),
            teardowns: AtomicU64::new(0),
            transition: Mutex::new(()),
            recovery: Mutex::new(RecoveryFlow::new()),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn begin_attempt(&self, mark_authenticating: bool) -> Result<AttemptGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("attempt rejected; another is in flight");
            return Err(SessionError::AttemptInProgress);
        }

        let teardowns_at_start = self.teardowns.load(Ordering::Acquire);
        let prior = mark_authenticating.then(|| self.state.send_replace(SessionState::Authenticating));
        Ok(AttemptGuard {
            manager: self,
            prior,
            teardowns_at_start,
        })
    }

    /// Rebuild the session from the store at startup
    pub async fn restore(&self) -> Result<SessionState> {
        let stored = match self.store.get().await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::error!(error = %err, "credential store unreadable; staying signed out");
                self.state.send_replace(SessionState::Unauthenticated);
                return Err(err.into());
            }
        };

        let (state, route) = match stored {
            Some(set) => {
                tracing::info!(role = %set.role, "restored stored session");
                let route = route_for(set.role);
                (
                    SessionState::Authenticated {
                        role: set.role,
                        user_id: set.user_id,
                    },
                    route,
                )
            }
            None => (SessionState::Unauthenticated, Route::Login),
        };

        self.state.send_replace(state.clone());
        self.navigator.reset_to_route(route);
        Ok(state)
    }

    /// Authenticate and land on the role's home screen
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Route> {
        let guard = self.begin_attempt(true)?;
        redacted_info!("login attempt for {}", identifier);

        let grant = self.authority.login(identifier, secret).await?;

        let role = Role::parse(&grant.role);
        if !role.is_valid() {
            redacted_warn!("authority granted unroutable role `{}` to {}", grant.role, identifier);
            return Err(SessionError::UnrecognizedRole(grant.role));
        }

        let set = CredentialSet::new(grant.access_token, grant.refresh_token, role, grant.user_id)?;
        let _transition = self.transition.lock().await;
        self.store.put(&set).await?;

        let home = route_for(role);
        self.state.send_replace(SessionState::Authenticated {
            role,
            user_id: set.user_id,
        });
        guard.settle();

        tracing::info!(%role, %home, "session established");
        self.navigator.reset_to_route(home);
        Ok(home)
    }

    /// Create an account, then return to the login screen
    pub async fn register(&self, profile: &RegistrationProfile) -> Result<()> {
        let guard = self.begin_attempt(false)?;
        self.authority.register(profile).await?;
        guard.settle();

        self.navigator.reset_to_route(Route::Login);
        Ok(())
    }

    pub async fn verify_recovery_email(&self, email: &str) -> Result<bool> {
        let mut flow = self.recovery.lock().await;
        Ok(flow.verify_email(self.authority.as_ref(), email).await?)
    }

    pub async fn reset_password(&self, email: &str, new_secret: &str, confirm_secret: &str) -> Result<()> {
        let mut flow = self.recovery.lock().await;
        flow.reset_password(self.authority.as_ref(), email, new_secret, confirm_secret)
            .await?;
        drop(flow);

        self.navigator.go_back();
        Ok(())
    }

    /// Drop the stored credentials and return to the login screen
    pub async fn logout(&self) -> Result<()> {
        let _transition = self.transition.lock().await;
        if let Err(err) = self.store.clear().await {
            tracing::error!(error = %err, "logout could not clear credentials");
            return Err(err.into());
        }
        self.teardowns.fetch_add(1, Ordering::AcqRel);

        self.state.send_replace(SessionState::Unauthenticated);
        tracing::info!("signed out");
        self.navigator.reset_to_route(Route::Login);
        Ok(())
    }

    /// React to the authority rejecting the stored credential
    ///
    /// During a login attempt the state is left to the attempt: it ends
    /// authenticated with its own fresh credentials, or unauthenticated.
    pub fn on_session_invalidated(&self) {
        self.teardowns.fetch_add(1, Ordering::AcqRel);
        let changed = self.state.send_if_modified(|state| match state {
            SessionState::Authenticated { .. } => {
                *state = SessionState::Unauthenticated;
                true
            }
            _ => false,
        });

        if changed {
            tracing::warn!("session invalidated; returning to login");
            self.navigator.reset_to_route(Route::Login);
        }
    }

    /// Forward gateway events to [`SessionManager::on_session_invalidated`]
    ///
    /// The task ends when the gateway is dropped or the manager is.
    pub fn spawn_event_listener(self: &Arc<Self>, mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Invalidated) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        let Some(session) = manager.upgrade() else { break };
                        session.on_session_invalidated();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Check whether the current session may show `route`
    pub fn authorize_route(&self, route: Route) -> Result<()> {
        if route.allows(self.state.borrow().role()) {
            Ok(())
        } else {
            Err(SessionError::Forbidden(route))
        }
    }
}
