//! Session lifecycle for the PlantGuard client
//!
//! [`SessionManager`] ties the identity authority, the credential store and
//! the navigation surface together:
//!
//! ```text
//! Unauthenticated ──login──▶ Authenticating ──ok──▶ Authenticated
//!        ▲                         │                     │
//!        └──────── failure ────────┘      logout / 401 ──┘
//! ```
//!
//! Entering `Authenticated` resets navigation to the role's home screen;
//! leaving it resets navigation to [`Route::Login`].

pub mod error;
pub mod manager;
pub mod navigation;
pub mod routes;
pub mod state;

pub use error::{Result, SessionError};
pub use manager::SessionManager;
pub use navigation::{NavigationStack, Navigator};
pub use routes::{route_for, Route};
pub use state::SessionState;

#[cfg(any(test, feature = "mock"))]
pub use navigation::MockNavigator;
