use credential_store::Role;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// A login attempt is in flight
    Authenticating,
    Authenticated {
        role: Role,
        user_id: String,
    },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }
}
