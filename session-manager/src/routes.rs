use credential_store::Role;
use std::fmt;

/// Named screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    AdminHome,
    ResearcherHome,
    ClientHome,
    AdminResearcher,
    Diseases,
    Treatment,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::ForgotPassword => "ForgotPassword",
            Route::AdminHome => "AdminHome",
            Route::ResearcherHome => "ResearcherHome",
            Route::ClientHome => "ClientHome",
            Route::AdminResearcher => "AdminResearcher",
            Route::Diseases => "Diseases",
            Route::Treatment => "Treatment",
        }
    }

    /// Screens reachable without a session
    pub fn is_entry(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::ForgotPassword)
    }

    /// Whether a session holding `role` (or none) may show this screen
    pub fn allows(&self, role: Option<Role>) -> bool {
        if self.is_entry() {
            return true;
        }
        match (self, role) {
            (_, None) | (_, Some(Role::Invalid)) => false,
            (Route::AdminHome | Route::AdminResearcher | Route::Diseases | Route::Treatment, Some(role)) => {
                role == Role::Admin
            }
            (Route::ResearcherHome, Some(role)) => role == Role::Staff,
            (Route::ClientHome, Some(role)) => role == Role::Usuario,
            (Route::Login | Route::Register | Route::ForgotPassword, Some(_)) => true,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Home screen for a role; unroutable roles land on the login screen
pub fn route_for(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminHome,
        Role::Staff => Route::ResearcherHome,
        Role::Usuario => Route::ClientHome,
        Role::Invalid => Route::Login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn each_role_has_one_home() {
        assert_eq!(route_for(Role::Admin), Route::AdminHome);
        assert_eq!(route_for(Role::Staff), Route::ResearcherHome);
        assert_eq!(route_for(Role::Usuario), Route::ClientHome);
        assert_eq!(route_for(Role::Invalid), Route::Login);
    }

    #[test]
    fn entry_routes_are_always_allowed() {
        for role in [None, Some(Role::Admin), Some(Role::Staff), Some(Role::Usuario), Some(Role::Invalid)] {
            assert!(Route::Login.allows(role));
            assert!(Route::Register.allows(role));
            assert!(Route::ForgotPassword.allows(role));
        }
    }

    #[test]
    fn homes_are_gated_by_role() {
        assert!(Route::AdminHome.allows(Some(Role::Admin)));
        assert!(!Route::AdminHome.allows(Some(Role::Staff)));
        assert!(Route::ResearcherHome.allows(Some(Role::Staff)));
        assert!(!Route::ResearcherHome.allows(Some(Role::Usuario)));
        assert!(Route::ClientHome.allows(Some(Role::Usuario)));
        assert!(!Route::ClientHome.allows(None));
    }

    #[test]
    fn admin_screens_need_admin() {
        for route in [Route::AdminResearcher, Route::Diseases, Route::Treatment] {
            assert!(route.allows(Some(Role::Admin)));
            assert!(!route.allows(Some(Role::Staff)));
            assert!(!route.allows(Some(Role::Usuario)));
            assert!(!route.allows(None));
        }
    }

    proptest! {
        #[test]
        fn known_roles_route_home_in_any_casing(
            name in prop::sample::select(vec!["admin", "staff", "usuario"]),
            upper in prop::collection::vec(any::<bool>(), 7),
        ) {
            let cased: String = name
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            let home = route_for(Role::parse(&cased));
            prop_assert!(!home.is_entry());
            prop_assert_eq!(home, route_for(Role::parse(name)));
        }
    }
}
