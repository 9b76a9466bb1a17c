// Stable error codes surfaced alongside user-facing messages

pub mod validation {
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_2001";
    pub const SESSION_INVALID: &str = "AUTH_2003";
    pub const UNRECOGNIZED_ROLE: &str = "AUTH_2004";
    pub const ATTEMPT_IN_PROGRESS: &str = "AUTH_2005";
}

pub mod authorization {
    pub const ACCESS_DENIED: &str = "AUTHZ_3001";
}

pub mod storage {
    pub const UNAVAILABLE: &str = "STORE_4001";
}

pub mod network {
    pub const UNAVAILABLE: &str = "NET_5001";
    pub const SERVER_ERROR: &str = "NET_5002";
}

pub mod system {
    pub const CONFIGURATION: &str = "SYS_6001";
}
