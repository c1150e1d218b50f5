//! Wire routes of the health-tracking backend.
//!
//! The single place that knows the HTTP contract's paths. Everything else
//! builds requests from these constants and builders.

/// POST `{mobile, password}` -> `{token, user}`
pub const LOGIN: &str = "/user/login";

/// POST user fields -> `{token, user}`
pub const REGISTER: &str = "/user/register";

/// POST, best-effort server-side session teardown
pub const LOGOUT: &str = "/user/logout";

/// GET -> `{user}`
pub const CURRENT_USER: &str = "/user";

/// GET -> `{connections}`; POST `{receiverId}`; PUT `{senderId, status}`
pub const CONNECTIONS: &str = "/connection";

/// GET -> `{connections}` awaiting a decision
pub const PENDING_REQUESTS: &str = "/connection/allRequest";

/// POST medication payload -> 201
pub const MEDICATIONS: &str = "/medication";

/// GET -> `{medications}`
pub const MEDICATIONS_ALL: &str = "/medication/all";

/// GET -> `{user}` matching the given account id.
pub fn find_user(id: &str) -> String {
    format!("/connection/findUser?id={}", urlencoding::encode(id))
}

/// GET/PUT/DELETE a single medication plan.
pub fn medication(id: &str) -> String {
    format!("/medication/{}", urlencoding::encode(id))
}
