pub mod api {
    pub const DESK_BASE_URL: &str = "https://desk.zoho.com/api/v1";
    pub const OAUTH_TOKEN_URL: &str = "https://accounts.zoho.com/oauth/v2/token";
    pub const TIMEOUT_REQUEST_MS: u64 = 30_000;
    pub const TIMEOUT_TOKEN_MS: u64 = 15_000;
    pub const AUTH_SCHEME: &str = "Zoho-oauthtoken";
    pub const ORG_HEADER: &str = "orgId";
}

pub mod webhook {
    pub const TIMEOUT_POST_MS: u64 = 10_000;
    pub const EXCERPT_MAX_CHARS: usize = 500;
}
