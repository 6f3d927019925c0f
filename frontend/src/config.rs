/// API base URL, set at build time with `API_URL`.
pub fn api_url() -> &'static str {
    option_env!("API_URL").unwrap_or("/api")
}

/// `localStorage` key holding the session token.
pub const JWT_KEY: &str = "jwt";
