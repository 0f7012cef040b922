use axum::http::HeaderValue;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Origins the upload form loads its stylesheet, scripts and fonts from.
const STYLE_ORIGINS: &[&str] = &["https://stackpath.bootstrapcdn.com", "https://fonts.googleapis.com"];
const SCRIPT_ORIGINS: &[&str] = &[
    "https://code.jquery.com",
    "https://cdnjs.cloudflare.com",
    "https://stackpath.bootstrapcdn.com",
];
const FONT_ORIGINS: &[&str] = &["https://fonts.gstatic.com"];

/// Security headers configuration
#[derive(Clone)]
pub struct SecurityHeadersConfig {
    pub is_production: bool,
    csp: String,
}

impl SecurityHeadersConfig {
    pub fn new(is_production: bool) -> Self {
        Self {
            is_production,
            csp: build_csp(),
        }
    }
}

/// The form carries inline `<style>` and `<script>` blocks, hence `'unsafe-inline'`.
fn build_csp() -> String {
    [
        "default-src 'self'".to_string(),
        format!("script-src 'self' 'unsafe-inline' {}", SCRIPT_ORIGINS.join(" ")),
        format!("style-src 'self' 'unsafe-inline' {}", STYLE_ORIGINS.join(" ")),
        format!("font-src 'self' data: {}", FONT_ORIGINS.join(" ")),
        "img-src 'self' data:".to_string(),
        "form-action 'self'".to_string(),
        "frame-ancestors 'none'".to_string(),
    ]
    .join("; ")
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(config): State<Arc<SecurityHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // Only meaningful behind HTTPS
    if config.is_production {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    if let Ok(header_value) = HeaderValue::from_str(&config.csp) {
        headers.insert("Content-Security-Policy", header_value);
    }

    headers.insert(
        "Permissions-Policy",
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );

    headers.insert(
        "Cache-Control",
        HeaderValue::from_static("no-store, private"),
    );

    response
}
