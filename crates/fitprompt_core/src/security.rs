//! Static HTTP security headers for hosting the single-page app.
//!
//! The SPA talks to no backend; the prompt is copied into an external chat
//! tab by hand. The policy below therefore locks `connect-src` to the origin
//! and forbids framing entirely.

const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "Content-Security-Policy",
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; \
         img-src 'self' data:; connect-src 'self'; font-src 'self'; \
         object-src 'none'; base-uri 'self'; form-action 'self'; frame-ancestors 'none'",
    ),
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    (
        "Permissions-Policy",
        "camera=(), microphone=(), geolocation=(), payment=()",
    ),
    (
        "Strict-Transport-Security",
        "max-age=31536000; includeSubDomains",
    ),
];

/// Returns the ordered `(name, value)` header list.
pub fn security_headers() -> &'static [(&'static str, &'static str)] {
    SECURITY_HEADERS
}

/// Looks up one header value; names compare case-insensitively.
pub fn header_value(name: &str) -> Option<&'static str> {
    let name = name.trim();
    SECURITY_HEADERS
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}
