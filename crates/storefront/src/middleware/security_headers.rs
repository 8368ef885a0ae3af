//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Every response gets the same locked-down header set. The only
//! third-party origins allowed are the image hosts used by the catalog
//! and landing page.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Content security policy.
///
/// No inline scripts or styles; `nebula.js` and the stylesheet are served
/// from `/static`.
pub const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'none'; \
     script-src 'self'; \
     style-src 'self'; \
     font-src 'self'; \
     img-src 'self' https://images.unsplash.com https://media.istockphoto.com https://upload.wikimedia.org; \
     connect-src 'self'; \
     frame-src 'none'; \
     object-src 'none'; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'none'";

const PERMISSIONS_POLICY_VALUE: &str = "accelerometer=(), \
     autoplay=(), \
     camera=(), \
     display-capture=(), \
     geolocation=(), \
     gyroscope=(), \
     magnetometer=(), \
     microphone=(), \
     payment=(), \
     usb=()";

/// Header name and value pairs applied to every response.
const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", CONTENT_SECURITY_POLICY_VALUE),
    ("permissions-policy", PERMISSIONS_POLICY_VALUE),
    // Pages carry per-session cart state
    ("cache-control", "no-store, max-age=0"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    // Remote catalog images do not send CORP headers
    ("cross-origin-embedder-policy", "credentialless"),
    ("x-dns-prefetch-control", "off"),
];

/// Add security headers to all responses.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for &(name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_allows_catalog_image_hosts() {
        for host in [
            "https://images.unsplash.com",
            "https://media.istockphoto.com",
            "https://upload.wikimedia.org",
        ] {
            assert!(CONTENT_SECURITY_POLICY_VALUE.contains(host), "{host}");
        }
        assert!(!CONTENT_SECURITY_POLICY_VALUE.contains("unsafe-inline"));
    }

    #[test]
    fn test_header_values_are_valid() {
        for &(name, value) in SECURITY_HEADERS {
            assert!(HeaderName::from_bytes(name.as_bytes()).is_ok(), "{name}");
            assert!(HeaderValue::from_str(value).is_ok(), "{name}");
        }
    }
}
