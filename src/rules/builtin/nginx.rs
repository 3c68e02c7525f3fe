//! Hardening catalogue for nginx configuration (`nginx.conf`).
//!
//! Directive-level checks only. Block-context analyses (alias traversal,
//! proxy_pass SSRF, header redefinition across nested blocks) need
//! multi-line structure and are out of scope for the line dialect.

use once_cell::sync::Lazy;

use crate::rules::model::{Catalog, Predicate};

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(
        "nginx",
        vec![
            super::rule(
                "server_tokens",
                r"server_tokens\s+([^;#\s]+)",
                Predicate::EqualsIgnoreCase("off"),
                "Hide the server version banner",
                "server_tokens off;",
            ),
            super::rule(
                "autoindex",
                r"autoindex\s+([^;#\s]+)",
                Predicate::EqualsIgnoreCase("off"),
                "Disable directory listing",
                "autoindex off;",
            ),
            super::rule(
                "ssl_protocols",
                r"ssl_protocols\s+([^;#]+)",
                Predicate::ForbidsTokens(&["SSLv2", "SSLv3", "TLSv1", "TLSv1.1"]),
                "Drop legacy SSL/TLS protocol versions",
                "ssl_protocols TLSv1.2 TLSv1.3;",
            ),
            super::rule(
                "ssl_ciphers",
                r"ssl_ciphers\s+([^;#]+)",
                Predicate::ExcludesAll(&["RC4", "DES", "MD5"]),
                "Avoid weak cipher families",
                "ssl_ciphers EECDH+AESGCM:EDH+AESGCM;",
            ),
            super::rule(
                "client_max_body_size",
                r"client_max_body_size\s+([^;#\s]+)",
                Predicate::NonEmpty,
                "Set an explicit request body size limit",
                "client_max_body_size 10m;",
            ),
            super::rule(
                "add_header X-Frame-Options",
                r"add_header\s+X-Frame-Options\s+([^;#]+)",
                Predicate::NonEmpty,
                "Send X-Frame-Options to prevent clickjacking",
                "add_header X-Frame-Options SAMEORIGIN;",
            ),
            super::rule(
                "add_header X-Content-Type-Options",
                r"add_header\s+X-Content-Type-Options\s+([^;#]+)",
                Predicate::NonEmpty,
                "Send X-Content-Type-Options to prevent MIME sniffing",
                "add_header X-Content-Type-Options nosniff;",
            ),
            super::rule(
                "add_header Content-Security-Policy",
                r"add_header\s+Content-Security-Policy\s+([^;#]+)",
                Predicate::NonEmpty,
                "Send a Content-Security-Policy header",
                "add_header Content-Security-Policy \"default-src 'self'\";",
            ),
            super::rule(
                "valid_referers",
                r"valid_referers\s+([^;#]+)",
                Predicate::Contains("none blocked server_names"),
                "Restrict hotlinking with valid_referers",
                "valid_referers none blocked server_names;",
            ),
        ],
    )
});

pub fn catalog() -> &'static Catalog {
    &CATALOG
}
