//! Request metadata extraction.
//!
//! # Responsibilities
//! - Resolve the caller's IP address
//! - Read the User-Agent header
//!
//! # Design Decisions
//! - Forwarding headers win over the socket peer: behind a load balancer the
//!   peer is the balancer, not the caller
//! - Missing values are empty strings, never errors

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, HeaderMap, Request};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Client IP: first `X-Forwarded-For` entry, then `X-Real-IP`, then the peer
/// address from `ConnectInfo`. Empty when none is known.
pub fn client_ip<B>(req: &Request<B>) -> String {
    forwarded_ip(req.headers())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_default()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or_else(|| {
            headers
                .get(X_REAL_IP)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .map(str::to_string)
}

/// User-Agent header, empty when absent or not valid UTF-8.
pub fn user_agent<B>(req: &Request<B>) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
