//! Endpoint address resolution
//!
//! Turns a `host[:port]` string plus a protocol into a concrete host/port pair.

use crate::error::{AppError, AppResult};

/// Port used when an `http` address carries no explicit port
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Port used for every other protocol when the address carries no explicit port
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Protocol assumed when an endpoint does not declare one
pub const DEFAULT_PROTOCOL: &str = "http";

/// An address split into host and port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub host: String,
    pub port: u16,
}

/// Default port for a protocol
///
/// Only `"http"` maps to 80. Any other string, including unrecognised
/// protocols, maps to 443; protocols are not re-validated here.
pub fn default_port(protocol: &str) -> u16 {
    if protocol == "http" {
        DEFAULT_HTTP_PORT
    } else {
        DEFAULT_HTTPS_PORT
    }
}

/// Split `address` on its first colon into host and port
///
/// An explicit port is returned verbatim and the protocol is ignored.
/// Without one, the host is the whole address and the port comes from
/// [`default_port`].
///
/// Everything after the first colon is the port token, so `host:80:90` is
/// rejected rather than read as port 80.
///
/// # Errors
///
/// Returns [`AppError::MalformedEndpoint`] if the port token is not a number
/// in `0..=65535`.
pub fn resolve(address: &str, protocol: &str) -> AppResult<ResolvedEndpoint> {
    match address.split_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| AppError::MalformedEndpoint {
                    address: address.to_string(),
                    port: port.to_string(),
                })?;
            Ok(ResolvedEndpoint {
                host: host.to_string(),
                port,
            })
        }
        None => Ok(ResolvedEndpoint {
            host: address.to_string(),
            port: default_port(protocol),
        }),
    }
}

/// Whether `address` carries its own port token
pub fn has_port(address: &str) -> bool {
    address.contains(':')
}
