//! Listener defaulting

use crate::config::Listener;

/// Address both listeners bind to unless configured
pub const DEFAULT_LISTENER_ADDRESS: &str = "127.0.0.1";

/// Timeout handed to the gateway unless configured
pub const DEFAULT_LISTENER_TIMEOUT: &str = "10s";

/// The two traffic listeners the gateway runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Inbound prompt traffic
    Ingress,
    /// Outbound model traffic
    Egress,
}

impl ListenerKind {
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Ingress => 10000,
            Self::Egress => 12000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingress => "ingress_traffic",
            Self::Egress => "egress_traffic",
        }
    }
}

/// Fill in whatever the listener leaves out
///
/// Only absent fields are defaulted; an explicit `0` port or empty address is kept.
pub fn apply_defaults(listener: Option<&Listener>, kind: ListenerKind) -> Listener {
    let mut listener = listener.cloned().unwrap_or_default();

    if listener.port.is_none() {
        listener.port = Some(kind.default_port());
    }
    if listener.address.is_none() {
        listener.address = Some(DEFAULT_LISTENER_ADDRESS.to_string());
    }
    if listener.timeout.is_none() {
        listener.timeout = Some(DEFAULT_LISTENER_TIMEOUT.to_string());
    }

    tracing::debug!(
        listener = kind.as_str(),
        address = listener.address.as_deref().unwrap_or_default(),
        port = listener.port.unwrap_or_default(),
        "Resolved listener"
    );

    listener
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_absent_listeners_get_defaults() {
        let ingress = apply_defaults(None, ListenerKind::Ingress);
        assert_eq!(ingress.port, Some(10000));
        assert_eq!(ingress.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(ingress.timeout.as_deref(), Some("10s"));

        let egress = apply_defaults(None, ListenerKind::Egress);
        assert_eq!(egress.port, Some(12000));
    }

    #[test]
    fn test_declared_fields_are_kept() {
        let mut declared = Listener {
            address: Some("0.0.0.0".to_string()),
            timeout: Some("30s".to_string()),
            ..Default::default()
        };
        declared.extra.insert(
            "message_format".to_string(),
            Value::String("openai".to_string()),
        );

        let egress = apply_defaults(Some(&declared), ListenerKind::Egress);
        assert_eq!(egress.address.as_deref(), Some("0.0.0.0"));
        assert_eq!(egress.timeout.as_deref(), Some("30s"));
        assert_eq!(egress.port, Some(12000));
        assert!(egress.extra.contains_key("message_format"));
    }

    #[test]
    fn test_explicit_zero_and_empty_are_not_absent() {
        let declared = Listener {
            address: Some(String::new()),
            port: Some(0),
            timeout: Some(String::new()),
            ..Default::default()
        };
        let ingress = apply_defaults(Some(&declared), ListenerKind::Ingress);
        assert_eq!(ingress.port, Some(0));
        assert_eq!(ingress.address.as_deref(), Some(""));
        assert_eq!(ingress.timeout.as_deref(), Some(""));
    }
}
