use super::Bulletin;
use super::Intent;

/// Errors that can occur decoding client traffic.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    InvalidIntent(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIntent(s) => write!(f, "invalid intent: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// The wire layer between transport frames and room types.
pub struct Protocol;

impl Protocol {
    /// Parses a client frame into an Intent.
    pub fn decode(s: &str) -> Result<Intent, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::InvalidIntent(e.to_string()))
    }
    /// Renders a bulletin for the wire.
    pub fn encode(bulletin: &Bulletin) -> String {
        bulletin.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decode_valid_intents() {
        assert!(Protocol::decode(r#"{"type":"start"}"#).is_ok());
        assert!(Protocol::decode(r#"{"type":"contest_action"}"#).is_ok());
        assert!(
            Protocol::decode(r#"{"type":"declare_action","kind":"TAX","target":null}"#).is_ok()
        );
    }
    #[test]
    fn decode_invalid_intents() {
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"shapeshift"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"declare_block"}"#).is_err()); // missing claim
    }
    #[test]
    fn encode_then_decode_is_stable() {
        let frame = Protocol::encode(&Bulletin::rejected("nope"));
        assert!(frame.contains("nope"));
    }
}
