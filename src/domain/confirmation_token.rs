/// Token taken from a `/confirm/{token}` or `/unsubscribe/{token}` link.
///
/// Only emptiness is checked here. Whether the token exists, has expired
/// or was already used is decided by the subscription API.
#[derive(Debug, Clone)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("Confirmation token is empty.".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ConfirmationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
