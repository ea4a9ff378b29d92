//! Email address value object.
//!
//! Accepts an RFC 5322 `addr-spec` (`local@domain`) optionally wrapped in a
//! display name (`Ada Lovelace <ada@example.com>`). Only the bare address is
//! stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Characters allowed in a dot-atom besides ASCII alphanumerics.
const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

/// Maximum length of an address (RFC 5321 path limit).
const MAX_ADDRESS_LENGTH: usize = 254;

/// A syntactically valid mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses an address, rejecting anything that is not a valid addr-spec.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let addr = match (input.rfind('<'), input.ends_with('>')) {
            (Some(start), true) => &input[start + 1..input.len() - 1],
            (None, false) => input,
            _ => return Err(invalid("unbalanced angle brackets")),
        };

        if addr.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if addr.len() > MAX_ADDRESS_LENGTH {
            return Err(invalid("address too long"));
        }

        let (local, domain) = addr.rsplit_once('@').ok_or_else(|| invalid("missing '@'"))?;
        validate_local_part(local)?;
        validate_domain(domain)?;

        Ok(Self(addr.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(reason: &str) -> ValidationError {
    ValidationError::invalid_format("email", reason)
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || ATEXT_SPECIALS.contains(c)
}

fn is_dot_atom(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn validate_local_part(local: &str) -> Result<(), ValidationError> {
    if local.is_empty() {
        return Err(invalid("empty local part"));
    }
    if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
        let inner = &local[1..local.len() - 1];
        let mut escaped = false;
        for c in inner.chars() {
            match (escaped, c) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => return Err(invalid("unescaped quote in local part")),
                (false, c) if c.is_ascii_control() => {
                    return Err(invalid("control character in local part"))
                }
                _ => {}
            }
        }
        if escaped {
            return Err(invalid("dangling escape in local part"));
        }
        return Ok(());
    }
    if is_dot_atom(local) {
        Ok(())
    } else {
        Err(invalid("local part is not a dot-atom"))
    }
}

fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    if domain.is_empty() {
        return Err(invalid("empty domain"));
    }
    if domain.starts_with('[') && domain.ends_with(']') {
        let literal = &domain[1..domain.len() - 1];
        if !literal.is_empty()
            && literal
                .chars()
                .all(|c| c.is_ascii_graphic() && c != '[' && c != ']' && c != '\\')
        {
            return Ok(());
        }
        return Err(invalid("malformed domain literal"));
    }
    if is_dot_atom(domain) {
        Ok(())
    } else {
        Err(invalid("domain is not a dot-atom"))
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
