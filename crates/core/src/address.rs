//! Delivery Address

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an order is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// Street line
    pub line1: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// Postal code
    pub zip: String,
}

impl DeliveryAddress {
    /// Create an address from its four parts.
    pub fn new(
        line1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            line1: line1.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    /// Every field is non-blank after trimming, the ZIP holds no letters and
    /// the city holds no decimal digits.
    pub fn is_valid(&self) -> bool {
        let line1 = self.line1.trim();
        let city = self.city.trim();
        let state = self.state.trim();
        let zip = self.zip.trim();

        if line1.is_empty() || city.is_empty() || state.is_empty() || zip.is_empty() {
            return false;
        }

        !zip.chars().any(char::is_alphabetic) && !city.chars().any(|ch| ch.is_ascii_digit())
    }

    /// A copy with surrounding whitespace removed from each field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.line1.trim(),
            self.city.trim(),
            self.state.trim(),
            self.zip.trim(),
        )
    }

    /// `"line1, city, state zip"`
    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeliveryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.line1, self.city, self.state, self.zip)
    }
}
