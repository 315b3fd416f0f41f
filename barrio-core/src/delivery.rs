use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when a stored or submitted value names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} {value:?} (expected one of: {expected})")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseVariantError {
    fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Delivery urgency tier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    Express,
}

impl Priority {
    pub const ALL: [Priority; 2] = [Priority::Normal, Priority::Express];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Express => "express",
        }
    }

    /// Lenient parse for customer input: anything unrecognised is `Normal`.
    pub fn from_input(raw: &str) -> Self {
        raw.trim().to_lowercase().parse().unwrap_or_default()
    }

    pub fn is_express(&self) -> bool {
        matches!(self, Priority::Express)
    }
}

impl FromStr for Priority {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Priority::Normal),
            "express" => Ok(Priority::Express),
            other => Err(ParseVariantError::new("priority", other, &["normal", "express"])),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handling sensitivity tier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Fragility {
    #[default]
    None,
    Weak,
    High,
}

impl Fragility {
    pub const ALL: [Fragility; 3] = [Fragility::None, Fragility::Weak, Fragility::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fragility::None => "none",
            Fragility::Weak => "weak",
            Fragility::High => "high",
        }
    }

    /// Lenient parse for customer input: anything unrecognised is `None`.
    pub fn from_input(raw: &str) -> Self {
        raw.trim().to_lowercase().parse().unwrap_or_default()
    }

    pub fn is_fragile(&self) -> bool {
        !matches!(self, Fragility::None)
    }
}

impl FromStr for Fragility {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Fragility::None),
            "weak" => Ok(Fragility::Weak),
            "high" => Ok(Fragility::High),
            other => Err(ParseVariantError::new("fragility", other, &["none", "weak", "high"])),
        }
    }
}

impl fmt::Display for Fragility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipment lifecycle. Only `Confirmed` is written by the confirmation flow.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    #[default]
    Confirmed,
    Dispatched,
    InTransit,
    Delivered,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Confirmed => "confirmed",
            ShipmentStatus::Dispatched => "dispatched",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::Delivered => "delivered",
        }
    }
}

impl FromStr for ShipmentStatus {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(ShipmentStatus::Confirmed),
            "dispatched" => Ok(ShipmentStatus::Dispatched),
            "in_transit" => Ok(ShipmentStatus::InTransit),
            "delivered" => Ok(ShipmentStatus::Delivered),
            other => Err(ParseVariantError::new(
                "shipment status",
                other,
                &["confirmed", "dispatched", "in_transit", "delivered"],
            )),
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The simulated couriers orders can be handed to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    MotoYa,
    EcoBike,
    PaqZ,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::MotoYa, Provider::EcoBike, Provider::PaqZ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::MotoYa => "motoya",
            Provider::EcoBike => "ecobike",
            Provider::PaqZ => "paqz",
        }
    }
}

impl FromStr for Provider {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "motoya" => Ok(Provider::MotoYa),
            "ecobike" => Ok(Provider::EcoBike),
            "paqz" => Ok(Provider::PaqZ),
            _ => Err(ParseVariantError::new("provider", s, &["motoya", "ecobike", "paqz"])),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_input_defaults() {
        assert_eq!(Priority::from_input("express"), Priority::Express);
        assert_eq!(Priority::from_input("urgent"), Priority::Normal);
        assert_eq!(Priority::from_input(""), Priority::Normal);

        assert_eq!(Fragility::from_input("high"), Fragility::High);
        assert_eq!(Fragility::from_input("weak"), Fragility::Weak);
        assert_eq!(Fragility::from_input("glass"), Fragility::None);
    }

    #[test]
    fn test_strict_parse_reports_expected_values() {
        let err = "sometimes".parse::<ShipmentStatus>().unwrap_err();
        assert_eq!(err.kind, "shipment status");
        assert!(err.to_string().contains("in_transit"));
    }

    #[test]
    fn test_provider_names() {
        for provider in Provider::ALL {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), provider);
        }
        assert_eq!("MotoYA".parse::<Provider>().unwrap(), Provider::MotoYa);
        assert!("dhl".parse::<Provider>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&ShipmentStatus::InTransit).unwrap();
        assert_eq!(json, "\"in_transit\"");
        let json = serde_json::to_string(&Provider::PaqZ).unwrap();
        assert_eq!(json, "\"paqz\"");
    }
}
