use barrio_core::models::Order;
use barrio_core::{Fragility, Priority, Provider};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::OrderError;

/// The order attributes provider selection looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFacts {
    pub priority: Priority,
    pub fragility: Fragility,
    pub total_weight: i64,
}

impl From<&Order> for OrderFacts {
    fn from(order: &Order) -> Self {
        Self {
            priority: order.priority,
            fragility: order.fragility,
            total_weight: order.total_weight,
        }
    }
}

pub trait SelectionPolicy: Send + Sync {
    fn select(&self, facts: &OrderFacts) -> Provider;

    fn name(&self) -> &'static str;
}

/// Balances speed and cost.
pub struct StandardPolicy;

impl SelectionPolicy for StandardPolicy {
    fn select(&self, facts: &OrderFacts) -> Provider {
        if facts.priority.is_express() && facts.fragility.is_fragile() {
            Provider::EcoBike
        } else if facts.total_weight <= 1200 {
            Provider::MotoYa
        } else {
            Provider::PaqZ
        }
    }

    fn name(&self) -> &'static str {
        "Standard selection (speed/cost)"
    }
}

/// Prefers the lowest environmental impact.
pub struct EcoFriendlyPolicy;

impl SelectionPolicy for EcoFriendlyPolicy {
    fn select(&self, facts: &OrderFacts) -> Provider {
        if facts.total_weight <= 2000 {
            Provider::EcoBike
        } else if facts.total_weight <= 5000 && facts.fragility != Fragility::High {
            Provider::MotoYa
        } else {
            Provider::PaqZ
        }
    }

    fn name(&self) -> &'static str {
        "Eco-friendly selection (lowest impact)"
    }
}

/// Cheapest courier unless the package justifies a premium.
pub struct CostOptimizedPolicy;

impl SelectionPolicy for CostOptimizedPolicy {
    fn select(&self, facts: &OrderFacts) -> Provider {
        if facts.total_weight > 3000 {
            Provider::PaqZ
        } else if facts.priority.is_express() && facts.fragility == Fragility::High {
            Provider::EcoBike
        } else {
            Provider::MotoYa
        }
    }

    fn name(&self) -> &'static str {
        "Cost-optimized selection"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Standard,
    Eco,
    Cost,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Standard, PolicyKind::Eco, PolicyKind::Cost];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Standard => "standard",
            PolicyKind::Eco => "eco",
            PolicyKind::Cost => "cost",
        }
    }

    pub fn policy(&self) -> Box<dyn SelectionPolicy> {
        match self {
            PolicyKind::Standard => Box::new(StandardPolicy),
            PolicyKind::Eco => Box::new(EcoFriendlyPolicy),
            PolicyKind::Cost => Box::new(CostOptimizedPolicy),
        }
    }

    /// Lenient parse for customer-supplied values: blank or unknown names
    /// select the standard policy.
    pub fn from_form(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return PolicyKind::Standard;
        }
        raw.parse().unwrap_or_else(|err| {
            warn!("{}; using standard policy", err);
            PolicyKind::Standard
        })
    }
}

impl FromStr for PolicyKind {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(PolicyKind::Standard),
            "eco" | "eco-friendly" | "eco_friendly" => Ok(PolicyKind::Eco),
            "cost" | "cost-optimized" | "cost_optimized" => Ok(PolicyKind::Cost),
            _ => Err(OrderError::UnknownPolicy {
                name: s.to_string(),
                available: PolicyKind::ALL
                    .iter()
                    .map(PolicyKind::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub provider: Provider,
    pub policy: &'static str,
    pub reason: String,
}

/// Holds the active selection policy; the policy can be swapped at runtime.
pub struct ProviderSelector {
    policy: Box<dyn SelectionPolicy>,
}

impl ProviderSelector {
    pub fn new(kind: PolicyKind) -> Self {
        Self { policy: kind.policy() }
    }

    pub fn set_policy(&mut self, policy: Box<dyn SelectionPolicy>) {
        info!("Selection policy changed to {}", policy.name());
        self.policy = policy;
    }

    pub fn select(&self, facts: &OrderFacts) -> Selection {
        let provider = self.policy.select(facts);
        Selection {
            provider,
            policy: self.policy.name(),
            reason: format!(
                "Provider {} selected for a {}g order, priority {}, fragility {}",
                provider, facts.total_weight, facts.priority, facts.fragility
            ),
        }
    }
}

impl Default for ProviderSelector {
    fn default() -> Self {
        Self::new(PolicyKind::Standard)
    }
}
