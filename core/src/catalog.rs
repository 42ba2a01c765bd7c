// core/src/catalog.rs

//! The static plan catalog: pricing tiers and their display attributes.

use crate::error::OrderError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Closed set of plan codes a customer can order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanCode {
  Snap,
  SnapPack,
  Creator,
}

impl PlanCode {
  pub const ALL: [PlanCode; 3] = [PlanCode::Snap, PlanCode::SnapPack, PlanCode::Creator];

  pub fn as_str(&self) -> &'static str {
    match self {
      PlanCode::Snap => "snap",
      PlanCode::SnapPack => "snappack",
      PlanCode::Creator => "creator",
    }
  }
}

impl fmt::Display for PlanCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PlanCode {
  type Err = OrderError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "snap" => Ok(PlanCode::Snap),
      "snappack" => Ok(PlanCode::SnapPack),
      "creator" => Ok(PlanCode::Creator),
      other => Err(OrderError::invalid_plan(other)),
    }
  }
}

/// Display attributes for a single plan. Copied into every order at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PlanDetails {
  pub name: &'static str,
  pub price: &'static str,
  pub description: &'static str,
  pub delivery: &'static str,
  pub features: &'static [&'static str],
}

static STANDARD_PLANS: [(PlanCode, PlanDetails); 3] = [
  (
    PlanCode::Snap,
    PlanDetails {
      name: "Snap",
      price: "$3.99",
      description: "1 full-length custom song with cover art",
      delivery: "2 hours",
      features: &["1 custom song", "Simple cover art", "2-hour delivery", "No edits"],
    },
  ),
  (
    PlanCode::SnapPack,
    PlanDetails {
      name: "Snap Pack",
      price: "$9.99",
      description: "3 songs over 7 days",
      delivery: "48 hours each",
      features: &[
        "3 custom songs",
        "Different moods/vibes",
        "Cover art for each",
        "48-hour delivery",
      ],
    },
  ),
  (
    PlanCode::Creator,
    PlanDetails {
      name: "Creator Pack",
      price: "$24.99/mo",
      description: "Up to 10 songs per month with extras",
      delivery: "Priority",
      features: &[
        "Up to 10 songs/month",
        "AI stems",
        "Instrumentals",
        "TikTok clips",
        "Priority delivery",
      ],
    },
  ),
];

/// Read-only table of plans, keyed by code, in display order.
///
/// The catalog is built once from static data and is safe to share across
/// request handlers without synchronization.
#[derive(Debug, Clone, Copy)]
pub struct PlanCatalog {
  entries: &'static [(PlanCode, PlanDetails)],
}

impl PlanCatalog {
  /// The catalog the service ships with.
  pub const fn standard() -> Self {
    PlanCatalog {
      entries: &STANDARD_PLANS,
    }
  }

  /// Builds a catalog over caller-provided static entries.
  pub const fn from_static(entries: &'static [(PlanCode, PlanDetails)]) -> Self {
    PlanCatalog { entries }
  }

  pub fn get(&self, code: PlanCode) -> Option<&PlanDetails> {
    self
      .entries
      .iter()
      .find(|(entry_code, _)| *entry_code == code)
      .map(|(_, details)| details)
  }

  /// Resolves a raw plan code. Empty and unknown codes are both `InvalidPlan`.
  pub fn resolve(&self, raw_code: &str) -> Result<(PlanCode, &PlanDetails), OrderError> {
    let code = raw_code.parse::<PlanCode>()?;
    self
      .get(code)
      .map(|details| (code, details))
      .ok_or_else(|| OrderError::invalid_plan(raw_code))
  }

  pub fn iter(&self) -> impl Iterator<Item = (PlanCode, &PlanDetails)> + '_ {
    self.entries.iter().map(|(code, details)| (*code, details))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl Default for PlanCatalog {
  fn default() -> Self {
    Self::standard()
  }
}

// Serialized as `{ "<code>": { name, price, ... }, ... }` in catalog order.
impl Serialize for PlanCatalog {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (code, details) in self.entries {
      map.serialize_entry(code.as_str(), details)?;
    }
    map.end()
  }
}
