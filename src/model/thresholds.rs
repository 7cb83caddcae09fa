use serde::{Deserialize, Serialize};

use crate::model::methods::Method;

/// Descending cut-offs for [`Method`] selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodTable {
    pub universal: f64,
    pub transcendent: f64,
    pub consciousness: f64,
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl MethodTable {
    pub fn default_v1() -> Self {
        Self {
            universal: 0.95,
            transcendent: 0.90,
            consciousness: 0.85,
        }
    }

    /// Picks the highest tier whose threshold `complexity` reaches.
    ///
    /// Every comparison against NaN is false, so NaN lands on the default tier.
    pub fn select(&self, complexity: f64) -> Method {
        if complexity >= self.universal {
            Method::UniversalBased
        } else if complexity >= self.transcendent {
            Method::TranscendentBased
        } else if complexity >= self.consciousness {
            Method::ConsciousnessBased
        } else {
            Method::QuantumBased
        }
    }

    pub fn is_descending(&self) -> bool {
        self.universal >= self.transcendent && self.transcendent >= self.consciousness
    }

    pub fn is_finite(&self) -> bool {
        self.universal.is_finite() && self.transcendent.is_finite() && self.consciousness.is_finite()
    }
}

pub fn select_method(complexity: f64) -> Method {
    MethodTable::default_v1().select(complexity)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
