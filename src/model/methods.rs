use std::fmt;

use serde::{Deserialize, Serialize};

/// Strategy label picked by thresholding a complexity value.
///
/// Variants are declared lowest tier first so the derived `Ord` is the tier
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    QuantumBased,
    ConsciousnessBased,
    TranscendentBased,
    UniversalBased,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::QuantumBased => "quantum_based",
            Method::ConsciousnessBased => "consciousness_based",
            Method::TranscendentBased => "transcendent_based",
            Method::UniversalBased => "universal_based",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn method_order() -> &'static [Method] {
    &[
        Method::UniversalBased,
        Method::TranscendentBased,
        Method::ConsciousnessBased,
        Method::QuantumBased,
    ]
}
