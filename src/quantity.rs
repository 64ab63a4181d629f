use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Cumulative meter reading or consumption within one cadence interval.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct KilowattHours(pub f64);

impl KilowattHours {
    pub const ZERO: Self = Self(0.0);

    /// Round half away from zero to the given number of decimal places.
    ///
    /// The reference fixtures of the profile tables were produced under
    /// this rule, so both subsystems have to stick to it.
    #[must_use]
    pub fn round_to(self, n_decimals: u32) -> Self {
        let scale = f64::from(10_u32.pow(n_decimals));
        Self((self.0 * scale).round() / scale)
    }
}

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kWh", self.0)
    }
}
