//! Mass magnitude handling for emission units.
//!
//! IAM submissions report emissions as `Kt`, `Mt CO2/yr` or `Gt CO2/yr`. Only the
//! magnitude prefix matters for the conversions done here, so a unit string is reduced
//! to its [`MassPrefix`].
//!
//! ```
//! use iamcompare_core::units::MassPrefix;
//!
//! let kt = MassPrefix::parse_unit("Kt").unwrap();
//! let mt = MassPrefix::parse_unit("Mt CO2/yr").unwrap();
//! assert_eq!(kt.conversion_factor(mt), 1.0e-3);
//! ```

use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Magnitude of a tonne-based mass unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassPrefix {
    /// Thousand tonnes (`kt`)
    Kilo,
    /// Million tonnes (`Mt`)
    Mega,
    /// Billion tonnes (`Gt`)
    Giga,
}

impl MassPrefix {
    /// Size of one unit of this magnitude in tonnes.
    pub fn tonnes(self) -> FloatValue {
        match self {
            MassPrefix::Kilo => 1.0e3,
            MassPrefix::Mega => 1.0e6,
            MassPrefix::Giga => 1.0e9,
        }
    }

    /// Multiplier converting a value in `self` to a value in `target`.
    pub fn conversion_factor(self, target: MassPrefix) -> FloatValue {
        self.tonnes() / target.tonnes()
    }

    /// Express `value` given in `self` in `target`.
    ///
    /// Conversions to a larger magnitude divide by the exact ratio (e.g. 1000) instead of
    /// multiplying by its inexact reciprocal.
    pub fn convert(self, value: FloatValue, target: MassPrefix) -> FloatValue {
        if self.tonnes() >= target.tonnes() {
            value * self.conversion_factor(target)
        } else {
            value / target.conversion_factor(self)
        }
    }

    /// Extract the magnitude from a unit string such as `"Kt"` or `"Mt CO2/yr"`.
    ///
    /// Returns `None` when the unit does not start with a `kt`, `Mt` or `Gt` mass.
    pub fn parse_unit(unit: &str) -> Option<Self> {
        let mut chars = unit.trim_start().chars();
        let prefix = match chars.next()? {
            'k' | 'K' => MassPrefix::Kilo,
            'M' => MassPrefix::Mega,
            'G' => MassPrefix::Giga,
            _ => return None,
        };
        match chars.next() {
            Some('t') => Some(prefix),
            _ => None,
        }
    }
}

impl fmt::Display for MassPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MassPrefix::Kilo => write!(f, "kt"),
            MassPrefix::Mega => write!(f, "Mt"),
            MassPrefix::Giga => write!(f, "Gt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_units() {
        assert_eq!(MassPrefix::parse_unit("Kt"), Some(MassPrefix::Kilo));
        assert_eq!(MassPrefix::parse_unit("kt CO2/yr"), Some(MassPrefix::Kilo));
        assert_eq!(MassPrefix::parse_unit("Mt CO2/yr"), Some(MassPrefix::Mega));
        assert_eq!(MassPrefix::parse_unit("MtCO2/yr"), Some(MassPrefix::Mega));
        assert_eq!(MassPrefix::parse_unit("Gt CO2/yr"), Some(MassPrefix::Giga));
    }

    #[test]
    fn test_parse_non_mass_units() {
        assert_eq!(MassPrefix::parse_unit("EJ/yr"), None);
        assert_eq!(MassPrefix::parse_unit("US$2010/t CO2"), None);
        assert_eq!(MassPrefix::parse_unit("Mha"), None);
        assert_eq!(MassPrefix::parse_unit(""), None);
    }

    #[test]
    fn test_conversion_factors() {
        assert_eq!(
            MassPrefix::Kilo.conversion_factor(MassPrefix::Mega),
            1.0e-3
        );
        assert_eq!(
            MassPrefix::Mega.conversion_factor(MassPrefix::Giga),
            1.0e-3
        );
        assert_eq!(MassPrefix::Giga.conversion_factor(MassPrefix::Kilo), 1.0e6);
        assert_eq!(MassPrefix::Mega.conversion_factor(MassPrefix::Mega), 1.0);
    }

    #[test]
    fn test_convert_divides_exactly() {
        assert_eq!(MassPrefix::Kilo.convert(6.5, MassPrefix::Mega), 0.0065);
        assert_eq!(MassPrefix::Mega.convert(45000.0, MassPrefix::Giga), 45.0);
        for i in 0..2000 {
            let v = i as FloatValue * 0.7 + 3.0;
            assert_eq!(MassPrefix::Kilo.convert(v, MassPrefix::Mega), v / 1000.0);
        }
        assert_eq!(MassPrefix::Giga.convert(1.5, MassPrefix::Kilo), 1.5e6);
    }
}
