//! Formatting policy registry.
//!
//! This module centralizes the option codes accepted by `#[stringify(..)]` so downstream code matches on
//! [`FormattingPolicy`] instead of comparing raw integers. The set is closed: any code not listed in [`POLICIES`] is an
//! unsupported option and gets a diagnostic instead of an accessor.

use rust_decimal::{Decimal, RoundingStrategy};

/// Stable identifier for supported formatting policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormattingPolicy {
    /// Round half away from zero to 4 decimal places (`Out4`, code `0`).
    RoundAwayFromZeroTo4Decimals,
    /// Round half to even to 4 decimal places (`Even4`, code `1`).
    RoundToEvenTo4Decimals,
}

/// Metadata entry for a formatting policy.
#[derive(Debug, Clone, Copy)]
pub struct PolicyInfo {
    pub id: FormattingPolicy,
    /// Option code carried by the attribute.
    pub code: i32,
    /// Named spelling accepted in attributes, e.g. `#[stringify(Out4)]`.
    pub canonical: &'static str,
    pub decimals: u32,
    pub strategy: RoundingStrategy,
    /// One-line summary shown by `scan`.
    pub description: &'static str,
}

/// Registry of supported formatting policies.
pub const POLICIES: &[PolicyInfo] = &[
    PolicyInfo {
        id: FormattingPolicy::RoundAwayFromZeroTo4Decimals,
        code: 0,
        canonical: "Out4",
        decimals: 4,
        strategy: RoundingStrategy::MidpointAwayFromZero,
        description: "Round half away from zero to 4 decimal places.",
    },
    PolicyInfo {
        id: FormattingPolicy::RoundToEvenTo4Decimals,
        code: 1,
        canonical: "Even4",
        decimals: 4,
        strategy: RoundingStrategy::MidpointNearestEven,
        description: "Round half to even to 4 decimal places.",
    },
];

impl FormattingPolicy {
    /// Resolve an option code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FormattingPolicy::RoundAwayFromZeroTo4Decimals),
            1 => Some(FormattingPolicy::RoundToEvenTo4Decimals),
            _ => None,
        }
    }

    /// Resolve a named option (`Out4`, `Even4`).
    pub fn from_name(name: &str) -> Option<Self> {
        POLICIES.iter().find(|p| p.canonical == name).map(|p| p.id)
    }

    /// Return the metadata entry for this policy.
    pub fn info(self) -> &'static PolicyInfo {
        match self {
            FormattingPolicy::RoundAwayFromZeroTo4Decimals => &POLICIES[0],
            FormattingPolicy::RoundToEvenTo4Decimals => &POLICIES[1],
        }
    }

    pub fn code(self) -> i32 {
        self.info().code
    }

    pub fn decimals(self) -> u32 {
        self.info().decimals
    }

    pub fn strategy(self) -> RoundingStrategy {
        self.info().strategy
    }

    /// Round `value` with this policy and render it the way generated accessors do.
    pub fn render(self, value: Decimal) -> String {
        value.round_dp_with_strategy(self.decimals(), self.strategy()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_registry_matches_ids() {
        for info in POLICIES {
            assert_eq!(info.id.info().code, info.code);
            assert_eq!(FormattingPolicy::from_code(info.code), Some(info.id));
            assert_eq!(FormattingPolicy::from_name(info.canonical), Some(info.id));
        }
    }

    #[test]
    fn test_unknown_codes_and_names() {
        for code in [-1, 2, 7, i32::MAX, i32::MIN] {
            assert_eq!(FormattingPolicy::from_code(code), None);
        }
        assert_eq!(FormattingPolicy::from_name("Odd4"), None);
        assert_eq!(FormattingPolicy::from_name("out4"), None);
    }

    #[test]
    fn test_away_from_zero_midpoints() {
        let policy = FormattingPolicy::RoundAwayFromZeroTo4Decimals;
        assert_eq!(policy.render(dec("1.23445")), "1.2345");
        assert_eq!(policy.render(dec("-1.23445")), "-1.2345");
        assert_eq!(policy.render(dec("2.00005")), "2.0001");
    }

    #[test]
    fn test_to_even_midpoints() {
        let policy = FormattingPolicy::RoundToEvenTo4Decimals;
        assert_eq!(policy.render(dec("1.23445")), "1.2344");
        assert_eq!(policy.render(dec("1.23455")), "1.2346");
        assert_eq!(policy.render(dec("-1.23445")), "-1.2344");
    }

    #[test]
    fn test_short_scale_is_kept() {
        assert_eq!(FormattingPolicy::RoundToEvenTo4Decimals.render(dec("3.5")), "3.5");
        assert_eq!(FormattingPolicy::RoundAwayFromZeroTo4Decimals.render(dec("10")), "10");
    }
}
