//! Coupon and index tenors.

use std::fmt;
use std::str::FromStr;

use super::ScheduleError;

/// Tenor shared by a floating leg's schedule and its index.
///
/// Parsed from market labels (`"3M"`) or names (`"quarterly"`).
///
/// ```
/// use pricer_models::schedules::Frequency;
///
/// let tenor: Frequency = "6M".parse().unwrap();
/// assert_eq!(tenor, Frequency::SemiAnnual);
/// assert_eq!(tenor.months(), 6);
/// assert!(Frequency::Quarterly.is_shorter_than(tenor));
/// assert_eq!(tenor.to_string(), "6M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// 12M.
    Annual,
    /// 6M.
    SemiAnnual,
    /// 3M.
    Quarterly,
    /// 1M.
    Monthly,
}

impl Frequency {
    /// Every tenor, longest first.
    pub const ALL: [Frequency; 4] = [
        Frequency::Annual,
        Frequency::SemiAnnual,
        Frequency::Quarterly,
        Frequency::Monthly,
    ];

    /// Months in one period.
    #[inline]
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Monthly => 1,
        }
    }

    /// Coupons per year.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        12 / self.months()
    }

    /// Market label, e.g. `"3M"`.
    #[inline]
    pub fn tenor_label(&self) -> &'static str {
        match self {
            Frequency::Annual => "12M",
            Frequency::SemiAnnual => "6M",
            Frequency::Quarterly => "3M",
            Frequency::Monthly => "1M",
        }
    }

    /// Whether a period of `self` is strictly shorter than one of `other`.
    #[inline]
    pub fn is_shorter_than(&self, other: Frequency) -> bool {
        self.months() < other.months()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tenor_label())
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        let tenor = match key.as_str() {
            "12m" | "1y" | "annual" | "yearly" => Frequency::Annual,
            "6m" | "semiannual" => Frequency::SemiAnnual,
            "3m" | "quarterly" => Frequency::Quarterly,
            "1m" | "monthly" => Frequency::Monthly,
            _ => {
                return Err(ScheduleError::UnknownTenor {
                    input: s.to_string(),
                })
            }
        };
        Ok(tenor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for tenor in Frequency::ALL {
            assert_eq!(tenor.tenor_label().parse::<Frequency>().unwrap(), tenor);
            assert_eq!(tenor.periods_per_year() * tenor.months(), 12);
        }
        assert_eq!(" Semi-Annual ".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("1Y".parse::<Frequency>().unwrap(), Frequency::Annual);
    }

    #[test]
    fn test_unknown_tenor() {
        let err = "2W".parse::<Frequency>().unwrap_err();
        assert_eq!(err, ScheduleError::UnknownTenor { input: "2W".into() });
    }

    #[test]
    fn test_ordering_by_length() {
        assert!(Frequency::Monthly.is_shorter_than(Frequency::Quarterly));
        assert!(!Frequency::Annual.is_shorter_than(Frequency::SemiAnnual));
        assert!(!Frequency::Quarterly.is_shorter_than(Frequency::Quarterly));
    }
}
