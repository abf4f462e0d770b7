use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Strategy identifiers, matching the names registered on-chain.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub enum StrategyKey {
    #[serde(rename = "RamosStrategy")]
    #[strum(serialize = "RamosStrategy")]
    Ramos,
    #[serde(rename = "TlcStrategy")]
    #[strum(serialize = "TlcStrategy")]
    Tlc,
    #[serde(rename = "TempleBaseStrategy")]
    #[strum(serialize = "TempleBaseStrategy")]
    TempleBase,
    #[serde(rename = "DsrBaseStrategy")]
    #[strum(serialize = "DsrBaseStrategy")]
    DsrBase,
    #[serde(rename = "TemploMayorStrategy")]
    #[strum(serialize = "TemploMayorStrategy")]
    TemploMayorGnosis,
    #[serde(rename = "FohmoStrategy")]
    #[strum(serialize = "FohmoStrategy")]
    FohmoGnosis,
}

impl StrategyKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ramos => "RamosStrategy",
            Self::Tlc => "TlcStrategy",
            Self::TempleBase => "TempleBaseStrategy",
            Self::DsrBase => "DsrBaseStrategy",
            Self::TemploMayorGnosis => "TemploMayorStrategy",
            Self::FohmoGnosis => "FohmoStrategy",
        }
    }
}

/// How the chart lays out its series.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    /// One line per strategy for the selected metric.
    #[default]
    Aggregate,
    /// The selected metric as a line, its breakdown stacked underneath.
    SingleStrategy,
}

/// A dashboard page: the Treasury Reserves Vault overview or one strategy.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum DashboardKey {
    TreasuryReservesVault,
    Strategy(StrategyKey),
}

impl DashboardKey {
    pub const TRV_KEY: &'static str = "TreasuryReservesVault";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TreasuryReservesVault => Self::TRV_KEY,
            Self::Strategy(key) => key.as_str(),
        }
    }

    pub const fn is_trv(&self) -> bool {
        matches!(self, Self::TreasuryReservesVault)
    }

    pub const fn chart_mode(&self) -> ChartMode {
        match self {
            Self::TreasuryReservesVault => ChartMode::Aggregate,
            Self::Strategy(_) => ChartMode::SingleStrategy,
        }
    }

    /// Strategy names whose rows feed this dashboard.
    pub fn strategy_names(&self) -> Vec<String> {
        match self {
            Self::TreasuryReservesVault => StrategyKey::iter()
                .map(|key| key.as_str().to_string())
                .collect(),
            Self::Strategy(key) => vec![key.as_str().to_string()],
        }
    }
}

impl std::str::FromStr for DashboardKey {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::TRV_KEY {
            return Ok(Self::TreasuryReservesVault);
        }
        s.parse().map(Self::Strategy)
    }
}

impl std::fmt::Display for DashboardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
