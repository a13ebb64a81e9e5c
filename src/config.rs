//! Table and session settings.

use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("small blind must be positive")]
    ZeroSmallBlind,
    #[error("big blind {big} is smaller than small blind {small}")]
    BlindsInverted { small: u64, big: u64 },
    #[error("starting stack {stack} does not cover the big blind {big}")]
    StackTooSmall { stack: u64, big: u64 },
}

/// Who receives the chip left over when a tied pot does not split evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OddChip {
    /// The remainder is awarded to nobody and reported as unassigned.
    #[default]
    Unassigned,
    /// The remainder goes to the seat without the button.
    OutOfPosition,
}

/// Chip and blind sizing for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TableConfig {
    pub starting_stack: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    pub odd_chip: OddChip,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { starting_stack: 1000, small_blind: 10, big_blind: 20, odd_chip: OddChip::Unassigned }
    }
}

impl TableConfig {
    pub fn with_starting_stack(mut self, stack: u64) -> Self {
        self.starting_stack = stack;
        self
    }

    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn with_odd_chip(mut self, odd_chip: OddChip) -> Self {
        self.odd_chip = odd_chip;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(ConfigError::ZeroSmallBlind);
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::BlindsInverted {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.starting_stack < self.big_blind {
            return Err(ConfigError::StackTooSmall {
                stack: self.starting_stack,
                big: self.big_blind,
            });
        }
        Ok(())
    }
}

/// Delays applied to deferred steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Pacing {
    /// Opponent think time before it acts.
    pub think: Duration,
    /// Pause between a finished betting round and the next street.
    pub street: Duration,
    /// Pause between streets while an all-in runout deals itself.
    pub runout: Duration,
    /// Pause before the showdown is settled.
    pub showdown: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            think: Duration::from_millis(900),
            street: Duration::from_millis(450),
            runout: Duration::from_millis(400),
            showdown: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    /// Every step due immediately; useful for tests and simulations.
    pub fn instant() -> Self {
        Self {
            think: Duration::ZERO,
            street: Duration::ZERO,
            runout: Duration::ZERO,
            showdown: Duration::ZERO,
        }
    }
}

/// Everything a [`crate::session::Session`] needs.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct SessionConfig {
    pub table: TableConfig,
    pub pacing: Pacing,
    /// Seeds deck shuffles and opponent randomness; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(table: TableConfig) -> Self {
        Self { table, ..Self::default() }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
