//! Level-based difficulty bands
//!
//! Difficulty is a step function of the level: each band covers a contiguous
//! range of levels and the last band is open-ended, so every level maps to
//! exactly one set of parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Movement tuning for one difficulty band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Nominal speed rating (display only, movement math ignores it)
    pub speed: u32,
    /// Fraction of the container's larger dimension used as move distance
    pub range_percent: f32,
    /// Delay between pointer-enter and relocation (ms)
    pub reaction_time_ms: u64,
    /// Any angle when true, otherwise one of the four cardinal directions
    pub diagonal: bool,
}

/// A band of levels sharing the same parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBand {
    /// Highest level (inclusive) covered by this band; `None` = unbounded
    pub max_level: Option<u32>,
    pub params: DifficultyParams,
}

const NOVICE: DifficultyParams = DifficultyParams {
    speed: 200,
    range_percent: 0.12,
    reaction_time_ms: 300,
    diagonal: false,
};

const INTERMEDIATE: DifficultyParams = DifficultyParams {
    speed: 100,
    range_percent: 0.18,
    reaction_time_ms: 150,
    diagonal: true,
};

const ADVANCED: DifficultyParams = DifficultyParams {
    speed: 50,
    range_percent: 0.28,
    reaction_time_ms: 75,
    diagonal: true,
};

const EXPERT: DifficultyParams = DifficultyParams {
    speed: 25,
    range_percent: 0.40,
    reaction_time_ms: 40,
    diagonal: true,
};

/// Built-in band layout
pub const DEFAULT_BANDS: [DifficultyBand; 4] = [
    DifficultyBand { max_level: Some(3), params: NOVICE },
    DifficultyBand { max_level: Some(7), params: INTERMEDIATE },
    DifficultyBand { max_level: Some(10), params: ADVANCED },
    DifficultyBand { max_level: None, params: EXPERT },
];

/// Parameters for `level` using the built-in bands.
///
/// Level 0 is treated as level 1.
pub fn difficulty_for_level(level: u32) -> DifficultyParams {
    lookup(&DEFAULT_BANDS, level)
}

fn lookup(bands: &[DifficultyBand], level: u32) -> DifficultyParams {
    let level = level.max(1);
    bands
        .iter()
        .find(|band| band.max_level.is_none_or(|max| level <= max))
        .or(bands.last())
        .map(|band| band.params)
        .unwrap_or(NOVICE)
}

/// Why a configured table was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum DifficultyError {
    /// No bands at all
    Empty,
    /// Band `index` does not start above the previous band
    NotAscending { index: usize },
    /// An unbounded band appears before the end of the table
    UnboundedBeforeEnd { index: usize },
    /// Final band has a `max_level`, leaving higher levels uncovered
    BoundedTail,
    /// Band `index` has a negative or non-finite range
    InvalidRange { index: usize },
}

impl fmt::Display for DifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyError::Empty => write!(f, "difficulty table has no bands"),
            DifficultyError::NotAscending { index } => {
                write!(f, "band {} must end above the previous band", index)
            }
            DifficultyError::UnboundedBeforeEnd { index } => {
                write!(f, "band {} is unbounded but is not the last band", index)
            }
            DifficultyError::BoundedTail => {
                write!(f, "last band must be unbounded (max_level = null)")
            }
            DifficultyError::InvalidRange { index } => {
                write!(f, "band {} has an invalid range_percent", index)
            }
        }
    }
}

impl std::error::Error for DifficultyError {}

/// Ordered difficulty bands (data-driven tuning)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTable {
    bands: Vec<DifficultyBand>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.to_vec(),
        }
    }
}

impl DifficultyTable {
    /// Build a table, rejecting layouts that leave levels uncovered
    pub fn new(bands: Vec<DifficultyBand>) -> Result<Self, DifficultyError> {
        let table = Self { bands };
        table.validate()?;
        Ok(table)
    }

    pub fn bands(&self) -> &[DifficultyBand] {
        &self.bands
    }

    /// Parameters for `level` (level 0 is treated as level 1)
    pub fn params_for(&self, level: u32) -> DifficultyParams {
        lookup(&self.bands, level)
    }

    /// Check the bands are contiguous and total
    pub fn validate(&self) -> Result<(), DifficultyError> {
        if self.bands.is_empty() {
            return Err(DifficultyError::Empty);
        }

        let last = self.bands.len() - 1;
        let mut prev_max = 0u32;
        for (index, band) in self.bands.iter().enumerate() {
            let range = band.params.range_percent;
            if !range.is_finite() || range < 0.0 {
                return Err(DifficultyError::InvalidRange { index });
            }
            match band.max_level {
                Some(max) => {
                    if max <= prev_max {
                        return Err(DifficultyError::NotAscending { index });
                    }
                    if index == last {
                        return Err(DifficultyError::BoundedTail);
                    }
                    prev_max = max;
                }
                None if index != last => {
                    return Err(DifficultyError::UnboundedBeforeEnd { index });
                }
                None => {}
            }
        }
        Ok(())
    }
}
