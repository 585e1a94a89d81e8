//! Crystal resources.
//!
//! ## CrystalType
//!
//! Four ordered crystal types: Yellow < Green < Blue < Pink. The ordering
//! governs legal upgrades, and each type's level (1..=4) feeds `level_sum`.
//!
//! ## Resources
//!
//! A multiset of crystals with arithmetic, affordability checks and the
//! upgrade-feasibility test used by upgrade cards.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::GameError;

/// Maximum number of crystals a caravan may hold after an action resolves.
pub const MAX_CRYSTALS: u32 = 10;

/// A crystal type. Declaration order is upgrade order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrystalType {
    Yellow,
    Green,
    Blue,
    Pink,
}

impl CrystalType {
    /// All crystal types in ascending order.
    pub const ALL: [CrystalType; 4] = [
        CrystalType::Yellow,
        CrystalType::Green,
        CrystalType::Blue,
        CrystalType::Pink,
    ];

    /// Upgrade level: Yellow = 1 through Pink = 4.
    #[must_use]
    pub const fn level(self) -> u32 {
        self as u32 + 1
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for CrystalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CrystalType::Yellow => "Yellow",
            CrystalType::Green => "Green",
            CrystalType::Blue => "Blue",
            CrystalType::Pink => "Pink",
        };
        f.write_str(name)
    }
}

/// Non-negative crystal counts per type.
///
/// Counts are unsigned, so a caravan can never go negative; every
/// subtraction is checked and rejected on insufficiency. Additions and
/// sums saturate at `u32::MAX`.
///
/// ```
/// use golem_caravan::core::{CrystalType, Resources};
///
/// let mut caravan = Resources::new(3, 1, 0, 0);
/// caravan.subtract(CrystalType::Yellow, 2).unwrap();
/// assert_eq!(caravan.total(), 2);
/// assert!(caravan.subtract(CrystalType::Pink, 1).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources {
    pub yellow: u32,
    pub green: u32,
    pub blue: u32,
    pub pink: u32,
}

impl Resources {
    /// Create resources from explicit counts (ascending type order).
    #[must_use]
    pub const fn new(yellow: u32, green: u32, blue: u32, pink: u32) -> Self {
        Self { yellow, green, blue, pink }
    }

    /// Empty resources.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// `count` crystals of a single type.
    #[must_use]
    pub fn of(crystal: CrystalType, count: u32) -> Self {
        let mut r = Self::empty();
        r[crystal] = count;
        r
    }

    /// Tally a sequence of individual crystals.
    pub fn from_crystals(crystals: impl IntoIterator<Item = CrystalType>) -> Self {
        let mut r = Self::empty();
        for crystal in crystals {
            r[crystal] = r[crystal].saturating_add(1);
        }
        r
    }

    /// Count of one crystal type.
    #[must_use]
    pub fn get(&self, crystal: CrystalType) -> u32 {
        self[crystal]
    }

    /// Overwrite the count of one crystal type.
    pub fn set(&mut self, crystal: CrystalType, count: u32) {
        self[crystal] = count;
    }

    /// Whether at least `count` crystals of `crystal` are held.
    #[must_use]
    pub fn has(&self, crystal: CrystalType, count: u32) -> bool {
        self[crystal] >= count
    }

    /// Whether `required × multiplier` is fully covered.
    ///
    /// A multiplier of 0 is treated as 1.
    #[must_use]
    pub fn has_all(&self, required: &Resources, multiplier: u32) -> bool {
        let m = multiplier.max(1);
        CrystalType::ALL
            .iter()
            .all(|&c| u64::from(self[c]) >= u64::from(required[c]) * u64::from(m))
    }

    /// Add `count` crystals of one type.
    pub fn add(&mut self, crystal: CrystalType, count: u32) {
        self[crystal] = self[crystal].saturating_add(count);
    }

    /// Remove `count` crystals of one type, rejecting on insufficiency.
    pub fn subtract(&mut self, crystal: CrystalType, count: u32) -> Result<(), GameError> {
        if !self.has(crystal, count) {
            return Err(GameError::Insufficient {
                required: Resources::of(crystal, count),
                available: *self,
            });
        }
        self[crystal] -= count;
        Ok(())
    }

    /// Add `other × multiplier`. A multiplier of 0 is treated as 1.
    pub fn add_all(&mut self, other: &Resources, multiplier: u32) {
        let m = multiplier.max(1);
        for c in CrystalType::ALL {
            self[c] = self[c].saturating_add(other[c].saturating_mul(m));
        }
    }

    /// Remove `required × multiplier`, leaving `self` untouched on failure.
    pub fn subtract_all(&mut self, required: &Resources, multiplier: u32) -> Result<(), GameError> {
        let m = multiplier.max(1);
        if !self.has_all(required, m) {
            return Err(GameError::Insufficient {
                required: required.scaled(m),
                available: *self,
            });
        }
        for c in CrystalType::ALL {
            self[c] -= required[c] * m;
        }
        Ok(())
    }

    /// `self × multiplier`.
    #[must_use]
    pub fn scaled(&self, multiplier: u32) -> Resources {
        let mut r = *self;
        for c in CrystalType::ALL {
            r[c] = r[c].saturating_mul(multiplier);
        }
        r
    }

    /// Total crystal count.
    #[must_use]
    pub fn total(&self) -> u32 {
        saturate(self.total_wide())
    }

    /// Level-weighted sum (Yellow = 1 … Pink = 4).
    #[must_use]
    pub fn level_sum(&self) -> u32 {
        saturate(self.level_sum_wide())
    }

    fn total_wide(&self) -> u64 {
        CrystalType::ALL.iter().map(|&c| u64::from(self[c])).sum()
    }

    fn level_sum_wide(&self) -> u64 {
        CrystalType::ALL
            .iter()
            .map(|&c| u64::from(self[c]) * u64::from(c.level()))
            .sum()
    }

    /// Crystals of `crystal` or any higher type.
    fn at_or_above(&self, crystal: CrystalType) -> u64 {
        CrystalType::ALL
            .iter()
            .filter(|&&c| c >= crystal)
            .map(|&c| u64::from(self[c]))
            .sum()
    }

    /// End-of-game score contribution: one point per non-Yellow crystal.
    #[must_use]
    pub fn final_score_contribution(&self) -> u32 {
        self.green + self.blue + self.pink
    }

    /// Whether no crystals are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// How many times `input` can be paid in full. Zero if `input` is empty.
    #[must_use]
    pub fn max_multiplier(&self, input: &Resources) -> u32 {
        CrystalType::ALL
            .iter()
            .filter(|&&c| input[c] > 0)
            .map(|&c| self[c] / input[c])
            .min()
            .unwrap_or(0)
    }

    /// Iterate individual crystals in ascending type order.
    pub fn crystals(&self) -> impl Iterator<Item = CrystalType> + '_ {
        CrystalType::ALL
            .into_iter()
            .flat_map(move |c| std::iter::repeat(c).take(self[c] as usize))
    }

    /// Whether `self` can become exactly `target` spending at most
    /// `max_levels` level-steps.
    ///
    /// Crystal count is conserved and no crystal may move down. Every
    /// origin crystal needs its own target crystal of equal or higher type,
    /// which holds exactly when, for each type, the target has at least as
    /// many crystals at or above it as the origin does. Runs in constant
    /// time whatever the counts.
    ///
    /// ```
    /// use golem_caravan::core::Resources;
    ///
    /// let one_yellow = Resources::new(1, 0, 0, 0);
    /// let one_pink = Resources::new(0, 0, 0, 1);
    /// assert!(one_yellow.can_upgrade(&one_pink, 3));
    /// assert!(!one_yellow.can_upgrade(&one_pink, 1));
    /// ```
    #[must_use]
    pub fn can_upgrade(&self, target: &Resources, max_levels: u32) -> bool {
        if self.total_wide() != target.total_wide() {
            return false;
        }
        let before = self.level_sum_wide();
        let after = target.level_sum_wide();
        if after < before || after - before > u64::from(max_levels) {
            return false;
        }

        CrystalType::ALL
            .iter()
            .all(|&c| target.at_or_above(c) >= self.at_or_above(c))
    }
}

fn saturate(wide: u64) -> u32 {
    u32::try_from(wide).unwrap_or(u32::MAX)
}

impl Index<CrystalType> for Resources {
    type Output = u32;

    fn index(&self, crystal: CrystalType) -> &u32 {
        match crystal.slot() {
            0 => &self.yellow,
            1 => &self.green,
            2 => &self.blue,
            _ => &self.pink,
        }
    }
}

impl IndexMut<CrystalType> for Resources {
    fn index_mut(&mut self, crystal: CrystalType) -> &mut u32 {
        match crystal.slot() {
            0 => &mut self.yellow,
            1 => &mut self.green,
            2 => &mut self.blue,
            _ => &mut self.pink,
        }
    }
}

impl std::fmt::Display for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = CrystalType::ALL
            .iter()
            .filter(|&&c| self[c] > 0)
            .map(|&c| format!("{} {}", self[c], c))
            .collect();
        if parts.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}
