//! Per-card deposit ledger.
//!
//! A market card carries a sparse map from deposit position (1..=5) to an
//! ordered stack of crystals. Stacks are FIFO: collection always takes the
//! oldest crystal at a position. A card must keep at least one deposit
//! while it stays in the market; only acquisition empties it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::core::error::GameError;
use crate::core::resources::{CrystalType, Resources};

/// Highest deposit position.
pub const MAX_DEPOSIT_POSITION: u8 = 5;

type Stack = SmallVec<[CrystalType; 2]>;

/// Stacked deposits on one market card, keyed by position.
///
/// ```
/// use golem_caravan::cards::Deposits;
/// use golem_caravan::core::CrystalType;
///
/// let mut deposits = Deposits::new();
/// deposits.push(1, CrystalType::Yellow).unwrap();
/// deposits.push(1, CrystalType::Green).unwrap();
///
/// // The oldest crystal comes back first.
/// assert_eq!(deposits.collect(&[1]).unwrap(), CrystalType::Yellow);
/// // The last one has to stay.
/// assert!(deposits.collect(&[1]).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposits {
    stacks: BTreeMap<u8, Stack>,
}

impl Deposits {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total crystals across all positions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.stacks.values().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Stack at `position`, oldest first.
    #[must_use]
    pub fn at(&self, position: u8) -> &[CrystalType] {
        self.stacks.get(&position).map(|s| s.as_slice()).unwrap_or(&[])
    }

    /// Populated positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = u8> + '_ {
        self.stacks.keys().copied()
    }

    /// Append `crystal` to the stack at `position`.
    pub fn push(&mut self, position: u8, crystal: CrystalType) -> Result<(), GameError> {
        if position == 0 || position > MAX_DEPOSIT_POSITION {
            return Err(GameError::InvalidDepositPosition(position as usize));
        }
        self.stacks.entry(position).or_default().push(crystal);
        Ok(())
    }

    /// All deposited crystals as a multiset.
    #[must_use]
    pub fn as_resources(&self) -> Resources {
        Resources::from_crystals(self.stacks.values().flatten().copied())
    }

    /// Remove the oldest crystal at the single position in `positions`.
    pub fn collect(&mut self, positions: &[u8]) -> Result<CrystalType, GameError> {
        let &[position] = positions else {
            return Err(GameError::NoPositionSelected(positions.len()));
        };
        let len = self.at(position).len();
        if len == 0 {
            return Err(GameError::EmptyDepositPosition(position));
        }
        if self.total() <= 1 {
            return Err(GameError::MustLeaveDeposit);
        }

        let stack = self
            .stacks
            .get_mut(&position)
            .ok_or(GameError::EmptyDepositPosition(position))?;
        let crystal = stack.remove(0);
        if stack.is_empty() {
            self.stacks.remove(&position);
        }
        Ok(crystal)
    }

    /// Remove every deposit except the oldest at the lowest populated
    /// position.
    pub fn collect_all(&mut self) -> Result<Resources, GameError> {
        if self.total() <= 1 {
            return Err(GameError::MustLeaveDeposit);
        }

        let mut kept: Option<(u8, CrystalType)> = None;
        let mut collected = Resources::empty();
        for (&position, stack) in &self.stacks {
            for &crystal in stack {
                if kept.is_none() {
                    kept = Some((position, crystal));
                } else {
                    collected.add(crystal, 1);
                }
            }
        }

        self.stacks.clear();
        if let Some((position, crystal)) = kept {
            self.stacks.entry(position).or_default().push(crystal);
        }
        Ok(collected)
    }
}
