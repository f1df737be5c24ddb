//! Stack quantity arithmetic for inventory entries

use serde::{Deserialize, Serialize};

/// What happens to a stack when some of it is taken away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackChange {
    /// Stack survives with the remaining quantity
    Remaining(u32),
    /// Stack is used up and the entry should be deleted
    Emptied,
}

impl StackChange {
    /// Take `amount` out of a stack of `current`.
    ///
    /// `amount == 0` means "the whole stack".
    pub fn take(current: u32, amount: u32) -> Self {
        if amount == 0 || amount >= current {
            Self::Emptied
        } else {
            Self::Remaining(current - amount)
        }
    }

    pub fn is_emptied(&self) -> bool {
        matches!(self, Self::Emptied)
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            Self::Remaining(qty) => Some(*qty),
            Self::Emptied => None,
        }
    }
}
