use crate::consts;
use crate::error::{Error, Result};
use std::fmt;

/// Represents a valid pedal slot (0-2).
/// Use `Slot::new(index)` or `Slot::from_pedal(number)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u8);

impl Slot {
    /// Creates a new Slot, returning an error if the index is out of range (0-2).
    pub fn new(index: u8) -> Result<Self> {
        if index < consts::SLOT_COUNT {
            Ok(Slot(index))
        } else {
            Err(Error::SlotOutOfRange { slot: index })
        }
    }

    /// Creates a Slot from the 1-based number printed on the pedal.
    pub fn from_pedal(number: u8) -> Result<Self> {
        match number.checked_sub(1) {
            Some(index) => Self::new(index),
            None => Err(Error::SlotOutOfRange { slot: number }),
        }
    }

    /// Returns the 0-based slot index.
    #[inline]
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Returns the byte identifying this slot in command reports.
    #[inline]
    pub fn wire(&self) -> u8 {
        self.0 + 1
    }

    /// All slots in pedal order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..consts::SLOT_COUNT).map(Slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pedal {}", self.wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds() {
        assert_eq!(Slot::new(0).unwrap().wire(), 1);
        assert_eq!(Slot::new(2).unwrap().wire(), 3);
        assert!(matches!(
            Slot::new(3),
            Err(Error::SlotOutOfRange { slot: 3 })
        ));
    }

    #[test]
    fn test_slot_from_pedal_number() {
        assert_eq!(Slot::from_pedal(1).unwrap().index(), 0);
        assert_eq!(Slot::from_pedal(3).unwrap().index(), 2);
        assert!(Slot::from_pedal(0).is_err());
        assert!(Slot::from_pedal(4).is_err());
    }

    #[test]
    fn test_slot_all() {
        let wires: Vec<u8> = Slot::all().map(|s| s.wire()).collect();
        assert_eq!(wires, vec![1, 2, 3]);
    }
}
