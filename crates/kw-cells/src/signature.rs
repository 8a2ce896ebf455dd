use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CellError;

/// Content of one link slot of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Slot {
    Empty = 0,
    /// A link running east-west through the slot.
    Horizontal = 1,
    /// A link running north-south through the slot.
    Vertical = 2,
}

impl Slot {
    pub fn from_value(value: u8) -> Option<Slot> {
        match value {
            0 => Some(Slot::Empty),
            1 => Some(Slot::Horizontal),
            2 => Some(Slot::Vertical),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// The slot after a quarter turn: horizontal and vertical trade places.
    pub fn turned(self) -> Slot {
        match self {
            Slot::Empty => Slot::Empty,
            Slot::Horizontal => Slot::Vertical,
            Slot::Vertical => Slot::Horizontal,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Slot::Empty
    }
}

/// Slot contents of a cell, in the slot order of its shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature(Vec<Slot>);

impl Signature {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self(slots)
    }

    pub fn empty(len: usize) -> Self {
        Self(vec![Slot::Empty; len])
    }

    pub fn from_values(values: &[u8]) -> Result<Self, CellError> {
        values
            .iter()
            .enumerate()
            .map(|(position, &value)| {
                Slot::from_value(value).ok_or(CellError::InvalidSlotValue { position, value })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of non-empty slots.
    pub fn links(&self) -> usize {
        self.0.iter().filter(|s| !s.is_empty()).count()
    }

    /// Digit string such as `"1020"`, used for file names.
    pub fn label(&self) -> String {
        self.0.iter().map(|s| char::from(b'0' + s.value())).collect()
    }

    /// Reorders the slots: slot `i` of the result is slot `order[i]` of `self`.
    pub(crate) fn permuted(&self, order: &[usize]) -> Self {
        Self(order.iter().map(|&i| self.0[i]).collect())
    }

    pub(crate) fn map(&self, f: impl Fn(Slot) -> Slot) -> Self {
        Self(self.0.iter().copied().map(f).collect())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Signature {
    type Err = CellError;

    /// Parses a digit label. Non-digit characters are reported by byte value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<u8> = s
            .bytes()
            .map(|b| if b.is_ascii_digit() { b - b'0' } else { b })
            .collect();
        Self::from_values(&values)
    }
}

impl TryFrom<String> for Signature {
    type Error = CellError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Signature> for String {
    fn from(sig: Signature) -> Self {
        sig.label()
    }
}

#[cfg(test)]
mod tests {
    use super::{Signature, Slot};
    use crate::CellError;

    #[test]
    fn labels_round_trip() {
        let sig: Signature = "1020".parse().expect("valid label");
        assert_eq!(
            sig.slots(),
            &[Slot::Horizontal, Slot::Empty, Slot::Vertical, Slot::Empty]
        );
        assert_eq!(sig.label(), "1020");
        assert_eq!(sig.to_string(), "1020");
        assert_eq!(sig.links(), 2);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert_eq!(
            "0130".parse::<Signature>(),
            Err(CellError::InvalidSlotValue {
                position: 2,
                value: 3
            })
        );
        assert!(matches!(
            "01x".parse::<Signature>(),
            Err(CellError::InvalidSlotValue { position: 2, .. })
        ));
    }

    #[test]
    fn quarter_turn_swaps_orientation() {
        assert_eq!(Slot::Horizontal.turned(), Slot::Vertical);
        assert_eq!(Slot::Vertical.turned(), Slot::Horizontal);
        assert_eq!(Slot::Empty.turned(), Slot::Empty);
    }

    #[test]
    fn serializes_as_its_label() {
        let sig: Signature = "0000002".parse().expect("valid label");
        let json = serde_json::to_string(&sig).expect("serializable");
        assert_eq!(json, "\"0000002\"");
        let back: Signature = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, sig);
    }
}
