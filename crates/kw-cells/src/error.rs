use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error(transparent)]
    Lattice(#[from] kw_core::Error),
    #[error("signature has {len} slots, expected {expected}")]
    InvalidSignature { len: usize, expected: usize },
    #[error("slot value {value} at position {position} is not 0, 1 or 2")]
    InvalidSlotValue { position: usize, value: u8 },
}
