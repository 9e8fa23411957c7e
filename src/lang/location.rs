use std::fmt::{self, Display, Formatter};

/// Where, in the stream of blocks being loaded, a cell was found.
///
/// Used for error reporting; there is no line/column concept because block files carry no
/// textual source, only pre-tokenized cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CellLocation {
    /// Which 256-cell block the cell came from.
    pub block: usize,

    /// The cell's index within that block (0..256).
    pub index: usize,
}

impl CellLocation {
    /// Create a new location.
    pub fn new(block: usize, index: usize) -> CellLocation {
        CellLocation { block, index }
    }
}

impl Display for CellLocation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "block {} cell {}", self.block, self.index)
    }
}
