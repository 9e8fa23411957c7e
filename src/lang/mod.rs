/// The `Cell` type and the closed `ColorTag` enumeration over its low nibble.
pub mod cell;

/// Packing and unpacking of printable word names to and from the upper 28 bits of a cell.
pub mod codec;

/// Lightweight source location used for error reporting: which block and cell index.
pub mod location;
