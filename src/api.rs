use crate::lang::cell::Cell;
use crate::runtime::block;
use crate::runtime::config::Config;
use crate::runtime::data_structures::dictionary::{DictEntry, Selected};
use crate::runtime::error::Result;
use crate::runtime::interpreter::Interpreter;

/// What a host editor or the CLI binary talks to instead of the lower-level `Interpreter`
/// directly.
pub struct ColorForth {
    interpreter: Interpreter,
}

impl ColorForth {
    /// Build a fresh instance with empty dictionaries and registered primitives.
    pub fn initialize(config: Config) -> ColorForth {
        ColorForth {
            interpreter: Interpreter::new(&config),
        }
    }

    /// Drop the instance. Rust's ownership already runs every destructor this would, but an
    /// explicit `finalize` keeps the embedding contract symmetric with `initialize`.
    pub fn finalize(self) {}

    /// Load `blocks` into the instance (replacing whatever was loaded before) and run block `n`.
    pub fn run_block(&mut self, blocks: &[Cell], n: usize) -> Result<()> {
        self.interpreter.set_blocks(blocks.to_vec());
        block::run_block(&mut self.interpreter, n)
    }

    /// Dispatch a single cell through the color dispatcher.
    pub fn do_word(&mut self, cell: Cell) -> Result<()> {
        self.interpreter.do_word(cell)
    }

    /// Pack a printable name into a cell. Exposed so an editor can build cells without going
    /// through a block file.
    pub fn pack(name: &str) -> Result<Cell> {
        crate::lang::codec::pack(name)
    }

    /// Unpack a cell's name back to a printable string.
    pub fn unpack(cell: Cell) -> String {
        crate::lang::codec::unpack(cell)
    }

    /// Look up a name in one of the two dictionaries.
    pub fn lookup(&self, cell: Cell, which: Selected) -> Option<&DictEntry> {
        self.interpreter.lookup(cell, which)
    }

    /// A text snapshot of the data stack, bottom first.
    pub fn dot_s(&self) -> String {
        self.interpreter.dot_s()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::cell::ColorTag;

    #[test]
    fn pack_and_unpack_round_trip_through_the_public_api() {
        let cell = ColorForth::pack("sq").unwrap();
        assert_eq!(ColorForth::unpack(cell), "sq");
    }

    #[test]
    fn run_block_executes_loaded_cells() {
        let mut colorforth = ColorForth::initialize(Config::default());
        let mut cells = vec![Cell::from_number(5, ColorTag::InterpretNumber)];
        cells.resize(block::BLOCK_CELLS, Cell::new(0));

        colorforth.run_block(&cells, 0).unwrap();
        assert_eq!(colorforth.dot_s(), "5");
    }
}
