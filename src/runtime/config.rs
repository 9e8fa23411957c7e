/// Runtime-tunable capacities for a single interpreter instance.
///
/// The historical core sized these as fixed array constants at compile time; here they are
/// plain fields so the CLI and any embedding host can size an interpreter to the block file at
/// hand instead of recompiling.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of `Instruction` cells the code heap can hold.
    pub heap_cells: usize,

    /// Number of entries the data stack can hold.
    pub data_stack_cells: usize,

    /// Number of entries the return stack can hold.
    pub return_stack_cells: usize,
}

impl Config {
    pub fn new(heap_cells: usize, data_stack_cells: usize, return_stack_cells: usize) -> Config {
        Config {
            heap_cells,
            data_stack_cells,
            return_stack_cells,
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            heap_cells: 16 * 1024,
            data_stack_cells: 256,
            return_stack_cells: 256,
        }
    }
}
