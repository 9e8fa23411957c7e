use tracing::{debug, trace, warn};

use crate::lang::cell::{Cell, ColorTag};
use crate::lang::codec;
use crate::runtime::built_ins::{self, PrimitiveId};
use crate::runtime::config::Config;
use crate::runtime::data_structures::dictionary::{CodeAddress, DictEntry, Dictionary, Selected};
use crate::runtime::data_structures::heap::{CodeHeap, Instruction};
use crate::runtime::data_structures::stacks::{Frame, ReturnStack, ValueStack};
use crate::runtime::error::{ColorForthError, ErrorKind, Result};

/// The interpreter: every owned piece of mutable state a running colorForth program touches.
///
/// There is no trait object and no global singleton — a value of this type is constructed once
/// per embedding and passed around by `&mut` reference.
pub struct Interpreter {
    forth: Dictionary,
    macro_dict: Dictionary,
    selected: Selected,
    heap: CodeHeap,
    stack: ValueStack,
    return_stack: ReturnStack,
    blocks: Vec<Cell>,
}

impl Interpreter {
    /// Build a fresh interpreter with empty dictionaries and register the built-in primitives.
    pub fn new(config: &Config) -> Interpreter {
        let mut interpreter = Interpreter {
            forth: Dictionary::new(),
            macro_dict: Dictionary::new(),
            selected: Selected::default(),
            heap: CodeHeap::new(config.heap_cells),
            stack: ValueStack::new(config.data_stack_cells),
            return_stack: ReturnStack::new(config.return_stack_cells),
            blocks: Vec::new(),
        };

        built_ins::register_primitives(&mut interpreter)
            .expect("built-in primitive names must pack into a cell");

        interpreter
    }

    /// Replace the block storage `load`/`loads` and `run_block` read from. The CLI and the
    /// `ColorForth` embedding API call this once after reading a block file.
    pub fn set_blocks(&mut self, blocks: Vec<Cell>) {
        self.blocks = blocks;
    }

    /// The currently loaded block storage.
    pub fn blocks(&self) -> &[Cell] {
        &self.blocks
    }

    // -- Data stack -------------------------------------------------------

    pub fn push(&mut self, value: i32) -> Result<()> {
        self.stack.push(value)
    }

    pub fn pop(&mut self) -> Result<i32> {
        self.stack.pop()
    }

    pub fn stack(&self) -> &ValueStack {
        &self.stack
    }

    // -- Return stack -------------------------------------------------------

    pub fn rpush(&mut self, frame: Frame) -> Result<()> {
        self.return_stack.push(frame)
    }

    pub fn rpop(&mut self) -> Option<Frame> {
        self.return_stack.pop()
    }

    pub fn rtop(&self) -> Result<Frame> {
        self.return_stack.top()
    }

    // -- Code heap -------------------------------------------------------

    pub fn heap(&self) -> &CodeHeap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut CodeHeap {
        &mut self.heap
    }

    pub fn here(&self) -> usize {
        self.heap.here()
    }

    // -- Dictionaries -------------------------------------------------------

    pub fn selected(&self) -> Selected {
        self.selected
    }

    pub fn select(&mut self, which: Selected) {
        self.selected = which;
    }

    pub fn dictionary(&self, which: Selected) -> &Dictionary {
        match which {
            Selected::Forth => &self.forth,
            Selected::Macro => &self.macro_dict,
        }
    }

    fn dictionary_mut(&mut self, which: Selected) -> &mut Dictionary {
        match which {
            Selected::Forth => &mut self.forth,
            Selected::Macro => &mut self.macro_dict,
        }
    }

    /// Look up a name in one of the two dictionaries.
    pub fn lookup(&self, cell: Cell, which: Selected) -> Option<&DictEntry> {
        self.dictionary(which).lookup(cell)
    }

    /// Register a native primitive under `name` in the given dictionary. Used only during
    /// startup by `built_ins::register_primitives`.
    pub fn define_primitive(&mut self, name: &str, id: PrimitiveId, which: Selected) -> Result<()> {
        let packed = codec::pack(name)?;
        self.dictionary_mut(which)
            .insert(DictEntry::new(packed, CodeAddress::Primitive(id)));
        Ok(())
    }

    /// Create a new dictionary entry in the currently selected dictionary, pointing at the
    /// current bump pointer. Used by tag-3 (`define word`) dispatch.
    fn create_word(&mut self, name: Cell) -> usize {
        let address = self.here();
        let selected = self.selected;
        self.dictionary_mut(selected)
            .insert(DictEntry::new(name, CodeAddress::Definition(address)));
        address
    }

    /// Create a variable: a storage cell, a codeword referencing it, and a trailing `Exit`, all
    /// three forming the `Exit`-terminated run every `CodeAddress::Definition` expects. Always
    /// inserted into the forth dictionary. Used by tag-12 dispatch.
    fn create_variable(&mut self, name: Cell) -> Result<()> {
        self.select(Selected::Forth);
        let storage = self.heap.push(Instruction::RawCell(0))?;
        let codeword = self.heap.push(Instruction::Variable(storage))?;
        self.heap.push(Instruction::Exit)?;
        self.forth
            .insert(DictEntry::new(name, CodeAddress::Definition(codeword)));
        Ok(())
    }

    // -- Primitive execution -------------------------------------------------------

    /// Run a single native primitive.
    pub fn execute_primitive(&mut self, id: PrimitiveId) -> Result<()> {
        built_ins::execute(self, id)
    }

    /// Invoke a dictionary entry's codeword the way tag-1 (`execute forth word`) and a
    /// macro-dict hit during tag-4 compilation both do: primitives run directly, definitions run
    /// through the threaded-code loop starting with a return-stack frame of their own.
    fn execute_entry(&mut self, address: CodeAddress) -> Result<()> {
        match address {
            CodeAddress::Primitive(id) => self.execute_primitive(id),
            CodeAddress::Definition(index) => self.execute_from(index),
        }
    }

    /// Compile a call to a dictionary entry's codeword into the heap, without executing it.
    fn compile_call(&mut self, address: CodeAddress) -> Result<()> {
        let instruction = match address {
            CodeAddress::Primitive(id) => Instruction::CallPrimitive(id),
            CodeAddress::Definition(index) => Instruction::CallDefinition(index),
        };
        self.heap.push(instruction)?;
        Ok(())
    }

    /// The inner interpreter: run the `Exit`-terminated instruction run starting at `start`. An
    /// `Exit` reached once the return stack has unwound back past this call's own starting depth
    /// ends the call — the return-stack-empty halt condition described in §9.
    fn execute_from(&mut self, start: usize) -> Result<()> {
        let depth_marker = self.return_stack.len();
        let mut ip = start;

        loop {
            let instruction = *self.heap.get(ip).ok_or_else(|| {
                ColorForthError::new(ErrorKind::OutOfRange(format!(
                    "instruction pointer {} past end of code heap",
                    ip
                )))
            })?;

            let mut next_ip = ip + 1;

            match instruction {
                Instruction::CallPrimitive(id) => self.execute_primitive(id)?,
                Instruction::CallDefinition(target) => {
                    self.return_stack.push(Frame::Return(next_ip))?;
                    next_ip = target;
                }
                Instruction::Literal(value) => self.stack.push(value)?,
                Instruction::Variable(address) => self.stack.push(address as i32)?,
                Instruction::ZeroBranch { target } => {
                    if self.stack.pop()? == 0 {
                        next_ip = target;
                    }
                }
                Instruction::ForAux => {
                    let count = self.stack.pop()?;
                    self.return_stack.push(Frame::Loop(count))?;
                }
                Instruction::NextAux { loop_start } => match self.return_stack.pop() {
                    Some(Frame::Loop(count)) => {
                        let remaining = count - 1;
                        if remaining > 0 {
                            self.return_stack.push(Frame::Loop(remaining))?;
                            next_ip = loop_start;
                        }
                    }
                    Some(Frame::Return(_)) | None => {
                        return Err(ColorForthError::return_stack_underflow());
                    }
                },
                Instruction::Exit => {
                    if self.return_stack.len() <= depth_marker {
                        return Ok(());
                    }
                    match self.return_stack.pop() {
                        Some(Frame::Return(address)) => next_ip = address,
                        Some(Frame::Loop(_)) | None => {
                            return Err(ColorForthError::return_stack_underflow());
                        }
                    }
                }
                Instruction::RawCell(_) => {
                    // Data, not an opcode; reaching one means a malformed jump target.
                    return Err(ColorForthError::new(ErrorKind::OutOfRange(format!(
                        "instruction pointer {} landed on a raw data cell",
                        ip
                    ))));
                }
            }

            ip = next_ip;
        }
    }

    /// Store a value at a heap address, used by `!`. Only cells holding `RawCell` (i.e. a
    /// variable's storage cell) are valid write targets.
    pub fn store(&mut self, address: usize, value: i32) -> Result<()> {
        match self.heap.get(address) {
            Some(Instruction::RawCell(_)) => {
                self.heap.patch(address, Instruction::RawCell(value));
                Ok(())
            }
            Some(_) => Err(ColorForthError::new(ErrorKind::OutOfRange(format!(
                "heap cell {} is not a storage cell",
                address
            )))),
            None => Err(ColorForthError::new(ErrorKind::OutOfRange(format!(
                "heap address {} out of range",
                address
            )))),
        }
    }

    /// Fetch a value from a heap address, used by `@`.
    pub fn fetch(&self, address: usize) -> Result<i32> {
        match self.heap.get(address) {
            Some(Instruction::RawCell(value)) => Ok(*value),
            Some(_) => Err(ColorForthError::new(ErrorKind::OutOfRange(format!(
                "heap cell {} is not a storage cell",
                address
            )))),
            None => Err(ColorForthError::new(ErrorKind::OutOfRange(format!(
                "heap address {} out of range",
                address
            )))),
        }
    }

    /// Render the full data stack, bottom first, the way `dot_s` prints it.
    pub fn dot_s(&self) -> String {
        self.stack
            .as_slice()
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    // -- Color dispatcher -------------------------------------------------------

    /// Dispatch a single cell through the 16-entry color table.
    pub fn do_word(&mut self, cell: Cell) -> Result<()> {
        match cell.tag() {
            ColorTag::ExecuteWord => {
                let entry = self.require(cell, Selected::Forth)?;
                self.execute_entry(entry.address)
            }
            ColorTag::DefineWord => {
                self.create_word(cell);
                Ok(())
            }
            ColorTag::CompileWord => {
                if let Some(entry) = self.lookup(cell, Selected::Macro) {
                    let address = entry.address;
                    trace!(word = %codec::unpack(cell), "executing macro word at compile time");
                    self.execute_entry(address)
                } else {
                    let entry = self.require(cell, Selected::Forth)?;
                    // `;` is the one forth-dict word whose "execution" is itself the compile-time
                    // act of closing a definition, so it runs immediately rather than being
                    // wrapped in a call the way every other forth-dict word is.
                    if entry.address == CodeAddress::Primitive(PrimitiveId::Exit) {
                        self.execute_entry(entry.address)
                    } else {
                        self.compile_call(entry.address)
                    }
                }
            }
            ColorTag::CompileNumber | ColorTag::CompileBigNumber => {
                self.heap.push(Instruction::Literal(cell.numeric_value()))?;
                Ok(())
            }
            ColorTag::CompileMacro => {
                let entry = self.require(cell, Selected::Macro)?;
                self.compile_call(entry.address)
            }
            ColorTag::InterpretNumber | ColorTag::InterpretBigNumber => {
                self.stack.push(cell.numeric_value())
            }
            ColorTag::DefineVariable => self.create_variable(cell),
            ColorTag::WordExtension
            | ColorTag::Comment9
            | ColorTag::Comment10
            | ColorTag::Comment11
            | ColorTag::CompilerFeedback
            | ColorTag::DisplayMacro
            | ColorTag::Reserved15 => {
                debug!(tag = ?cell.tag(), "ignoring cell");
                Ok(())
            }
        }
    }

    fn require(&self, cell: Cell, which: Selected) -> Result<DictEntry> {
        self.lookup(cell, which).copied().ok_or_else(|| {
            let name = codec::unpack(cell);
            warn!(word = %name, "unknown word");
            ColorForthError::unknown_word(name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::codec::pack;

    fn interpreter() -> Interpreter {
        Interpreter::new(&Config::default())
    }

    fn tagged(name: &str, tag: ColorTag) -> Cell {
        Cell::new(pack(name).unwrap().value() | tag.as_nibble() as i32)
    }

    fn interpret_number(interp: &mut Interpreter, n: i32) {
        interp.do_word(Cell::from_number(n, ColorTag::InterpretNumber)).unwrap();
    }

    #[test]
    fn execute_word_runs_a_forth_dict_primitive() {
        let mut interp = interpreter();
        interpret_number(&mut interp, 3);
        interpret_number(&mut interp, 4);
        interp.do_word(tagged("+", ColorTag::ExecuteWord)).unwrap();
        assert_eq!(interp.pop().unwrap(), 7);
    }

    #[test]
    fn sq_definition_executes_its_body() {
        let mut interp = interpreter();
        interp.do_word(tagged("sq", ColorTag::DefineWord)).unwrap();
        interp.do_word(tagged("dup", ColorTag::CompileWord)).unwrap();
        interp.do_word(tagged("*", ColorTag::CompileWord)).unwrap();
        interp.do_word(tagged(";", ColorTag::CompileWord)).unwrap();

        interpret_number(&mut interp, 3);
        interp.do_word(tagged("sq", ColorTag::ExecuteWord)).unwrap();
        assert_eq!(interp.pop().unwrap(), 9);
    }

    #[test]
    fn fact_uses_for_next_and_i() {
        let mut interp = interpreter();
        interp.do_word(tagged("fact", ColorTag::DefineWord)).unwrap();
        interp.do_word(Cell::from_number(1, ColorTag::CompileNumber)).unwrap();
        interp.do_word(tagged("swap", ColorTag::CompileMacro)).unwrap();
        interp.do_word(tagged("for", ColorTag::CompileWord)).unwrap();
        interp.do_word(tagged("i", ColorTag::CompileWord)).unwrap();
        interp.do_word(tagged("*", ColorTag::CompileWord)).unwrap();
        interp.do_word(tagged("next", ColorTag::CompileWord)).unwrap();
        interp.do_word(tagged(";", ColorTag::CompileWord)).unwrap();

        interpret_number(&mut interp, 5);
        interp.do_word(tagged("fact", ColorTag::ExecuteWord)).unwrap();
        assert_eq!(interp.pop().unwrap(), 120);
    }

    #[test]
    fn if_then_skips_the_guarded_literal_on_zero() {
        let mut interp = interpreter();
        interp.do_word(tagged("maybe", ColorTag::DefineWord)).unwrap();
        interp.do_word(tagged("if", ColorTag::CompileWord)).unwrap();
        interp.do_word(Cell::from_number(42, ColorTag::CompileNumber)).unwrap();
        interp.do_word(tagged("then", ColorTag::CompileWord)).unwrap();
        interp.do_word(tagged(";", ColorTag::CompileWord)).unwrap();

        interpret_number(&mut interp, 0);
        interp.do_word(tagged("maybe", ColorTag::ExecuteWord)).unwrap();
        assert!(interp.stack().is_empty());

        interpret_number(&mut interp, -1);
        interp.do_word(tagged("maybe", ColorTag::ExecuteWord)).unwrap();
        assert_eq!(interp.pop().unwrap(), 42);
    }

    #[test]
    fn variable_store_and_fetch_round_trip() {
        let mut interp = interpreter();
        interp.do_word(tagged("x", ColorTag::DefineVariable)).unwrap();

        interp.do_word(tagged("x", ColorTag::ExecuteWord)).unwrap();
        let address = interp.pop().unwrap() as usize;
        interp.store(address, 5).unwrap();
        assert_eq!(interp.fetch(address).unwrap(), 5);
    }

    #[test]
    fn unknown_word_is_a_typed_error_not_a_panic() {
        let mut interp = interpreter();
        assert!(interp.do_word(tagged("nope", ColorTag::ExecuteWord)).is_err());
    }

    #[test]
    fn ignored_tags_are_a_no_op() {
        let mut interp = interpreter();
        let cell = Cell::new(ColorTag::Comment9.as_nibble() as i32);
        assert!(interp.do_word(cell).is_ok());
    }
}
