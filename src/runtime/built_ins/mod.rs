use crate::runtime::data_structures::dictionary::Selected;
use crate::runtime::error::Result;
use crate::runtime::interpreter::Interpreter;

/// Words that add, subtract, compare, and do bitwise logic.
mod arithmetic_words;

/// Words that shuffle the data stack and the loop counter.
mod stack_words;

/// Words that read and write the code heap directly.
mod memory_words;

/// Compile-time control-flow words (`if`/`then`/`for`/`next`) and `;`.
mod control_words;

/// Words that select a dictionary or pull in another block.
mod dictionary_words;

/// Identifies a native routine a dictionary entry's codeword can point at.
///
/// Every primitive is a fixed, data-free operation, so a plain enum dispatched over in
/// `execute` covers every word without needing closures or trait objects.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrimitiveId {
    Comma,
    Load,
    Loads,
    SelectForth,
    SelectMacro,
    Exit,
    Store,
    Fetch,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Ne,
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Xor,
    Not,
    Dup,
    Drop,
    Nip,
    Over,
    Swap,
    Negate,
    Dot,
    DotS,
    Here,
    I,
    RDrop,
    If,
    Then,
    For,
    Next,
}

/// Insert every built-in into the forth and macro dictionaries.
pub fn register_primitives(interpreter: &mut Interpreter) -> Result<()> {
    arithmetic_words::register(interpreter)?;
    stack_words::register(interpreter)?;
    memory_words::register(interpreter)?;
    control_words::register(interpreter)?;
    dictionary_words::register(interpreter)?;
    Ok(())
}

/// Run one primitive. The single dispatch point every `CallPrimitive` instruction and every
/// top-level `Primitive` dictionary hit goes through.
pub fn execute(interpreter: &mut Interpreter, id: PrimitiveId) -> Result<()> {
    match id {
        PrimitiveId::Add
        | PrimitiveId::Sub
        | PrimitiveId::Mul
        | PrimitiveId::Div
        | PrimitiveId::Mod
        | PrimitiveId::Ne
        | PrimitiveId::Eq
        | PrimitiveId::Lt
        | PrimitiveId::Gt
        | PrimitiveId::Le
        | PrimitiveId::Ge
        | PrimitiveId::And
        | PrimitiveId::Or
        | PrimitiveId::Xor
        | PrimitiveId::Not
        | PrimitiveId::Negate => arithmetic_words::execute(interpreter, id),

        PrimitiveId::Dup
        | PrimitiveId::Drop
        | PrimitiveId::Nip
        | PrimitiveId::Over
        | PrimitiveId::Swap
        | PrimitiveId::Dot
        | PrimitiveId::DotS
        | PrimitiveId::I
        | PrimitiveId::RDrop => stack_words::execute(interpreter, id),

        PrimitiveId::Comma | PrimitiveId::Store | PrimitiveId::Fetch | PrimitiveId::Here => {
            memory_words::execute(interpreter, id)
        }

        PrimitiveId::Exit | PrimitiveId::If | PrimitiveId::Then | PrimitiveId::For | PrimitiveId::Next => {
            control_words::execute(interpreter, id)
        }

        PrimitiveId::Load | PrimitiveId::Loads | PrimitiveId::SelectForth | PrimitiveId::SelectMacro => {
            dictionary_words::execute(interpreter, id)
        }
    }
}

/// Shared helper: register a primitive by name into a dictionary, panicking only if the name
/// itself cannot pack (a programmer error in this module, never reachable from user input).
fn define(interpreter: &mut Interpreter, name: &str, id: PrimitiveId, which: Selected) -> Result<()> {
    interpreter.define_primitive(name, id, which)
}
