use crate::runtime::built_ins::{define, PrimitiveId};
use crate::runtime::data_structures::dictionary::Selected;
use crate::runtime::data_structures::heap::Instruction;
use crate::runtime::error::Result;
use crate::runtime::interpreter::Interpreter;

pub fn register(interpreter: &mut Interpreter) -> Result<()> {
    define(interpreter, ",", PrimitiveId::Comma, Selected::Forth)?;
    define(interpreter, "!", PrimitiveId::Store, Selected::Forth)?;
    define(interpreter, "@", PrimitiveId::Fetch, Selected::Forth)?;
    define(interpreter, "here", PrimitiveId::Here, Selected::Forth)?;
    Ok(())
}

pub fn execute(interpreter: &mut Interpreter, id: PrimitiveId) -> Result<()> {
    match id {
        PrimitiveId::Comma => {
            let value = interpreter.pop()?;
            interpreter.heap_mut().push(Instruction::RawCell(value))?;
            Ok(())
        }
        PrimitiveId::Store => {
            let address = interpreter.pop()? as usize;
            let value = interpreter.pop()?;
            interpreter.store(address, value)
        }
        PrimitiveId::Fetch => {
            let address = interpreter.pop()? as usize;
            let value = interpreter.fetch(address)?;
            interpreter.push(value)
        }
        PrimitiveId::Here => interpreter.push(interpreter.here() as i32),
        _ => unreachable!("memory_words::execute received a non-memory primitive"),
    }
}
