use crate::runtime::block;
use crate::runtime::built_ins::{define, PrimitiveId};
use crate::runtime::data_structures::dictionary::Selected;
use crate::runtime::error::Result;
use crate::runtime::interpreter::Interpreter;

pub fn register(interpreter: &mut Interpreter) -> Result<()> {
    define(interpreter, "load", PrimitiveId::Load, Selected::Forth)?;
    define(interpreter, "loads", PrimitiveId::Loads, Selected::Forth)?;
    define(interpreter, "forth", PrimitiveId::SelectForth, Selected::Forth)?;
    define(interpreter, "macro", PrimitiveId::SelectMacro, Selected::Forth)?;
    Ok(())
}

pub fn execute(interpreter: &mut Interpreter, id: PrimitiveId) -> Result<()> {
    match id {
        PrimitiveId::Load => {
            let n = interpreter.pop()? as usize;
            block::run_block(interpreter, n)
        }
        PrimitiveId::Loads => {
            let j = interpreter.pop()? as usize;
            let i = interpreter.pop()? as usize;
            block::loads(interpreter, i, j)
        }
        PrimitiveId::SelectForth => {
            interpreter.select(Selected::Forth);
            Ok(())
        }
        PrimitiveId::SelectMacro => {
            interpreter.select(Selected::Macro);
            Ok(())
        }
        _ => unreachable!("dictionary_words::execute received a non-dictionary primitive"),
    }
}
