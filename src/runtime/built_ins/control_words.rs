use crate::runtime::built_ins::{define, PrimitiveId};
use crate::runtime::data_structures::dictionary::Selected;
use crate::runtime::data_structures::heap::Instruction;
use crate::runtime::error::Result;
use crate::runtime::interpreter::Interpreter;

pub fn register(interpreter: &mut Interpreter) -> Result<()> {
    define(interpreter, ";", PrimitiveId::Exit, Selected::Forth)?;

    define(interpreter, "if", PrimitiveId::If, Selected::Macro)?;
    define(interpreter, "then", PrimitiveId::Then, Selected::Macro)?;
    define(interpreter, "for", PrimitiveId::For, Selected::Macro)?;
    define(interpreter, "next", PrimitiveId::Next, Selected::Macro)?;

    Ok(())
}

/// `if`, `then`, `for`, and `next` are immediate: run at compile time, they edit the code heap
/// directly and use the data stack to carry back-patch addresses between one another (`if`
/// leaves its `ZeroBranch` index for `then` to patch; `for` leaves its loop-start index for
/// `next` to branch back to).
pub fn execute(interpreter: &mut Interpreter, id: PrimitiveId) -> Result<()> {
    match id {
        PrimitiveId::Exit => {
            interpreter.heap_mut().push(Instruction::Exit)?;
            Ok(())
        }
        PrimitiveId::If => {
            let placeholder = interpreter.heap_mut().push(Instruction::ZeroBranch { target: 0 })?;
            interpreter.push(placeholder as i32)
        }
        PrimitiveId::Then => {
            let placeholder = interpreter.pop()? as usize;
            let target = interpreter.here();
            interpreter
                .heap_mut()
                .patch(placeholder, Instruction::ZeroBranch { target });
            Ok(())
        }
        PrimitiveId::For => {
            interpreter.heap_mut().push(Instruction::ForAux)?;
            let loop_start = interpreter.here();
            interpreter.push(loop_start as i32)
        }
        PrimitiveId::Next => {
            let loop_start = interpreter.pop()? as usize;
            interpreter.heap_mut().push(Instruction::NextAux { loop_start })?;
            Ok(())
        }
        _ => unreachable!("control_words::execute received a non-control primitive"),
    }
}
