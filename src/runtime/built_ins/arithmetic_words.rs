use crate::runtime::built_ins::{define, PrimitiveId};
use crate::runtime::data_structures::dictionary::Selected;
use crate::runtime::error::{ColorForthError, Result};
use crate::runtime::interpreter::Interpreter;

pub fn register(interpreter: &mut Interpreter) -> Result<()> {
    define(interpreter, "+", PrimitiveId::Add, Selected::Forth)?;
    define(interpreter, "-", PrimitiveId::Sub, Selected::Forth)?;
    define(interpreter, "*", PrimitiveId::Mul, Selected::Forth)?;
    define(interpreter, "/", PrimitiveId::Div, Selected::Forth)?;
    define(interpreter, "mod", PrimitiveId::Mod, Selected::Forth)?;
    define(interpreter, "ne", PrimitiveId::Ne, Selected::Forth)?;
    define(interpreter, "eq", PrimitiveId::Eq, Selected::Forth)?;
    define(interpreter, "lt", PrimitiveId::Lt, Selected::Forth)?;
    define(interpreter, "gt", PrimitiveId::Gt, Selected::Forth)?;
    define(interpreter, "le", PrimitiveId::Le, Selected::Forth)?;
    define(interpreter, "ge", PrimitiveId::Ge, Selected::Forth)?;
    define(interpreter, "and", PrimitiveId::And, Selected::Forth)?;
    define(interpreter, "or", PrimitiveId::Or, Selected::Forth)?;
    define(interpreter, "xor", PrimitiveId::Xor, Selected::Forth)?;
    define(interpreter, "not", PrimitiveId::Not, Selected::Forth)?;
    define(interpreter, "negate", PrimitiveId::Negate, Selected::Forth)?;

    // `ne` is also an immediate macro-dictionary word, per the historical primitive table; see
    // DESIGN.md for why it is registered twice.
    define(interpreter, "ne", PrimitiveId::Ne, Selected::Macro)?;

    Ok(())
}

/// Forth booleans: `-1` for true, `0` for false.
fn bool_cell(value: bool) -> i32 {
    if value {
        -1
    } else {
        0
    }
}

pub fn execute(interpreter: &mut Interpreter, id: PrimitiveId) -> Result<()> {
    match id {
        PrimitiveId::Negate | PrimitiveId::Not => {
            let a = interpreter.pop()?;
            let result = match id {
                PrimitiveId::Negate => -a,
                PrimitiveId::Not => !a,
                _ => unreachable!(),
            };
            interpreter.push(result)
        }
        _ => {
            let b = interpreter.pop()?;
            let a = interpreter.pop()?;
            if matches!(id, PrimitiveId::Div | PrimitiveId::Mod) && b == 0 {
                return Err(ColorForthError::divide_by_zero());
            }
            let result = match id {
                PrimitiveId::Add => a.wrapping_add(b),
                PrimitiveId::Sub => a.wrapping_sub(b),
                PrimitiveId::Mul => a.wrapping_mul(b),
                PrimitiveId::Div => a.wrapping_div(b),
                PrimitiveId::Mod => a.wrapping_rem(b),
                PrimitiveId::Ne => bool_cell(a != b),
                PrimitiveId::Eq => bool_cell(a == b),
                PrimitiveId::Lt => bool_cell(a < b),
                PrimitiveId::Gt => bool_cell(a > b),
                PrimitiveId::Le => bool_cell(a <= b),
                PrimitiveId::Ge => bool_cell(a >= b),
                PrimitiveId::And => a & b,
                PrimitiveId::Or => a | b,
                PrimitiveId::Xor => a ^ b,
                _ => unreachable!(),
            };
            interpreter.push(result)
        }
    }
}
