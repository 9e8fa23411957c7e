use crate::runtime::built_ins::{define, PrimitiveId};
use crate::runtime::data_structures::dictionary::Selected;
use crate::runtime::data_structures::stacks::Frame;
use crate::runtime::error::{ColorForthError, ErrorKind, Result};
use crate::runtime::interpreter::Interpreter;

pub fn register(interpreter: &mut Interpreter) -> Result<()> {
    define(interpreter, "dup", PrimitiveId::Dup, Selected::Forth)?;
    define(interpreter, "drop", PrimitiveId::Drop, Selected::Forth)?;
    define(interpreter, "nip", PrimitiveId::Nip, Selected::Forth)?;
    define(interpreter, "over", PrimitiveId::Over, Selected::Forth)?;
    define(interpreter, ".", PrimitiveId::Dot, Selected::Forth)?;
    define(interpreter, "dot_s", PrimitiveId::DotS, Selected::Forth)?;
    define(interpreter, "i", PrimitiveId::I, Selected::Forth)?;

    define(interpreter, "rdrop", PrimitiveId::RDrop, Selected::Macro)?;
    define(interpreter, "swap", PrimitiveId::Swap, Selected::Macro)?;

    Ok(())
}

pub fn execute(interpreter: &mut Interpreter, id: PrimitiveId) -> Result<()> {
    match id {
        PrimitiveId::Dup => {
            let value = interpreter.pop()?;
            interpreter.push(value)?;
            interpreter.push(value)
        }
        PrimitiveId::Drop => {
            interpreter.pop()?;
            Ok(())
        }
        PrimitiveId::Nip => {
            let top = interpreter.pop()?;
            interpreter.pop()?;
            interpreter.push(top)
        }
        PrimitiveId::Over => {
            let b = interpreter.pop()?;
            let a = interpreter.pop()?;
            interpreter.push(a)?;
            interpreter.push(b)?;
            interpreter.push(a)
        }
        PrimitiveId::Swap => {
            let b = interpreter.pop()?;
            let a = interpreter.pop()?;
            interpreter.push(b)?;
            interpreter.push(a)
        }
        PrimitiveId::Dot => {
            let value = interpreter.pop()?;
            print!("{} ", value);
            Ok(())
        }
        PrimitiveId::DotS => {
            print!("{} ", interpreter.dot_s());
            Ok(())
        }
        PrimitiveId::I => match interpreter.rtop()? {
            Frame::Loop(count) => interpreter.push(count),
            Frame::Return(_) => Err(ColorForthError::new(ErrorKind::OutOfRange(
                "'i' used outside a for/next loop".to_string(),
            ))),
        },
        PrimitiveId::RDrop => match interpreter.rpop() {
            Some(_) => Ok(()),
            None => Err(ColorForthError::return_stack_underflow()),
        },
        _ => unreachable!("stack_words::execute received a non-stack primitive"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::config::Config;

    fn interp() -> Interpreter {
        Interpreter::new(&Config::default())
    }

    #[test]
    fn dup_duplicates_the_top() {
        let mut interp = interp();
        interp.push(5).unwrap();
        execute(&mut interp, PrimitiveId::Dup).unwrap();
        assert_eq!(interp.pop().unwrap(), 5);
        assert_eq!(interp.pop().unwrap(), 5);
    }

    #[test]
    fn swap_exchanges_the_top_two() {
        let mut interp = interp();
        interp.push(1).unwrap();
        interp.push(2).unwrap();
        execute(&mut interp, PrimitiveId::Swap).unwrap();
        assert_eq!(interp.pop().unwrap(), 1);
        assert_eq!(interp.pop().unwrap(), 2);
    }

    #[test]
    fn over_copies_the_second_item_to_the_top() {
        let mut interp = interp();
        interp.push(1).unwrap();
        interp.push(2).unwrap();
        execute(&mut interp, PrimitiveId::Over).unwrap();
        assert_eq!(interp.pop().unwrap(), 1);
        assert_eq!(interp.pop().unwrap(), 2);
        assert_eq!(interp.pop().unwrap(), 1);
    }

    #[test]
    fn i_copies_the_loop_counter_without_consuming_it() {
        let mut interp = interp();
        interp.rpush(Frame::Loop(3)).unwrap();
        execute(&mut interp, PrimitiveId::I).unwrap();
        assert_eq!(interp.pop().unwrap(), 3);
        assert_eq!(interp.rtop().unwrap(), Frame::Loop(3));
    }

    #[test]
    fn rdrop_discards_one_return_stack_frame() {
        let mut interp = interp();
        interp.rpush(Frame::Loop(1)).unwrap();
        execute(&mut interp, PrimitiveId::RDrop).unwrap();
        assert!(interp.rtop().is_err());
    }
}
