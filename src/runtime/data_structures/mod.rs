/// The forth and macro dictionaries: named entries mapping packed names to codewords.
pub mod dictionary;

/// The code heap: a linear arena of tagged instructions built by the compiler.
pub mod heap;

/// The data stack and the return/loop stack.
pub mod stacks;
