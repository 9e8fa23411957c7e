//! End-to-end cell-sequence scenarios through the public `ColorForth` embedding API.

use colorforth::api::ColorForth;
use colorforth::lang::cell::{Cell, ColorTag};
use colorforth::runtime::config::Config;
use colorforth::runtime::data_structures::dictionary::Selected;

fn forth() -> ColorForth {
    ColorForth::initialize(Config::default())
}

fn word(name: &str, tag: ColorTag) -> Cell {
    Cell::new(ColorForth::pack(name).unwrap().value() | tag.as_nibble() as i32)
}

fn number(value: i32, tag: ColorTag) -> Cell {
    Cell::from_number(value, tag)
}

fn feed(colorforth: &mut ColorForth, cells: &[Cell]) {
    for &cell in cells {
        colorforth.do_word(cell).unwrap();
    }
}

#[test]
fn literal_load_pushes_the_sum_of_two_numbers() {
    let mut colorforth = forth();
    feed(
        &mut colorforth,
        &[
            number(1, ColorTag::InterpretNumber),
            number(2, ColorTag::InterpretNumber),
            word("+", ColorTag::ExecuteWord),
        ],
    );
    assert_eq!(colorforth.dot_s(), "3");
}

#[test]
fn a_colon_definition_can_be_called_after_it_is_defined() {
    let mut colorforth = forth();
    // : inc 1 + ;
    feed(
        &mut colorforth,
        &[
            word("inc", ColorTag::DefineWord),
            number(1, ColorTag::CompileNumber),
            word("+", ColorTag::CompileWord),
            word(";", ColorTag::CompileWord),
        ],
    );

    feed(
        &mut colorforth,
        &[number(10, ColorTag::InterpretNumber), word("inc", ColorTag::ExecuteWord)],
    );
    assert_eq!(colorforth.dot_s(), "11");
}

#[test]
fn a_variable_stores_and_fetches_its_value() {
    let mut colorforth = forth();
    feed(&mut colorforth, &[word("x", ColorTag::DefineVariable)]);

    feed(
        &mut colorforth,
        &[
            number(5, ColorTag::InterpretNumber),
            word("x", ColorTag::ExecuteWord),
            word("!", ColorTag::ExecuteWord),
        ],
    );
    assert!(colorforth.dot_s().is_empty());

    feed(
        &mut colorforth,
        &[word("x", ColorTag::ExecuteWord), word("@", ColorTag::ExecuteWord)],
    );
    assert_eq!(colorforth.dot_s(), "5");
}

#[test]
fn abs_negates_only_when_the_input_is_negative() {
    let mut colorforth = forth();
    // : abs dup 0 lt if negate then ;
    feed(
        &mut colorforth,
        &[
            word("abs", ColorTag::DefineWord),
            word("dup", ColorTag::CompileWord),
            number(0, ColorTag::CompileNumber),
            word("lt", ColorTag::CompileWord),
            word("if", ColorTag::CompileWord),
            word("negate", ColorTag::CompileWord),
            word("then", ColorTag::CompileWord),
            word(";", ColorTag::CompileWord),
        ],
    );

    feed(
        &mut colorforth,
        &[number(-7, ColorTag::InterpretNumber), word("abs", ColorTag::ExecuteWord)],
    );
    assert_eq!(colorforth.dot_s(), "7");

    feed(
        &mut colorforth,
        &[number(7, ColorTag::InterpretNumber), word("abs", ColorTag::ExecuteWord)],
    );
    assert_eq!(colorforth.dot_s(), "7 7");
}

#[test]
fn sum_totals_the_loop_counter_across_a_for_next_range() {
    let mut colorforth = forth();
    // : sum 0 swap for i + next ;
    feed(
        &mut colorforth,
        &[
            word("sum", ColorTag::DefineWord),
            number(0, ColorTag::CompileNumber),
            // `swap` lives in the macro dictionary but is tagged `CompileMacro` here, so its
            // call is compiled for runtime rather than run immediately against the empty
            // compile-time stack the way a `CompileWord`-tagged hit would be.
            word("swap", ColorTag::CompileMacro),
            word("for", ColorTag::CompileWord),
            word("i", ColorTag::CompileWord),
            word("+", ColorTag::CompileWord),
            word("next", ColorTag::CompileWord),
            word(";", ColorTag::CompileWord),
        ],
    );

    feed(
        &mut colorforth,
        &[number(5, ColorTag::InterpretNumber), word("sum", ColorTag::ExecuteWord)],
    );
    assert_eq!(colorforth.dot_s(), "15");
}

#[test]
fn a_colon_definition_placed_in_the_macro_dictionary_runs_immediately_on_a_compile_word_hit() {
    let mut colorforth = forth();

    // macro : neg negate ; forth
    feed(
        &mut colorforth,
        &[
            word("macro", ColorTag::ExecuteWord),
            word("neg", ColorTag::DefineWord),
            word("negate", ColorTag::CompileWord),
            word(";", ColorTag::CompileWord),
            word("forth", ColorTag::ExecuteWord),
        ],
    );
    assert!(colorforth
        .lookup(word("neg", ColorTag::ExecuteWord), Selected::Macro)
        .is_some());

    // A compile-tagged hit on a macro-dictionary word runs its body immediately against the
    // live data stack rather than compiling a call to it.
    feed(
        &mut colorforth,
        &[number(3, ColorTag::InterpretNumber), word("neg", ColorTag::CompileWord)],
    );
    assert_eq!(colorforth.dot_s(), "-3");
}
