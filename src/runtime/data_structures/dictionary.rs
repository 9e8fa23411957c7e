use std::fmt::{self, Display, Formatter};

use crate::lang::cell::Cell;

/// Which of the two dictionaries an entry lives in, or is being looked up in.
///
/// Primitive words `forth` and `macro` flip the interpreter's selected dictionary; `create_word`
/// always inserts into whichever one is currently selected.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Selected {
    Forth,
    Macro,
}

impl Default for Selected {
    fn default() -> Self {
        Selected::Forth
    }
}

/// Where a dictionary entry's codeword points.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CodeAddress {
    /// A native, built-in routine.
    Primitive(crate::runtime::built_ins::PrimitiveId),

    /// The heap index of the first instruction of a colon definition or a variable's codeword,
    /// both an `Exit`-terminated run of instructions entered the same way.
    Definition(usize),
}

/// A single entry in a dictionary: a packed name and where its codeword lives.
#[derive(Clone, Copy, Debug)]
pub struct DictEntry {
    /// The packed name, upper 28 bits significant; the low nibble is always zero.
    pub name: Cell,

    /// The codeword to invoke via the inner interpreter.
    pub address: CodeAddress,
}

impl DictEntry {
    pub fn new(name: Cell, address: CodeAddress) -> DictEntry {
        DictEntry {
            name: Cell::new(name.masked_name()),
            address,
        }
    }
}

/// An insertion-ordered collection of named entries.
///
/// Lookup scans from the most recently inserted entry backwards, so a later definition shadows
/// an earlier one with the same name. There is no reclamation: entries live until the owning
/// interpreter is dropped.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: Vec<DictEntry>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            entries: Vec::new(),
        }
    }

    /// Append a new entry. A name already present is shadowed, not replaced or removed.
    pub fn insert(&mut self, entry: DictEntry) {
        self.entries.push(entry);
    }

    /// Look up a name, comparing only the upper 28 bits. Returns the most recently inserted
    /// match, or `None`.
    pub fn lookup(&self, name: Cell) -> Option<&DictEntry> {
        let masked = name.masked_name();
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.name.masked_name() == masked)
    }

    /// How many entries (including shadowed ones) this dictionary holds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Dictionary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{} words defined.", self.entries.len())?;

        for entry in self.entries.iter().rev() {
            writeln!(
                f,
                "{}  {}",
                crate::lang::codec::unpack(entry.name),
                match entry.address {
                    CodeAddress::Primitive(id) => format!("<primitive {:?}>", id),
                    CodeAddress::Definition(index) => format!("<definition @ {}>", index),
                }
            )?;
        }

        Ok(())
    }
}
