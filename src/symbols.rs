//! The generated symbol table.
//!
//! The table is Rust source meant to be included by the application.
//! It declares the font handle followed by one `char` constant per icon:
//!
//! ```text
//! pub const FONT: iced::Font = iced::Font::with_name("icons");
//! pub const MY_ICON: char = '\u{E000}';
//! ```

use std::fmt;

/// The name of the constant declaring the font handle.
pub const FONT_SYMBOL: &str = "FONT";

/// The constants naming the code points of an icon font.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct SymbolTable {
    /// The name of the font the code points belong to.
    pub font_name: String,
    /// The symbol name and code point of every icon in assignment order.
    pub symbols: Vec<(String, char)>,
}

impl SymbolTable {
    /// Creates an empty table for the font `font_name`.
    pub fn new(font_name: &str) -> Self {
        SymbolTable {
            font_name: font_name.to_string(),
            symbols: Vec::new(),
        }
    }

    /// Appends the constant `symbol` for `code_point`.
    pub fn push(&mut self, symbol: &str, code_point: char) {
        self.symbols.push((symbol.to_string(), code_point));
    }

    /// Returns the table as Rust source.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "pub const {}: iced::Font = iced::Font::with_name({:?});",
            FONT_SYMBOL, self.font_name
        )?;

        for (symbol, code_point) in &self.symbols {
            writeln!(
                f,
                "pub const {}: char = '\\u{{{:04X}}}';",
                symbol, *code_point as u32
            )?;
        }

        Ok(())
    }
}
