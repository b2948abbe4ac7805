//! Stylesheet reader for batch-validated (v4) design systems.
//!
//! Only the directives that define the catalogue are interpreted:
//!
//! - `@utility name { property: value; … }` adds a static utility;
//!   `@utility name-* { property: --value([*]); … }` adds a functional one.
//! - `@custom-variant name (&:hover);` or `@custom-variant name (@media …);`
//!   adds a variant.
//!
//! Every other rule, at-rule and statement is skipped. Comments may appear
//! anywhere whitespace may.

use tailmark_core::CatalogError;
use tracing::debug;

use crate::catalog::{UtilityCatalog, ValueTemplate, Variant};

const STYLESHEET_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::stylesheet");

const FUNCTIONAL_SUFFIX: &str = "-*";
const VALUE_FUNCTION: &str = "--value(";

/// Reads `css` into `catalog`, adding to what it already holds.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidStylesheet`] for an unterminated block or
/// comment, a nested block inside `@utility`, a declaration without `:`, or
/// a malformed `@custom-variant`.
pub fn read_stylesheet(css: &str, catalog: &mut UtilityCatalog) -> Result<(), CatalogError> {
    let mut scanner = Scanner::new(css);
    loop {
        scanner.skip_trivia()?;
        let Some(next) = scanner.peek() else {
            return Ok(());
        };
        if next == '@' {
            scanner.bump();
            read_at_rule(&mut scanner, catalog)?;
        } else {
            let line = scanner.line;
            scanner.read_until(&['{', ';']);
            match scanner.bump() {
                Some('{') => scanner.skip_block(line)?,
                Some(_) => {}
                None => {
                    return Err(CatalogError::invalid_stylesheet(line, "unterminated rule"));
                }
            }
        }
    }
}

fn read_at_rule(
    scanner: &mut Scanner<'_>,
    catalog: &mut UtilityCatalog,
) -> Result<(), CatalogError> {
    let line = scanner.line;
    let name = scanner.read_ident();
    let prelude = scanner.read_until(&['{', ';']).trim();
    let terminator = scanner.bump();

    match (name, terminator) {
        ("utility", Some('{')) => {
            let declarations = read_declarations(scanner, line)?;
            add_utility(catalog, prelude, declarations, line)
        }
        ("custom-variant", Some(';')) => {
            let (variant_name, variant) = parse_custom_variant(prelude, line)?;
            catalog.add_variant(variant_name, variant);
            Ok(())
        }
        (_, Some('{')) => {
            debug!(target: STYLESHEET_TARGET, at_rule = name, line, "skipping block");
            scanner.skip_block(line)
        }
        (_, Some(_)) => Ok(()),
        (_, None) => Err(CatalogError::invalid_stylesheet(
            line,
            format!("unterminated @{name}"),
        )),
    }
}

fn add_utility(
    catalog: &mut UtilityCatalog,
    name: &str,
    declarations: Vec<(String, String)>,
    line: u32,
) -> Result<(), CatalogError> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(CatalogError::invalid_stylesheet(
            line,
            format!("invalid utility name `{name}`"),
        ));
    }
    if let Some(prefix) = name.strip_suffix(FUNCTIONAL_SUFFIX) {
        let templates = declarations
            .into_iter()
            .map(|(property, value)| {
                let template = if value.trim_start().starts_with(VALUE_FUNCTION) {
                    ValueTemplate::Arbitrary
                } else {
                    ValueTemplate::Fixed(value)
                };
                (property, template)
            })
            .collect();
        catalog.add_functional(prefix, templates);
    } else {
        catalog.add_utility(name, declarations);
    }
    Ok(())
}

fn parse_custom_variant(prelude: &str, line: u32) -> Result<(String, Variant), CatalogError> {
    let invalid =
        || CatalogError::invalid_stylesheet(line, format!("invalid @custom-variant `{prelude}`"));
    let (name, rest) = prelude.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let template = rest
        .trim()
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let variant = Variant::parse(template).ok_or_else(invalid)?;
    Ok((name.to_owned(), variant))
}

fn read_declarations(
    scanner: &mut Scanner<'_>,
    block_line: u32,
) -> Result<Vec<(String, String)>, CatalogError> {
    let mut declarations = Vec::new();
    loop {
        scanner.skip_trivia()?;
        match scanner.peek() {
            None => {
                return Err(CatalogError::invalid_stylesheet(
                    block_line,
                    "unterminated @utility block",
                ));
            }
            Some('}') => {
                scanner.bump();
                return Ok(declarations);
            }
            Some(_) => {}
        }

        let line = scanner.line;
        let text = scanner.read_until(&[';', '}', '{']).trim();
        if scanner.peek() == Some('{') {
            return Err(CatalogError::invalid_stylesheet(
                line,
                "nested blocks are not supported inside @utility",
            ));
        }
        if scanner.peek() == Some(';') {
            scanner.bump();
        }
        let (property, value) = text.split_once(':').ok_or_else(|| {
            CatalogError::invalid_stylesheet(
                line,
                format!("expected `property: value`, found `{text}`"),
            )
        })?;
        declarations.push((property.trim().to_owned(), value.trim().to_owned()));
    }
}

/// Character cursor with line tracking.
struct Scanner<'a> {
    text: &'a str,
    offset: usize,
    line: u32,
}

impl<'a> Scanner<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.offset..).unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), CatalogError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            }
            if !self.rest().starts_with("/*") {
                return Ok(());
            }
            let line = self.line;
            self.bump();
            self.bump();
            loop {
                if self.rest().starts_with("*/") {
                    self.bump();
                    self.bump();
                    break;
                }
                if self.bump().is_none() {
                    return Err(CatalogError::invalid_stylesheet(line, "unterminated comment"));
                }
            }
        }
    }

    /// Consumes characters up to, not including, any of `stops`.
    fn read_until(&mut self, stops: &[char]) -> &'a str {
        let start = self.offset;
        while self.peek().is_some_and(|ch| !stops.contains(&ch)) {
            self.bump();
        }
        self.text.get(start..self.offset).unwrap_or_default()
    }

    fn read_ident(&mut self) -> &'a str {
        let start = self.offset;
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        {
            self.bump();
        }
        self.text.get(start..self.offset).unwrap_or_default()
    }

    /// Skips to the brace closing a block whose `{` was just consumed.
    fn skip_block(&mut self, line: u32) -> Result<(), CatalogError> {
        let mut depth = 1_usize;
        while depth > 0 {
            match self.bump() {
                Some('{') => depth += 1,
                Some('}') => depth -= 1,
                Some(_) => {}
                None => return Err(CatalogError::invalid_stylesheet(line, "unterminated block")),
            }
        }
        Ok(())
    }
}
