//! Textual type references
//!
//! Marker arguments and member signatures refer to types by text, for example
//! `IWidgetFactory`, `Acme.IFactory<Foo, U>` or the unbound form `IFactory<,>`.
//! [`TypeRef`] is the parsed form of such a reference.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SymbolError};

/// A parsed type reference
///
/// An argument with an empty name is an unbound position (`IFactory<,>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeRef {
    /// Possibly qualified name without type arguments (`Acme.IFactory`)
    pub name: String,
    /// Type arguments in declaration order
    pub arguments: Vec<TypeRef>,
    /// Array and nullable markers following the reference (`[]`, `?`)
    pub suffix: String,
}

impl TypeRef {
    /// Creates a non-generic reference
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            suffix: String::new(),
        }
    }

    /// Creates a generic reference
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            arguments,
            suffix: String::new(),
        }
    }

    /// Creates an unbound argument position
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Parses a textual type reference
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = Parser {
            text,
            chars: text.char_indices().collect(),
            pos: 0,
        };
        parser.skip_ws();
        let parsed = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos < parser.chars.len() {
            return Err(parser.error("unexpected trailing characters"));
        }
        if parsed.is_unbound() {
            return Err(parser.error("empty type reference"));
        }
        Ok(parsed)
    }

    /// Number of type arguments
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Whether this is an unbound argument position
    pub fn is_unbound(&self) -> bool {
        self.name.is_empty()
    }

    /// Whether every argument position is unbound (`IFactory<,>`)
    pub fn is_unbound_generic(&self) -> bool {
        !self.arguments.is_empty() && self.arguments.iter().all(TypeRef::is_unbound)
    }

    /// Whether the name carries a namespace qualifier
    pub fn is_qualified(&self) -> bool {
        self.name.contains('.') || self.name.contains("::")
    }

    /// Last segment of the name (`IFactory` for `Acme.IFactory`)
    pub fn simple_name(&self) -> &str {
        let trimmed = self
            .name
            .rsplit("::")
            .next()
            .unwrap_or(self.name.as_str());
        trimmed.rsplit('.').next().unwrap_or(trimmed)
    }

    /// Name with the `global::` alias removed
    pub fn unaliased_name(&self) -> &str {
        self.name.strip_prefix("global::").unwrap_or(&self.name)
    }

    /// Metadata-style name (`Acme.IFactory`2`)
    pub fn metadata_name(&self) -> String {
        if self.arguments.is_empty() {
            self.unaliased_name().to_string()
        } else {
            format!("{}`{}", self.unaliased_name(), self.arguments.len())
        }
    }

    /// Replaces references to type parameters by their bindings
    ///
    /// Only bare names (no arguments, no qualifier) are substituted; the
    /// suffix of the replaced reference is kept.
    pub fn substitute(&self, bindings: &HashMap<String, TypeRef>) -> TypeRef {
        if self.arguments.is_empty() {
            if let Some(bound) = bindings.get(&self.name) {
                let mut replaced = bound.clone();
                replaced.suffix.push_str(&self.suffix);
                return replaced;
            }
        }
        TypeRef {
            name: self.name.clone(),
            arguments: self
                .arguments
                .iter()
                .map(|argument| argument.substitute(bindings))
                .collect(),
            suffix: self.suffix.clone(),
        }
    }

    /// Whether the reference mentions `name` anywhere
    pub fn mentions(&self, name: &str) -> bool {
        (self.arguments.is_empty() && self.name == name)
            || self.arguments.iter().any(|argument| argument.mentions(name))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            let separator = if self.is_unbound_generic() { "," } else { ", " };
            let rendered: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", rendered.join(separator))?;
        }
        f.write_str(&self.suffix)
    }
}

impl FromStr for TypeRef {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self> {
        TypeRef::parse(s)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        TypeRef::parse(&text).map_err(serde::de::Error::custom)
    }
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> SymbolError {
        SymbolError::InvalidTypeReference {
            text: self.text.to_string(),
            message: format!("{} at offset {}", message, self.offset()),
        }
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.text.len())
    }

    fn is_name_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '@' || c == '.' || c == ':'
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_name_char) {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().map(|(_, c)| *c).collect();
        if name.is_empty() {
            // Unbound position inside an argument list.
            return Ok(TypeRef::unbound());
        }
        if name.starts_with('.') || name.ends_with('.') || name.ends_with(':') {
            return Err(self.error("malformed name"));
        }

        let mut arguments = Vec::new();
        self.skip_ws();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                self.skip_ws();
                arguments.push(self.parse_type()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error("expected ',' or '>'")),
                }
            }
        }

        let mut suffix = String::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some('?') => {
                    suffix.push('?');
                    self.pos += 1;
                }
                Some('[') => {
                    suffix.push('[');
                    self.pos += 1;
                    while self.peek() == Some(',') {
                        suffix.push(',');
                        self.pos += 1;
                    }
                    if self.peek() != Some(']') {
                        return Err(self.error("expected ']'"));
                    }
                    suffix.push(']');
                    self.pos += 1;
                }
                _ => break,
            }
        }

        Ok(TypeRef {
            name,
            arguments,
            suffix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let parsed = TypeRef::parse("IWidgetFactory").unwrap();
        assert_eq!(parsed.name, "IWidgetFactory");
        assert_eq!(parsed.arity(), 0);
        assert!(!parsed.is_qualified());
    }

    #[test]
    fn test_parse_partially_closed_generic() {
        let parsed = TypeRef::parse("Acme.IFactory<Foo, U>").unwrap();
        assert_eq!(parsed.name, "Acme.IFactory");
        assert_eq!(parsed.arity(), 2);
        assert_eq!(parsed.arguments[0], TypeRef::simple("Foo"));
        assert_eq!(parsed.arguments[1], TypeRef::simple("U"));
        assert_eq!(parsed.simple_name(), "IFactory");
        assert_eq!(parsed.metadata_name(), "Acme.IFactory`2");
    }

    #[test]
    fn test_parse_unbound_generic() {
        let parsed = TypeRef::parse("IFactory<,>").unwrap();
        assert_eq!(parsed.arity(), 2);
        assert!(parsed.is_unbound_generic());
        assert_eq!(parsed.to_string(), "IFactory<,>");
    }

    #[test]
    fn test_parse_nested_with_suffix() {
        let parsed = TypeRef::parse("Dictionary<string, List<int?>>[]").unwrap();
        assert_eq!(parsed.suffix, "[]");
        assert_eq!(parsed.arguments[1].arguments[0].suffix, "?");
        assert_eq!(parsed.to_string(), "Dictionary<string, List<int?>>[]");
    }

    #[test]
    fn test_parse_global_alias() {
        let parsed = TypeRef::parse("global::System.IDisposable").unwrap();
        assert_eq!(parsed.unaliased_name(), "System.IDisposable");
        assert_eq!(parsed.simple_name(), "IDisposable");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TypeRef::parse("").is_err());
        assert!(TypeRef::parse("IFactory<Foo").is_err());
        assert!(TypeRef::parse("IFactory<Foo>>").is_err());
        assert!(TypeRef::parse("Acme.").is_err());
    }

    #[test]
    fn test_substitute_bindings() {
        let parsed = TypeRef::parse("IEnumerable<T[]>").unwrap();
        let mut bindings = HashMap::new();
        bindings.insert("T".to_string(), TypeRef::simple("Acme.Foo"));
        assert_eq!(parsed.substitute(&bindings).to_string(), "IEnumerable<Acme.Foo[]>");
    }

    #[test]
    fn test_mentions() {
        let parsed = TypeRef::parse("IFactory<List<U>>").unwrap();
        assert!(parsed.mentions("U"));
        assert!(!parsed.mentions("T"));
    }

    #[test]
    fn test_serde_as_string() {
        let parsed = TypeRef::parse("IFactory<Foo, U>").unwrap();
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "\"IFactory<Foo, U>\"");
        let back: TypeRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parsed);
    }
}
