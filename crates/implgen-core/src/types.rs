//! Type references as the generator sees them.
//!
//! A [`TypeRef`] is the generator's view of a semantic type: a primitive, a
//! declared (possibly parameterized) type, an array or a wildcard. Two
//! references are the same type iff they are structurally equal, which is the
//! nominal equality the attribute merge rules rely on.
//!
//! # Text Form
//!
//! Catalog snapshots and configuration files spell types in Java syntax:
//!
//! ```text
//! type := primitive
//!       | '?' (('extends' | 'super') type)?
//!       | name ('<' type (',' type)* '>')? ('[]')*
//! ```
//!
//! ```
//! use implgen_core::TypeRef;
//!
//! let ty: TypeRef = "java.util.Map<java.lang.String, int[]>".parse().unwrap();
//! assert_eq!(ty.to_string(), "java.util.Map<java.lang.String, int[]>");
//! ```

use crate::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Java primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Char,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// The source keyword (e.g. `int`).
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// The wrapper class used where a reference type is required.
    pub fn boxed(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "java.lang.Boolean",
            PrimitiveKind::Byte => "java.lang.Byte",
            PrimitiveKind::Short => "java.lang.Short",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Char => "java.lang.Character",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Double => "java.lang.Double",
        }
    }

    /// The zero value literal, typed so it can initialize a local of this kind.
    pub fn default_literal(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "false",
            PrimitiveKind::Byte => "(byte) 0",
            PrimitiveKind::Short => "(short) 0",
            PrimitiveKind::Int => "0",
            PrimitiveKind::Long => "0L",
            PrimitiveKind::Char => "(char) 0",
            PrimitiveKind::Float => "0.0f",
            PrimitiveKind::Double => "0.0d",
        }
    }

    /// Look up a primitive by its keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Bound of a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

/// A reference to a semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// Primitive type.
    Primitive(PrimitiveKind),

    /// Class or interface type, with type arguments if parameterized.
    Declared {
        name: String,
        arguments: Vec<TypeRef>,
    },

    /// Array type.
    Array(Box<TypeRef>),

    /// Wildcard type argument.
    Wildcard(Option<WildcardBound>),
}

impl TypeRef {
    /// Primitive type reference.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeRef::Primitive(kind)
    }

    /// Non-generic declared type reference.
    pub fn declared(name: impl Into<String>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Parameterized declared type reference.
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            arguments,
        }
    }

    /// Array of `component`.
    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// Parse the text form.
    pub fn parse(text: &str) -> GenerationResult<Self> {
        TypeParser::new(text).parse_all()
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            TypeRef::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    /// True for `boolean` and its wrapper class.
    pub fn is_boolean(&self) -> bool {
        match self {
            TypeRef::Primitive(kind) => *kind == PrimitiveKind::Boolean,
            TypeRef::Declared { name, arguments } => {
                arguments.is_empty() && (name == "java.lang.Boolean" || name == "Boolean")
            }
            _ => false,
        }
    }

    /// The reference type to use where primitives are not allowed.
    pub fn boxed(&self) -> TypeRef {
        match self {
            TypeRef::Primitive(kind) => TypeRef::declared(kind.boxed()),
            other => other.clone(),
        }
    }

    /// Type with its type arguments removed (the raw type).
    pub fn erasure(&self) -> TypeRef {
        match self {
            TypeRef::Declared { name, .. } => TypeRef::declared(name.clone()),
            TypeRef::Array(component) => TypeRef::array(component.erasure()),
            other => other.clone(),
        }
    }

    /// Type arguments of a declared type; empty for anything else.
    pub fn arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Declared { arguments, .. } => arguments,
            _ => &[],
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(kind) => write!(f, "{kind}"),
            TypeRef::Declared { name, arguments } => {
                f.write_str(name)?;
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Array(component) => write!(f, "{component}[]"),
            TypeRef::Wildcard(None) => f.write_str("?"),
            TypeRef::Wildcard(Some(WildcardBound::Extends(bound))) => {
                write!(f, "? extends {bound}")
            }
            TypeRef::Wildcard(Some(WildcardBound::Super(bound))) => write!(f, "? super {bound}"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeRef::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeRef::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// A type parameter declared on a type, e.g. `T extends Comparable<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,

    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            f.write_str(if i == 0 { " extends " } else { " & " })?;
            write!(f, "{bound}")?;
        }
        Ok(())
    }
}

/// Access modifier of a generated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    /// Package-private (no modifier).
    #[serde(alias = "package")]
    Default,
    Protected,
    #[default]
    Public,
}

impl Visibility {
    /// Source keyword; empty for package-private.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Default => "",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }

    /// Keyword followed by a space, or nothing for package-private.
    pub fn prefix(self) -> &'static str {
        match self {
            Visibility::Private => "private ",
            Visibility::Default => "",
            Visibility::Protected => "protected ",
            Visibility::Public => "public ",
        }
    }
}

const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "null", "package", "private", "protected", "public", "return",
    "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// True if `word` is a Java keyword or literal.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// True if `word` is a usable Java identifier.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => {
            chars.all(is_identifier_part) && !is_reserved_word(word)
        }
        _ => false,
    }
}

/// True if every dot-separated segment of `name` is an identifier.
pub fn is_qualified_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Recursive-descent parser for the type text form.
struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse_all(mut self) -> GenerationResult<TypeRef> {
        let ty = self.parse_type()?;
        self.skip_whitespace();
        if self.pos != self.input.len() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    fn parse_type(&mut self) -> GenerationResult<TypeRef> {
        self.skip_whitespace();

        if self.eat('?') {
            self.skip_whitespace();
            let bound = if self.eat_keyword("extends") {
                Some(WildcardBound::Extends(Box::new(self.parse_type()?)))
            } else if self.eat_keyword("super") {
                Some(WildcardBound::Super(Box::new(self.parse_type()?)))
            } else {
                None
            };
            return Ok(TypeRef::Wildcard(bound));
        }

        let name = self.parse_name()?;
        let mut ty = match PrimitiveKind::from_keyword(&name) {
            Some(kind) => TypeRef::Primitive(kind),
            None => {
                self.skip_whitespace();
                let mut arguments = Vec::new();
                if self.eat('<') {
                    loop {
                        arguments.push(self.parse_type()?);
                        self.skip_whitespace();
                        if self.eat(',') {
                            continue;
                        }
                        if self.eat('>') {
                            break;
                        }
                        return Err(self.error("expected ',' or '>'"));
                    }
                }
                TypeRef::Declared { name, arguments }
            }
        };

        loop {
            self.skip_whitespace();
            if self.rest().starts_with("[]") {
                self.pos += 2;
                ty = TypeRef::Array(Box::new(ty));
            } else {
                break;
            }
        }

        Ok(ty)
    }

    fn parse_name(&mut self) -> GenerationResult<String> {
        let start = self.pos;
        loop {
            let segment_start = self.pos;
            while let Some(c) = self.peek() {
                let accepted = if self.pos == segment_start {
                    is_identifier_start(c)
                } else {
                    is_identifier_part(c)
                };
                if !accepted {
                    break;
                }
                self.pos += c.len_utf8();
            }
            if self.pos == segment_start {
                return Err(self.error("expected identifier"));
            }
            if self.peek() == Some('.') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(keyword) {
            return false;
        }
        let boundary = rest[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_identifier_part(c));
        if boundary {
            self.pos += keyword.len();
        }
        boundary
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, message: &str) -> GenerationError {
        GenerationError::MalformedTypeDescriptor(format!(
            "{message} at offset {} in type '{}'",
            self.pos, self.input
        ))
    }
}
