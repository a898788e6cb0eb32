//! Token scanner for the narrow grammar subset of generated files
//!
//! Generated files only need a handful of constructs to be understood:
//! leading import statements, call expressions taking an object literal,
//! `const` bindings initialised with an array literal, single-level object and
//! array literals, and JSX `{children}` slots. Everything else is skipped as
//! balanced token runs, which keeps the scanner tolerant of arbitrary
//! expressions inside values without needing a full grammar.

use logos::Logos;
use std::ops::Range;

/// Lexical classes of the grammar subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Str,
    Number,
    Spread,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semi,
    Dot,
    Eq,
    Lt,
    Gt,
    /// Any character the grammar subset does not name.
    Other,
}

/// Raw lexemes. Whitespace is skipped; comments are kept so the idempotency
/// guard can ignore them.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    #[regex(r"//[^\n]*")]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    #[regex(r"`([^`\\]|\\.)*`")]
    Str,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?")]
    Number,

    #[token("...")]
    Spread,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(";")]
    Semi,

    #[token(".")]
    Dot,

    #[token("=")]
    Eq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,
}

impl Lexeme {
    /// `None` for comments.
    fn token_kind(self) -> Option<TokenKind> {
        Some(match self {
            Self::Comment => return None,
            Self::Ident => TokenKind::Ident,
            Self::Str => TokenKind::Str,
            Self::Number => TokenKind::Number,
            Self::Spread => TokenKind::Spread,
            Self::LBrace => TokenKind::LBrace,
            Self::RBrace => TokenKind::RBrace,
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
            Self::LBracket => TokenKind::LBracket,
            Self::RBracket => TokenKind::RBracket,
            Self::Comma => TokenKind::Comma,
            Self::Colon => TokenKind::Colon,
            Self::Semi => TokenKind::Semi,
            Self::Dot => TokenKind::Dot,
            Self::Eq => TokenKind::Eq,
            Self::Lt => TokenKind::Lt,
            Self::Gt => TokenKind::Gt,
        })
    }
}

impl TokenKind {
    fn opens(self) -> Option<TokenKind> {
        match self {
            Self::LBrace => Some(Self::RBrace),
            Self::LParen => Some(Self::RParen),
            Self::LBracket => Some(Self::RBracket),
            _ => None,
        }
    }

    fn closes(self) -> bool {
        matches!(self, Self::RBrace | Self::RParen | Self::RBracket)
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Why a region could not be read as one of the supported literal forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("no `{0}` found")]
    NotFound(String),

    #[error("{0} is not supported")]
    Unsupported(String),

    #[error("unbalanced `{0}` at byte {1}")]
    Unbalanced(String, usize),
}

/// Which delimiter pair encloses a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Brace,
    Bracket,
}

/// One member of an object or array literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Property name for object members (unquoted), `None` for array elements.
    pub key: Option<String>,
    /// From the first to the last token of the member, excluding the comma.
    pub span: Range<usize>,
    value_token: Option<usize>,
}

/// A single-level object or array literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub delimiter: Delimiter,
    /// Span of the opening delimiter.
    pub open: Range<usize>,
    /// Span of the closing delimiter.
    pub close: Range<usize>,
    pub members: Vec<Member>,
    /// Span of a comma following the last member.
    pub trailing_comma: Option<Range<usize>>,
}

impl Literal {
    /// Full span from the opening to the closing delimiter inclusive.
    pub fn span(&self) -> Range<usize> {
        self.open.start..self.close.end
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the literal spans more than one line.
    pub fn is_multiline(&self, source: &str) -> bool {
        source[self.open.end..self.close.start].contains('\n')
    }

    pub fn member(&self, key: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.key.as_deref() == Some(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|m| m.key.as_deref())
    }
}

/// Leading directives and import statements of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBlock {
    /// End of the last directive (`"use client";`) before any import.
    pub prologue_end: Option<usize>,
    /// Start of the last leading import statement.
    pub last_import_start: Option<usize>,
    /// End of the last leading import statement.
    pub last_import_end: Option<usize>,
    pub count: usize,
}

/// Tokenised view of a source text.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    comments: Vec<Range<usize>>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut tokens = Vec::new();
        let mut comments = Vec::new();

        let mut lexer = Lexeme::lexer(source);
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            match result.map(Lexeme::token_kind) {
                Ok(Some(kind)) => tokens.push(Token { kind, span }),
                Ok(None) => comments.push(span),
                Err(()) => tokens.push(Token {
                    kind: TokenKind::Other,
                    span,
                }),
            }
        }

        Self {
            source,
            tokens,
            comments,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Code tokens, comments excluded.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Range<usize>] {
        &self.comments
    }

    /// Whether `offset` falls inside a comment.
    pub fn in_comment(&self, offset: usize) -> bool {
        self.comments
            .iter()
            .any(|c| c.start <= offset && offset < c.end)
    }

    fn text(&self, index: usize) -> &'src str {
        &self.source[self.tokens[index].span.clone()]
    }

    fn kind(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    fn is_ident(&self, index: usize, name: &str) -> bool {
        self.kind(index) == Some(TokenKind::Ident) && self.text(index) == name
    }

    /// Index of the token closing the group opened at `open`.
    fn matching(&self, open: usize) -> Result<usize, ScanError> {
        let mut stack = Vec::new();
        for index in open..self.tokens.len() {
            let kind = self.tokens[index].kind;
            if let Some(close) = kind.opens() {
                stack.push(close);
            } else if kind.closes() {
                if stack.pop() != Some(kind) {
                    return Err(self.unbalanced(index));
                }
                if stack.is_empty() {
                    return Ok(index);
                }
            }
        }
        Err(self.unbalanced(open))
    }

    fn unbalanced(&self, index: usize) -> ScanError {
        ScanError::Unbalanced(self.text(index).to_string(), self.tokens[index].span.start)
    }

    /// Token index of the `(` of the first call to `callee`.
    ///
    /// Member calls (`t.router(`) match on their last segment.
    pub fn find_call(&self, callee: &str) -> Option<usize> {
        (0..self.tokens.len().saturating_sub(1))
            .find(|&i| self.is_ident(i, callee) && self.kind(i + 1) == Some(TokenKind::LParen))
            .map(|i| i + 1)
    }

    /// The object literal passed as the first argument of `callee(...)`.
    pub fn call_object_argument(&self, callee: &str) -> Result<Literal, ScanError> {
        let paren = self
            .find_call(callee)
            .ok_or_else(|| ScanError::NotFound(format!("{callee}(...) call")))?;
        match self.kind(paren + 1) {
            Some(TokenKind::LBrace) => self.parse_literal(paren + 1),
            _ => Err(ScanError::Unsupported(format!(
                "a `{callee}(...)` call whose first argument is not an object literal"
            ))),
        }
    }

    /// The array literal a `const`/`let`/`var` binding named `name` is
    /// initialised with. A type annotation between name and `=` is skipped.
    pub fn binding_array(&self, name: &str) -> Result<Literal, ScanError> {
        let binding = (1..self.tokens.len())
            .find(|&i| {
                self.is_ident(i, name)
                    && ["const", "let", "var"]
                        .iter()
                        .any(|kw| self.is_ident(i - 1, kw))
            })
            .ok_or_else(|| ScanError::NotFound(format!("`{name}` binding")))?;

        let mut index = binding + 1;
        if self.kind(index) == Some(TokenKind::Colon) {
            index = self.skip_until(index + 1, |k| k == TokenKind::Eq)?;
        }
        if self.kind(index) != Some(TokenKind::Eq) {
            return Err(ScanError::Unsupported(format!(
                "a `{name}` binding without an initialiser"
            )));
        }
        match self.kind(index + 1) {
            Some(TokenKind::LBracket) => self.parse_literal(index + 1),
            _ => Err(ScanError::Unsupported(format!(
                "a `{name}` initialiser that is not an array literal"
            ))),
        }
    }

    /// Advance from `start` over balanced groups until a top-level token
    /// satisfying `stop` (or a closing delimiter of an enclosing group).
    fn skip_until(&self, start: usize, stop: impl Fn(TokenKind) -> bool) -> Result<usize, ScanError> {
        let mut index = start;
        while let Some(kind) = self.kind(index) {
            if stop(kind) || kind.closes() {
                return Ok(index);
            }
            index = match kind.opens() {
                Some(_) => self.matching(index)? + 1,
                None => index + 1,
            };
        }
        Ok(index)
    }

    /// Parse the object or array literal opened at token `open`.
    pub fn parse_literal(&self, open: usize) -> Result<Literal, ScanError> {
        let delimiter = match self.kind(open) {
            Some(TokenKind::LBrace) => Delimiter::Brace,
            Some(TokenKind::LBracket) => Delimiter::Bracket,
            _ => return Err(ScanError::Unsupported("a value that is not a literal".into())),
        };
        let close = self.matching(open)?;

        let mut members = Vec::new();
        let mut trailing_comma = None;
        let mut index = open + 1;

        while index < close {
            trailing_comma = None;
            let member = match delimiter {
                Delimiter::Brace => self.parse_property(index)?,
                Delimiter::Bracket => self.parse_element(index)?,
            };
            let end = self.skip_until(index, |k| k == TokenKind::Comma)?;
            if end == index {
                return Err(ScanError::Unsupported("an empty member".into()));
            }
            members.push(Member {
                span: self.tokens[index].span.start..self.tokens[end - 1].span.end,
                ..member
            });
            if end < close {
                trailing_comma = Some(self.tokens[end].span.clone());
            }
            index = end + 1;
        }

        Ok(Literal {
            delimiter,
            open: self.tokens[open].span.clone(),
            close: self.tokens[close].span.clone(),
            members,
            trailing_comma,
        })
    }

    fn parse_property(&self, index: usize) -> Result<Member, ScanError> {
        let key = match self.kind(index) {
            Some(TokenKind::Ident) | Some(TokenKind::Number) => self.text(index).to_string(),
            Some(TokenKind::Str) => unquote(self.text(index)).to_string(),
            Some(TokenKind::Spread) => {
                return Err(ScanError::Unsupported("spread syntax in an object literal".into()));
            }
            Some(TokenKind::LBracket) => {
                return Err(ScanError::Unsupported("a computed property key".into()));
            }
            _ => {
                return Err(ScanError::Unsupported(format!(
                    "an object member starting with `{}`",
                    self.text(index)
                )));
            }
        };
        let value_token = match self.kind(index + 1) {
            Some(TokenKind::Colon) => Some(index + 2),
            _ => None,
        };
        Ok(Member {
            key: Some(key),
            span: 0..0,
            value_token,
        })
    }

    fn parse_element(&self, index: usize) -> Result<Member, ScanError> {
        if self.kind(index) == Some(TokenKind::Spread) {
            return Err(ScanError::Unsupported("spread syntax in an array literal".into()));
        }
        Ok(Member {
            key: None,
            span: 0..0,
            value_token: Some(index),
        })
    }

    /// The literal a member's value consists of (`server: { ... }`).
    pub fn member_literal(&self, member: &Member) -> Result<Literal, ScanError> {
        let key = member.key.as_deref().unwrap_or("element");
        match member.value_token {
            Some(index)
                if matches!(
                    self.kind(index),
                    Some(TokenKind::LBrace) | Some(TokenKind::LBracket)
                ) =>
            {
                self.parse_literal(index)
            }
            _ => Err(ScanError::Unsupported(format!(
                "a `{key}` value that is not a literal"
            ))),
        }
    }

    /// Leading directives and import statements.
    pub fn import_block(&self) -> ImportBlock {
        let mut block = ImportBlock::default();
        let mut index = 0;

        while self.kind(index) == Some(TokenKind::Str) {
            let mut end = self.tokens[index].span.end;
            index += 1;
            if self.kind(index) == Some(TokenKind::Semi) {
                end = self.tokens[index].span.end;
                index += 1;
            }
            block.prologue_end = Some(end);
        }

        while self.is_ident(index, "import")
            && !matches!(
                self.kind(index + 1),
                Some(TokenKind::LParen) | Some(TokenKind::Dot)
            )
        {
            let Some(end) = self.import_end(index) else {
                break;
            };
            block.last_import_start = Some(self.tokens[index].span.start);
            block.last_import_end = Some(self.tokens[end].span.end);
            block.count += 1;
            index = end + 1;
        }

        block
    }

    /// Token index ending the import statement that starts at `start`: its
    /// module specifier, or the `;` right after it.
    fn import_end(&self, start: usize) -> Option<usize> {
        let mut index = start + 1;
        while let Some(kind) = self.kind(index) {
            match kind {
                TokenKind::Str => {
                    return Some(match self.kind(index + 1) {
                        Some(TokenKind::Semi) => index + 1,
                        _ => index,
                    });
                }
                TokenKind::LBrace => index = self.matching(index).ok()? + 1,
                TokenKind::Semi => return None,
                _ => index += 1,
            }
        }
        None
    }

    /// Spans of JSX expression slots `{ident}`: a `{ident}` group directly
    /// after a tag's `>` or directly before a `<`.
    ///
    /// JSX text is lexed as code, so an apostrophe or a `//` in it can open a
    /// string or comment that hides a slot. Callers needing every slot must
    /// cross-check the raw text.
    pub fn jsx_slots(&self, ident: &str) -> Vec<Range<usize>> {
        (1..self.tokens.len().saturating_sub(2))
            .filter(|&i| {
                self.kind(i) == Some(TokenKind::LBrace)
                    && self.is_ident(i + 1, ident)
                    && self.kind(i + 2) == Some(TokenKind::RBrace)
                    && (self.kind(i - 1) == Some(TokenKind::Gt)
                        || self.kind(i + 3) == Some(TokenKind::Lt))
            })
            .map(|i| self.tokens[i].span.start..self.tokens[i + 2].span.end)
            .collect()
    }
}

fn unquote(text: &str) -> &str {
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source).tokens().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn comments_are_kept_aside() {
        let scanner = Scanner::new("a // note\n/* block */ b");
        assert_eq!(kinds("a // note\n/* block */ b"), vec![TokenKind::Ident, TokenKind::Ident]);
        assert_eq!(scanner.comments().len(), 2);
        assert!(scanner.in_comment(4));
        assert!(!scanner.in_comment(0));
    }

    #[test]
    fn urls_inside_strings_are_not_comments() {
        let scanner = Scanner::new(r#"const u = "https://example.com";"#);
        assert!(scanner.comments().is_empty());
    }

    #[test]
    fn unknown_characters_become_other_tokens() {
        let kinds = kinds("a ?? b");
        assert_eq!(kinds.first(), Some(&TokenKind::Ident));
        assert_eq!(kinds.last(), Some(&TokenKind::Ident));
        assert!(kinds.contains(&TokenKind::Other));
    }

    #[test]
    fn parses_object_members_and_trailing_comma() {
        let source = "router({\n  a: aRouter,\n  'b-c': fn(x, y),\n})";
        let scanner = Scanner::new(source);
        let literal = scanner.call_object_argument("router").unwrap();

        assert_eq!(literal.keys().collect::<Vec<_>>(), vec!["a", "b-c"]);
        assert!(literal.trailing_comma.is_some());
        assert!(literal.is_multiline(source));
        assert_eq!(&source[literal.members[1].span.clone()], "'b-c': fn(x, y)");
    }

    #[test]
    fn member_call_matches_last_segment() {
        let scanner = Scanner::new("export const r = t.router({ a: b });");
        let literal = scanner.call_object_argument("router").unwrap();
        assert_eq!(literal.members.len(), 1);
        assert!(literal.trailing_comma.is_none());
    }

    #[test]
    fn spread_and_computed_keys_are_unsupported() {
        let spread = Scanner::new("router({ ...base })");
        assert!(matches!(
            spread.call_object_argument("router"),
            Err(ScanError::Unsupported(_))
        ));

        let computed = Scanner::new("router({ [key]: value })");
        assert!(matches!(
            computed.call_object_argument("router"),
            Err(ScanError::Unsupported(_))
        ));
    }

    #[test]
    fn missing_call_is_not_found() {
        let scanner = Scanner::new("import { router } from './trpc';");
        assert!(matches!(
            scanner.call_object_argument("router"),
            Err(ScanError::NotFound(_))
        ));
    }

    #[test]
    fn unbalanced_literal_is_reported() {
        let scanner = Scanner::new("router({ a: (b })");
        assert!(matches!(
            scanner.call_object_argument("router"),
            Err(ScanError::Unbalanced(..))
        ));
    }

    #[test]
    fn binding_array_skips_type_annotation() {
        let source = "export const links: Link[] = [\n  { href: \"/a\" },\n];";
        let scanner = Scanner::new(source);
        let literal = scanner.binding_array("links").unwrap();

        assert_eq!(literal.delimiter, Delimiter::Bracket);
        assert_eq!(literal.members.len(), 1);
        assert_eq!(&source[literal.members[0].span.clone()], "{ href: \"/a\" }");
    }

    #[test]
    fn binding_array_ignores_references() {
        let source = "use(links);\nconst links = [];";
        let literal = Scanner::new(source).binding_array("links").unwrap();
        assert!(literal.is_empty());
    }

    #[test]
    fn member_literal_reads_nested_sections() {
        let source = "createEnv({ server: { A: z.string() }, client: {} })";
        let scanner = Scanner::new(source);
        let root = scanner.call_object_argument("createEnv").unwrap();
        let server = scanner.member_literal(root.member("server").unwrap()).unwrap();
        let client = scanner.member_literal(root.member("client").unwrap()).unwrap();

        assert_eq!(server.keys().collect::<Vec<_>>(), vec!["A"]);
        assert!(client.is_empty());
    }

    #[test]
    fn import_block_covers_multiline_imports() {
        let source = "import a from \"a\";\nimport {\n  b,\n  c,\n} from \"bc\"\n\nconst x = 1;";
        let block = Scanner::new(source).import_block();

        assert_eq!(block.count, 2);
        assert_eq!(block.last_import_start, source.find("import {"));
        assert_eq!(block.last_import_end, source.find("\"bc\"").map(|p| p + 4));
        assert_eq!(block.prologue_end, None);
    }

    #[test]
    fn import_block_records_directive_prologue() {
        let source = "\"use client\";\n\nexport default function Page() {}";
        let block = Scanner::new(source).import_block();
        assert_eq!(block.count, 0);
        assert_eq!(block.prologue_end, Some(13));
    }

    #[test]
    fn dynamic_import_ends_the_block() {
        let block = Scanner::new("import(\"x\");").import_block();
        assert_eq!(block.count, 0);
    }

    #[test]
    fn jsx_slots_skip_destructured_props() {
        let source = "function L({ children }: { children: Node }) {\n  return <body>{children}</body>;\n}";
        let slots = Scanner::new(source).jsx_slots("children");
        assert_eq!(slots.len(), 1);
        assert_eq!(&source[slots[0].clone()], "{children}");
    }
}
