//! Lexer and parser for the format-string template language.
//!
//! Supported: literal text, `{{ pipeline }}` actions, `{{- ` / ` -}}` trim
//! markers, `if`/`else`/`end` and `range`/`else`/`end`. A pipeline is one or
//! more commands separated by `|`; the result of each command is appended as
//! the last argument of the next one.

use super::funcs::FuncTable;
use crate::error::{Error, Result};
use bossctl_types::{FieldPath, Value};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    /// `.`, the current scope.
    Dot,
    Field(FieldPath),
    Literal(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Command {
    /// `None` for a bare operand such as `{{.Id}}`.
    pub func: Option<String>,
    pub args: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pipeline {
    pub commands: Vec<Command>,
}

impl Pipeline {
    /// Field paths referenced by this pipeline, in source order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldPath> {
        self.commands
            .iter()
            .flat_map(|cmd| cmd.args.iter())
            .filter_map(|op| match op {
                Operand::Field(path) => Some(path),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Action(Pipeline),
    If {
        cond: Pipeline,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Range {
        over: Pipeline,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Dot,
    Field(FieldPath),
    Ident(String),
    Str(String),
    Number(Value),
    Pipe,
}

#[derive(Debug)]
enum Item {
    Text(String),
    Action { src: String, tokens: Vec<Token> },
}

#[derive(Debug, PartialEq)]
enum Terminator {
    Eof,
    Else,
    End,
}

/// Parse template source into a node tree, validating function names and
/// arities against `funcs`.
pub(crate) fn parse(src: &str, funcs: &FuncTable) -> Result<Vec<Node>> {
    let items = lex(src)?;
    let mut parser = Parser {
        items: items.into_iter(),
        funcs,
    };
    let (nodes, _) = parser.nodes(None)?;
    Ok(nodes)
}

fn compile_error(msg: impl Into<String>) -> Error {
    Error::TemplateCompile(msg.into())
}

fn lex(src: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut rest = src;
    let mut trim_next = false;

    while let Some(start) = rest.find("{{") {
        let mut text = &rest[..start];
        if trim_next {
            text = text.trim_start();
        }

        let after = &rest[start + 2..];
        let end = action_end(after)
            .ok_or_else(|| compile_error(format!("unclosed action at '{}'", &rest[start..])))?;
        let mut inner = &after[..end];

        if let Some(stripped) = inner
            .strip_prefix('-')
            .filter(|r| r.starts_with(char::is_whitespace))
        {
            text = text.trim_end();
            inner = stripped;
        }
        trim_next = false;
        if let Some(stripped) = inner
            .strip_suffix('-')
            .filter(|r| r.ends_with(char::is_whitespace))
        {
            trim_next = true;
            inner = stripped;
        }

        if !text.is_empty() {
            items.push(Item::Text(text.to_string()));
        }
        items.push(Item::Action {
            src: inner.trim().to_string(),
            tokens: tokenize(inner)?,
        });

        rest = &after[end + 2..];
    }

    let tail = if trim_next { rest.trim_start() } else { rest };
    if !tail.is_empty() {
        items.push(Item::Text(tail.to_string()));
    }
    Ok(items)
}

/// Offset of the `}}` closing an action, skipping quoted and raw strings.
fn action_end(src: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'`' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'`' {
                    i += 1;
                }
                i += 1;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn tokenize(src: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '|' => {
                tokens.push(Token::Pipe);
                i += 1;
            }
            '.' => {
                let start = i;
                i += 1;
                while i < chars.len() && (is_word(chars[i]) || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                if text == "." {
                    tokens.push(Token::Dot);
                } else {
                    let path = FieldPath::parse(&text)
                        .map_err(|e| compile_error(e.to_string()))?;
                    tokens.push(Token::Field(path));
                }
            }
            '"' => {
                i += 1;
                let mut s = String::new();
                loop {
                    match chars.get(i) {
                        None => return Err(compile_error(format!("unterminated string in '{}'", src.trim()))),
                        Some('"') => {
                            i += 1;
                            break;
                        }
                        Some('\\') => {
                            let escaped = match chars.get(i + 1) {
                                Some('n') => '\n',
                                Some('t') => '\t',
                                Some('"') => '"',
                                Some('\\') => '\\',
                                other => {
                                    return Err(compile_error(format!(
                                        "unknown escape '\\{}' in '{}'",
                                        other.map(|c| c.to_string()).unwrap_or_default(),
                                        src.trim()
                                    )));
                                }
                            };
                            s.push(escaped);
                            i += 2;
                        }
                        Some(&ch) => {
                            s.push(ch);
                            i += 1;
                        }
                    }
                }
                tokens.push(Token::Str(s));
            }
            '`' => {
                let start = i + 1;
                let close = chars[start..]
                    .iter()
                    .position(|&ch| ch == '`')
                    .ok_or_else(|| compile_error(format!("unterminated raw string in '{}'", src.trim())))?;
                tokens.push(Token::Str(chars[start..start + close].iter().collect()));
                i = start + close + 1;
            }
            c if c.is_ascii_digit()
                || (c == '-' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) =>
            {
                let start = i;
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let number = if let Ok(n) = text.parse::<i64>() {
                    Value::Int(n)
                } else if let Ok(f) = text.parse::<f64>() {
                    Value::Float(f)
                } else {
                    return Err(compile_error(format!("bad number '{}'", text)));
                };
                tokens.push(Token::Number(number));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && is_word(chars[i]) {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => {
                return Err(compile_error(format!(
                    "unexpected '{}' in '{}'",
                    other,
                    src.trim()
                )));
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    items: std::vec::IntoIter<Item>,
    funcs: &'a FuncTable,
}

impl Parser<'_> {
    /// Parse nodes until end of input or an `else`/`end` belonging to `block`.
    fn nodes(&mut self, block: Option<&str>) -> Result<(Vec<Node>, Terminator)> {
        let mut nodes = Vec::new();

        while let Some(item) = self.items.next() {
            let (src, tokens) = match item {
                Item::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Item::Action { src, tokens } => (src, tokens),
            };

            match tokens.first() {
                Some(Token::Ident(word)) if word == "if" || word == "range" => {
                    let keyword = word.clone();
                    let pipeline = self.pipeline(&tokens[1..], &src)?;
                    let (body, term) = self.nodes(Some(&keyword))?;
                    let otherwise = match term {
                        Terminator::Else => {
                            let (otherwise, term) = self.nodes(Some(&keyword))?;
                            if term != Terminator::End {
                                return Err(compile_error(format!(
                                    "missing {{{{end}}}} for {{{{{}}}}}",
                                    src
                                )));
                            }
                            otherwise
                        }
                        Terminator::End => Vec::new(),
                        Terminator::Eof => {
                            return Err(compile_error(format!(
                                "missing {{{{end}}}} for {{{{{}}}}}",
                                src
                            )));
                        }
                    };
                    nodes.push(if keyword == "if" {
                        Node::If {
                            cond: pipeline,
                            then: body,
                            otherwise,
                        }
                    } else {
                        Node::Range {
                            over: pipeline,
                            body,
                            otherwise,
                        }
                    });
                }
                Some(Token::Ident(word)) if word == "else" || word == "end" => {
                    if tokens.len() > 1 {
                        return Err(compile_error(format!("unexpected operand in {{{{{}}}}}", src)));
                    }
                    if block.is_none() {
                        return Err(compile_error(format!("unexpected {{{{{}}}}}", word)));
                    }
                    let term = if word == "else" {
                        Terminator::Else
                    } else {
                        Terminator::End
                    };
                    return Ok((nodes, term));
                }
                _ => nodes.push(Node::Action(self.pipeline(&tokens, &src)?)),
            }
        }

        Ok((nodes, Terminator::Eof))
    }

    fn pipeline(&self, tokens: &[Token], src: &str) -> Result<Pipeline> {
        let mut commands = Vec::new();

        for (index, part) in tokens.split(|t| *t == Token::Pipe).enumerate() {
            let piped = index > 0;
            commands.push(self.command(part, piped, src)?);
        }

        if commands.is_empty() {
            return Err(compile_error("empty action"));
        }
        Ok(Pipeline { commands })
    }

    fn command(&self, tokens: &[Token], piped: bool, src: &str) -> Result<Command> {
        let Some((head, rest)) = tokens.split_first() else {
            return Err(compile_error(format!("missing command in {{{{{}}}}}", src)));
        };

        match head {
            Token::Ident(name) if !is_bool(name) => {
                let func = self.funcs.get(name).ok_or_else(|| {
                    compile_error(format!("function \"{}\" not defined", name))
                })?;
                let args = rest
                    .iter()
                    .map(|t| operand(t, src))
                    .collect::<Result<Vec<_>>>()?;
                let given = args.len() + usize::from(piped);
                if given != func.arity() {
                    return Err(compile_error(format!(
                        "wrong number of args for {}: want {} got {}",
                        name,
                        func.arity(),
                        given
                    )));
                }
                Ok(Command {
                    func: Some(name.clone()),
                    args,
                })
            }
            _ => {
                if piped {
                    return Err(compile_error(format!(
                        "cannot pipe into a non-function in {{{{{}}}}}",
                        src
                    )));
                }
                if !rest.is_empty() {
                    return Err(compile_error(format!(
                        "unexpected operand in {{{{{}}}}}",
                        src
                    )));
                }
                Ok(Command {
                    func: None,
                    args: vec![operand(head, src)?],
                })
            }
        }
    }
}

fn is_bool(word: &str) -> bool {
    word == "true" || word == "false"
}

fn operand(token: &Token, src: &str) -> Result<Operand> {
    match token {
        Token::Dot => Ok(Operand::Dot),
        Token::Field(path) => Ok(Operand::Field(path.clone())),
        Token::Str(s) => Ok(Operand::Literal(Value::Str(s.clone()))),
        Token::Number(n) => Ok(Operand::Literal(n.clone())),
        Token::Ident(word) if is_bool(word) => Ok(Operand::Literal(Value::Bool(word == "true"))),
        Token::Ident(word) => Err(compile_error(format!(
            "function \"{}\" used as an argument in {{{{{}}}}}",
            word, src
        ))),
        Token::Pipe => Err(compile_error(format!("misplaced '|' in {{{{{}}}}}", src))),
    }
}
