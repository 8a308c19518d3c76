//! XML-RPC value model and wire codec.
//!
//! Only the subset the signature service uses is supported: method calls with
//! positional parameters, and method responses carrying either one value or a
//! fault.

use crate::error::{Result, UniversignError};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::Write;

/// An XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `<int>` / `<i4>`.
    Int(i32),
    /// `<i8>`.
    Int64(i64),
    /// `<boolean>`.
    Bool(bool),
    /// `<string>`, or untyped text.
    String(String),
    /// `<double>`.
    Double(f64),
    /// `<dateTime.iso8601>`, kept verbatim.
    DateTime(String),
    /// `<base64>`.
    Base64(Vec<u8>),
    /// `<struct>`.
    Struct(BTreeMap<String, Value>),
    /// `<array>`.
    Array(Vec<Value>),
    /// `<nil/>`.
    Nil,
}

impl Value {
    /// Member of a struct value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Base64(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Struct(members) => Some(members),
            _ => None,
        }
    }

    pub(crate) fn require_str(&self, key: &str) -> Result<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| UniversignError::Decode(format!("missing string member \"{key}\"")))
    }

    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("value")))?;
        match self {
            Value::Int(i) => write_text_element(writer, "int", &i.to_string())?,
            Value::Int64(i) => write_text_element(writer, "i8", &i.to_string())?,
            Value::Bool(b) => write_text_element(writer, "boolean", if *b { "1" } else { "0" })?,
            Value::String(s) => write_text_element(writer, "string", s)?,
            Value::Double(d) => {
                // XML-RPC has no representation for NaN or infinities
                if !d.is_finite() {
                    return Err(UniversignError::Encode(format!("non-finite double {d}")));
                }
                write_text_element(writer, "double", &d.to_string())?;
            }
            Value::DateTime(s) => write_text_element(writer, "dateTime.iso8601", s)?,
            Value::Base64(bytes) => write_text_element(writer, "base64", &BASE64.encode(bytes))?,
            Value::Struct(members) => {
                writer.write_event(Event::Start(BytesStart::new("struct")))?;
                for (name, value) in members {
                    writer.write_event(Event::Start(BytesStart::new("member")))?;
                    write_text_element(writer, "name", name)?;
                    value.write_xml(writer)?;
                    writer.write_event(Event::End(BytesEnd::new("member")))?;
                }
                writer.write_event(Event::End(BytesEnd::new("struct")))?;
            }
            Value::Array(items) => {
                writer.write_event(Event::Start(BytesStart::new("array")))?;
                writer.write_event(Event::Start(BytesStart::new("data")))?;
                for item in items {
                    item.write_xml(writer)?;
                }
                writer.write_event(Event::End(BytesEnd::new("data")))?;
                writer.write_event(Event::End(BytesEnd::new("array")))?;
            }
            Value::Nil => writer.write_event(Event::Empty(BytesStart::new("nil")))?,
        }
        writer.write_event(Event::End(BytesEnd::new("value")))?;
        Ok(())
    }
}

/// `<name>text</name>`, with the text escaped.
fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Builds a struct value holding only the members that are present.
#[derive(Debug, Default)]
pub(crate) struct StructBuilder {
    members: BTreeMap<String, Value>,
}

impl StructBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn member(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.members.insert(name.to_string(), value.into());
        self
    }

    pub(crate) fn optional<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.member(name, value),
            None => self,
        }
    }

    pub(crate) fn build(self) -> Value {
        Value::Struct(self.members)
    }
}

/// Encode a `<methodCall>` document.
///
/// Fails if a parameter holds a value XML-RPC cannot carry (a non-finite
/// double).
pub fn encode_call(method: &str, params: &[Value]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("methodCall")))?;
    write_text_element(&mut writer, "methodName", method)?;
    writer.write_event(Event::Start(BytesStart::new("params")))?;
    for param in params {
        writer.write_event(Event::Start(BytesStart::new("param")))?;
        param.write_xml(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("param")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("params")))?;
    writer.write_event(Event::End(BytesEnd::new("methodCall")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| UniversignError::Encode(e.to_string()))
}

/// Decode a `<methodResponse>` document.
///
/// A fault response is returned as [`UniversignError::Fault`].
pub fn decode_response(body: &str) -> Result<Value> {
    let mut parser = Parser::new(tokenize(body)?);

    parser.expect_open("methodResponse")?;
    let response = match parser.next_open()?.as_str() {
        "params" => {
            parser.expect_open("param")?;
            let value = parser.value()?;
            parser.expect_close("param")?;
            parser.expect_close("params")?;
            Ok(value)
        }
        "fault" => {
            let fault = parser.value()?;
            parser.expect_close("fault")?;
            let code = fault.get("faultCode").and_then(Value::as_i32).unwrap_or(0);
            let message = fault
                .get("faultString")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Err(UniversignError::Fault { code, message })
        }
        other => {
            return Err(UniversignError::Decode(format!(
                "unexpected element <{other}> in methodResponse"
            )));
        }
    };
    parser.expect_close("methodResponse")?;
    parser.expect_end()?;
    response
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Text(String),
}

fn tokenize(body: &str) -> Result<Vec<Token>> {
    let mut reader = Reader::from_str(body);
    let mut tokens = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => tokens.push(Token::Open(element_name(e.name().as_ref())?)),
            Event::End(e) => tokens.push(Token::Close(element_name(e.name().as_ref())?)),
            Event::Empty(e) => {
                let name = element_name(e.name().as_ref())?;
                tokens.push(Token::Open(name.clone()));
                tokens.push(Token::Close(name));
            }
            Event::Text(e) => tokens.push(Token::Text(e.unescape()?.into_owned())),
            Event::CData(e) => {
                let text = std::str::from_utf8(&e.into_inner())
                    .map_err(|e| UniversignError::Decode(e.to_string()))?
                    .to_string();
                tokens.push(Token::Text(text));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tokens)
}

fn element_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| UniversignError::Decode(e.to_string()))
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
    peeked: Option<Token>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            peeked: None,
        }
    }

    fn next_raw(&mut self) -> Option<Token> {
        self.peeked.take().or_else(|| self.tokens.next())
    }

    /// Next token, skipping whitespace between elements.
    fn next_token(&mut self) -> Result<Token> {
        loop {
            match self.next_raw() {
                Some(Token::Text(text)) if text.trim().is_empty() => continue,
                Some(token) => return Ok(token),
                None => return Err(UniversignError::Decode("unexpected end of document".to_string())),
            }
        }
    }

    /// Only whitespace may follow the root element.
    fn expect_end(&mut self) -> Result<()> {
        loop {
            match self.next_raw() {
                Some(Token::Text(text)) if text.trim().is_empty() => continue,
                Some(other) => return Err(unexpected("end of document", &other)),
                None => return Ok(()),
            }
        }
    }

    fn peek_token(&mut self) -> Result<&Token> {
        let token = self.next_token()?;
        Ok(self.peeked.insert(token))
    }

    fn next_open(&mut self) -> Result<String> {
        match self.next_token()? {
            Token::Open(name) => Ok(name),
            other => Err(unexpected("an opening element", &other)),
        }
    }

    fn expect_open(&mut self, expected: &str) -> Result<()> {
        let name = self.next_open()?;
        if name != expected {
            return Err(UniversignError::Decode(format!(
                "expected <{expected}>, found <{name}>"
            )));
        }
        Ok(())
    }

    fn expect_close(&mut self, expected: &str) -> Result<()> {
        match self.next_token()? {
            Token::Close(name) if name == expected => Ok(()),
            other => Err(unexpected(&format!("</{expected}>"), &other)),
        }
    }

    /// Text content up to the closing tag of `element`; empty if none.
    fn text_until_close(&mut self, element: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next_raw() {
                Some(Token::Text(chunk)) => text.push_str(&chunk),
                Some(Token::Close(name)) if name == element => return Ok(text),
                Some(other) => return Err(unexpected(&format!("</{element}>"), &other)),
                None => return Err(UniversignError::Decode("unexpected end of document".to_string())),
            }
        }
    }

    fn value(&mut self) -> Result<Value> {
        self.expect_open("value")?;

        // Untyped content is a string
        let mut text = String::new();
        let kind = loop {
            match self.next_raw() {
                Some(Token::Text(chunk)) => text.push_str(&chunk),
                Some(Token::Close(name)) if name == "value" => return Ok(Value::String(text)),
                Some(Token::Open(name)) if text.trim().is_empty() => break name,
                Some(other) => return Err(unexpected("a typed value", &other)),
                None => return Err(UniversignError::Decode("unexpected end of document".to_string())),
            }
        };

        let value = match kind.as_str() {
            "int" | "i4" => {
                let raw = self.text_until_close(&kind)?;
                Value::Int(parse_number(&kind, &raw)?)
            }
            "i8" => {
                let raw = self.text_until_close(&kind)?;
                Value::Int64(parse_number(&kind, &raw)?)
            }
            "boolean" => match self.text_until_close(&kind)?.trim() {
                "1" => Value::Bool(true),
                "0" => Value::Bool(false),
                other => {
                    return Err(UniversignError::Decode(format!("invalid boolean \"{other}\"")));
                }
            },
            "string" => Value::String(self.text_until_close(&kind)?),
            "double" => {
                let raw = self.text_until_close(&kind)?;
                Value::Double(parse_number(&kind, &raw)?)
            }
            "dateTime.iso8601" => Value::DateTime(self.text_until_close(&kind)?.trim().to_string()),
            "base64" => {
                let raw: String = self
                    .text_until_close(&kind)?
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                let bytes = BASE64
                    .decode(raw)
                    .map_err(|e| UniversignError::Decode(e.to_string()))?;
                Value::Base64(bytes)
            }
            "nil" => {
                self.expect_close("nil")?;
                Value::Nil
            }
            "struct" => self.struct_members()?,
            "array" => self.array_items()?,
            other => {
                return Err(UniversignError::Decode(format!("unsupported value type <{other}>")));
            }
        };

        self.expect_close("value")?;
        Ok(value)
    }

    fn struct_members(&mut self) -> Result<Value> {
        let mut members = BTreeMap::new();
        loop {
            match self.next_token()? {
                Token::Close(name) if name == "struct" => return Ok(Value::Struct(members)),
                Token::Open(name) if name == "member" => {
                    self.expect_open("name")?;
                    let key = self.text_until_close("name")?;
                    let value = self.value()?;
                    self.expect_close("member")?;
                    members.insert(key, value);
                }
                other => return Err(unexpected("<member>", &other)),
            }
        }
    }

    fn array_items(&mut self) -> Result<Value> {
        self.expect_open("data")?;
        let mut items = Vec::new();
        loop {
            match self.peek_token()? {
                Token::Open(name) if name == "value" => {}
                _ => break,
            }
            items.push(self.value()?);
        }
        self.expect_close("data")?;
        self.expect_close("array")?;
        Ok(Value::Array(items))
    }
}

fn parse_number<T: std::str::FromStr>(kind: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| UniversignError::Decode(format!("invalid <{kind}> \"{}\": {e}", raw.trim())))
}

fn unexpected(expected: &str, found: &Token) -> UniversignError {
    let found = match found {
        Token::Open(name) => format!("<{name}>"),
        Token::Close(name) => format!("</{name}>"),
        Token::Text(text) => format!("text \"{}\"", text.trim()),
    };
    UniversignError::Decode(format!("expected {expected}, found {found}"))
}
