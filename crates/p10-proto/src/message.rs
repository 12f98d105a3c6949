//! Line grammar: `[:prefix] verb [params...] [:trailing]` CRLF, <= 512 bytes.

use nom::{
    bytes::complete::take_till1,
    character::complete::{char as nom_char, space0},
    combinator::opt,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::command;
use crate::error::ProtocolError;
use crate::prefix::Prefix;

pub const MAX_LINE_BYTES: usize = 512;

/// A single parsed IRC line.
///
/// `command` is always the canonical long verb name, or the raw numeric
/// reply code as a 3-digit string, or an unrecognized token verbatim — the
/// caller decides what to do with an unrecognized verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub prefix: Option<Prefix>,
    pub command: String,
    pub params: SmallVec<[String; 8]>,
}

impl Message {
    pub fn new(command: impl Into<String>) -> Self {
        Message {
            prefix: None,
            command: command.into(),
            params: SmallVec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Parse a single line with no trailing CRLF.
    pub fn parse(line: &str) -> Result<Message, ProtocolError> {
        if line.len() + 2 > MAX_LINE_BYTES {
            return Err(ProtocolError::OversizeLine(line.len() + 2));
        }
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }
        // `opt` never itself fails; it only reports whether `prefix_token` matched.
        let (rest, prefix_raw) = opt(prefix_token)(line).expect("opt combinator is infallible");
        let rest = rest.trim_start();
        if rest.is_empty() {
            return Err(ProtocolError::MissingCommand);
        }
        let (rest, verb) = take_till1::<_, _, nom::error::Error<&str>>(|c: char| c == ' ')(rest)
            .map_err(|_| ProtocolError::MissingCommand)?;
        let command = command::canonicalize(verb)
            .map(str::to_string)
            .unwrap_or_else(|| verb.to_uppercase());
        let params = parse_params(rest)?;
        Ok(Message {
            prefix: prefix_raw.map(Prefix::parse),
            command,
            params,
        })
    }

    /// Encode this message as a wire line, without CRLF, truncated to fit
    /// within [`MAX_LINE_BYTES`] - 2 (the CRLF reserve).
    pub fn encode(&self, server_link: bool) -> Result<String, ProtocolError> {
        let mut out = String::new();
        if let Some(prefix) = &self.prefix {
            out.push(':');
            out.push_str(&prefix.encode()?);
            out.push(' ');
        }
        out.push_str(command::encode_verb(&self.command, server_link));
        for (i, param) in self.params.iter().enumerate() {
            out.push(' ');
            let is_last = i + 1 == self.params.len();
            let needs_colon = is_last && (param.contains(' ') || param.starts_with(':') || param.is_empty());
            if needs_colon {
                out.push(':');
            }
            out.push_str(param);
        }
        let limit = MAX_LINE_BYTES - 2;
        if out.len() > limit {
            let mut end = limit;
            while !out.is_char_boundary(end) {
                end -= 1;
            }
            out.truncate(end);
        }
        Ok(out)
    }
}

fn prefix_token(input: &str) -> IResult<&str, &str> {
    preceded(nom_char(':'), take_till1(|c: char| c == ' '))(input)
}

/// Split the parameter portion of a line into middles plus an optional
/// trailing param. A `:` only begins the trailing param when it appears at
/// a param boundary; once seen, the rest of the line is taken verbatim.
fn parse_params(input: &str) -> Result<SmallVec<[String; 8]>, ProtocolError> {
    let mut out = SmallVec::new();
    let mut cursor = input;
    loop {
        let (next, _) = space0::<_, nom::error::Error<&str>>(cursor).unwrap();
        cursor = next;
        if cursor.is_empty() {
            break;
        }
        if let Some(trailing) = cursor.strip_prefix(':') {
            out.push(trailing.to_string());
            break;
        }
        let (next, tok) = take_till1::<_, _, nom::error::Error<&str>>(|c: char| c == ' ')(cursor)
            .map_err(|_| ProtocolError::MalformedLine(cursor.to_string()))?;
        out.push(tok.to_string());
        cursor = next;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Numeric;

    #[test]
    fn parses_simple_client_line() {
        let msg = Message::parse("NICK Wiz").unwrap();
        assert_eq!(msg.command, "NICK");
        assert_eq!(msg.params.as_slice(), &["Wiz".to_string()]);
        assert!(msg.prefix.is_none());
    }

    #[test]
    fn parses_prefixed_server_line_with_trailing() {
        let msg = Message::parse(":AB PRIVMSG #chan :hello there world").unwrap();
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params[0], "#chan");
        assert_eq!(msg.params[1], "hello there world");
        assert!(matches!(msg.prefix, Some(Prefix::Numeric(Numeric::Server(_)))));
    }

    #[test]
    fn parses_short_server_token() {
        let msg = Message::parse(":AAAAA P #chan :hi").unwrap();
        assert_eq!(msg.command, "PRIVMSG");
    }

    #[test]
    fn rejects_empty_line() {
        assert!(matches!(Message::parse(""), Err(ProtocolError::EmptyLine)));
    }

    #[test]
    fn rejects_missing_command() {
        assert!(matches!(
            Message::parse(":AB"),
            Err(ProtocolError::MissingCommand)
        ));
    }

    #[test]
    fn rejects_oversize_line() {
        let long = "A".repeat(600);
        let line = format!("PRIVMSG #chan :{long}");
        assert!(matches!(
            Message::parse(&line),
            Err(ProtocolError::OversizeLine(_))
        ));
    }

    #[test]
    fn colon_only_special_as_boundary() {
        let msg = Message::parse("PRIVMSG #chan :not:a:boundary").unwrap();
        assert_eq!(msg.params[1], "not:a:boundary");
    }

    #[test]
    fn encode_client_uses_long_verb() {
        let msg = Message::new("PRIVMSG")
            .with_param("#chan")
            .with_param("hello world");
        let line = msg.encode(false).unwrap();
        assert_eq!(line, "PRIVMSG #chan :hello world");
    }

    #[test]
    fn encode_server_uses_short_token() {
        let msg = Message::new("PRIVMSG")
            .with_prefix(Prefix::Numeric(Numeric::Server(1)))
            .with_param("#chan")
            .with_param("hi");
        let line = msg.encode(true).unwrap();
        assert!(line.starts_with(':'));
        assert!(line.contains(" P "));
    }

    #[test]
    fn encode_truncates_oversize_trailing() {
        let huge = "x".repeat(1000);
        let msg = Message::new("PRIVMSG").with_param("#chan").with_param(huge);
        let line = msg.encode(false).unwrap();
        assert!(line.len() <= MAX_LINE_BYTES - 2);
    }
}
