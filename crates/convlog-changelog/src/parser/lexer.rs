//! Conventional commit tokenizer
//!
//! A state machine over the characters of a normalized message. Each state
//! consumes input, emits zero or more tokens and names the next state.
//! Footer boundaries inside the body are found with a speculative lookahead
//! that is rewound when it does not match.

use std::sync::LazyLock;

use convlog_core::SyntaxError;
use regex::Regex;

use super::token::{Token, TokenKind};
use crate::types::BREAKING_CHANGE_TOKEN;

static LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{L}$").expect("Invalid regex"));

static LETTER_OR_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{Nd}]$").expect("Invalid regex"));

/// Unicode letter (general category L)
fn is_letter(c: char) -> bool {
    LETTER.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Unicode letter or decimal digit (categories L and Nd)
fn is_letter_or_digit(c: char) -> bool {
    LETTER_OR_DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Type,
    Scope,
    DescriptionDelimiter,
    Description,
    HeaderDelimiter,
    BodyOrFooter,
    Body,
    BodyDelimiter,
    FooterToken,
    FooterDelimiter,
    FooterValue,
}

type Transition = Result<Option<State>, SyntaxError>;

/// Tokenize a commit message.
///
/// The input is expected to be trimmed with `\n` line endings.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(input);
    let mut state = Some(State::Type);

    while let Some(current) = state {
        state = lexer.step(current)?;
    }

    Ok(lexer.tokens)
}

struct Lexer {
    input: Vec<char>,
    start: usize,
    pos: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            start: 0,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn step(&mut self, state: State) -> Transition {
        match state {
            State::Type => self.lex_type(),
            State::Scope => self.lex_scope(),
            State::DescriptionDelimiter => self.lex_description_delimiter(),
            State::Description => self.lex_description(),
            State::HeaderDelimiter => self.lex_blank_line(
                State::BodyOrFooter,
                "missing blank line after header",
            ),
            State::BodyOrFooter => Ok(Some(self.lex_body_or_footer())),
            State::Body => Ok(self.lex_body()),
            State::BodyDelimiter => {
                self.lex_blank_line(State::FooterToken, "missing blank line after body")
            }
            State::FooterToken => self.lex_footer_token(),
            State::FooterDelimiter => {
                self.take(": ");
                self.emit(TokenKind::FooterDelimiter);
                Ok(Some(State::FooterValue))
            }
            State::FooterValue => Ok(self.lex_footer_value()),
        }
    }

    fn lex_type(&mut self) -> Transition {
        loop {
            match self.peek() {
                None => return Err(self.error("missing scope or description")),
                Some(c @ (':' | '!' | '(')) => {
                    if self.current_len() == 0 {
                        return Err(self.error("missing type"));
                    }
                    self.emit(TokenKind::HeaderType);

                    if c != '(' {
                        return Ok(Some(State::DescriptionDelimiter));
                    }

                    self.next();
                    self.emit(TokenKind::LeftScopeDelimiter);
                    return Ok(Some(State::Scope));
                }
                Some(c) if is_letter(c) => self.pos += 1,
                Some(c) => return Err(self.error(format!("invalid character '{}' in type", c))),
            }
        }
    }

    fn lex_scope(&mut self) -> Transition {
        loop {
            match self.peek() {
                Some(')') => {
                    if self.current_len() == 0 {
                        return Err(self.error("empty scope"));
                    }
                    self.emit(TokenKind::HeaderScope);
                    self.next();
                    self.emit(TokenKind::RightScopeDelimiter);
                    return Ok(Some(State::DescriptionDelimiter));
                }
                Some(c) if is_letter_or_digit(c) || c == '-' || c == '_' => self.pos += 1,
                _ => return Err(self.error("scope must be noun in ()")),
            }
        }
    }

    fn lex_description_delimiter(&mut self) -> Transition {
        if self.peek() == Some('!') {
            self.next();
            self.emit(TokenKind::BreakingChange);
        }

        self.take(": ");
        if self.current() != ": " {
            return Err(self.error("scope must be followed by ': '"));
        }
        self.emit(TokenKind::DescriptionDelimiter);

        Ok(Some(State::Description))
    }

    fn lex_description(&mut self) -> Transition {
        while matches!(self.peek(), Some(c) if c != '\n') {
            self.pos += 1;
        }

        if self.current().trim().is_empty() {
            return Err(self.error("missing description"));
        }
        self.emit(TokenKind::Description);

        match self.peek() {
            None => Ok(None),
            Some(_) => Ok(Some(State::HeaderDelimiter)),
        }
    }

    /// At least two newlines (one empty line) must follow; they are dropped.
    fn lex_blank_line(&mut self, next: State, reason: &str) -> Transition {
        self.take("\n");
        if self.current_len() < 2 {
            return Err(self.error(reason));
        }
        self.ignore();

        Ok(Some(next))
    }

    fn lex_body_or_footer(&mut self) -> State {
        let count = self.take_footer_token();
        if count > 0 {
            self.rewind_by(count);
            return State::FooterToken;
        }

        State::Body
    }

    fn lex_body(&mut self) -> Option<State> {
        if !self.take_until_first_footer_token() {
            self.emit(TokenKind::Body);
            return None;
        }

        // back up over the separator so it is not part of the body
        while self.pos > self.start {
            self.rewind();
            if self.peek() != Some('\n') {
                break;
            }
        }
        self.next();
        self.emit(TokenKind::Body);

        Some(State::BodyDelimiter)
    }

    fn lex_footer_token(&mut self) -> Transition {
        self.take("\n");
        self.ignore();

        if self.take_footer_token() == 0 {
            return Err(self.error("invalid footer token"));
        }
        self.emit(TokenKind::FooterToken);

        Ok(Some(State::FooterDelimiter))
    }

    fn lex_footer_value(&mut self) -> Option<State> {
        if self.peek().is_none() {
            return None;
        }

        let found = self.take_until_first_footer_token();
        self.emit(TokenKind::FooterValue);

        found.then_some(State::FooterToken)
    }

    /// Consume a footer token at the cursor and return its length.
    ///
    /// Accepts `BREAKING CHANGE` followed by `": "`, or a run of letters,
    /// digits and `-` followed by `": "` or `" #"`. The delimiter is not
    /// consumed. Returns 0 and leaves the cursor untouched on no match.
    fn take_footer_token(&mut self) -> usize {
        let count = BREAKING_CHANGE_TOKEN.chars().count();
        if self.lookahead_is(BREAKING_CHANGE_TOKEN) && self.lookahead_at_is(count, ": ") {
            self.pos += count;
            return count;
        }

        let origin = self.pos;
        while matches!(self.peek(), Some(c) if is_letter_or_digit(c) || c == '-') {
            self.pos += 1;
        }
        let count = self.pos - origin;

        if count > 0 && (self.lookahead_is(": ") || self.lookahead_is(" #")) {
            return count;
        }

        self.rewind_by(count);
        0
    }

    /// Advance past the next line that starts with a footer token.
    ///
    /// On success the cursor rests at the start of that line. Otherwise the
    /// whole input is consumed and false is returned.
    fn take_until_first_footer_token(&mut self) -> bool {
        while let Some(c) = self.next() {
            if c == '\n' {
                let count = self.take_footer_token();
                if count > 0 {
                    self.rewind_by(count);
                    return true;
                }
            }
        }

        false
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn lookahead_is(&self, s: &str) -> bool {
        self.lookahead_at_is(0, s)
    }

    fn lookahead_at_is(&self, offset: usize, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.input.get(self.pos + offset + i) == Some(&c))
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Step back one character, never past the start of the pending token
    fn rewind(&mut self) {
        if self.pos > self.start {
            self.pos -= 1;
        }
    }

    fn rewind_by(&mut self, count: usize) {
        for _ in 0..count {
            self.rewind();
        }
    }

    /// Consume any run of characters from `set`
    fn take(&mut self, set: &str) {
        while matches!(self.peek(), Some(c) if set.contains(c)) {
            self.pos += 1;
        }
    }

    fn current(&self) -> String {
        self.input[self.start..self.pos].iter().collect()
    }

    fn current_len(&self) -> usize {
        self.pos - self.start
    }

    fn emit(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.current(), self.start);
        self.tokens.push(token);
        self.start = self.pos;
    }

    fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn error(&self, reason: impl Into<String>) -> SyntaxError {
        SyntaxError::new(reason, self.pos)
    }
}
