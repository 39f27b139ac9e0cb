//! Plaintext mapping values
//!
//! Mapping reads come back as plaintext strings, either a typed literal
//! (`42u64`, `true`, `aleo1..`) or a struct of named members
//! (`{ microcredits: 42u64, validator: aleo1.. }`).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaintextError {
    #[error("unexpected end of plaintext")]
    UnexpectedEnd,
    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),
    #[error("trailing input at offset {0}")]
    TrailingInput(usize),
    #[error("missing struct member {0}")]
    MissingMember(String),
    #[error("expected {expected} literal, found {found}")]
    WrongType { expected: &'static str, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plaintext {
    Literal(String),
    Struct(Vec<(String, Plaintext)>),
}

impl Plaintext {
    pub fn parse(input: &str) -> Result<Self, PlaintextError> {
        let mut parser = Parser { input, pos: 0 };
        let value = parser.value()?;

        parser.skip_whitespace();
        if parser.pos != input.len() {
            return Err(PlaintextError::TrailingInput(parser.pos));
        }
        Ok(value)
    }

    pub fn member(&self, name: &str) -> Result<&Plaintext, PlaintextError> {
        match self {
            Self::Struct(members) => members
                .iter()
                .find_map(|(key, value)| (key == name).then_some(value))
                .ok_or_else(|| PlaintextError::MissingMember(name.to_string())),
            Self::Literal(_) => Err(PlaintextError::MissingMember(name.to_string())),
        }
    }

    pub fn as_u8(&self) -> Result<u8, PlaintextError> {
        self.integer("u8")
    }

    pub fn as_u64(&self) -> Result<u64, PlaintextError> {
        self.integer("u64")
    }

    pub fn as_u128(&self) -> Result<u128, PlaintextError> {
        self.integer("u128")
    }

    fn literal(&self) -> Option<&str> {
        match self {
            // drop a `.public`/`.private` visibility suffix
            Self::Literal(s) => Some(s.split('.').next().unwrap_or(s)),
            Self::Struct(_) => None,
        }
    }

    fn integer<T: std::str::FromStr>(&self, suffix: &'static str) -> Result<T, PlaintextError> {
        self.literal()
            .and_then(|s| s.strip_suffix(suffix))
            .and_then(|digits| digits.replace('_', "").parse().ok())
            .ok_or_else(|| self.wrong_type(suffix))
    }

    fn wrong_type(&self, expected: &'static str) -> PlaintextError {
        PlaintextError::WrongType {
            expected,
            found: self.to_string(),
        }
    }
}

impl std::str::FromStr for Plaintext {
    type Err = PlaintextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Plaintext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{s}"),
            Self::Struct(members) => {
                write!(f, "{{ ")?;
                for (n, (key, value)) in members.iter().enumerate() {
                    if n > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, " }}")
            }
        }
    }
}

////////////
// parser //
////////////

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PlaintextError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(PlaintextError::UnexpectedChar(c, self.pos)),
            None => Err(PlaintextError::UnexpectedEnd),
        }
    }

    fn value(&mut self) -> Result<Plaintext, PlaintextError> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.structure(),
            Some(_) => self.token().map(Plaintext::Literal),
            None => Err(PlaintextError::UnexpectedEnd),
        }
    }

    fn token(&mut self) -> Result<String, PlaintextError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_' || c == '.') {
                break;
            }
            self.pos += 1;
        }

        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(PlaintextError::UnexpectedChar(c, self.pos)),
                None => Err(PlaintextError::UnexpectedEnd),
            };
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn structure(&mut self) -> Result<Plaintext, PlaintextError> {
        self.expect('{')?;
        let mut members = vec![];

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Plaintext::Struct(members));
            }

            let key = self.token()?;
            self.expect(':')?;
            let value = self.value()?;
            members.push((key, value));

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {}
                Some(c) => return Err(PlaintextError::UnexpectedChar(c, self.pos)),
                None => return Err(PlaintextError::UnexpectedEnd),
            }
        }
    }
}
