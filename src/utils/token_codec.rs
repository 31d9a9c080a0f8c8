//! Bidirectional mapping between storage keys and public link tokens.
//!
//! Tokens are the key written as a positional numeral in radix
//! `alphabet.len()`, most significant digit first. The first alphabet symbol is
//! the zero digit, so key `0` encodes to that single character. Encoding never
//! pads.
//!
//! The alphabet defines the identifier space: tokens issued under one alphabet
//! cannot be decoded under another, so [`DEFAULT_ALPHABET`] must not change for
//! the lifetime of a deployment.

/// Alphabet used by every token issued by this service (radix 62).
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Marks ASCII bytes that are not part of the alphabet.
const NO_DIGIT: u8 = u8::MAX;

/// Errors produced while building a codec or decoding a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("token is empty")]
    Empty,

    #[error("character {character:?} at position {position} is not part of the token alphabet")]
    InvalidCharacter { character: char, position: usize },

    #[error("token {0:?} exceeds the key range")]
    Overflow(String),

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(&'static str),
}

/// Fixed-radix codec over an ASCII alphabet.
#[derive(Debug, Clone, Copy)]
pub struct TokenCodec {
    alphabet: &'static [u8],
    digits: [u8; 128],
}

impl TokenCodec {
    /// Builds a codec for `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidAlphabet`] if the alphabet has fewer than two
    /// symbols, more than 255, contains non-ASCII bytes or repeats a symbol.
    pub fn new(alphabet: &'static str) -> Result<Self, CodecError> {
        let bytes = alphabet.as_bytes();

        if bytes.len() < 2 {
            return Err(CodecError::InvalidAlphabet("needs at least two symbols"));
        }
        if bytes.len() >= NO_DIGIT as usize {
            return Err(CodecError::InvalidAlphabet("too many symbols"));
        }

        let mut digits = [NO_DIGIT; 128];
        for (value, &symbol) in bytes.iter().enumerate() {
            if !symbol.is_ascii() {
                return Err(CodecError::InvalidAlphabet("symbols must be ASCII"));
            }
            if digits[symbol as usize] != NO_DIGIT {
                return Err(CodecError::InvalidAlphabet("symbols must be unique"));
            }
            digits[symbol as usize] = value as u8;
        }

        Ok(Self {
            alphabet: bytes,
            digits,
        })
    }

    /// Number of symbols in the alphabet.
    pub fn radix(&self) -> u64 {
        self.alphabet.len() as u64
    }

    /// Encodes `key` without padding; `0` becomes the first alphabet symbol.
    pub fn encode(&self, key: u64) -> String {
        let radix = self.radix();
        // u64::MAX needs 64 digits in radix 2; larger radixes need fewer.
        let mut buf = [0u8; 64];
        let mut pos = buf.len();
        let mut rest = key;

        loop {
            pos -= 1;
            buf[pos] = self.alphabet[(rest % radix) as usize];
            rest /= radix;
            if rest == 0 {
                break;
            }
        }

        buf[pos..].iter().map(|&b| b as char).collect()
    }

    /// Decodes `token` back into the key it was encoded from.
    ///
    /// Leading zero symbols are accepted and contribute nothing to the value.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Empty`] for an empty token
    /// - [`CodecError::InvalidCharacter`] for any symbol outside the alphabet
    /// - [`CodecError::Overflow`] if the value does not fit in `u64`
    pub fn decode(&self, token: &str) -> Result<u64, CodecError> {
        if token.is_empty() {
            return Err(CodecError::Empty);
        }

        let radix = self.radix();
        let mut key: u64 = 0;

        for (position, character) in token.chars().enumerate() {
            let digit = self
                .digit(character)
                .ok_or(CodecError::InvalidCharacter {
                    character,
                    position,
                })?;

            key = key
                .checked_mul(radix)
                .and_then(|k| k.checked_add(digit))
                .ok_or_else(|| CodecError::Overflow(token.to_string()))?;
        }

        Ok(key)
    }

    fn digit(&self, character: char) -> Option<u64> {
        if !character.is_ascii() {
            return None;
        }
        match self.digits[character as usize] {
            NO_DIGIT => None,
            value => Some(u64::from(value)),
        }
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET).expect("default alphabet is valid")
    }
}
