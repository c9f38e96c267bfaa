//! Address strings.
//!
//! An address is a key path written as one string, e.g. `"this:str:example"`
//! for `["this", "str", "example"]`. The resolvers only deal in key lists;
//! an [`AddressCodec`] converts between the two forms.

use thiserror::Error;

pub const DEFAULT_DELIMITER: char = ':';
const ESCAPE: char = '\\';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("'{0}' cannot be used as an address delimiter")]
    ReservedDelimiter(char),
}

/// Converts key paths to address strings and back.
///
/// Implementations must round-trip: `decode(&encode(keys)) == keys` for any
/// key path the codec can represent.
pub trait AddressCodec {
    fn encode<S: AsRef<str>>(&self, keys: &[S]) -> String;
    fn decode(&self, address: &str) -> Vec<String>;
}

/// Delimiter-joined keys. A backslash escapes the delimiter or another
/// backslash inside a key name.
///
/// The empty string decodes to the empty path, so the single-key path
/// `[""]` is the one path this codec cannot carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPathCodec {
    delimiter: char,
}

impl KeyPathCodec {
    pub fn new(delimiter: char) -> Result<Self, AddressError> {
        if delimiter == ESCAPE {
            return Err(AddressError::ReservedDelimiter(delimiter));
        }
        Ok(Self { delimiter })
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for KeyPathCodec {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl AddressCodec for KeyPathCodec {
    fn encode<S: AsRef<str>>(&self, keys: &[S]) -> String {
        let mut out = String::new();
        for (index, key) in keys.iter().enumerate() {
            if index > 0 {
                out.push(self.delimiter);
            }
            for c in key.as_ref().chars() {
                if c == self.delimiter || c == ESCAPE {
                    out.push(ESCAPE);
                }
                out.push(c);
            }
        }
        out
    }

    fn decode(&self, address: &str) -> Vec<String> {
        if address.is_empty() {
            return Vec::new();
        }

        let mut keys = Vec::new();
        let mut current = String::new();
        let mut chars = address.chars();
        while let Some(c) = chars.next() {
            if c == ESCAPE {
                // A trailing lone backslash is kept as written
                current.push(chars.next().unwrap_or(ESCAPE));
            } else if c == self.delimiter {
                keys.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        keys.push(current);
        keys
    }
}
