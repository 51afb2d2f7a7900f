//! Field cursor over `#NAME: a,"b",c` reply and URC lines.
//!
//! Telit replies carry a `#NAME:` marker (or `NAME:` for a few URCs) followed
//! by comma separated fields, where string fields may be quoted and may
//! contain commas. Fields are consumed left to right; unread trailing fields
//! are simply dropped with the cursor.

use heapless::String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// No field left on the line
    Missing,
    /// Field is not a decimal integer
    NotInteger,
    /// Field is not valid UTF-8
    Encoding,
}

impl From<FieldError> for atat::Error {
    fn from(_: FieldError) -> Self {
        atat::Error::Parse
    }
}

#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Fields<'a> {
    pub fn new(fields: &'a [u8]) -> Self {
        let fields = trim(fields);
        Self {
            rest: (!fields.is_empty()).then_some(fields),
        }
    }

    /// Cursor over the fields of `line`, if it starts with `prefix`.
    pub fn with_prefix(line: &'a [u8], prefix: &[u8]) -> Option<Self> {
        trim(line).strip_prefix(prefix).map(Self::new)
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_none()
    }

    fn next_field(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest?;
        let mut quoted = false;
        for (i, &c) in rest.iter().enumerate() {
            match c {
                b'"' => quoted = !quoted,
                b',' if !quoted => {
                    self.rest = Some(&rest[i + 1..]);
                    return Some(trim(&rest[..i]));
                }
                _ => {}
            }
        }
        self.rest = None;
        Some(trim(rest))
    }

    pub fn read_int(&mut self) -> Result<i32, FieldError> {
        let field = self.next_field().ok_or(FieldError::Missing)?;
        let field = core::str::from_utf8(field).map_err(|_| FieldError::Encoding)?;
        field.parse().map_err(|_| FieldError::NotInteger)
    }

    /// Read a string field, stripping surrounding quotes. Content longer than
    /// `N` bytes is truncated at a character boundary.
    pub fn read_string<const N: usize>(&mut self) -> Result<String<N>, FieldError> {
        let field = self.next_field().ok_or(FieldError::Missing)?;
        let field = core::str::from_utf8(unquote(field)).map_err(|_| FieldError::Encoding)?;

        let mut s = String::new();
        for c in field.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        Ok(s)
    }

    pub fn skip(&mut self) -> Result<(), FieldError> {
        self.next_field().map(|_| ()).ok_or(FieldError::Missing)
    }
}

/// Every line of `body` starting with `prefix`, in reply order.
pub fn lines<'a>(body: &'a [u8], prefix: &'a [u8]) -> impl Iterator<Item = Fields<'a>> + 'a {
    body.split(|&c| c == b'\n')
        .filter_map(move |line| Fields::with_prefix(line, prefix))
}

pub(crate) fn trim(mut s: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = s {
        if first.is_ascii_whitespace() {
            s = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = s {
        if last.is_ascii_whitespace() {
            s = rest;
        } else {
            break;
        }
    }
    s
}

fn unquote(s: &[u8]) -> &[u8] {
    match s {
        [b'"', inner @ .., b'"'] => inner,
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_mixed_fields() {
        let mut fields = Fields::with_prefix(b"#LWM2MINFO: \"CLIENT\",\"REG, DONE\",7", b"#LWM2MINFO:").unwrap();

        assert_eq!(fields.read_string::<16>().unwrap().as_str(), "CLIENT");
        assert_eq!(fields.read_string::<16>().unwrap().as_str(), "REG, DONE");
        assert_eq!(fields.read_int(), Ok(7));
        assert_eq!(fields.read_int(), Err(FieldError::Missing));
        assert!(fields.is_empty());
    }

    #[test]
    fn prefix_must_match() {
        assert!(Fields::with_prefix(b"#SGACT: 1,1", b"#M2MLIST:").is_none());
        assert!(Fields::with_prefix(b"\r\n#SGACT: 1,1\r", b"#SGACT:").is_some());
    }

    #[test]
    fn empty_line_has_no_fields() {
        let mut fields = Fields::with_prefix(b"#LWM2MEND:   ", b"#LWM2MEND:").unwrap();
        assert!(fields.is_empty());
        assert_eq!(fields.read_int(), Err(FieldError::Missing));
        assert_eq!(fields.skip(), Err(FieldError::Missing));
    }

    #[test]
    fn non_numeric_int() {
        let mut fields = Fields::new(b"\"abc\",2");
        assert_eq!(fields.read_int(), Err(FieldError::NotInteger));
        assert_eq!(fields.read_int(), Ok(2));
    }

    #[test]
    fn long_string_is_truncated() {
        let mut fields = Fields::new(b"\"object_3303.xml\"");
        assert_eq!(fields.read_string::<6>().unwrap().as_str(), "object");
    }

    #[test]
    fn invalid_utf8() {
        let mut fields = Fields::new(b"\xff\xfe,1");
        assert_eq!(fields.read_string::<8>(), Err(FieldError::Encoding));
        assert_eq!(fields.read_int(), Ok(1));
    }

    #[test]
    fn lines_filter_by_prefix() {
        let body = b"#SGACT: 1,1\r\n+CME ERROR: 3\r\n#SGACT: 2,0\r\n";
        let ids: heapless::Vec<i32, 4> = lines(body, b"#SGACT:")
            .map(|mut f| f.read_int().unwrap())
            .collect();
        assert_eq!(ids.as_slice(), &[1, 2]);
    }
}
