#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    // General device errors
    PoweredDown,
    IoPin,

    /// The channel accepted fewer payload bytes than the upload announced.
    PartialWrite {
        accepted: usize,
        expected: usize,
    },

    /// A path or argument did not fit its fixed size buffer.
    Overflow,

    Atat(atat::Error),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::PoweredDown => defmt::write!(f, "PoweredDown"),
            Self::IoPin => defmt::write!(f, "IoPin"),
            Self::PartialWrite { accepted, expected } => {
                defmt::write!(f, "PartialWrite({=usize}/{=usize})", accepted, expected)
            }
            Self::Overflow => defmt::write!(f, "Overflow"),
            Self::Atat(e) => defmt::write!(f, "Atat({:?})", e),
        }
    }
}

impl From<atat::Error> for Error {
    fn from(e: atat::Error) -> Self {
        Self::Atat(e)
    }
}
