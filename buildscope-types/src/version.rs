use crate::framework::FrameworkParseError;
use std::fmt;

/// A four-part framework version. Missing components are zero, so `6` and `6.0` are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl FrameworkVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: 0,
            revision: 0,
        }
    }

    /// Strict parse used for `TargetFrameworkVersion` values: two to four dot-separated numeric
    /// components, surrounding whitespace ignored.
    pub fn parse_strict(value: &str) -> Result<Self, FrameworkParseError> {
        let invalid = || FrameworkParseError::InvalidVersion {
            value: value.to_string(),
        };

        let parts = value
            .trim()
            .split('.')
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        if !(2..=4).contains(&parts.len()) {
            return Err(invalid());
        }
        Ok(Self::from_components(&parts))
    }

    /// Lenient parse used for the version part of a moniker.
    ///
    /// - empty means `0.0`
    /// - dotted (`6.0`, `4.7.2`) is read component by component
    /// - undotted (`48`, `472`) is read one digit per component
    pub(crate) fn parse_moniker(value: &str) -> Option<Self> {
        if value.is_empty() {
            return Some(Self::default());
        }

        let parts: Vec<u32> = if value.contains('.') {
            value
                .split('.')
                .map(|p| p.parse::<u32>().ok())
                .collect::<Option<Vec<_>>>()?
        } else {
            value
                .chars()
                .map(|c| c.to_digit(10))
                .collect::<Option<Vec<_>>>()?
        };

        if parts.is_empty() || parts.len() > 4 {
            return None;
        }
        Some(Self::from_components(&parts))
    }

    fn from_components(parts: &[u32]) -> Self {
        let at = |i: usize| parts.get(i).copied().unwrap_or(0);
        Self {
            major: at(0),
            minor: at(1),
            build: at(2),
            revision: at(3),
        }
    }

    fn significant(&self) -> &'static [usize] {
        if self.revision != 0 {
            &[0, 1, 2, 3]
        } else if self.build != 0 {
            &[0, 1, 2]
        } else {
            &[0, 1]
        }
    }

    fn component(&self, index: usize) -> u32 {
        match index {
            0 => self.major,
            1 => self.minor,
            2 => self.build,
            _ => self.revision,
        }
    }

    /// Undotted moniker form (`48`, `472`), or `None` when a component needs two digits.
    pub(crate) fn compact(&self) -> Option<String> {
        let mut out = String::new();
        for &i in self.significant() {
            let c = self.component(i);
            if c > 9 {
                return None;
            }
            out.push(char::from(b'0' + c as u8));
        }
        Some(out)
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .significant()
            .iter()
            .map(|&i| self.component(i).to_string())
            .collect();
        f.write_str(&parts.join("."))
    }
}
