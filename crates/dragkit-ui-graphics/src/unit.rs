//! Unit types: Px

use std::fmt;

/// Raw pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Px(pub f32);

impl Px {
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl From<f32> for Px {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

/// Formats as a CSS length, e.g. `60px` or `12.5px`.
impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_css_length() {
        assert_eq!(Px(60.0).to_string(), "60px");
        assert_eq!(Px(-12.5).to_string(), "-12.5px");
        assert_eq!(Px::from(0.0).to_string(), "0px");
    }
}
