use unicode_segmentation::UnicodeSegmentation;

/// A city name as typed into the search or subscription form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City(String);

impl City {
    /// Trims surrounding whitespace and rejects blank or overlong input.
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Field required!".into());
        }

        if trimmed.graphemes(true).count() > 256 {
            Err(format!("{trimmed} is not a valid city name."))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl AsRef<str> for City {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
