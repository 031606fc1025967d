/// Words offered to the user when they don't know what to type.
pub const EXAMPLE_WORDS: &[&str] = &[
    "sunshine",
    "coffee",
    "adventure",
    "rain",
    "success",
    "stress",
    "love",
    "chaos",
    "peace",
    "excitement",
];

/// A single submission, alive only while the request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    canonical: String,
}

impl Query {
    /// Build a query from user input.
    ///
    /// Returns `None` for blank input, which is not an error: blank
    /// submissions are just ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self {
            raw: input.to_string(),
            canonical: trimmed.to_lowercase(),
        })
    }

    /// Exactly what the user typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The word as shown back to the user and stored in history.
    pub fn display(&self) -> &str {
        self.raw.trim()
    }

    /// The word as sent to the classifier.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_not_a_query() {
        assert_eq!(Query::parse(""), None);
        assert_eq!(Query::parse("   "), None);
        assert_eq!(Query::parse("\t\n"), None);
    }

    #[test]
    fn canonical_is_trimmed_and_lowercased() {
        let q = Query::parse("  SunShine ").unwrap();
        assert_eq!(q.raw(), "  SunShine ");
        assert_eq!(q.display(), "SunShine");
        assert_eq!(q.canonical(), "sunshine");
    }
}
