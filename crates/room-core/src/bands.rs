use crate::error::ValidationError;

/// Ordered set of frequency-band labels shared by a room model and every
/// result derived from it.
///
/// The band set is a runtime parameter rather than a hardcoded constant:
/// the default is the three-band low/mid/high split, but callers can run
/// anything from a single broadband channel to a full octave-band analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BandSet {
    labels: Vec<String>,
}

impl BandSet {
    /// Creates a band set from an ordered list of labels.
    pub fn new<I, S>(labels: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ValidationError::EmptyBandSet);
        }
        Ok(Self { labels })
    }

    /// The conventional three-band split used by the bundled room
    /// descriptions.
    pub fn low_mid_high() -> Self {
        Self {
            labels: vec!["low".to_string(), "mid".to_string(), "high".to_string()],
        }
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set holds no bands. Always false for a validated set.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of the band at `index`.
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    /// Iterator over the labels in band order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Index of the band with the given label, if present.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

impl Default for BandSet {
    fn default() -> Self {
        Self::low_mid_high()
    }
}
