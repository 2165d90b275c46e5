use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, Result};

/// State of a single colour flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagState {
    Active,
    Latent,
}

impl FlagState {
    pub fn as_str(self) -> &'static str {
        match self {
            FlagState::Active => "active",
            FlagState::Latent => "latent",
        }
    }
}

impl fmt::Display for FlagState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `R`/`G`/`B` flag mapping. Exactly these three keys are accepted.
// Fields are declared in canonical key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flags {
    #[serde(rename = "B")]
    pub b: FlagState,
    #[serde(rename = "G")]
    pub g: FlagState,
    #[serde(rename = "R")]
    pub r: FlagState,
}

impl Flags {
    pub fn new(r: FlagState, g: FlagState, b: FlagState) -> Self {
        Self { b, g, r }
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R {}, G {}, B {}", self.r, self.g, self.b)
    }
}

/// Chapter metadata carried end-to-end through a stego image.
///
/// Immutable once built; [`ChapterRecord::new`] and deserialization apply the
/// same validation.
// Fields are declared in canonical key order; `canonical::serialize` relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct ChapterRecord {
    chapter: u32,
    file: String,
    flags: Flags,
    glyphs: Vec<String>,
    narrator: String,
    summary: String,
    timestamp: String,
}

impl ChapterRecord {
    /// Build a validated record.
    ///
    /// `chapter` must be positive and `narrator` non-empty. The remaining
    /// strings are opaque.
    pub fn new<G>(
        chapter: u32,
        narrator: impl Into<String>,
        flags: Flags,
        glyphs: G,
        file: impl Into<String>,
        summary: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Result<Self>
    where
        G: IntoIterator,
        G::Item: Into<String>,
    {
        RawRecord {
            chapter,
            narrator: narrator.into(),
            flags,
            glyphs: glyphs.into_iter().map(Into::into).collect(),
            file: file.into(),
            summary: summary.into(),
            timestamp: timestamp.into(),
        }
        .try_into()
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn narrator(&self) -> &str {
        &self.narrator
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Glyphs in their original order.
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Relative path of the chapter page.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// ISO-8601 timestamp, kept verbatim.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Unvalidated wire shape. Unknown keys (e.g. `stego_png`) are ignored.
#[derive(Deserialize)]
struct RawRecord {
    chapter: u32,
    narrator: String,
    flags: Flags,
    glyphs: Vec<String>,
    file: String,
    summary: String,
    timestamp: String,
}

impl TryFrom<RawRecord> for ChapterRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        if raw.chapter == 0 {
            return Err(RecordError::MalformedPayload(
                "chapter must be a positive integer".to_string(),
            ));
        }
        if raw.narrator.is_empty() {
            return Err(RecordError::MalformedPayload(
                "narrator must not be empty".to_string(),
            ));
        }

        Ok(Self {
            chapter: raw.chapter,
            file: raw.file,
            flags: raw.flags,
            glyphs: raw.glyphs,
            narrator: raw.narrator,
            summary: raw.summary,
            timestamp: raw.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kira_flags() -> Flags {
        Flags::new(FlagState::Latent, FlagState::Latent, FlagState::Active)
    }

    #[test]
    fn new_keeps_fields_and_glyph_order() {
        let record = ChapterRecord::new(
            7,
            "Limnus",
            kira_flags(),
            ["c", "a", "b"],
            "frontend/chapter07.html",
            "Limnus – Chapter 07",
            "2024-01-01T00:00:00Z",
        )
        .unwrap();

        assert_eq!(record.chapter(), 7);
        assert_eq!(record.narrator(), "Limnus");
        assert_eq!(record.glyphs(), ["c", "a", "b"]);
        assert_eq!(record.file(), "frontend/chapter07.html");
        assert_eq!(record.flags().b, FlagState::Active);
    }

    #[test]
    fn rejects_zero_chapter() {
        let err = ChapterRecord::new(0, "Kira", kira_flags(), Vec::<String>::new(), "", "", "")
            .unwrap_err();
        assert!(matches!(err, RecordError::MalformedPayload(_)));
    }

    #[test]
    fn rejects_empty_narrator() {
        let err =
            ChapterRecord::new(1, "", kira_flags(), Vec::<String>::new(), "", "", "").unwrap_err();
        assert!(matches!(err, RecordError::MalformedPayload(_)));
    }

    #[test]
    fn flags_display_matches_page_format() {
        assert_eq!(kira_flags().to_string(), "R latent, G latent, B active");
    }
}
