use crate::errors::Error;
use crate::sinks::pdf::config::MM_PER_PT;
use crate::sinks::pdf::wrapping::TextMeasure;
use anyhow::Result;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the font is looked for when nothing else is configured.
pub const DEFAULT_FONT_PATH: &str = "fonts/SimSun.ttf";

/// A TrueType font read from disk.
///
/// The raw bytes are kept so the font can be embedded into every PDF we write
/// (split output embeds it once per part), while the parsed face answers glyph
/// advance queries during wrapping.
pub struct LoadedFont {
    pub path: PathBuf,
    pub data: Vec<u8>,
    face: OwnedFace,
    units_per_em: f32,
}

impl fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFont")
            .field("path", &self.path)
            .field("bytes", &self.data.len())
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl LoadedFont {
    /// Load and parse the font at `path`.
    ///
    /// A font that is absent, unreadable, or not a font at all is a
    /// [`Error::MissingFont`]; this is checked before any page is rendered.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadedFont> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(Error::MissingFont {
                path,
                reason: "file not found".to_string(),
            }
            .into());
        }

        let data = std::fs::read(&path).map_err(|e| Error::MissingFont {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let face = OwnedFace::from_vec(data.clone(), 0).map_err(|e| Error::MissingFont {
            path: path.clone(),
            reason: format!("failed to parse font: {e}"),
        })?;
        let units_per_em = face.as_face_ref().units_per_em() as f32;
        log::debug!(
            "Loaded font {} ({} bytes, {} units/em)",
            path.display(),
            data.len(),
            units_per_em
        );

        Ok(LoadedFont {
            path,
            data,
            face,
            units_per_em,
        })
    }

    /// Horizontal advance of `c` in font units, falling back to the `.notdef`
    /// glyph for characters the font doesn't cover.
    fn advance(&self, c: char) -> u16 {
        let face = self.face.as_face_ref();
        face.glyph_index(c)
            .and_then(|gid| face.glyph_hor_advance(gid))
            .or_else(|| face.glyph_hor_advance(GlyphId(0)))
            .unwrap_or(0)
    }
}

impl TextMeasure for LoadedFont {
    fn char_width_mm(&self, c: char, size_pt: f32) -> f32 {
        let scale = size_pt * MM_PER_PT / self.units_per_em;
        self.advance(c) as f32 * scale
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn absent_font_is_reported_as_missing() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let err = LoadedFont::load(dir.path().join("nope.ttf")).expect_err("font is absent");
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MissingFont { .. })
        ));
    }

    #[test]
    fn garbage_font_is_reported_as_missing() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").expect("can write file");
        let err = LoadedFont::load(&path).expect_err("font doesn't parse");
        match err.downcast_ref::<Error>() {
            Some(Error::MissingFont { path: p, reason }) => {
                assert_eq!(p, &path);
                assert!(reason.starts_with("failed to parse font"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
