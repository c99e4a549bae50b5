use std::path::Path;

use genpdf::fonts::{FontData, FontFamily};

use crate::error::{RenderError, RenderResult};

/// Family used when none is configured. Must cover the Bengali block.
pub const DEFAULT_FAMILY: &str = "NotoSerifBengali";

/// A font family loaded once at startup and shared by every render.
///
/// Needs `<dir>/<family>-Regular.ttf`. `-Bold`, `-Italic` and `-BoldItalic`
/// are picked up when present; a missing bold face falls back to regular and
/// missing italics fall back to the upright faces.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    family_name: String,
    family: FontFamily<FontData>,
}

impl FontRegistry {
    pub fn load(dir: impl AsRef<Path>, family: &str) -> RenderResult<Self> {
        let dir = dir.as_ref();
        let regular = load_face(dir, family, "Regular").map_err(|reason| RenderError::Font {
            family: family.to_string(),
            dir: dir.display().to_string(),
            reason,
        })?;
        let bold = optional_face(dir, family, "Bold").unwrap_or_else(|| regular.clone());
        let italic = optional_face(dir, family, "Italic").unwrap_or_else(|| regular.clone());
        let bold_italic = optional_face(dir, family, "BoldItalic").unwrap_or_else(|| bold.clone());

        tracing::info!(family, dir = %dir.display(), "font family registered");

        Ok(Self {
            family_name: family.to_string(),
            family: FontFamily {
                regular,
                bold,
                italic,
                bold_italic,
            },
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn family(&self) -> FontFamily<FontData> {
        self.family.clone()
    }
}

fn load_face(dir: &Path, family: &str, face: &str) -> Result<FontData, String> {
    let path = dir.join(format!("{family}-{face}.ttf"));
    FontData::load(&path, None).map_err(|err| format!("{}: {err}", path.display()))
}

fn optional_face(dir: &Path, family: &str, face: &str) -> Option<FontData> {
    match load_face(dir, family, face) {
        Ok(data) => Some(data),
        Err(reason) => {
            tracing::debug!(family, face, %reason, "font face missing, using fallback");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts")
    }

    #[test]
    fn missing_directory_is_a_font_error() {
        let err = FontRegistry::load("/definitely/not/here", DEFAULT_FAMILY).unwrap_err();
        match err {
            RenderError::Font { family, dir, reason }
                if family == DEFAULT_FAMILY
                    && dir == "/definitely/not/here"
                    && reason.contains("NotoSerifBengali-Regular.ttf") => {}
            other => panic!("Expected Font error, got {other:?}"),
        }
    }

    #[test]
    fn regular_and_bold_are_enough() {
        let fonts = FontRegistry::load(fixture_dir(), "DejaVuSans").unwrap();
        assert_eq!(fonts.family_name(), "DejaVuSans");
    }

    #[test]
    fn missing_regular_face_is_an_error_even_with_bold() {
        let dir = std::env::temp_dir().join(format!("quickbill-fonts-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::copy(fixture_dir().join("DejaVuSans-Bold.ttf"), dir.join("Only-Bold.ttf")).unwrap();

        assert!(matches!(
            FontRegistry::load(&dir, "Only"),
            Err(RenderError::Font { .. })
        ));
    }
}
