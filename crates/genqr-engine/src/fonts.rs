//! Font resources used for text measurement and drawing.

use ab_glyph::FontArc;
use tracing::info;

use crate::ResourceError;

/// Bold and regular faces. Holding one means font metrics are available.
#[derive(Clone)]
pub struct FontSet {
    pub bold: FontArc,
    pub regular: FontArc,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet").finish_non_exhaustive()
    }
}

impl FontSet {
    /// Parse TTF/OTF data for both faces.
    pub fn from_bytes(bold: Vec<u8>, regular: Vec<u8>) -> Result<Self, ResourceError> {
        let bold = FontArc::try_from_vec(bold).map_err(|_| ResourceError::InvalidFont("bold"))?;
        let regular =
            FontArc::try_from_vec(regular).map_err(|_| ResourceError::InvalidFont("regular"))?;
        Ok(Self { bold, regular })
    }

    /// Load the first installed pair of system fonts.
    pub fn load_system() -> Result<Self, ResourceError> {
        for (bold_path, regular_path) in system_font_candidates() {
            let (Ok(bold), Ok(regular)) = (std::fs::read(bold_path), std::fs::read(regular_path))
            else {
                continue;
            };
            match Self::from_bytes(bold, regular) {
                Ok(set) => {
                    info!(bold = %bold_path, regular = %regular_path, "Using system fonts");
                    return Ok(set);
                }
                Err(e) => tracing::warn!(path = %bold_path, "Skipping unusable system font: {e}"),
            }
        }
        Err(ResourceError::FontNotFound)
    }
}

fn system_font_candidates() -> &'static [(&'static str, &'static str)] {
    #[cfg(target_os = "macos")]
    {
        &[
            (
                "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
            ),
            (
                "/System/Library/Fonts/Supplemental/Verdana Bold.ttf",
                "/System/Library/Fonts/Supplemental/Verdana.ttf",
            ),
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            ("C:\\Windows\\Fonts\\arialbd.ttf", "C:\\Windows\\Fonts\\arial.ttf"),
            ("C:\\Windows\\Fonts\\segoeuib.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"),
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            (
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            ),
            (
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            ),
        ]
    }
}
