//! QR matrix generation.
//!
//! Encoding follows the QR Code Model 2 pipeline: optimal segment mode
//! selection (numeric/alphanumeric/byte), the smallest normal version that
//! fits at the requested level, Reed-Solomon codewords, function pattern
//! placement and penalty-minimizing mask choice (lowest index wins ties).

use qrcode::types::QrError;
use qrcode::{QrCode, Version};
use tracing::debug;

use crate::EncodingError;
use crate::config::EcLevel;

/// Immutable N×N grid of dark/light modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    version: i16,
    level: EcLevel,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Number of modules per side (`17 + 4 * version`).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn version(&self) -> i16 {
        self.version
    }

    pub fn level(&self) -> EcLevel {
        self.level
    }

    /// Whether the module at column `x`, row `y` is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }

    /// Rows of modules, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.width)
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Encode `payload` at `level` into a module matrix.
///
/// Fails with [`EncodingError::DataTooLong`] when the payload does not fit
/// version 40 at the requested level; the payload is never truncated.
pub fn generate(payload: &str, level: EcLevel) -> Result<QrMatrix, EncodingError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), level.into()).map_err(
        |e| match e {
            QrError::DataTooLong => EncodingError::DataTooLong {
                len: payload.len(),
                level,
            },
            other => EncodingError::Qr(other.to_string()),
        },
    )?;

    let version = match code.version() {
        Version::Normal(v) => v,
        Version::Micro(v) => {
            return Err(EncodingError::Qr(format!("unexpected micro version M{v}")));
        }
    };

    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    debug!(version, width, %level, len = payload.len(), "Generated QR matrix");

    Ok(QrMatrix {
        width,
        version,
        level,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_finder_at(m: &QrMatrix, ox: usize, oy: usize) {
        for y in 0..7 {
            for x in 0..7 {
                let ring = x == 0 || x == 6 || y == 0 || y == 6;
                let core = (2..=4).contains(&x) && (2..=4).contains(&y);
                assert_eq!(
                    m.is_dark(ox + x, oy + y),
                    ring || core,
                    "finder module ({x},{y}) at origin ({ox},{oy})"
                );
            }
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        for level in EcLevel::ALL {
            let a = generate("https://example.com/badge?id=42", level).unwrap();
            let b = generate("https://example.com/badge?id=42", level).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_width_matches_version() {
        let m = generate("hello", EcLevel::M).unwrap();
        assert_eq!(m.width(), 17 + 4 * m.version() as usize);
        assert_eq!(m.width() % 2, 1);
        assert!(m.width() >= 21);
        assert_eq!(m.rows().count(), m.width());
    }

    #[test]
    fn test_finder_and_timing_patterns_present() {
        let m = generate("WIFI:T:WPA;S:Home;P:1234;;", EcLevel::Q).unwrap();
        let n = m.width();
        assert_finder_at(&m, 0, 0);
        assert_finder_at(&m, n - 7, 0);
        assert_finder_at(&m, 0, n - 7);
        for i in 8..n - 8 {
            assert_eq!(m.is_dark(i, 6), i % 2 == 0, "horizontal timing at {i}");
            assert_eq!(m.is_dark(6, i), i % 2 == 0, "vertical timing at {i}");
        }
    }

    #[test]
    fn test_smallest_version_is_chosen() {
        // Version 1-H holds 7 bytes in byte mode.
        assert_eq!(generate("abcdefg", EcLevel::H).unwrap().version(), 1);
        assert_eq!(generate("abcdefgh", EcLevel::H).unwrap().version(), 2);
        // Version 1-L holds 17 bytes.
        assert_eq!(generate("abcdefghijklmnopq", EcLevel::L).unwrap().version(), 1);
        assert_eq!(generate("abcdefghijklmnopqr", EcLevel::L).unwrap().version(), 2);
    }

    #[test]
    fn test_version_boundaries_at_m_and_q() {
        // Version 1-M holds 14 bytes, 1-Q holds 11.
        assert_eq!(generate(&"m".repeat(14), EcLevel::M).unwrap().version(), 1);
        assert_eq!(generate(&"m".repeat(15), EcLevel::M).unwrap().version(), 2);
        assert_eq!(generate(&"q".repeat(11), EcLevel::Q).unwrap().version(), 1);
        assert_eq!(generate(&"q".repeat(12), EcLevel::Q).unwrap().version(), 2);
    }

    #[test]
    fn test_level_growth_across_boundary() {
        let payload = "z".repeat(12);
        let versions: Vec<i16> = EcLevel::ALL
            .iter()
            .map(|&l| generate(&payload, l).unwrap().version())
            .collect();
        assert_eq!(versions, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_matrix_scans_with_requested_level() {
        const QUIET: usize = 4;
        const SCALE: usize = 4;
        // Format-info encoding of L, M, Q, H.
        let format_bits = [1u16, 0, 3, 2];
        for (level, bits) in EcLevel::ALL.into_iter().zip(format_bits) {
            let m = generate("https://example.com/scan", level).unwrap();
            let side = (m.width() + 2 * QUIET) * SCALE;
            let mut img = rqrr::PreparedImage::prepare_from_bitmap(side, side, |x, y| {
                let (mx, my) = (x / SCALE, y / SCALE);
                let inside = (QUIET..QUIET + m.width()).contains(&mx)
                    && (QUIET..QUIET + m.width()).contains(&my);
                inside && m.is_dark(mx - QUIET, my - QUIET)
            });
            let grids = img.detect_grids();
            assert_eq!(grids.len(), 1, "level {level}");
            let (meta, content) = grids[0].decode().unwrap();
            assert_eq!(content, "https://example.com/scan");
            assert_eq!(meta.ecc_level, bits, "level {level}");
            assert_eq!(meta.version.0, m.version() as usize);
            assert!(meta.mask < 8);
        }
    }

    #[test]
    fn test_higher_level_never_shrinks_version() {
        for payload in ["a", "hello world", "https://example.com/some/longer/path?q=1"] {
            let versions: Vec<i16> = EcLevel::ALL
                .iter()
                .map(|&l| generate(payload, l).unwrap().version())
                .collect();
            assert!(
                versions.windows(2).all(|w| w[0] <= w[1]),
                "{payload}: {versions:?}"
            );
        }
    }

    #[test]
    fn test_too_long_payload_fails() {
        let payload = "x".repeat(3000);
        match generate(&payload, EcLevel::H) {
            Err(EncodingError::DataTooLong { len, level }) => {
                assert_eq!(len, 3000);
                assert_eq!(level, EcLevel::H);
            }
            other => panic!("expected DataTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_matrix_has_dark_and_light_modules() {
        let m = generate("test", EcLevel::L).unwrap();
        assert!(m.dark_count() > 0);
        assert!(m.dark_count() < m.width() * m.width());
    }
}
