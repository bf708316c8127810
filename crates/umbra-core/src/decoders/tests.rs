//! Tests for image decoders

use super::*;
use crate::exporters::export_image;
use tempfile::tempdir;

fn pattern(width: u32, height: u32, channels: u8) -> ImageBuffer {
    let data = (0..width * height * channels as u32)
        .map(|i| (i * 7 % 256) as u8)
        .collect();
    ImageBuffer::new(width, height, channels, data).unwrap()
}

// ========================================================================
// Lossless round trips
// ========================================================================

#[test]
fn test_png_roundtrip_rgb_and_gray() {
    let dir = tempdir().unwrap();
    for channels in [1u8, 3] {
        let image = pattern(13, 9, channels);
        let path = dir.path().join(format!("frame_{}.png", channels));
        export_image(&image, &path).unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded, image);
    }
}

#[test]
fn test_tiff_roundtrip_rgb() {
    let dir = tempdir().unwrap();
    let image = pattern(6, 11, 3);
    let path = dir.path().join("frame.tiff");
    export_image(&image, &path).unwrap();

    assert_eq!(decode_image(&path).unwrap(), image);
}

#[test]
fn test_bmp_roundtrip_rgb() {
    let dir = tempdir().unwrap();
    let image = pattern(8, 4, 3);
    let path = dir.path().join("frame.bmp");
    export_image(&image, &path).unwrap();

    assert_eq!(decode_image(&path).unwrap(), image);
}

#[test]
fn test_jpeg_decodes_with_same_shape() {
    let dir = tempdir().unwrap();
    let image = ImageBuffer::rgb(24, 16, [200, 40, 40]);
    let path = dir.path().join("frame.jpg");
    export_image(&image, &path).unwrap();

    let decoded = decode_image(&path).unwrap();
    assert_eq!((decoded.width, decoded.height, decoded.channels), (24, 16, 3));
}

// ========================================================================
// Channel handling
// ========================================================================

#[test]
fn test_from_interleaved_drops_alpha() {
    let rgba = vec![1, 2, 3, 255, 4, 5, 6, 0];
    let image = from_interleaved(2, 1, 4, rgba).unwrap();
    assert_eq!(image.channels, 3);
    assert_eq!(image.data, vec![1, 2, 3, 4, 5, 6]);

    let gray_alpha = vec![9, 255, 8, 128];
    let image = from_interleaved(2, 1, 2, gray_alpha).unwrap();
    assert_eq!(image.channels, 1);
    assert_eq!(image.data, vec![9, 8]);
}

#[test]
fn test_from_interleaved_rejects_short_buffer() {
    let err = from_interleaved(2, 2, 3, vec![0; 11]).unwrap_err();
    assert!(err.contains("buffer size mismatch"));
}

// ========================================================================
// Failures
// ========================================================================

#[test]
fn test_missing_file_reports_path() {
    let err = decode_image("/nonexistent/scan.png").unwrap_err();
    match err {
        UmbraError::Decode { path, reason } => {
            assert_eq!(path, Path::new("/nonexistent/scan.png"));
            assert!(reason.contains("Failed to open PNG file"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unsupported_extension() {
    let err = decode_image("notes.txt").unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
    assert!(decode_image("no_extension").is_err());
}

#[test]
fn test_corrupt_png_is_a_decode_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    assert!(matches!(
        decode_image(&path),
        Err(UmbraError::Decode { .. })
    ));
}

#[test]
fn test_supported_extensions() {
    for ext in ["png", "tif", "tiff", "jpg", "jpeg", "bmp", "nef", "cr2", "arw", "dng"] {
        assert!(is_supported_extension(ext), "{} should be supported", ext);
    }
    assert!(!is_supported_extension("txt"));
}

#[test]
fn test_is_raw_path() {
    assert!(is_raw_path(Path::new("DSC_0001.NEF")));
    assert!(!is_raw_path(Path::new("frame.png")));
    assert!(!is_raw_path(Path::new("no_extension")));
}

#[cfg(not(feature = "raw"))]
#[test]
fn test_raw_without_feature_fails_per_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frame.nef");
    std::fs::write(&path, b"raw bytes").unwrap();

    assert!(!raw_supported());
    let err = decode_image(&path).unwrap_err();
    assert!(err.to_string().contains("RAW support is not enabled"));
}
