//! RAW image decoder (delegates to umbra-raw/LibRaw)

use std::path::Path;

use crate::buffer::ImageBuffer;

use super::from_interleaved;

/// Decode a camera RAW file with camera white balance.
///
/// Fails with an explanatory reason when RAW support was not compiled in.
pub(crate) fn decode_raw(path: &Path) -> Result<ImageBuffer, String> {
    let raw = umbra_raw::decode_raw(path)?;
    from_interleaved(raw.width, raw.height, raw.channels as usize, raw.data)
}
