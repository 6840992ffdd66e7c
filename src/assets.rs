use include_dir::{include_dir, Dir};

use crate::error::{Result, ThumpError};

static ASSET_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

/// Contents of a bundled asset file as UTF-8
pub fn read_asset(file_name: &str) -> Result<&'static str> {
    ASSET_DIR
        .get_file(file_name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| ThumpError::MissingAsset(file_name.to_string()))
}
