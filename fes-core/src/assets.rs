//! Locating and decoding the test assets.
use crate::{
    error::AssetError,
    framebuffer::{Framebuffer, Pixel},
};
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub const IMAGE_FILE: &str = "test.png";
pub const AUDIO_FILE: &str = "test.ogg";

/// Overrides every other asset location.
pub const ASSET_DIR_ENV: &str = "FES_ASSET_DIR";

/// Subdirectory of the frontend's asset and system directories.
pub const ASSET_SUBDIR: &str = "fes";

/// Relative to the frontend's working directory.
pub const FALLBACK_ASSET_DIR: &str = "../assets";

/// Picks the directory the test assets are loaded from, first match wins:
/// `override_dir`, `<core_assets>/fes`, `<system>/fes`, [`FALLBACK_ASSET_DIR`].
///
/// The frontend directories only count if the `fes` subdirectory exists.
pub fn resolve_asset_dir(
    override_dir: Option<PathBuf>,
    core_assets: Option<PathBuf>,
    system: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return dir;
    }

    [core_assets, system]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(ASSET_SUBDIR))
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_ASSET_DIR))
}

pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_owned(),
        source,
    })?;

    Ok(image::load_from_memory(&bytes)?.into_rgba8())
}

/// Reorders RGBA bytes into an XRGB8888 pixel, alpha lands in the unused byte.
#[inline]
pub fn rgba_to_xrgb(rgba: [u8; 4]) -> Pixel {
    let [r, g, b, a] = rgba;

    Pixel::from_be_bytes([a, r, g, b])
}

/// Copies `image` to the top left corner, clipped to the frame buffer.
pub fn draw_image(framebuffer: &mut Framebuffer, image: &RgbaImage) {
    let pixels: Vec<Pixel> = image.pixels().map(|p| rgba_to_xrgb(p.0)).collect();

    framebuffer.blit(0, 0, &pixels, image.width(), image.height());
}

/// Dawnbringer's 8 colour palette.
pub const PALETTE: [Pixel; 8] = [
    0x000000, 0x55415F, 0x646964, 0xD77355, 0x508CD7, 0x64B964, 0xE6C86E, 0xDCF5FF,
];

#[rustfmt::skip]
pub const SPRITE: [u8; 8 * 8] = [
    1, 0, 0, 0, 0, 0, 0, 1,
    0, 2, 1, 1, 1, 1, 2, 0,
    0, 1, 3, 2, 2, 3, 1, 0,
    0, 1, 2, 4, 5, 2, 1, 0,
    0, 1, 2, 6, 7, 2, 1, 0,
    0, 1, 3, 2, 2, 3, 1, 0,
    0, 2, 1, 1, 1, 1, 2, 0,
    1, 0, 0, 0, 0, 0, 0, 1,
];

/// Draws the palette test sprite to the top left corner.
pub fn draw_sprite(framebuffer: &mut Framebuffer) {
    let pixels = SPRITE.map(|index| PALETTE[index as usize]);

    framebuffer.blit(0, 0, &pixels, 8, 8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{WHITE, WIDTH};
    use image::Rgba;

    #[test]
    fn override_wins() {
        let assets = tempfile::tempdir().unwrap();
        std::fs::create_dir(assets.path().join(ASSET_SUBDIR)).unwrap();

        let dir = resolve_asset_dir(
            Some(PathBuf::from("/opt/fes")),
            Some(assets.path().to_owned()),
            None,
        );

        assert_eq!(dir, PathBuf::from("/opt/fes"));
    }

    #[test]
    fn frontend_directories_need_subdir() {
        let assets = tempfile::tempdir().unwrap();
        let system = tempfile::tempdir().unwrap();
        std::fs::create_dir(system.path().join(ASSET_SUBDIR)).unwrap();

        let dir = resolve_asset_dir(
            Some(PathBuf::new()),
            Some(assets.path().to_owned()),
            Some(system.path().to_owned()),
        );
        assert_eq!(dir, system.path().join(ASSET_SUBDIR));

        std::fs::create_dir(assets.path().join(ASSET_SUBDIR)).unwrap();

        let dir = resolve_asset_dir(None, Some(assets.path().to_owned()), Some(system.path().to_owned()));
        assert_eq!(dir, assets.path().join(ASSET_SUBDIR));
    }

    #[test]
    fn falls_back_to_relative_dir() {
        let empty = tempfile::tempdir().unwrap();
        let dir = resolve_asset_dir(None, Some(empty.path().to_owned()), None);

        assert_eq!(dir, PathBuf::from(FALLBACK_ASSET_DIR));
    }

    #[test]
    fn swaps_red_and_blue() {
        assert_eq!(rgba_to_xrgb([0x11, 0x22, 0x33, 0xFF]), 0xFF11_2233);
        assert_eq!(rgba_to_xrgb([0xFF, 0, 0, 0]), 0x00FF_0000);
    }

    #[test]
    fn decodes_png_into_framebuffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(IMAGE_FILE);

        let mut image = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0xFF, 0xFF]));
        image.put_pixel(1, 1, Rgba([0xFF, 0x80, 0, 0xFF]));
        image.save(&path).unwrap();

        let image = load_image(&path).unwrap();
        let mut fb = Framebuffer::new();
        fb.clear(WHITE);
        draw_image(&mut fb, &image);

        assert_eq!(fb.get(0, 0), Some(0xFF00_00FF));
        assert_eq!(fb.get(1, 1), Some(0xFFFF_8000));
        assert_eq!(fb.get(3, 0), Some(WHITE));
        assert_eq!(fb.get(0, 2), Some(WHITE));
    }

    #[test]
    fn missing_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            load_image(&dir.path().join(IMAGE_FILE)),
            Err(AssetError::Io { .. })
        ));
    }

    #[test]
    fn draws_sprite() {
        let mut fb = Framebuffer::new();
        fb.clear(WHITE);
        draw_sprite(&mut fb);

        assert_eq!(fb.get(0, 0), Some(PALETTE[1]));
        assert_eq!(fb.get(1, 0), Some(PALETTE[0]));
        assert_eq!(fb.get(3, 4), Some(PALETTE[6]));
        assert_eq!(fb.get(8, 0), Some(WHITE));
        assert_eq!(fb.get(WIDTH - 1, 0), Some(WHITE));
    }
}
