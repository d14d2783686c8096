//! Static description of the Fantasy Entertainment System.
use crate::framebuffer::{HEIGHT, WIDTH};
use fes_libretro::{env_version, input_descriptors, sys::*, types::SystemInfo};
use std::ffi::CString;

pub const LIBRARY_NAME: &str = "Fantasy Entertainment System";
pub const VALID_EXTENSIONS: &str = "fes";

pub const FPS: f64 = 60.0;
pub const SAMPLE_RATE: f64 = 44100.0;

/// Stereo frames produced per call to `retro_run`.
pub const AUDIO_FRAMES_PER_TICK: usize = (SAMPLE_RATE / FPS) as usize;

/// Ticks that have to pass between two rewinds of the audio source.
pub const REWIND_COOLDOWN_TICKS: u32 = FPS as u32;

pub const PERFORMANCE_LEVEL: u32 = 4;

pub const INPUT_DESCRIPTORS: &[retro_input_descriptor] = &input_descriptors!(
    { 0, RETRO_DEVICE_JOYPAD, 0, RETRO_DEVICE_ID_JOYPAD_UP, "Rewind audio" },
);

pub fn system_info() -> SystemInfo {
    SystemInfo {
        library_name: CString::new(LIBRARY_NAME).unwrap_or_default(),
        library_version: CString::new(env_version!("CARGO_PKG_VERSION").to_string())
            .unwrap_or_default(),
        valid_extensions: CString::new(VALID_EXTENSIONS).unwrap_or_default(),

        need_fullpath: true,
        block_extract: false,
    }
}

pub fn av_info() -> retro_system_av_info {
    retro_system_av_info {
        geometry: retro_game_geometry {
            base_width: WIDTH,
            base_height: HEIGHT,
            max_width: WIDTH,
            max_height: HEIGHT,
            aspect_ratio: WIDTH as f32 / HEIGHT as f32,
        },
        timing: retro_system_timing {
            fps: FPS,
            sample_rate: SAMPLE_RATE,
        },
    }
}
