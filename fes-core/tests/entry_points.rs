//! Drives the exported libretro API the way a frontend does.
//!
//! The core is a process wide singleton, so everything happens in one test.
use fes_core::{
    framebuffer::{HEIGHT, PITCH, WHITE, WIDTH},
    system::AUDIO_FRAMES_PER_TICK,
};
use fes_libretro::sys::*;
use image::{Rgba, RgbaImage};
use std::{
    cell::{Cell, RefCell},
    ffi::{c_void, CStr},
};

thread_local! {
    static COMMANDS: RefCell<Vec<u32>> = RefCell::new(Vec::new());
    static FRAMES: RefCell<Vec<Vec<u8>>> = RefCell::new(Vec::new());
    static SAMPLES: RefCell<Vec<(i16, i16)>> = RefCell::new(Vec::new());
    static BATCHED: Cell<usize> = Cell::new(0);
    static POLLS: Cell<u32> = Cell::new(0);
}

unsafe extern "C" fn environment(cmd: u32, data: *mut c_void) -> bool {
    COMMANDS.with(|c| c.borrow_mut().push(cmd));

    match cmd {
        RETRO_ENVIRONMENT_SET_PIXEL_FORMAT => {
            *(data as *const retro_pixel_format) == retro_pixel_format::RETRO_PIXEL_FORMAT_XRGB8888
        }
        RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME
        | RETRO_ENVIRONMENT_SET_VARIABLES
        | RETRO_ENVIRONMENT_SET_INPUT_DESCRIPTORS
        | RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL => true,
        _ => false,
    }
}

unsafe extern "C" fn video_refresh(data: *const c_void, width: u32, height: u32, pitch: usize) {
    assert_eq!((width, height, pitch), (WIDTH, HEIGHT, PITCH));

    let frame = std::slice::from_raw_parts(data as *const u8, pitch * height as usize);
    FRAMES.with(|f| f.borrow_mut().push(frame.to_vec()));
}

unsafe extern "C" fn audio_sample(left: i16, right: i16) {
    SAMPLES.with(|s| s.borrow_mut().push((left, right)));
}

unsafe extern "C" fn audio_sample_batch(_data: *const i16, frames: usize) -> usize {
    BATCHED.with(|b| b.set(b.get() + frames));
    frames
}

unsafe extern "C" fn input_poll() {
    POLLS.with(|p| p.set(p.get() + 1));
}

unsafe extern "C" fn input_state(_port: u32, _device: u32, _index: u32, _id: u32) -> i16 {
    0
}

fn pixel(frame: &[u8], x: usize, y: usize) -> u32 {
    let offset = y * PITCH + x * 4;
    u32::from_ne_bytes(frame[offset..offset + 4].try_into().unwrap())
}

fn commands() -> Vec<u32> {
    COMMANDS.with(|c| c.borrow_mut().drain(..).collect())
}

#[test]
fn frontend_session() {
    let assets = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(4, 4, Rgba([0xFF, 0, 0, 0xFF]))
        .save(assets.path().join("test.png"))
        .unwrap();
    std::env::set_var("FES_ASSET_DIR", assets.path());

    unsafe {
        assert_eq!(fes_core::retro_api_version(), RETRO_API_VERSION);

        let mut info: retro_system_info = std::mem::zeroed();
        fes_core::retro_get_system_info(&mut info);
        assert_eq!(
            CStr::from_ptr(info.library_name).to_str().unwrap(),
            "Fantasy Entertainment System"
        );
        assert_eq!(CStr::from_ptr(info.library_version).to_str().unwrap(), "1.0.0");
        assert_eq!(CStr::from_ptr(info.valid_extensions).to_str().unwrap(), "fes");
        assert!(info.need_fullpath);

        // Nothing registered yet, nothing may happen
        fes_core::retro_run();
        assert!(FRAMES.with(|f| f.borrow().is_empty()));
        assert!(SAMPLES.with(|s| s.borrow().is_empty()));

        fes_core::retro_set_environment(Some(environment));
        let sent = commands();
        assert!(sent.contains(&RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME));
        assert!(sent.contains(&RETRO_ENVIRONMENT_SET_VARIABLES));
        assert!(sent.contains(&RETRO_ENVIRONMENT_SET_INPUT_DESCRIPTORS));

        fes_core::retro_set_video_refresh(Some(video_refresh));
        fes_core::retro_set_audio_sample(Some(audio_sample));
        fes_core::retro_set_audio_sample_batch(Some(audio_sample_batch));
        fes_core::retro_set_input_poll(Some(input_poll));
        fes_core::retro_set_input_state(Some(input_state));

        fes_core::retro_init();
        assert!(commands().contains(&RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL));

        assert!(fes_core::retro_load_game(std::ptr::null()));
        let sent = commands();
        assert!(sent.contains(&RETRO_ENVIRONMENT_SET_PIXEL_FORMAT));
        assert!(sent.contains(&RETRO_ENVIRONMENT_SET_AUDIO_CALLBACK));

        fes_core::retro_run();
        commands();

        let frame = FRAMES.with(|f| f.borrow().last().cloned()).unwrap();
        assert_eq!(frame.len(), PITCH * HEIGHT as usize);
        assert_eq!(pixel(&frame, 0, 0), 0xFFFF_0000);
        assert_eq!(pixel(&frame, 3, 3), 0xFFFF_0000);
        assert_eq!(pixel(&frame, 4, 0), WHITE);
        assert_eq!(pixel(&frame, 0, 4), WHITE);

        // There is no test.ogg, the frontend gets the constant fallback sample
        let samples = SAMPLES.with(|s| s.borrow().clone());
        assert_eq!(samples.len(), AUDIO_FRAMES_PER_TICK);
        assert!(samples.iter().all(|&frame| frame == (1, 1)));
        assert_eq!(BATCHED.with(Cell::get), 0);
        assert_eq!(POLLS.with(Cell::get), 1);

        let mut av_info: retro_system_av_info = std::mem::zeroed();
        fes_core::retro_get_system_av_info(&mut av_info);
        assert_eq!(av_info.geometry.base_width, WIDTH);
        assert_eq!(av_info.geometry.base_height, HEIGHT);
        assert_eq!(av_info.timing.fps, 60.0);
        assert_eq!(av_info.timing.sample_rate, 44100.0);
        assert_eq!(commands(), vec![RETRO_ENVIRONMENT_SET_PIXEL_FORMAT]);

        // Everything the core does not support
        let mut state = [0u8; 16];
        assert_eq!(fes_core::retro_serialize_size(), 0);
        assert!(!fes_core::retro_serialize(state.as_mut_ptr() as *mut c_void, state.len()));
        assert!(!fes_core::retro_unserialize(state.as_ptr() as *const c_void, state.len()));
        assert!(!fes_core::retro_load_game_special(0, std::ptr::null(), 0));
        assert_eq!(fes_core::retro_get_region(), RETRO_REGION_NTSC);
        assert!(fes_core::retro_get_memory_data(RETRO_MEMORY_SAVE_RAM).is_null());
        assert_eq!(fes_core::retro_get_memory_size(RETRO_MEMORY_SAVE_RAM), 0);
        fes_core::retro_cheat_reset();
        fes_core::retro_cheat_set(0, true, b"00000000\0".as_ptr() as *const _);
        fes_core::retro_set_controller_port_device(0, RETRO_DEVICE_JOYPAD);

        fes_core::retro_reset();
        fes_core::retro_run();
        assert_eq!(FRAMES.with(|f| f.borrow().len()), 2);

        fes_core::retro_unload_game();
        fes_core::retro_deinit();
    }
}
