//! The table of callbacks the frontend hands to the core.
//!
//! Every capability is an optional function pointer. Nothing gets invoked
//! unless the frontend registered it: calls to a missing capability are
//! no-ops, and capabilities with a result return that type's default.
use crate::sys::*;
use std::{ffi::CStr, os::raw::c_void};

/// One optional handle per frontend capability.
///
/// Handles are only ever replaced, never removed. A frontend passing `NULL`
/// to one of the `retro_set_*` functions keeps the previous registration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Callbacks {
    environment: retro_environment_t,
    video_refresh: retro_video_refresh_t,
    audio_sample: retro_audio_sample_t,
    audio_sample_batch: retro_audio_sample_batch_t,
    input_poll: retro_input_poll_t,
    input_state: retro_input_state_t,
    log: retro_log_printf_t,
}

fn register<F>(slot: &mut Option<F>, callback: Option<F>, _name: &'static str) {
    match callback {
        Some(callback) => *slot = Some(callback),
        None => {
            #[cfg(feature = "log")]
            log::warn!("Ignoring attempt to unset the {_name} callback");
        }
    }
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_environment(&mut self, callback: retro_environment_t) {
        register(&mut self.environment, callback, "environment");
    }

    pub fn set_video_refresh(&mut self, callback: retro_video_refresh_t) {
        register(&mut self.video_refresh, callback, "video refresh");
    }

    pub fn set_audio_sample(&mut self, callback: retro_audio_sample_t) {
        register(&mut self.audio_sample, callback, "audio sample");
    }

    pub fn set_audio_sample_batch(&mut self, callback: retro_audio_sample_batch_t) {
        register(&mut self.audio_sample_batch, callback, "audio sample batch");
    }

    pub fn set_input_poll(&mut self, callback: retro_input_poll_t) {
        register(&mut self.input_poll, callback, "input poll");
    }

    pub fn set_input_state(&mut self, callback: retro_input_state_t) {
        register(&mut self.input_state, callback, "input state");
    }

    pub fn set_log(&mut self, callback: retro_log_printf_t) {
        register(&mut self.log, callback, "log");
    }

    pub fn has_environment(&self) -> bool {
        self.environment.is_some()
    }

    pub fn has_video_refresh(&self) -> bool {
        self.video_refresh.is_some()
    }

    pub fn has_audio_sample(&self) -> bool {
        self.audio_sample.is_some()
    }

    pub fn has_audio_sample_batch(&self) -> bool {
        self.audio_sample_batch.is_some()
    }

    pub fn has_input_poll(&self) -> bool {
        self.input_poll.is_some()
    }

    pub fn has_input_state(&self) -> bool {
        self.input_state.is_some()
    }

    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }

    /// The raw log function, used to build the [`log::Log`] backend.
    pub fn log_callback(&self) -> retro_log_printf_t {
        self.log
    }

    /// Issues an environment command.
    ///
    /// Returns `false` if no environment callback has been registered.
    ///
    /// # Safety
    /// `data` must point to whatever the frontend expects for `cmd`.
    pub unsafe fn environment(&self, cmd: u32, data: *mut c_void) -> bool {
        match self.environment {
            Some(callback) => callback(cmd, data),
            None => false,
        }
    }

    /// Hands a frame to the frontend. `data` must hold at least `pitch * height` bytes.
    pub fn video_refresh(&self, data: &[u8], width: u32, height: u32, pitch: usize) {
        debug_assert!(data.len() >= pitch * height as usize);

        if let Some(callback) = self.video_refresh {
            unsafe { callback(data.as_ptr() as *const c_void, width, height, pitch as _) }
        }
    }

    pub fn audio_sample(&self, left: i16, right: i16) {
        if let Some(callback) = self.audio_sample {
            unsafe { callback(left, right) }
        }
    }

    /// Submits interleaved stereo samples.
    ///
    /// Returns the number of frames the frontend consumed, `0` if there is no
    /// batch callback.
    pub fn audio_sample_batch(&self, samples: &[i16]) -> usize {
        match self.audio_sample_batch {
            Some(callback) => unsafe { callback(samples.as_ptr(), (samples.len() / 2) as _) as usize },
            None => 0,
        }
    }

    pub fn input_poll(&self) {
        if let Some(callback) = self.input_poll {
            unsafe { callback() }
        }
    }

    pub fn input_state(&self, port: u32, device: u32, index: u32, id: u32) -> i16 {
        match self.input_state {
            Some(callback) => unsafe { callback(port, device, index, id) },
            None => 0,
        }
    }

    /// Writes an already formatted line through the frontend's log interface.
    pub fn log(&self, level: retro_log_level, message: &CStr) {
        if let Some(callback) = self.log {
            // The callback works like `printf`
            unsafe {
                callback(
                    level,
                    "%s\0".as_ptr() as *const libc::c_char,
                    message.as_ptr(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    thread_local! {
        static POLLS: Cell<u32> = Cell::new(0);
        static SAMPLES: RefCell<Vec<(i16, i16)>> = RefCell::new(Vec::new());
        static FRAMES: RefCell<Vec<(bool, u32, u32, usize)>> = RefCell::new(Vec::new());
        static COMMANDS: RefCell<Vec<u32>> = RefCell::new(Vec::new());
    }

    unsafe extern "C" fn input_poll() {
        POLLS.with(|p| p.set(p.get() + 1));
    }

    unsafe extern "C" fn input_state(port: u32, _device: u32, _index: u32, id: u32) -> i16 {
        (port * 100 + id) as i16
    }

    unsafe extern "C" fn audio_sample(left: i16, right: i16) {
        SAMPLES.with(|s| s.borrow_mut().push((left, right)));
    }

    unsafe extern "C" fn video_refresh(data: *const c_void, width: u32, height: u32, pitch: usize) {
        FRAMES.with(|f| f.borrow_mut().push((data.is_null(), width, height, pitch)));
    }

    unsafe extern "C" fn environment(cmd: u32, _data: *mut c_void) -> bool {
        COMMANDS.with(|c| c.borrow_mut().push(cmd));
        cmd == RETRO_ENVIRONMENT_SET_PIXEL_FORMAT
    }

    #[test]
    fn unregistered_capabilities_yield_defaults() {
        let callbacks = Callbacks::new();

        assert!(!unsafe { callbacks.environment(RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, std::ptr::null_mut()) });
        assert_eq!(callbacks.input_state(0, RETRO_DEVICE_JOYPAD, 0, 0), 0);
        assert_eq!(callbacks.audio_sample_batch(&[1, 2, 3, 4]), 0);

        // None of these may fault
        callbacks.input_poll();
        callbacks.audio_sample(1, 1);
        callbacks.video_refresh(&[0; 16], 2, 2, 8);
        callbacks.log(retro_log_level::RETRO_LOG_INFO, CStr::from_bytes_with_nul(b"hello\0").unwrap());

        assert!(!callbacks.has_environment());
        assert!(!callbacks.has_video_refresh());
        assert!(!callbacks.has_audio_sample());
        assert!(!callbacks.has_audio_sample_batch());
        assert!(!callbacks.has_input_poll());
        assert!(!callbacks.has_input_state());
        assert!(!callbacks.has_log());
    }

    #[test]
    fn registered_capabilities_are_invoked() {
        let mut callbacks = Callbacks::new();
        callbacks.set_input_poll(Some(input_poll));
        callbacks.set_input_state(Some(input_state));
        callbacks.set_audio_sample(Some(audio_sample));
        callbacks.set_video_refresh(Some(video_refresh));
        callbacks.set_environment(Some(environment));

        callbacks.input_poll();
        callbacks.input_poll();
        assert_eq!(POLLS.with(Cell::get), 2);

        assert_eq!(callbacks.input_state(1, RETRO_DEVICE_JOYPAD, 0, 4), 104);

        callbacks.audio_sample(3, -3);
        assert_eq!(SAMPLES.with(|s| s.borrow().clone()), vec![(3, -3)]);

        callbacks.video_refresh(&[0; 32], 4, 2, 16);
        assert_eq!(FRAMES.with(|f| f.borrow().clone()), vec![(false, 4, 2, 16)]);

        let accepted =
            unsafe { callbacks.environment(RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, std::ptr::null_mut()) };
        let rejected =
            unsafe { callbacks.environment(RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL, std::ptr::null_mut()) };
        assert!(accepted);
        assert!(!rejected);
        assert_eq!(
            COMMANDS.with(|c| c.borrow().clone()),
            vec![RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL]
        );
    }

    #[test]
    fn null_registration_keeps_previous_handle() {
        let mut callbacks = Callbacks::new();
        callbacks.set_input_state(Some(input_state));
        callbacks.set_input_state(None);

        assert!(callbacks.has_input_state());
        assert_eq!(callbacks.input_state(0, RETRO_DEVICE_JOYPAD, 0, 7), 7);
    }
}
