#![allow(clippy::missing_safety_doc)]
//! libretro plumbing for the Fantasy Entertainment System.
//!
//! Implement [`Core`] and expand [`retro_core!`] once in the shared library
//! crate to export the complete `retro_*` API.

mod core;
mod core_wrapper;
#[cfg(feature = "log")]
mod logger;

#[macro_use]
mod macros;

pub mod callbacks;
pub mod contexts;
pub mod environment;
pub mod error;
pub mod types;
pub mod util;

pub use crate::core::*;
pub use core_wrapper::*;
pub use rust_libretro_sys as sys;

#[doc(hidden)]
pub use const_str;
#[doc(hidden)]
pub use libc;

/// Exports the libretro API for a [`Core`].
///
/// Takes the core type and an expression creating it. The core gets built on the
/// first call into the library and lives until the process exits.
///
/// ```ignore
/// retro_core!(MyCore => MyCore::new());
/// ```
#[macro_export]
macro_rules! retro_core {
    ( $core:ty => $make:expr ) => {
        #[doc(hidden)]
        static __RETRO_INSTANCE: $crate::Instance<$core> = $crate::Instance::new(
            || $make,
            $crate::sys::retro_audio_callback {
                callback: Some(__retro_audio_callback),
                set_state: Some(__retro_audio_set_state_callback),
            },
        );

        #[doc(hidden)]
        unsafe extern "C" fn __retro_audio_callback() {
            __RETRO_INSTANCE.with(|wrapper| wrapper.write_audio())
        }

        #[doc(hidden)]
        unsafe extern "C" fn __retro_audio_set_state_callback(enabled: bool) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.set_audio_state(enabled))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_api_version() -> ::std::os::raw::c_uint {
            $crate::sys::RETRO_API_VERSION
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_get_system_info(info: *mut $crate::sys::retro_system_info) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.get_system_info(info))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_get_system_av_info(
            info: *mut $crate::sys::retro_system_av_info,
        ) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.get_system_av_info(info))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_set_environment(callback: $crate::sys::retro_environment_t) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.set_environment(callback))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_set_video_refresh(
            callback: $crate::sys::retro_video_refresh_t,
        ) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.callbacks_mut().set_video_refresh(callback))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_set_audio_sample(callback: $crate::sys::retro_audio_sample_t) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.callbacks_mut().set_audio_sample(callback))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_set_audio_sample_batch(
            callback: $crate::sys::retro_audio_sample_batch_t,
        ) {
            __RETRO_INSTANCE
                .with(|wrapper| wrapper.callbacks_mut().set_audio_sample_batch(callback))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_set_input_poll(callback: $crate::sys::retro_input_poll_t) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.callbacks_mut().set_input_poll(callback))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_set_input_state(callback: $crate::sys::retro_input_state_t) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.callbacks_mut().set_input_state(callback))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_init() {
            __RETRO_INSTANCE.with(|wrapper| wrapper.init())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_deinit() {
            __RETRO_INSTANCE.with(|wrapper| wrapper.deinit())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_set_controller_port_device(
            port: ::std::os::raw::c_uint,
            device: ::std::os::raw::c_uint,
        ) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.set_controller_port_device(port, device))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_reset() {
            __RETRO_INSTANCE.with(|wrapper| wrapper.reset())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_run() {
            __RETRO_INSTANCE.with(|wrapper| wrapper.run())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_serialize_size() -> usize {
            __RETRO_INSTANCE.with(|wrapper| wrapper.serialize_size())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_serialize(
            data: *mut ::std::os::raw::c_void,
            size: usize,
        ) -> bool {
            __RETRO_INSTANCE.with(|wrapper| wrapper.serialize(data, size))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_unserialize(
            data: *const ::std::os::raw::c_void,
            size: usize,
        ) -> bool {
            __RETRO_INSTANCE.with(|wrapper| wrapper.unserialize(data, size))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_cheat_reset() {
            __RETRO_INSTANCE.with(|wrapper| wrapper.cheat_reset())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_cheat_set(
            index: ::std::os::raw::c_uint,
            enabled: bool,
            code: *const $crate::libc::c_char,
        ) {
            __RETRO_INSTANCE.with(|wrapper| wrapper.cheat_set(index, enabled, code))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_load_game(game: *const $crate::sys::retro_game_info) -> bool {
            __RETRO_INSTANCE.with(|wrapper| wrapper.load_game(game))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_load_game_special(
            game_type: ::std::os::raw::c_uint,
            info: *const $crate::sys::retro_game_info,
            num_info: usize,
        ) -> bool {
            __RETRO_INSTANCE.with(|wrapper| wrapper.load_game_special(game_type, info, num_info))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_unload_game() {
            __RETRO_INSTANCE.with(|wrapper| wrapper.unload_game())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_get_region() -> ::std::os::raw::c_uint {
            __RETRO_INSTANCE.with(|wrapper| wrapper.region())
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_get_memory_data(
            id: ::std::os::raw::c_uint,
        ) -> *mut ::std::os::raw::c_void {
            __RETRO_INSTANCE.with(|wrapper| wrapper.memory_data(id))
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_get_memory_size(id: ::std::os::raw::c_uint) -> usize {
            __RETRO_INSTANCE.with(|wrapper| wrapper.memory_size(id))
        }
    };
}
