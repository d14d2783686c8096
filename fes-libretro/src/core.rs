use crate::{contexts::*, sys::*, types::SystemInfo};
use std::{
    ffi::CStr,
    os::raw::{c_uint, c_void},
};

/// This trait defines the basic functions that every libretro core must implement.
/// See also [`retro_core!()`](crate::retro_core).
pub trait Core {
    /// Returns static info about this core.
    fn get_info(&self) -> SystemInfo;

    /// Called when the frontend needs information about the
    /// audio and video timings and the video geometry.
    fn on_get_av_info(&mut self, ctx: &mut GetAvInfoContext) -> retro_system_av_info;

    /// Called when the frontend set a new environment callback.
    ///
    /// Guaranteed to be called before [`Core::on_init`].
    fn on_set_environment(&mut self, _initial: bool, _ctx: &mut SetEnvironmentContext) {}

    /// Called when the libretro API has been initialized.
    fn on_init(&mut self, _ctx: &mut InitContext) {}

    /// Called when the libretro API gets destructed.
    fn on_deinit(&mut self, _ctx: &mut GenericContext) {}

    fn on_set_controller_port_device(&mut self, _port: c_uint, _device: c_uint) {}

    /// Called when the frontend requests resetting the system.
    fn on_reset(&mut self, _ctx: &mut GenericContext) {}

    /// Called once per frame
    fn on_run(&mut self, _ctx: &mut RunContext) {}

    /// Returns the amount of data the implementation requires to serialize
    /// internal state (save states).
    fn get_serialize_size(&mut self, _ctx: &mut GenericContext) -> usize {
        0
    }

    /// Serializes internal state. Returns [`false`] if serialization is
    /// unsupported or `data` is too small.
    fn on_serialize(&mut self, _data: &mut [u8], _ctx: &mut GenericContext) -> bool {
        false
    }

    /// Deserializes internal state.
    fn on_unserialize(&mut self, _data: &[u8], _ctx: &mut GenericContext) -> bool {
        false
    }

    /// Called when a game should be loaded.
    /// Return [`true`] to indicate successful loading and [`false`] to indicate load failure.
    fn on_load_game(&mut self, _game: Option<retro_game_info>, _ctx: &mut LoadGameContext) -> bool {
        false
    }

    /// Loads a "special" kind of game. Should not be used, except in extreme cases.
    fn on_load_game_special(
        &mut self,
        _game_type: c_uint,
        _info: &[retro_game_info],
        _ctx: &mut GenericContext,
    ) -> bool {
        false
    }

    /// Called when the currently loaded game should be unloaded.
    /// Called before [`Core::on_deinit`].
    fn on_unload_game(&mut self, _ctx: &mut GenericContext) {}

    fn on_cheat_reset(&mut self, _ctx: &mut GenericContext) {}

    fn on_cheat_set(&mut self, _index: c_uint, _enabled: bool, _code: &CStr, _ctx: &mut GenericContext) {}

    /// Gets the region of the game.
    fn on_get_region(&mut self, _ctx: &mut GenericContext) -> c_uint {
        RETRO_REGION_NTSC
    }

    fn get_memory_data(&mut self, _id: c_uint, _ctx: &mut GenericContext) -> *mut c_void {
        std::ptr::null_mut()
    }

    fn get_memory_size(&mut self, _id: c_uint, _ctx: &mut GenericContext) -> usize {
        0
    }

    /// Gets called when the core options have been changed.
    ///
    /// Options get checked before [`Core::on_load_game`] and before each call of [`Core::on_run`].
    fn on_options_changed(&mut self, _ctx: &mut OptionsChangedContext) {}

    /// Called when the frontend needs more audio frames.
    /// Only happens once [`LoadGameContext::enable_audio_callback`] succeeded.
    fn on_write_audio(&mut self, _ctx: &mut AudioContext) {}

    /// Called when the frontend starts or stops pulling audio.
    fn on_audio_set_state(&mut self, _enabled: bool) {}
}
