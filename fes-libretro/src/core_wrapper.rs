use crate::{callbacks::Callbacks, contexts::*, core::Core, environment, sys::*, types::SystemInfo};
use once_cell::unsync::OnceCell;
use std::{
    ffi::CStr,
    os::raw::{c_char, c_uint, c_void},
    sync::{Mutex, PoisonError},
};

/// Owns a [`Core`] together with the frontend callbacks and forwards the
/// libretro entry points to it.
///
/// The functions generated by [`retro_core!`](crate::retro_core) are thin
/// shims around the methods of this type; tests drive it directly.
pub struct CoreWrapper<C> {
    core: C,
    callbacks: Callbacks,
    system_info: OnceCell<SystemInfo>,

    /// Handed to the frontend by [`LoadGameContext::enable_audio_callback`].
    audio_callback: retro_audio_callback,
    audio_callback_enabled: bool,

    environment_set: bool,
}

impl<C: Core> CoreWrapper<C> {
    pub fn new(core: C, audio_callback: retro_audio_callback) -> Self {
        Self {
            core,
            callbacks: Callbacks::new(),
            system_info: OnceCell::new(),
            audio_callback,
            audio_callback_enabled: false,
            environment_set: false,
        }
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Whether the frontend accepted the audio callback during the last load.
    pub fn audio_callback_enabled(&self) -> bool {
        self.audio_callback_enabled
    }

    /// [`Core::get_info`], queried once and kept for the lifetime of the wrapper
    /// as libretro requires the strings to stay valid.
    pub fn system_info(&self) -> &SystemInfo {
        self.system_info.get_or_init(|| self.core.get_info())
    }

    /// # Safety
    /// `info` must be null or valid for writes.
    pub unsafe fn get_system_info(&self, info: *mut retro_system_info) {
        let Some(info) = info.as_mut() else {
            #[cfg(feature = "log")]
            log::warn!("retro_get_system_info: info is null");

            return;
        };

        let sys_info = self.system_info();

        info.library_name = sys_info.library_name.as_ptr();
        info.library_version = sys_info.library_version.as_ptr();
        info.valid_extensions = sys_info.valid_extensions.as_ptr();
        info.need_fullpath = sys_info.need_fullpath;
        info.block_extract = sys_info.block_extract;
    }

    pub fn system_av_info(&mut self) -> retro_system_av_info {
        let mut ctx = GetAvInfoContext::new(&self.callbacks);

        self.core.on_get_av_info(&mut ctx)
    }

    /// # Safety
    /// `info` must be null or valid for writes.
    pub unsafe fn get_system_av_info(&mut self, info: *mut retro_system_av_info) {
        if info.is_null() {
            #[cfg(feature = "log")]
            log::warn!("retro_get_system_av_info: info is null");

            return;
        }

        let av_info = self.system_av_info();

        (*info).geometry = av_info.geometry;
        (*info).timing = av_info.timing;
    }

    /// The frontend may call this more than once, `initial` is only set for the first
    /// non-null callback.
    pub fn set_environment(&mut self, environment: retro_environment_t) {
        let initial = environment.is_some() && !self.environment_set;

        self.callbacks.set_environment(environment);

        if !self.callbacks.has_environment() {
            return;
        }

        self.environment_set = true;

        let mut ctx = SetEnvironmentContext::new(&self.callbacks);
        self.core.on_set_environment(initial, &mut ctx);
    }

    pub fn init(&mut self) {
        if let Ok(interface) = unsafe { environment::get_log_callback(&self.callbacks) } {
            self.callbacks.set_log(interface.log);
        }

        #[cfg(feature = "log")]
        crate::logger::init_log(self.callbacks.log_callback());

        let mut ctx = InitContext::new(&self.callbacks);
        self.core.on_init(&mut ctx);
    }

    pub fn deinit(&mut self) {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.on_deinit(&mut ctx);

        self.audio_callback_enabled = false;
    }

    pub fn reset(&mut self) {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.on_reset(&mut ctx);
    }

    pub fn run(&mut self) {
        let updated = unsafe { environment::get_variable_update(&self.callbacks) };

        if let Ok(true) = updated {
            let mut ctx = OptionsChangedContext::new(&self.callbacks);
            self.core.on_options_changed(&mut ctx);
        }

        let mut ctx = RunContext::new(&self.callbacks, self.audio_callback_enabled);
        self.core.on_run(&mut ctx);
    }

    /// # Safety
    /// `game` must be null or point to a valid [`retro_game_info`].
    pub unsafe fn load_game(&mut self, game: *const retro_game_info) -> bool {
        let mut ctx = OptionsChangedContext::new(&self.callbacks);
        self.core.on_options_changed(&mut ctx);

        let game = game.as_ref().copied();

        let mut ctx = LoadGameContext::new(&self.callbacks, self.audio_callback);
        let loaded = self.core.on_load_game(game, &mut ctx);

        self.audio_callback_enabled = loaded && ctx.audio_callback_enabled();

        loaded
    }

    /// # Safety
    /// `info` must be null or point to `num_info` valid [`retro_game_info`] structs.
    pub unsafe fn load_game_special(
        &mut self,
        game_type: c_uint,
        info: *const retro_game_info,
        num_info: usize,
    ) -> bool {
        if info.is_null() {
            #[cfg(feature = "log")]
            log::warn!("retro_load_game_special: info is null");

            return false;
        }

        let info = std::slice::from_raw_parts(info, num_info);
        let mut ctx = GenericContext::new(&self.callbacks);

        self.core.on_load_game_special(game_type, info, &mut ctx)
    }

    pub fn unload_game(&mut self) {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.on_unload_game(&mut ctx);

        self.audio_callback_enabled = false;
    }

    /// Invoked by the frontend when it wants more audio.
    pub fn write_audio(&mut self) {
        let mut ctx = AudioContext::new(&self.callbacks);
        self.core.on_write_audio(&mut ctx);
    }

    pub fn set_audio_state(&mut self, enabled: bool) {
        self.core.on_audio_set_state(enabled);
    }

    pub fn serialize_size(&mut self) -> usize {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.get_serialize_size(&mut ctx)
    }

    /// # Safety
    /// `data` must be null or valid for `size` bytes of writes.
    pub unsafe fn serialize(&mut self, data: *mut c_void, size: usize) -> bool {
        if data.is_null() {
            #[cfg(feature = "log")]
            log::warn!("retro_serialize: data is null");

            return false;
        }

        let slice = std::slice::from_raw_parts_mut(data as *mut u8, size);
        let mut ctx = GenericContext::new(&self.callbacks);

        self.core.on_serialize(slice, &mut ctx)
    }

    /// # Safety
    /// `data` must be null or valid for `size` bytes of reads.
    pub unsafe fn unserialize(&mut self, data: *const c_void, size: usize) -> bool {
        if data.is_null() {
            #[cfg(feature = "log")]
            log::warn!("retro_unserialize: data is null");

            return false;
        }

        let slice = std::slice::from_raw_parts(data as *const u8, size);
        let mut ctx = GenericContext::new(&self.callbacks);

        self.core.on_unserialize(slice, &mut ctx)
    }

    pub fn cheat_reset(&mut self) {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.on_cheat_reset(&mut ctx);
    }

    /// # Safety
    /// `code` must be null or a NUL terminated string.
    pub unsafe fn cheat_set(&mut self, index: c_uint, enabled: bool, code: *const c_char) {
        if code.is_null() {
            #[cfg(feature = "log")]
            log::warn!("retro_cheat_set: code is null");

            return;
        }

        // The encoding of cheat codes is unspecified, the core decides how to read it.
        let code = CStr::from_ptr(code);
        let mut ctx = GenericContext::new(&self.callbacks);

        self.core.on_cheat_set(index, enabled, code, &mut ctx);
    }

    pub fn set_controller_port_device(&mut self, port: c_uint, device: c_uint) {
        self.core.on_set_controller_port_device(port, device);
    }

    pub fn region(&mut self) -> c_uint {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.on_get_region(&mut ctx)
    }

    pub fn memory_data(&mut self, id: c_uint) -> *mut c_void {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.get_memory_data(id, &mut ctx)
    }

    pub fn memory_size(&mut self, id: c_uint) -> usize {
        let mut ctx = GenericContext::new(&self.callbacks);
        self.core.get_memory_size(id, &mut ctx)
    }
}

/// The single core instance a libretro shared library exposes.
///
/// Created lazily on the first entry point call and kept for the lifetime of
/// the process. The lock only serializes the frontend's own calls.
pub struct Instance<C> {
    wrapper: Mutex<Option<CoreWrapper<C>>>,
    make: fn() -> C,
    audio_callback: retro_audio_callback,
}

impl<C: Core> Instance<C> {
    pub const fn new(make: fn() -> C, audio_callback: retro_audio_callback) -> Self {
        Self {
            wrapper: Mutex::new(None),
            make,
            audio_callback,
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut CoreWrapper<C>) -> R) -> R {
        let mut guard = self.wrapper.lock().unwrap_or_else(PoisonError::into_inner);

        let wrapper =
            guard.get_or_insert_with(|| CoreWrapper::new((self.make)(), self.audio_callback));

        f(wrapper)
    }
}
