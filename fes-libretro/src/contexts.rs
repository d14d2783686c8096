//! This module contains abstractions of the libretro environment callbacks.
//!
//! Every [`Core`](crate::Core) method receives a context that only exposes the
//! calls that are valid at that point of the libretro lifecycle.
use crate::{callbacks::Callbacks, environment, error::EnvironmentCallError, sys::*};
use std::path::PathBuf;

#[doc(hidden)]
macro_rules! into_generic {
    ($type:ty, $lifetime:tt) => {
        impl<$lifetime> From<&$type> for GenericContext<$lifetime> {
            fn from(other: &$type) -> GenericContext<$lifetime> {
                GenericContext::new(other.callbacks)
            }
        }

        impl<$lifetime> From<&mut $type> for GenericContext<$lifetime> {
            fn from(other: &mut $type) -> GenericContext<$lifetime> {
                GenericContext::new(other.callbacks)
            }
        }
    };
}

#[doc(hidden)]
macro_rules! make_context {
    ($name:ident $(, #[doc = $doc:tt ])?) => {
        $(#[doc = $doc])?
        pub struct $name<'a> {
            pub(crate) callbacks: &'a Callbacks,
        }

        impl<'a> $name<'a> {
            pub fn new(callbacks: &'a Callbacks) -> Self {
                Self { callbacks }
            }
        }

        into_generic!($name<'a>, 'a);
    };
}

/// Exposes environment callbacks that are safe to call in every context.
pub struct GenericContext<'a> {
    pub(crate) callbacks: &'a Callbacks,
}

impl<'a> GenericContext<'a> {
    pub fn new(callbacks: &'a Callbacks) -> Self {
        Self { callbacks }
    }

    pub fn callbacks(&self) -> &'a Callbacks {
        self.callbacks
    }

    pub fn set_input_descriptors(
        &self,
        descriptors: &[retro_input_descriptor],
    ) -> Result<(), EnvironmentCallError> {
        unsafe { environment::set_input_descriptors(self.callbacks, descriptors) }
    }

    pub fn get_system_directory(&self) -> Result<Option<PathBuf>, EnvironmentCallError> {
        unsafe { environment::get_system_directory(self.callbacks) }
    }

    pub fn get_core_assets_directory(&self) -> Result<Option<PathBuf>, EnvironmentCallError> {
        unsafe { environment::get_core_assets_directory(self.callbacks) }
    }

    pub fn get_variable(&self, key: &str) -> Result<Option<String>, EnvironmentCallError> {
        unsafe { environment::get_variable(self.callbacks, key) }
    }
}

make_context!(SetEnvironmentContext, #[doc = "Functions that are safe to be called in [`Core::on_set_environment`](crate::Core::on_set_environment)"]);

impl SetEnvironmentContext<'_> {
    pub fn set_support_no_game(&self, value: bool) -> Result<(), EnvironmentCallError> {
        unsafe { environment::set_support_no_game(self.callbacks, value) }
    }

    pub fn set_variables(&self, variables: &[retro_variable]) -> Result<(), EnvironmentCallError> {
        unsafe { environment::set_variables(self.callbacks, variables) }
    }
}

make_context!(InitContext, #[doc = "Functions that are safe to be called in [`Core::on_init`](crate::Core::on_init)"]);

impl InitContext<'_> {
    pub fn set_performance_level(&self, level: u32) -> Result<(), EnvironmentCallError> {
        unsafe { environment::set_performance_level(self.callbacks, level) }
    }
}

make_context!(GetAvInfoContext, #[doc = "Functions that are safe to be called in [`Core::on_get_av_info`](crate::Core::on_get_av_info)"]);

impl GetAvInfoContext<'_> {
    pub fn set_pixel_format(&self, format: retro_pixel_format) -> Result<(), EnvironmentCallError> {
        unsafe { environment::set_pixel_format(self.callbacks, format) }
    }
}

make_context!(OptionsChangedContext, #[doc = "Functions that are safe to be called in [`Core::on_options_changed`](crate::Core::on_options_changed)"]);

impl OptionsChangedContext<'_> {
    pub fn get_variable(&self, key: &str) -> Result<Option<String>, EnvironmentCallError> {
        unsafe { environment::get_variable(self.callbacks, key) }
    }
}

/// Functions that are safe to be called in [`Core::on_load_game`](crate::Core::on_load_game).
pub struct LoadGameContext<'a> {
    pub(crate) callbacks: &'a Callbacks,
    pub(crate) audio_callback: retro_audio_callback,
    pub(crate) audio_callback_enabled: bool,
}

impl<'a> LoadGameContext<'a> {
    pub fn new(callbacks: &'a Callbacks, audio_callback: retro_audio_callback) -> Self {
        Self {
            callbacks,
            audio_callback,
            audio_callback_enabled: false,
        }
    }

    pub fn audio_callback_enabled(&self) -> bool {
        self.audio_callback_enabled
    }

    pub fn set_pixel_format(&self, format: retro_pixel_format) -> Result<(), EnvironmentCallError> {
        unsafe { environment::set_pixel_format(self.callbacks, format) }
    }

    /// Asks the frontend to pull audio through [`Core::on_write_audio`](crate::Core::on_write_audio).
    ///
    /// An error means the frontend refused and audio has to be written from
    /// [`Core::on_run`](crate::Core::on_run).
    pub fn enable_audio_callback(&mut self) -> Result<(), EnvironmentCallError> {
        if self.audio_callback.callback.is_none() {
            return Err(EnvironmentCallError::Unsupported(
                "no audio callback has been provided".to_owned(),
            ));
        }

        unsafe { environment::set_audio_callback(self.callbacks, self.audio_callback)? };
        self.audio_callback_enabled = true;

        Ok(())
    }
}

into_generic!(LoadGameContext<'a>, 'a);

/// Functions that are safe to be called in [`Core::on_write_audio`](crate::Core::on_write_audio).
pub struct AudioContext<'a> {
    pub(crate) callbacks: &'a Callbacks,
}

impl<'a> AudioContext<'a> {
    pub fn new(callbacks: &'a Callbacks) -> Self {
        Self { callbacks }
    }

    /// Renders multiple audio frames in one go.
    ///
    /// One frame is defined as a sample of left and right channels, interleaved.
    /// I.e. `let buf: [i16; 4] = [ l, r, l, r ];` would be 2 frames.
    ///
    /// Returns the number of frames the frontend consumed.
    pub fn batch_audio_samples(&self, samples: &[i16]) -> usize {
        self.callbacks.audio_sample_batch(samples)
    }

    /// Renders a single audio frame.
    /// Format is signed 16-bit native endian.
    pub fn queue_audio_sample(&self, left: i16, right: i16) {
        self.callbacks.audio_sample(left, right)
    }
}

into_generic!(AudioContext<'a>, 'a);

/// Functions that are safe to be called in [`Core::on_run`](crate::Core::on_run).
pub struct RunContext<'a> {
    pub(crate) callbacks: &'a Callbacks,
    pub(crate) audio_callback_enabled: bool,
}

into_generic!(RunContext<'a>, 'a);

impl<'a> From<&RunContext<'a>> for AudioContext<'a> {
    fn from(other: &RunContext<'a>) -> AudioContext<'a> {
        AudioContext::new(other.callbacks)
    }
}

impl<'a> From<&mut RunContext<'a>> for AudioContext<'a> {
    fn from(other: &mut RunContext<'a>) -> AudioContext<'a> {
        AudioContext::new(other.callbacks)
    }
}

impl<'a> RunContext<'a> {
    pub fn new(callbacks: &'a Callbacks, audio_callback_enabled: bool) -> Self {
        Self {
            callbacks,
            audio_callback_enabled,
        }
    }

    /// Whether the frontend pulls audio on its own.
    /// If not, audio for this frame has to be written from [`Core::on_run`](crate::Core::on_run).
    #[inline(always)]
    pub fn audio_callback_enabled(&self) -> bool {
        self.audio_callback_enabled
    }

    pub fn poll_input(&self) {
        self.callbacks.input_poll()
    }

    pub fn get_input_state(&self, port: u32, device: u32, index: u32, id: u32) -> i16 {
        self.callbacks.input_state(port, device, index, id)
    }

    pub fn is_joypad_button_pressed(&self, port: u32, id: u32) -> bool {
        self.get_input_state(port, RETRO_DEVICE_JOYPAD, 0, id) != 0
    }

    /// Draws a new frame, `data` must hold `pitch * height` bytes.
    pub fn draw_frame(&self, data: &[u8], width: u32, height: u32, pitch: usize) {
        self.callbacks.video_refresh(data, width, height, pitch)
    }
}
