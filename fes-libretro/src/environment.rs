//! Unsafe functions related to the libretro environment callback.
//! For safe versions have a look at the [`contexts`](crate::contexts) module and
//! the context types you get in your core callbacks.

use crate::{
    callbacks::Callbacks,
    error::{EnvironmentCallError, StringError},
    sys::*,
    util::{get_path_from_pointer, get_str_from_pointer},
};
use std::{
    ffi::{c_char, c_void, CString},
    path::PathBuf,
};

/// Gets a value from an environment callback.
#[inline(always)]
pub unsafe fn get<T: Default>(callbacks: &Callbacks, id: u32) -> Result<T, EnvironmentCallError> {
    get_mut(callbacks, id, Default::default())
}

/// Similar to [`get`] but uses zeroed memory instead of the [`Default`] trait.
#[inline(always)]
pub unsafe fn get_unchecked<T>(callbacks: &Callbacks, id: u32) -> Result<T, EnvironmentCallError> {
    let data = std::mem::MaybeUninit::zeroed().assume_init();

    get_mut(callbacks, id, data)
}

/// Passes a value to the environment callback and returns the modified value.
pub unsafe fn get_mut<T>(
    callbacks: &Callbacks,
    id: u32,
    mut data: T,
) -> Result<T, EnvironmentCallError> {
    if !callbacks.has_environment() {
        return Err(EnvironmentCallError::NullPointer("retro_environment_t"));
    }

    match callbacks.environment(id, (&mut data as *mut T) as *mut c_void) {
        true => Ok(data),
        false => Err(EnvironmentCallError::Failure),
    }
}

/// Helper function to query a nullable string pointer and convert it into [`Option<PathBuf>`].
pub unsafe fn get_optional_path(
    callbacks: &Callbacks,
    id: u32,
) -> Result<Option<PathBuf>, EnvironmentCallError> {
    let ptr: *const c_char = std::ptr::null();
    let ptr = get_mut(callbacks, id, ptr)?;
    if ptr.is_null() {
        return Ok(None);
    }

    get_path_from_pointer(ptr).map(Some).map_err(Into::into)
}

/// Passes a value to the environment callback.
#[inline(always)]
pub unsafe fn set<T>(callbacks: &Callbacks, id: u32, value: T) -> Result<(), EnvironmentCallError> {
    set_ptr(callbacks, id, &value as *const _)
}

/// Passes a value (by a raw const pointer) to the environment callback.
pub unsafe fn set_ptr<T>(
    callbacks: &Callbacks,
    id: u32,
    ptr: *const T,
) -> Result<(), EnvironmentCallError> {
    if !callbacks.has_environment() {
        return Err(EnvironmentCallError::NullPointer("retro_environment_t"));
    }

    match callbacks.environment(id, ptr as *mut c_void) {
        true => Ok(()),
        false => Err(EnvironmentCallError::Failure),
    }
}

/// Gives a hint to the frontend how demanding this implementation
/// is on a system. E.g. reporting a level of 2 means
/// this implementation should run decently on all frontends
/// of level 2 and up.
///
/// It can be used by the frontend to potentially warn
/// about too demanding implementations.
///
/// The levels are "floating".
pub unsafe fn set_performance_level(
    callbacks: &Callbacks,
    level: u32,
) -> Result<(), EnvironmentCallError> {
    // const unsigned *
    set(callbacks, RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL, level)
}

/// Returns the "system" directory of the frontend.
/// This directory can be used to store system specific
/// content such as BIOSes, configuration data, etc.
/// [`None`] means no such directory is defined.
pub unsafe fn get_system_directory(
    callbacks: &Callbacks,
) -> Result<Option<PathBuf>, EnvironmentCallError> {
    // const char **
    get_optional_path(callbacks, RETRO_ENVIRONMENT_GET_SYSTEM_DIRECTORY)
}

/// Returns the "core assets" directory of the frontend.
/// This directory can be used to store specific assets that the
/// core relies upon, such as art assets,
/// input data, etc etc.
pub unsafe fn get_core_assets_directory(
    callbacks: &Callbacks,
) -> Result<Option<PathBuf>, EnvironmentCallError> {
    // const char **
    get_optional_path(callbacks, RETRO_ENVIRONMENT_GET_CORE_ASSETS_DIRECTORY)
}

/// Sets the internal pixel format used by the implementation.
/// The default pixel format is [`retro_pixel_format::RETRO_PIXEL_FORMAT_0RGB1555`].
/// If the call returns `false`, the frontend does not support this pixel
/// format.
pub unsafe fn set_pixel_format(
    callbacks: &Callbacks,
    format: retro_pixel_format,
) -> Result<(), EnvironmentCallError> {
    // const enum retro_pixel_format *
    set(callbacks, RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, format)
}

/// Sets an array of retro_input_descriptors.
/// The array is terminated by retro_input_descriptor::description
/// being set to `NULL`.
pub unsafe fn set_input_descriptors(
    callbacks: &Callbacks,
    descriptors: &[retro_input_descriptor],
) -> Result<(), EnvironmentCallError> {
    // const struct retro_input_descriptor *
    set_ptr(
        callbacks,
        RETRO_ENVIRONMENT_SET_INPUT_DESCRIPTORS,
        descriptors.as_ptr(),
    )
}

/// Interface to acquire user-defined information from environment.
///
/// The `key` should be set to a key which has already been set by
/// [`set_variables`].
///
/// Returns [`None`] if the variable could not be found.
pub unsafe fn get_variable(
    callbacks: &Callbacks,
    key: &str,
) -> Result<Option<String>, EnvironmentCallError> {
    let key = CString::new(key).map_err(StringError::from)?;

    let var = retro_variable {
        key: key.as_ptr(),
        value: std::ptr::null(),
    };

    // struct retro_variable *
    let var = get_mut(callbacks, RETRO_ENVIRONMENT_GET_VARIABLE, var)?;

    if var.value.is_null() {
        return Ok(None);
    }

    let value = get_str_from_pointer(var.value)?;

    Ok(Some(value.to_owned()))
}

/// Allows an implementation to signal the environment
/// which variables it might want to check for later using
/// [`get_variable`].
///
/// The passed array must be terminated by an entry whose key and value are
/// both `NULL`. Text before the first `;` of a value is a description.
/// This `;` must be followed by a space, and followed by a list of possible
/// values split up with `|`. The first value is the default.
///
/// See also [`core_variables!`](crate::core_variables).
pub unsafe fn set_variables(
    callbacks: &Callbacks,
    variables: &[retro_variable],
) -> Result<(), EnvironmentCallError> {
    // const struct retro_variable *
    set_ptr(callbacks, RETRO_ENVIRONMENT_SET_VARIABLES, variables.as_ptr())
}

/// Result is set to [`true`] if some variables are updated by
/// frontend since last call to [`get_variable`].
pub unsafe fn get_variable_update(callbacks: &Callbacks) -> Result<bool, EnvironmentCallError> {
    // bool *
    get(callbacks, RETRO_ENVIRONMENT_GET_VARIABLE_UPDATE)
}

/// Tell the frontend whether this Core can run without particular game data.
///
/// If true, the [`Core`](crate::Core) implementation supports calls to
/// [`Core::on_load_game`](crate::Core::on_load_game) with [`None`] as argument.
pub unsafe fn set_support_no_game(
    callbacks: &Callbacks,
    value: bool,
) -> Result<(), EnvironmentCallError> {
    // const bool *
    set(callbacks, RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME, value)
}

/// Sets an interface which is used to notify a libretro core about audio
/// being available for writing.
/// The callback can be called from any thread, so a core using this must
/// have a thread safe audio implementation.
///
/// A failure means the frontend does not support the interface and audio has
/// to be written synchronously from [`Core::on_run`](crate::Core::on_run).
pub unsafe fn set_audio_callback(
    callbacks: &Callbacks,
    data: retro_audio_callback,
) -> Result<(), EnvironmentCallError> {
    // const struct retro_audio_callback *
    set(callbacks, RETRO_ENVIRONMENT_SET_AUDIO_CALLBACK, data)
}

/// Gets an interface for logging.
pub unsafe fn get_log_callback(
    callbacks: &Callbacks,
) -> Result<retro_log_callback, EnvironmentCallError> {
    // struct retro_log_callback *
    get_unchecked(callbacks, RETRO_ENVIRONMENT_GET_LOG_INTERFACE)
}
