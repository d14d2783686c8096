//! Rust versions of libretro data structures.
use std::ffi::CString;

/// Static information about the [`Core`](crate::Core) implementation.
#[derive(Debug, Default)]
pub struct SystemInfo {
    /// Descriptive name of library. Should not
    /// contain any version numbers, etc.
    pub library_name: CString,

    /// Descriptive version of the core.
    pub library_version: CString,

    /// A string listing probably content extensions the core will be able to
    /// load, separated with pipe. I.e. "bin|rom|iso".
    /// Typically used for a GUI to filter out extensions.
    pub valid_extensions: CString,

    /// libretro cores that need to have direct access to their content
    /// files, including cores which use the path of the content files to
    /// determine the paths of other files, should set `need_fullpath` to true.
    ///
    /// If `need_fullpath` is [`true`] and [`Core::on_load_game`](crate::Core::on_load_game) is called:
    ///    - `retro_game_info::path` is guaranteed to have a valid path
    ///    - `retro_game_info::data` and `retro_game_info::size` are invalid
    pub need_fullpath: bool,

    /// If [`true`], the frontend is not allowed to extract any archives before
    /// loading the real content.
    pub block_extract: bool,
}
