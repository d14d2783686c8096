#[macro_export]
macro_rules! c_char_ptr {
    ( $($arg:tt)* ) => {
        concat!($($arg)*, '\0').as_ptr() as *const $crate::libc::c_char
    };
}

#[macro_export]
macro_rules! input_descriptor {
    ( $port:expr, $device:expr, $index:expr, $id:expr, $description:literal $(,)? ) => {
        $crate::sys::retro_input_descriptor {
            port: $port,
            device: $device,
            index: $index,
            id: $id,
            description: $crate::c_char_ptr!($description),
        }
    };
}

#[macro_export]
macro_rules! input_descriptors {
    ( $({ $port:expr, $device:expr, $index:expr, $id:expr, $description:literal $(,)? }),* $(,)? ) => { [
        $(
            $crate::input_descriptor!($port, $device, $index, $id, $description),
        )*
        // End of list
        $crate::sys::retro_input_descriptor {
            port: 0,
            device: 0,
            index: 0,
            id: 0,
            description: ::std::ptr::null(),
        }
    ] }
}

/// Builds a `NULL` terminated [`retro_variable`](crate::sys::retro_variable) list.
///
/// Every entry is `key => "Description; default|other|..."`, the first value
/// being the default.
#[macro_export]
macro_rules! core_variables {
    ( $( $key:literal => $value:literal ),* $(,)? ) => { [
        $(
            $crate::sys::retro_variable {
                key: $crate::c_char_ptr!($key),
                value: $crate::c_char_ptr!($value),
            },
        )*
        // End of list
        $crate::sys::retro_variable {
            key: ::std::ptr::null(),
            value: ::std::ptr::null(),
        }
    ] }
}

#[macro_export]
macro_rules! env_version {
    ( $variable:literal ) => {{
        const PARTS: [&str; 3] = $crate::const_str::split!(env!($variable), ".");
        const MAJOR: u16 = $crate::const_str::parse!(PARTS[0], u16);
        const MINOR: u16 = $crate::const_str::parse!(PARTS[1], u16);
        const PATCH: u16 = $crate::const_str::parse!(PARTS[2], u16);
        $crate::util::Version::new(MAJOR, MINOR, PATCH)
    }};
}
