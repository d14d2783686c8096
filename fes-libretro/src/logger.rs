//! [`log::Log`] implementation using the libretro logging interface.
use crate::sys::*;
use env_logger::filter::{Builder as FilterBuilder, Filter};
use log::{Level, Metadata, Record};
use once_cell::sync::OnceCell;
use std::{
    ffi::CString,
    io::Write,
    os::raw::c_char,
    sync::{PoisonError, RwLock},
};

static LOGGER: OnceCell<RetroLogger> = OnceCell::new();

pub struct RetroLogger {
    callback: RwLock<retro_log_printf_t>,
    filter: Filter,
}

/// Installs the [`RetroLogger`] as the global logger, or points the already
/// installed one at a new frontend log function.
///
/// Without a log function records go to stderr.
pub fn init_log(callback: retro_log_printf_t) {
    if let Some(logger) = LOGGER.get() {
        logger.set_callback(callback);
        return;
    }

    let logger = LOGGER.get_or_init(|| RetroLogger::new(callback));

    if log::set_logger(logger).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

impl RetroLogger {
    pub fn new(callback: retro_log_printf_t) -> Self {
        let mut builder = FilterBuilder::new();
        let mut set_default_level = true;

        if let Ok(s) = std::env::var("RUST_LOG") {
            builder.parse(&s);

            if !s.trim().is_empty() {
                set_default_level = false;
            }
        }

        // env_logger's filter falls back to the error level without directives
        if set_default_level {
            builder.filter(None, log::LevelFilter::Trace);
        }

        Self {
            callback: RwLock::new(callback),
            filter: builder.build(),
        }
    }

    pub fn set_callback(&self, callback: retro_log_printf_t) {
        *self.callback.write().unwrap_or_else(PoisonError::into_inner) = callback;
    }

    fn get_retro_log_level(level: Level) -> retro_log_level {
        match level {
            Level::Error => retro_log_level::RETRO_LOG_ERROR,
            Level::Warn => retro_log_level::RETRO_LOG_WARN,
            Level::Info => retro_log_level::RETRO_LOG_INFO,
            Level::Debug | Level::Trace => retro_log_level::RETRO_LOG_DEBUG,
        }
    }
}

impl log::Log for RetroLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.filter.matches(record) {
            return;
        }

        let target = if !record.target().is_empty() {
            record.target()
        } else {
            record.module_path().unwrap_or_default()
        };

        let callback = *self.callback.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(cb) = callback {
            let message = format!("{}", record.args()).replace('\0', "");
            let (Ok(target), Ok(message)) = (CString::new(target), CString::new(message)) else {
                return;
            };

            let level = Self::get_retro_log_level(record.level());

            unsafe {
                // The callback works like `printf`
                cb(
                    level,
                    "[%s] %s\n\0".as_ptr() as *const c_char,
                    target.as_ptr(),
                    message.as_ptr(),
                )
            }
        } else {
            let stderr = std::io::stderr();
            let mut stderr_lock = stderr.lock();

            let _ = writeln!(
                stderr_lock,
                "[libretro {}] [{}] {}",
                record.level(),
                target,
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
