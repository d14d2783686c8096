//! The Fantasy Entertainment System libretro core.
//!
//! Shows a test image and plays a test sound. Holding UP on the first joypad
//! restarts the sound, at most once per second.

pub mod assets;
pub mod audio;
pub mod error;
pub mod framebuffer;
pub mod options;
pub mod rewind;
pub mod system;

use anyhow::Context;
use audio::{AudioSource, SineSource, VorbisSource};
use fes_libretro::{contexts::*, retro_core, sys::*, types::SystemInfo, Core};
use framebuffer::{Framebuffer, HEIGHT, PITCH, WHITE, WIDTH};
use options::{AudioSourceKind, Options, VideoSource};
use rewind::RewindCooldown;
use std::path::{Path, PathBuf};
use system::{AUDIO_FRAMES_PER_TICK, INPUT_DESCRIPTORS, PERFORMANCE_LEVEL};

pub struct FesCore {
    framebuffer: Framebuffer,
    audio: Option<Box<dyn AudioSource>>,
    options: Options,
    cooldown: RewindCooldown,

    /// Interleaved stereo scratch buffer for one tick.
    samples: Vec<i16>,
}

retro_core!(FesCore => FesCore::new());

impl Default for FesCore {
    fn default() -> Self {
        Self::new()
    }
}

impl FesCore {
    pub fn new() -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            audio: None,
            options: Options::default(),
            cooldown: RewindCooldown::default(),
            samples: vec![0; AUDIO_FRAMES_PER_TICK * 2],
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn cooldown(&self) -> RewindCooldown {
        self.cooldown
    }

    pub fn has_audio_source(&self) -> bool {
        self.audio.is_some()
    }

    pub fn set_audio_source(&mut self, source: Option<Box<dyn AudioSource>>) {
        self.audio = source;
    }

    /// Submits exactly [`AUDIO_FRAMES_PER_TICK`] stereo frames.
    ///
    /// A short read gets padded with silence. Without any data the constant
    /// sample `(1, 1)` is queued frame by frame.
    pub fn write_audio(&mut self, ctx: &AudioContext) {
        let frames = match self.audio.as_mut() {
            Some(source) => source.read_frames(&mut self.samples),
            None => 0,
        };

        if frames == 0 {
            for _ in 0..AUDIO_FRAMES_PER_TICK {
                ctx.queue_audio_sample(1, 1);
            }

            return;
        }

        self.samples[frames * 2..].fill(0);
        ctx.batch_audio_samples(&self.samples);
    }

    fn load_assets(&mut self, dir: &Path) {
        log::info!("Loading assets from {dir:?}");

        if let Err(err) = self.draw_test_pattern(dir) {
            log::warn!("{err:#}");
        }

        self.audio = self.open_audio_source(dir).unwrap_or_else(|err| {
            log::warn!("{err:#}");
            None
        });
    }

    fn draw_test_pattern(&mut self, dir: &Path) -> anyhow::Result<()> {
        match self.options.video {
            VideoSource::Image => {
                let path = dir.join(assets::IMAGE_FILE);
                let image = assets::load_image(&path)
                    .with_context(|| format!("Failed to load test image {path:?}"))?;

                assets::draw_image(&mut self.framebuffer, &image);
            }
            VideoSource::Sprite => assets::draw_sprite(&mut self.framebuffer),
        }

        Ok(())
    }

    fn open_audio_source(&self, dir: &Path) -> anyhow::Result<Option<Box<dyn AudioSource>>> {
        let source: Box<dyn AudioSource> = match self.options.audio {
            AudioSourceKind::Ogg => {
                let path = dir.join(assets::AUDIO_FILE);
                let source = VorbisSource::open(&path)
                    .with_context(|| format!("Failed to open test sound {path:?}"))?;

                Box::new(source)
            }
            AudioSourceKind::Sine => Box::new(SineSource::new()),
            AudioSourceKind::Off => return Ok(None),
        };

        Ok(Some(source))
    }
}

impl Core for FesCore {
    fn get_info(&self) -> SystemInfo {
        system::system_info()
    }

    fn on_get_av_info(&mut self, ctx: &mut GetAvInfoContext) -> retro_system_av_info {
        if let Err(err) = ctx.set_pixel_format(retro_pixel_format::RETRO_PIXEL_FORMAT_XRGB8888) {
            log::debug!("Re-sending the pixel format failed: {err}");
        }

        system::av_info()
    }

    fn on_set_environment(&mut self, initial: bool, ctx: &mut SetEnvironmentContext) {
        if !initial {
            return;
        }

        if let Err(err) = ctx.set_support_no_game(true) {
            log::warn!("Failed to announce support for running without content: {err}");
        }

        if let Err(err) = ctx.set_variables(options::CORE_VARIABLES) {
            log::warn!("Failed to set core options: {err}");
        }

        let gctx: GenericContext = ctx.into();
        if let Err(err) = gctx.set_input_descriptors(INPUT_DESCRIPTORS) {
            log::warn!("Failed to set input descriptors: {err}");
        }
    }

    fn on_init(&mut self, ctx: &mut InitContext) {
        if let Err(err) = ctx.set_performance_level(PERFORMANCE_LEVEL) {
            log::debug!("Failed to set the performance level: {err}");
        }

        self.framebuffer.clear(WHITE);
    }

    fn on_deinit(&mut self, _ctx: &mut GenericContext) {
        self.audio = None;
    }

    fn on_reset(&mut self, _ctx: &mut GenericContext) {
        if let Some(source) = self.audio.as_mut() {
            source.rewind();
        }

        self.cooldown.reset();
    }

    fn on_options_changed(&mut self, ctx: &mut OptionsChangedContext) {
        self.options.update(|key| match ctx.get_variable(key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("Failed to read {key}: {err}");
                None
            }
        });
    }

    fn on_load_game(&mut self, _game: Option<retro_game_info>, ctx: &mut LoadGameContext) -> bool {
        if let Err(err) = ctx.set_pixel_format(retro_pixel_format::RETRO_PIXEL_FORMAT_XRGB8888) {
            log::error!("Required pixel format XRGB8888 is not supported: {err}");
            return false;
        }

        // A failed image load leaves a blank frame
        self.framebuffer.clear(WHITE);

        if let Err(err) = ctx.enable_audio_callback() {
            log::info!("Audio callback unavailable, writing audio every frame: {err}");
        }

        let gctx: GenericContext = ctx.into();

        let dir = assets::resolve_asset_dir(
            std::env::var_os(assets::ASSET_DIR_ENV).map(PathBuf::from),
            gctx.get_core_assets_directory().ok().flatten(),
            gctx.get_system_directory().ok().flatten(),
        );

        self.load_assets(&dir);

        true
    }

    fn on_unload_game(&mut self, _ctx: &mut GenericContext) {
        self.audio = None;
    }

    #[inline]
    fn on_run(&mut self, ctx: &mut RunContext) {
        ctx.poll_input();

        let requested = ctx.is_joypad_button_pressed(0, RETRO_DEVICE_ID_JOYPAD_UP);

        if self.cooldown.tick(requested && self.audio.is_some()) {
            if let Some(source) = self.audio.as_mut() {
                log::debug!("Rewinding audio");
                source.rewind();
            }
        }

        if !ctx.audio_callback_enabled() {
            let actx: AudioContext = (&*ctx).into();
            self.write_audio(&actx);
        }

        ctx.draw_frame(self.framebuffer.as_bytes(), WIDTH, HEIGHT, PITCH);
    }

    fn on_write_audio(&mut self, ctx: &mut AudioContext) {
        self.write_audio(ctx);
    }
}
