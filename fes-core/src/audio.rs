//! Audio sources feeding the per-frame sample batches.
use crate::{error::AssetError, system::SAMPLE_RATE};
use dasp_sample::Sample;
use dasp_signal::{self as signal, ConstHz, ScaleAmp, Signal, Sine};
use std::{fs::File, path::Path};
use symphonia::core::{
    audio::SampleBuffer,
    codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL},
    errors::Error as SymphoniaError,
    formats::{FormatOptions, FormatReader, SeekMode, SeekTo},
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};

/// A stream of interleaved stereo `i16` frames with a read cursor.
pub trait AudioSource: Send {
    /// Fills `buffer` from the cursor on and returns the number of stereo frames
    /// written. `0` means the source is exhausted.
    fn read_frames(&mut self, buffer: &mut [i16]) -> usize;

    /// Moves the cursor back to the start.
    fn rewind(&mut self);
}

const TONE_FREQUENCY: f64 = 300.0;
const TONE_AMPLITUDE: f64 = 0x800 as f64 / 0x8000 as f64;

/// An endless sine tone.
pub struct SineSource {
    sine: ScaleAmp<Sine<ConstHz>>,
}

impl Default for SineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SineSource {
    pub fn new() -> Self {
        Self {
            sine: signal::rate(SAMPLE_RATE)
                .const_hz(TONE_FREQUENCY)
                .sine()
                .scale_amp(TONE_AMPLITUDE),
        }
    }
}

impl AudioSource for SineSource {
    fn read_frames(&mut self, buffer: &mut [i16]) -> usize {
        let mut frames = 0;

        for frame in buffer.chunks_exact_mut(2) {
            let sample = i16::from_sample(self.sine.next());
            frame.fill(sample);
            frames += 1;
        }

        frames
    }

    fn rewind(&mut self) {
        *self = Self::new();
    }
}

/// Ogg Vorbis file decoded on demand.
pub struct VorbisSource {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,

    /// Decoded stereo samples not handed out yet.
    pending: Vec<i16>,
    cursor: usize,
    finished: bool,
}

impl VorbisSource {
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        let file = File::open(path).map_err(|source| AssetError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("ogg");

        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;

        let format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(AssetError::NoAudioTrack)?;

        let track_id = track.id;

        if let Some(rate) = track.codec_params.sample_rate {
            if rate as f64 != SAMPLE_RATE {
                log::warn!("{path:?} is sampled at {rate} Hz and will play at the wrong speed");
            }
        }

        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())?;

        log::debug!("Opened {path:?}, track {track_id}");

        Ok(Self {
            format,
            decoder,
            track_id,
            pending: Vec::new(),
            cursor: 0,
            finished: false,
        })
    }

    /// Decodes the next packet into `pending`. Returns `false` at the end of the stream.
    fn decode_next(&mut self) -> bool {
        loop {
            let packet = match self.format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(err))
                    if err.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return false;
                }
                Err(err) => {
                    log::warn!("Stopping audio: {err}");
                    return false;
                }
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                // Corrupt packets are skipped
                Err(SymphoniaError::DecodeError(err)) => {
                    log::debug!("Skipping packet: {err}");
                    continue;
                }
                Err(err) => {
                    log::warn!("Stopping audio: {err}");
                    return false;
                }
            };

            let spec = *decoded.spec();
            let channels = spec.channels.count();

            if channels == 0 {
                continue;
            }

            let mut samples = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
            samples.copy_interleaved_ref(decoded);

            self.pending.clear();
            self.cursor = 0;

            for frame in samples.samples().chunks_exact(channels) {
                let left = frame[0];
                let right = frame.get(1).copied().unwrap_or(left);

                self.pending.extend_from_slice(&[left, right]);
            }

            if !self.pending.is_empty() {
                return true;
            }
        }
    }
}

impl AudioSource for VorbisSource {
    fn read_frames(&mut self, buffer: &mut [i16]) -> usize {
        let wanted = buffer.len() & !1;
        let mut written = 0;

        while written < wanted {
            if self.cursor >= self.pending.len() {
                if self.finished || !self.decode_next() {
                    self.finished = true;
                    break;
                }
            }

            let count = (wanted - written).min(self.pending.len() - self.cursor);

            buffer[written..written + count]
                .copy_from_slice(&self.pending[self.cursor..self.cursor + count]);

            written += count;
            self.cursor += count;
        }

        written / 2
    }

    fn rewind(&mut self) {
        let seeked = self.format.seek(
            SeekMode::Accurate,
            SeekTo::TimeStamp {
                ts: 0,
                track_id: self.track_id,
            },
        );

        if let Err(err) = seeked {
            log::warn!("Rewinding audio failed: {err}");
            return;
        }

        self.decoder.reset();
        self.pending.clear();
        self.cursor = 0;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::AUDIO_FRAMES_PER_TICK;
    use std::io::Write;

    /// Mono, 44100 Hz, a little over six ticks long.
    const TONE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/tone.ogg");

    fn read_tick(source: &mut dyn AudioSource) -> (usize, Vec<i16>) {
        let mut buffer = vec![0i16; AUDIO_FRAMES_PER_TICK * 2];
        let frames = source.read_frames(&mut buffer);
        (frames, buffer)
    }

    fn drain(source: &mut dyn AudioSource) -> usize {
        let mut total = 0;

        loop {
            match read_tick(source) {
                (0, _) => return total,
                (frames, _) => total += frames,
            }
        }
    }

    #[test]
    fn vorbis_fills_ticks_with_mono_duplicated() {
        let mut source = VorbisSource::open(Path::new(TONE)).unwrap();

        let (frames, first) = read_tick(&mut source);
        assert_eq!(frames, AUDIO_FRAMES_PER_TICK);
        assert!(first.iter().any(|&sample| sample != 0));

        let (frames, second) = read_tick(&mut source);
        assert_eq!(frames, AUDIO_FRAMES_PER_TICK);

        for frame in first.chunks_exact(2).chain(second.chunks_exact(2)) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn vorbis_runs_dry() {
        let mut source = VorbisSource::open(Path::new(TONE)).unwrap();

        let total = drain(&mut source);
        assert!(total > 2 * AUDIO_FRAMES_PER_TICK);

        // Stays exhausted
        assert_eq!(read_tick(&mut source).0, 0);
        assert_eq!(read_tick(&mut source).0, 0);
    }

    #[test]
    fn vorbis_rewinds_to_start() {
        let mut source = VorbisSource::open(Path::new(TONE)).unwrap();

        let (_, first) = read_tick(&mut source);
        read_tick(&mut source);

        source.rewind();
        let (frames, again) = read_tick(&mut source);
        assert_eq!(frames, AUDIO_FRAMES_PER_TICK);
        assert_eq!(first, again);

        // Rewinding an exhausted source plays it again in full
        let total = AUDIO_FRAMES_PER_TICK + drain(&mut source);
        source.rewind();
        assert_eq!(drain(&mut source), total);
    }

    #[test]
    fn sine_fills_every_frame() {
        let mut sine = SineSource::new();
        let mut buffer = [0i16; 16];

        assert_eq!(sine.read_frames(&mut buffer), 8);

        for frame in buffer.chunks_exact(2) {
            assert_eq!(frame[0], frame[1]);
            assert!(frame[0].unsigned_abs() <= 0x800);
        }

        // The tone starts at a zero crossing and rises
        assert_eq!(buffer[0], 0);
        assert!(buffer[2] > 0);
    }

    #[test]
    fn sine_rewinds_to_start() {
        let mut sine = SineSource::new();
        let mut first = [0i16; 8];
        let mut again = [0i16; 8];

        sine.read_frames(&mut first);
        sine.read_frames(&mut again);
        assert_ne!(first, again);

        sine.rewind();
        sine.read_frames(&mut again);
        assert_eq!(first, again);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = VorbisSource::open(&dir.path().join("test.ogg"));

        assert!(matches!(result, Err(AssetError::Io { .. })));
    }

    #[test]
    fn garbage_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x42; 4096]).unwrap();

        assert!(VorbisSource::open(file.path()).is_err());
    }
}
