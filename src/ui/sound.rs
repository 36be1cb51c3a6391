/// Sound engine: every effect is synthesized as a PCM buffer at startup,
/// so the game ships no audio assets.
///
/// Buffers are i16 mono samples wrapped in in-memory WAV containers and
/// played fire-and-forget through detached rodio sinks. If no output
/// device is available the whole subsystem degrades to a silent no-op.
///
/// Compile with `--no-default-features` or without the "sound" feature
/// to drop the rodio dependency entirely (the stub does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 44100;
    const TAU: f32 = std::f32::consts::TAU;

    struct Effect {
        wav: Arc<Vec<u8>>,
        volume: f32,
    }

    struct Audio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        effects: HashMap<&'static str, Effect>,
    }

    /// Name → synthesized buffer. Built once, read-only afterwards.
    pub struct SoundManager {
        audio: Option<Audio>,
    }

    impl SoundManager {
        /// Synthesize every effect. Any failure to open an output stream
        /// disables audio globally; nothing here ever propagates an error.
        pub fn new() -> Self {
            let audio = match OutputStream::try_default() {
                Ok((stream, handle)) => Some(Audio {
                    _stream: stream,
                    handle,
                    effects: build_effects(),
                }),
                Err(e) => {
                    eprintln!("Warning: audio unavailable, sound disabled: {e}");
                    None
                }
            };
            SoundManager { audio }
        }

        /// Play an effect `loops` extra times after the first pass.
        /// No-op when audio is disabled or the name is unknown.
        pub fn play(&self, name: &str, loops: u32) {
            let Some(audio) = &self.audio else { return };
            let Some(fx) = audio.effects.get(name) else { return };

            if let Ok(sink) = Sink::try_new(&audio.handle) {
                sink.set_volume(fx.volume);
                for _ in 0..=loops {
                    let cursor = Cursor::new(fx.wav.as_ref().clone());
                    if let Ok(src) = rodio::Decoder::new(cursor) {
                        sink.append(src);
                    }
                }
                sink.detach(); // fire-and-forget
            }
        }
    }

    fn build_effects() -> HashMap<&'static str, Effect> {
        let mut fx = HashMap::new();
        let mut add = |name, samples: Vec<i16>, volume| {
            fx.insert(name, Effect { wav: Arc::new(make_wav(&samples)), volume });
        };

        add("intro", gen_phaser(0.5, 440.0, 880.0, 4), 0.4);
        add("eat_pellet", gen_beep(0.05, 1200.0, 1000.0), 0.3);
        add("eat_power_pellet", gen_phaser(0.4, 200.0, 100.0, 4), 0.4);
        add("eat_ghost", gen_phaser(0.3, 200.0, 1000.0, 1), 0.4);
        add("death", gen_explosion(0.8), 0.5);
        add("menu_select", gen_beep(0.1, 800.0, 2000.0), 0.3);
        fx
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce i16 mono samples
    // ════════════════════════════════════════════════════════════

    /// Plain sine tone at a fixed frequency and peak amplitude.
    fn gen_beep(duration: f32, freq: f32, amplitude: f32) -> Vec<i16> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| (amplitude * (TAU * i as f32 * freq / SAMPLE_RATE as f32).sin()) as i16)
            .collect()
    }

    /// Frequency sweep from `start_freq` to `end_freq` with a wobbling
    /// secondary phase term and an exponential decay envelope.
    fn gen_phaser(duration: f32, start_freq: f32, end_freq: f32, phases: u32) -> Vec<i16> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let progress = i as f32 / n as f32;
                let freq = start_freq + (end_freq - start_freq) * progress;
                let phase_shift = (TAU * phases as f32 * progress).sin() * 0.5;
                let angle = TAU * (i as f32 / SAMPLE_RATE as f32) * freq + phase_shift;
                let envelope = 2000.0 * (-3.0 * progress).exp();
                (envelope * angle.sin()) as i16
            })
            .collect()
    }

    /// Noise burst over a collapsing carrier: freq 800·(1−p²)+100,
    /// envelope 4000·exp(−5p).
    fn gen_explosion(duration: f32) -> Vec<i16> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 0x2F6E_2B1D;
        (0..n)
            .map(|i| {
                let progress = i as f32 / n as f32;
                let freq = 800.0 * (1.0 - progress * progress) + 100.0;
                // Simple LCG noise in [-1, 1]
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let envelope = 4000.0 * (-5.0 * progress).exp();
                let carrier = (TAU * i as f32 * freq / SAMPLE_RATE as f32).sin();
                (envelope * noise * carrier) as i16
            })
            .collect()
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder — wraps i16 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[i16]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2;
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            buf.extend_from_slice(&s.to_le_bytes());
        }

        buf
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn beep_has_sample_rate_times_duration_samples() {
            let buf = gen_beep(0.05, 1200.0, 1000.0);
            assert_eq!(buf.len(), (SAMPLE_RATE as f32 * 0.05) as usize);
            // A sine starts at zero.
            assert_eq!(buf[0], 0);
            assert!(buf.iter().all(|&s| s.abs() <= 1000));
            assert!(buf.iter().any(|&s| s.abs() > 500));
        }

        #[test]
        fn phaser_envelope_decays() {
            let buf = gen_phaser(0.5, 440.0, 880.0, 4);
            assert_eq!(buf.len(), (SAMPLE_RATE as f32 * 0.5) as usize);
            let head_peak = buf[..buf.len() / 8].iter().map(|s| s.abs()).max().unwrap();
            let tail_peak = buf[buf.len() * 7 / 8..].iter().map(|s| s.abs()).max().unwrap();
            assert!(head_peak <= 2000);
            assert!(tail_peak < head_peak / 4);
        }

        #[test]
        fn explosion_stays_within_peak_amplitude() {
            let buf = gen_explosion(0.8);
            assert_eq!(buf.len(), (SAMPLE_RATE as f32 * 0.8) as usize);
            assert!(buf.iter().all(|&s| s.abs() <= 4000));
        }

        #[test]
        fn wav_container_is_well_formed() {
            let buf = make_wav(&[0i16, 1000, -1000]);
            assert_eq!(&buf[..4], b"RIFF");
            assert_eq!(&buf[8..12], b"WAVE");
            assert_eq!(&buf[36..40], b"data");
            assert_eq!(buf.len(), 44 + 6);
            // 16-bit little-endian payload
            assert_eq!(&buf[44..46], &0i16.to_le_bytes());
            assert_eq!(&buf[46..48], &1000i16.to_le_bytes());
        }

        #[test]
        fn play_with_unknown_name_is_a_no_op() {
            let silent = SoundManager { audio: None };
            silent.play("no_such_effect", 0);
            silent.play("eat_pellet", 3);

            // With a device present the lookup path must also tolerate
            // unknown names; build the table directly to prove the key
            // simply isn't there.
            assert!(!build_effects().contains_key("no_such_effect"));
            assert!(build_effects().contains_key("eat_pellet"));
        }
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundManager;

#[cfg(not(feature = "sound"))]
pub struct SoundManager;

#[cfg(not(feature = "sound"))]
impl SoundManager {
    pub fn new() -> Self {
        SoundManager
    }
    pub fn play(&self, _name: &str, _loops: u32) {}
}
