use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use once_cell::sync::Lazy;
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use swipe_core::AudioConfig;
use swipe_platform::{Cue, CuePlayer, Result};
use tracing::{info, warn};

const SAMPLE_RATE: u32 = 44_100;

/// Rising sine sweep, 520 -> 880 Hz.
static CHIRP: Lazy<Arc<[f32]>> = Lazy::new(|| {
    synthesize(0.18, |t, progress| {
        let frequency = 520.0 + 360.0 * progress;
        let envelope = (progress * 40.0).min(1.0) * (-t * 14.0).exp();
        (std::f32::consts::TAU * frequency * t).sin() * envelope
    })
});

/// Soft two-tone chime.
static CHIME: Lazy<Arc<[f32]>> = Lazy::new(|| {
    synthesize(0.25, |t, _| {
        let envelope = (-t * 10.0).exp();
        let tone = (std::f32::consts::TAU * 660.0 * t).sin() * 0.6
            + (std::f32::consts::TAU * 990.0 * t).sin() * 0.4;
        tone * envelope
    })
});

fn synthesize(seconds: f32, wave: impl Fn(f32, f32) -> f32) -> Arc<[f32]> {
    let count = (SAMPLE_RATE as f32 * seconds) as usize;
    (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            wave(t, i as f32 / count as f32)
        })
        .collect()
}

pub(crate) fn built_in(cue: Cue) -> Arc<[f32]> {
    match cue {
        Cue::Chirp => Arc::clone(&CHIRP),
        Cue::Chime => Arc::clone(&CHIME),
    }
}

enum AudioCommand {
    Play(Cue),
}

enum CueSound {
    Samples(Arc<[f32]>),
    Encoded(Arc<[u8]>),
}

/// Sends cues to a dedicated audio thread that owns the output device.
pub struct RodioCuePlayer {
    commands: Sender<AudioCommand>,
}

impl RodioCuePlayer {
    pub fn spawn(config: &AudioConfig) -> Result<Self> {
        let sounds = load_sounds(config.cue_files.as_ref());
        let volume = config.volume;
        let (commands, receiver) = crossbeam_channel::unbounded::<AudioCommand>();
        thread::Builder::new()
            .name("swipe-audio".into())
            .spawn(move || audio_thread(receiver, sounds, volume))?;
        Ok(Self { commands })
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play(&mut self, cue: Cue) -> Result<()> {
        self.commands
            .send(AudioCommand::Play(cue))
            .map_err(|_| "audio thread has stopped")?;
        Ok(())
    }
}

fn load_sounds(files: Option<&[PathBuf; 2]>) -> [CueSound; 2] {
    Cue::ALL.map(|cue| {
        let Some(path) = files.map(|files| &files[cue.index()]) else {
            return CueSound::Samples(built_in(cue));
        };
        match fs::read(path) {
            Ok(bytes) => CueSound::Encoded(bytes.into()),
            Err(err) => {
                warn!("could not read cue {}: {err}; using built-in {cue:?}", path.display());
                CueSound::Samples(built_in(cue))
            }
        }
    })
}

fn audio_thread(receiver: Receiver<AudioCommand>, sounds: [CueSound; 2], volume: f32) {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(mut stream) => {
            stream.log_on_drop(false);
            info!("audio output ready");
            Some(stream)
        }
        Err(err) => {
            warn!("audio unavailable, cues will be silent: {err}");
            None
        }
    };
    while let Ok(command) = receiver.recv() {
        let AudioCommand::Play(cue) = command;
        if let Some(stream) = &stream {
            if let Err(err) = play(stream, &sounds[cue.index()], volume) {
                warn!("failed to play {cue:?}: {err}");
            }
        }
    }
    info!("audio thread exiting");
}

fn play(stream: &OutputStream, sound: &CueSound, volume: f32) -> Result<()> {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    match sound {
        CueSound::Samples(samples) => {
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
        }
        CueSound::Encoded(bytes) => {
            let decoder = Decoder::new(Cursor::new(bytes.to_vec()))?;
            sink.append(decoder);
        }
    }
    sink.detach();
    Ok(())
}
