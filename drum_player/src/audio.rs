use std::path::{Path, PathBuf};

use air_drum::pipeline::ZoneId;
use anyhow::{Context, Result};
use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend};
use log::{info, warn};

/// One decoded sample per pad, played fire-and-forget through kira's mixer.
/// Each trigger starts an independent voice, so a pad struck again while its
/// previous hit is still ringing overlaps rather than cutting off.
pub struct DrumSamples {
    manager: AudioManager<DefaultBackend>,
    samples: Vec<StaticSoundData>,
}

impl DrumSamples {
    /// Opens the default output device and decodes every sample up front.
    /// Any missing or unreadable file aborts startup.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .context("Failed to create audio manager")?;

        let samples = paths
            .iter()
            .map(|path| load_sample(path))
            .collect::<Result<Vec<_>>>()?;
        info!("loaded {} drum samples", samples.len());

        Ok(Self { manager, samples })
    }

    pub fn trigger(&mut self, id: ZoneId) {
        let Some(sample) = self.samples.get(id.index()) else {
            warn!("no sample loaded for pad {}", id.index());
            return;
        };
        // The handle is dropped immediately; kira keeps the voice playing.
        if let Err(e) = self.manager.play(sample.clone()) {
            warn!("Failed to play sample for pad {}: {e:?}", id.index());
        }
    }
}

fn load_sample(path: &Path) -> Result<StaticSoundData> {
    StaticSoundData::from_file(path)
        .with_context(|| format!("Failed to load sound: {}", path.display()))
}
