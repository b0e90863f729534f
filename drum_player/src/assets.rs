// THEORY:
// Startup asset resolution. The kit ships one audio sample and one picture per
// pad, addressed by pad name. Names are resolved against the registry exactly
// once here, producing tables indexed by `ZoneId` so the frame loop never looks
// anything up by name again.

use air_drum::core_modules::zone::ZoneRegistry;
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// (pad name, sample file, picture file), relative to the asset directory.
const KIT_ASSETS: [(&str, &str, &str); 6] = [
    ("Kick", "Samples/kick-808.wav", "images/kick_drum.png"),
    ("Snare", "Samples/snare-808.wav", "images/snare_drum.png"),
    ("Hi-Hat", "Samples/hihat-808.wav", "images/hi_hat.png"),
    ("Tom1", "Samples/tom-lofi.wav", "images/tom.png"),
    ("Tom2", "Samples/tom-rototom.wav", "images/tom.png"),
    ("Crash", "Samples/crash-808.wav", "images/crash_cymbal.png"),
];

/// Asset paths for every pad, in `ZoneId` order.
#[derive(Debug, Clone)]
pub struct KitAssetPaths {
    pub samples: Vec<PathBuf>,
    pub images: Vec<PathBuf>,
}

pub fn resolve(registry: &ZoneRegistry, asset_dir: &Path) -> Result<KitAssetPaths> {
    let mut samples = Vec::with_capacity(registry.len());
    let mut images = Vec::with_capacity(registry.len());

    for (_, zone) in registry.iter() {
        let (_, sample, image) = KIT_ASSETS
            .iter()
            .find(|(name, _, _)| *name == zone.name)
            .ok_or_else(|| anyhow!("no sample or picture is defined for pad '{}'", zone.name))?;
        samples.push(asset_dir.join(sample));
        images.push(asset_dir.join(image));
    }

    Ok(KitAssetPaths { samples, images })
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_drum::pipeline::{Zone, ZoneBounds};

    #[test]
    fn standard_kit_resolves_in_pad_order() {
        let registry = ZoneRegistry::standard(640, 480, 100);
        let paths = resolve(&registry, Path::new("kit")).unwrap();

        let samples: Vec<PathBuf> = [
            "Samples/kick-808.wav",
            "Samples/snare-808.wav",
            "Samples/hihat-808.wav",
            "Samples/tom-lofi.wav",
            "Samples/tom-rototom.wav",
            "Samples/crash-808.wav",
        ]
        .iter()
        .map(|file| Path::new("kit").join(file))
        .collect();
        assert_eq!(paths.samples, samples);

        let images: Vec<PathBuf> = [
            "images/kick_drum.png",
            "images/snare_drum.png",
            "images/hi_hat.png",
            "images/tom.png",
            "images/tom.png",
            "images/crash_cymbal.png",
        ]
        .iter()
        .map(|file| Path::new("kit").join(file))
        .collect();
        assert_eq!(paths.images, images);
    }

    #[test]
    fn pad_without_assets_is_an_error() {
        let registry = ZoneRegistry::from_zones(vec![Zone {
            name: "Cowbell".to_string(),
            bounds: ZoneBounds::new(0, 0, 10, 10),
            is_special: false,
        }]);
        let err = resolve(&registry, Path::new("kit")).unwrap_err();
        assert!(err.to_string().contains("Cowbell"));
    }
}
