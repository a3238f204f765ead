//! Protocol ranges for numeric arguments.
//!
//! Values are saturated into range, never rejected: the module reports a bad
//! argument no differently from any other failure, so the driver never sends one.

/// Tracks addressed by number in the root, `mp3` and `advert` folders.
pub const TRACK_MAX: u16 = 9999;

/// Tracks in a folder of the 3000-track scheme.
pub const LARGE_FOLDER_TRACK_MAX: u16 = 3000;

/// Tracks in a numbered (`01`..`99`) or numbered advert folder.
pub const FOLDER_TRACK_MAX: u16 = 255;

/// Numbered folders.
pub const FOLDER_MAX: u8 = 99;

/// Folders of the 3000-track scheme (4-bit field).
pub const LARGE_FOLDER_MAX: u8 = 15;

/// Numbered advert folders (`advert1`..`advert9`).
pub const ADVERT_FOLDER_MAX: u8 = 9;

pub const VOLUME_MAX: u8 = 30;

/// 0=off, 1=pop, 2=rock, 3=jazz, 4=classic, 5=bass.
pub const EQ_MAX: u8 = 5;

pub const DAC_GAIN_MAX: u8 = 31;

pub const SOURCE_MIN: u8 = 1;

/// Source 6 puts the module to sleep.
pub const SOURCE_SLEEP: u8 = 6;

/// Clamp a track number to `1..=max`.
pub fn track(track: u16, max: u16) -> u16 {
    track.clamp(1, max)
}

/// Clamp a folder number to `1..=max`.
pub fn folder(folder: u8, max: u8) -> u8 {
    folder.clamp(1, max)
}

pub fn volume(volume: u8) -> u8 {
    volume.min(VOLUME_MAX)
}

pub fn eq(preset: u8) -> u8 {
    preset.min(EQ_MAX)
}

pub fn dac_gain(gain: u8) -> u8 {
    gain.min(DAC_GAIN_MAX)
}

pub fn source(source: u8) -> u8 {
    source.clamp(SOURCE_MIN, SOURCE_SLEEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_saturate_per_scheme() {
        assert_eq!(track(0, TRACK_MAX), 1);
        assert_eq!(track(20_000, TRACK_MAX), 9999);
        assert_eq!(track(20_000, LARGE_FOLDER_TRACK_MAX), 3000);
        assert_eq!(track(20_000, FOLDER_TRACK_MAX), 255);
        assert_eq!(track(42, TRACK_MAX), 42);
    }

    #[test]
    fn folders_saturate_per_scheme() {
        assert_eq!(folder(0, FOLDER_MAX), 1);
        assert_eq!(folder(100, FOLDER_MAX), 99);
        assert_eq!(folder(10, ADVERT_FOLDER_MAX), 9);
        assert_eq!(folder(200, LARGE_FOLDER_MAX), 15);
    }

    #[test]
    fn levels_saturate_at_maximum() {
        assert_eq!(volume(45), 30);
        assert_eq!(volume(0), 0);
        assert_eq!(eq(9), 5);
        assert_eq!(dac_gain(255), 31);
        assert_eq!(source(0), 1);
        assert_eq!(source(7), 6);
        assert_eq!(source(SOURCE_SLEEP), 6);
    }
}
