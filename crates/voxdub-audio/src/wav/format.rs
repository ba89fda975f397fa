//! WAV file format parameters.

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (conventionally 16).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Format of the speech service's synthesized audio: 24 kHz mono PCM16.
    pub const SPEECH: WavFormat = WavFormat {
        channels: 1,
        sample_rate: 24_000,
        bits_per_sample: 16,
    };

    /// Creates a format from explicit parameters.
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Creates a mono 16-bit format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1, 16)
    }

    /// Creates a stereo 16-bit format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 2, 16)
    }

    /// Bytes per sample (per channel), rounded down.
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Block align (bytes per sample frame): `channels * bits_per_sample / 8`.
    pub fn block_align(&self) -> u16 {
        (u32::from(self.channels) * u32::from(self.bits_per_sample) / 8) as u16
    }

    /// Byte rate (bytes per second): `sample_rate * channels * bits_per_sample / 8`.
    pub fn byte_rate(&self) -> u32 {
        (u64::from(self.sample_rate) * u64::from(self.channels) * u64::from(self.bits_per_sample)
            / 8) as u32
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::SPEECH
    }
}
