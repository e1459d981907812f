#![forbid(unsafe_code)]

/// Inclusive bounds plus the fallback used when the caller sends nothing usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

pub const MAX_RESULTS: Bounds = Bounds {
    min: 1,
    max: 500,
    default: 50,
};

pub const MAX_FILE_BYTES: Bounds = Bounds {
    min: 1024,
    max: 4 * 1024 * 1024,
    default: 256 * 1024,
};

pub const MAX_SUMMARY_CHARS: Bounds = Bounds {
    min: 200,
    max: 8000,
    default: 1200,
};

impl Bounds {
    /// Floors then clamps `raw`; missing or non-finite input falls back to the default.
    pub fn clamp(self, raw: Option<f64>) -> usize {
        let Some(value) = raw.filter(|v| v.is_finite()) else {
            return self.default;
        };
        let floored = value.floor();
        if floored <= self.min as f64 {
            return self.min;
        }
        if floored >= self.max as f64 {
            return self.max;
        }
        floored as usize
    }
}
