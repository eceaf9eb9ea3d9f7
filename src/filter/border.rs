use serde::{Deserialize, Serialize};

/// Policy for sampling outside the image when convolving.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// `gfedcb|abcdefgh|gfedcba`
    #[default]
    Reflect101,
    /// `fedcba|abcdefgh|hgfedcb`
    Reflect,
    /// `aaaaaa|abcdefgh|hhhhhhh`
    Replicate,
    /// `vvvvvv|abcdefgh|vvvvvvv`
    Constant(u8),
}

impl BorderMode {
    /// Maps a possibly out-of-range coordinate onto `0..len`. Returns `None`
    /// when the sample should take the constant border value instead.
    pub fn resolve(self, index: isize, len: usize) -> Option<usize> {
        debug_assert!(len > 0);

        let n = len as isize;
        if (0..n).contains(&index) {
            return Some(index as usize);
        }

        match self {
            BorderMode::Replicate => Some(index.clamp(0, n - 1) as usize),
            BorderMode::Reflect => {
                let j = index.rem_euclid(2 * n);
                let mirrored = if j < n { j } else { 2 * n - 1 - j };
                Some(mirrored as usize)
            }
            BorderMode::Reflect101 => {
                if n == 1 {
                    return Some(0);
                }

                let period = 2 * n - 2;
                let j = index.rem_euclid(period);
                let mirrored = if j < n { j } else { period - j };
                Some(mirrored as usize)
            }
            BorderMode::Constant(_) => None,
        }
    }

    pub(crate) fn constant_value(self) -> f32 {
        match self {
            BorderMode::Constant(value) => value as f32,
            _ => 0.0,
        }
    }
}
