//! Human-readable file sizes

use std::fmt;

const UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Size of a file system item, possibly unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileSize(Option<u64>);

impl FileSize {
  /// A known size in bytes
  pub fn bytes(bytes: u64) -> Self {
    Self(Some(bytes))
  }

  /// A size that cannot be computed (remote archives)
  pub fn unknown() -> Self {
    Self(None)
  }
}

impl fmt::Display for FileSize {
  /// Binary units rounded to two decimals, always with a fractional part: `1.0 KiB`, `1.23 MiB`
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let bytes = match self.0 {
      None => return write!(f, "(unknown)"),
      Some(0) => return write!(f, "0 B"),
      Some(bytes) => bytes,
    };

    let mut unit = 0;
    while unit + 1 < UNITS.len() && bytes as u128 >= 1u128 << (10 * (unit + 1)) {
      unit += 1;
    }

    let scaled = bytes as f64 / (1u128 << (10 * unit)) as f64;
    let rounded = (scaled * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
      write!(f, "{:.1} {}", rounded, UNITS[unit])
    } else {
      write!(f, "{} {}", rounded, UNITS[unit])
    }
  }
}
