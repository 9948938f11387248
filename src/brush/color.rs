use {
  anyhow::{bail, Result},
  serde::{Deserialize, Serialize},
  std::{fmt, str::FromStr},
};

/// Straight RGBA, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self([r, g, b, 255])
  }

  pub fn from_hex(hex: &str) -> Result<Self> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
      bail!("`{}` is not a #rrggbb[aa] color", hex);
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16);
    let alpha = if digits.len() == 8 { channel(3)? } else { 255 };
    Ok(Self([channel(0)?, channel(1)?, channel(2)?, alpha]))
  }
}

impl FromStr for Color {
  type Err = anyhow::Error;
  fn from_str(s: &str) -> Result<Self> { Self::from_hex(s) }
}

impl TryFrom<String> for Color {
  type Error = anyhow::Error;
  fn try_from(s: String) -> Result<Self> { Self::from_hex(&s) }
}

impl From<Color> for String {
  fn from(c: Color) -> Self { c.to_string() }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let [r, g, b, a] = self.0;
    write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
    if a != 255 {
      write!(f, "{:02x}", a)?;
    }
    Ok(())
  }
}

/// The three colors a sketch uses.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
  pub background: Color,
  pub high: Color,
  pub low: Color,
}

impl Default for Palette {
  fn default() -> Self {
    Self {
      background: Color::rgb(0xff, 0xf9, 0xda),
      high: Color::rgb(0xff, 0x1b, 0x37),
      low: Color::rgb(0xff, 0x33, 0xd2),
    }
  }
}
