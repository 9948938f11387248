/// Buckets a noise sample into an ordinal category.
///
/// The category is the number of thresholds the value reaches, `value >= threshold`, so a
/// value sitting exactly on a threshold always lands in the higher bucket. Category 0 is the
/// background.
///
/// With two thresholds only categories `0..=2` exist. Stroke tables still carry an entry for
/// category 3, which is then never produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
  thresholds: Vec<f64>,
}

impl Classifier {
  pub const MAX_THRESHOLDS: usize = 3;

  /// Non-finite thresholds are dropped, the rest sorted ascending and truncated to
  /// [`Self::MAX_THRESHOLDS`].
  pub fn new(thresholds: impl IntoIterator<Item = f64>) -> Self {
    let mut thresholds = thresholds.into_iter()
      .filter(|t| t.is_finite())
      .collect::<Vec<_>>();
    thresholds.sort_by(f64::total_cmp);
    thresholds.truncate(Self::MAX_THRESHOLDS);
    Self { thresholds }
  }

  pub fn thresholds(&self) -> &[f64] {
    &self.thresholds
  }

  /// Number of categories this classifier can produce.
  pub fn buckets(&self) -> u8 {
    self.thresholds.len() as u8 + 1
  }

  pub fn classify(&self, value: f64) -> u8 {
    self.thresholds.iter()
      .take_while(|&&t| value >= t)
      .count() as u8
  }
}

impl Default for Classifier {
  fn default() -> Self {
    Self::new([0.28, 0.45, 0.65])
  }
}
