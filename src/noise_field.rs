//! Coherent noise over a 2D domain, threaded through a third (time) axis.

use {
  noise::{NoiseFn, Perlin},
  serde::{Deserialize, Serialize},
};

/// Octave settings of the fractal sum.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoiseDetail {
  pub octaves: u32,
  /// amplitude multiplier per octave, (0, 1]
  pub falloff: f64,
}

impl Default for NoiseDetail {
  fn default() -> Self {
    Self { octaves: 4, falloff: 0.5 }
  }
}

/// Deterministic scalar field in `[0, 1)`, seeded once per regeneration.
#[derive(Clone)]
pub struct NoiseField {
  perlin: Perlin,
  seed: u32,
  detail: NoiseDetail,
}

impl std::fmt::Debug for NoiseField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NoiseField")
      .field("seed", &self.seed)
      .field("detail", &self.detail)
      .finish()
  }
}

const UPPER: f64 = 1.0 - f64::EPSILON;

impl NoiseField {
  pub fn new(seed: u32) -> Self {
    Self::with_detail(seed, NoiseDetail::default())
  }

  pub fn with_detail(seed: u32, detail: NoiseDetail) -> Self {
    Self {
      perlin: Perlin::new(seed),
      seed,
      detail: NoiseDetail {
        octaves: detail.octaves.max(1),
        falloff: detail.falloff.clamp(f64::EPSILON, 1.0)
      }
    }
  }

  pub fn seed(&self) -> u32 {
    self.seed
  }

  /// Sample at `(scale·x, scale·y, scale·t)`.
  pub fn sample(&self, x: f64, y: f64, t: f64, scale: f64) -> f64 {
    let mut amp = 1.0;
    let mut freq = 1.0;
    let mut sum = 0.0;
    let mut norm = 0.0;

    for _ in 0..self.detail.octaves {
      let p = [scale * x * freq, scale * y * freq, scale * t * freq];
      sum += self.perlin.get(p) * amp;
      norm += amp;
      amp *= self.detail.falloff;
      freq *= 2.0;
    }

    // [-1, 1] -> [0, 1)
    (0.5 + 0.5 * sum / norm).clamp(0.0, UPPER)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn repeatable() {
    let a = NoiseField::new(1234);
    let b = NoiseField::new(1234);
    for i in 0..64 {
      let (x, y) = (i as f64 * 7.3, i as f64 * 2.9);
      assert_eq!(a.sample(x, y, 0.0, 0.01), a.sample(x, y, 0.0, 0.01));
      assert_eq!(a.sample(x, y, 0.0, 0.01), b.sample(x, y, 0.0, 0.01));
    }
  }

  #[test] fn unit_interval() {
    let field = NoiseField::with_detail(7, NoiseDetail { octaves: 6, falloff: 0.9 });
    for x in 0..50 {
      for y in 0..50 {
        let v = field.sample(x as f64, y as f64, 3.0, 0.037);
        assert!((0.0..1.0).contains(&v), "{} out of range", v);
      }
    }
  }

  #[test] fn seed_changes_output() {
    let a = NoiseField::new(1);
    let b = NoiseField::new(2);
    let differs = (0..100)
      .any(|i| a.sample(i as f64 * 3.1, i as f64 * 1.7, 0.0, 0.05) != b.sample(i as f64 * 3.1, i as f64 * 1.7, 0.0, 0.05));
    assert!(differs);
  }
}
