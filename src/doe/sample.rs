use {
  crate::params::{Param, Params},
  rand::Rng,
};

/// Draw one candidate around `focus`.
///
/// Every tunable parameter becomes `focus + uniform(-0.5, 0.5) · (max - min) · spread`,
/// clamped to its domain and snapped to its step. Without a focus the domain midpoints are
/// used. Other fields are copied from `focus`, or from `base` on the first round.
pub fn sample_params(base: &Params, focus: Option<&Params>, spread: f64, rng: &mut impl Rng) -> Params {
  let mut params = focus.unwrap_or(base).clone();
  for param in Param::ALL.into_iter().filter(|p| p.tunable()) {
    let domain = param.domain();
    let center = focus.map_or(domain.midpoint(), |f| f.get(param));
    let raw = center + (rng.gen::<f64>() - 0.5) * domain.width() * spread;
    params.set(param, domain.quantize(raw));
  }
  params
}
