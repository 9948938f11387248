use {
  super::*,
  crate::{
    brush::{Call, Palette, Recorder},
    handoff::{MemoryStore, SELECTION_KEY},
    scheduler::State
  },
  anyhow::Result,
  serde_json::{json, Value},
  std::sync::Arc,
  tracing_test::traced_test,
};

fn bag(value: Value) -> ParamBag {
  match value {
    Value::Object(map) => map,
    _ => panic!("not an object")
  }
}

fn renderer(size: u32) -> Renderer<Recorder> {
  Renderer::with_seed(RendererConfig::default(), Recorder::new(size), 7)
}

#[test] fn hundred_tiles_reveal_in_eighty_frames() {
  let mut r = renderer(200);
  r.regenerate(&bag(json!({
    "tiles": 100,
    "showTiles": true,
    "showBottomAreas": true,
    "showTopAreas": true
  })));
  assert_eq!(r.scheduler().len(), 10_000);
  assert_eq!(r.scheduler().jobs_per_frame(), 125);
  assert_eq!(r.finish(), 80);
  assert_eq!(r.scheduler().state(), State::Drained);
  assert_eq!(r.backend().visible_strokes().len(), 20_000);
}

#[test] fn oversized_tile_count_clamps() {
  let mut r = renderer(100);
  r.regenerate(&bag(json!({ "tiles": 5000 })));
  assert_eq!(r.params().tiles, 200);
  assert_eq!(r.scheduler().len(), 40_000);
}

#[test] fn regenerate_draws_new_seeds() {
  let mut r = renderer(50);
  let mut seen = vec![];
  for _ in 0..4 {
    r.regenerate(&ParamBag::new());
    let seeds = r.seeds();
    assert!(seeds.noise < SEED_RANGE);
    assert_eq!(seeds.jitter, seeds.noise as u64 + 1);
    seen.push(seeds.noise);
  }
  seen.dedup();
  assert_eq!(seen.len(), 4);
}

#[test] fn same_seed_reproduces_layout() {
  let mut a = renderer(80);
  let mut b = renderer(80);
  a.regenerate(&bag(json!({ "tiles": 20 })));
  b.regenerate(&bag(json!({ "tiles": 20 })));
  assert_eq!(a.plan().map(|p| p.jobs.clone()), b.plan().map(|p| p.jobs.clone()));
}

#[test] fn refresh_replays_without_resampling() {
  let mut r = renderer(120);
  r.regenerate(&bag(json!({ "tiles": 12 })));
  r.finish();
  let seeds = r.seeds();
  let jobs = r.plan().map(|p| p.jobs.clone()).expect("planned");
  let bottom_before = r.backend().visible_strokes().into_iter()
    .filter(|s| s.field.as_deref() == Some(BOTTOM_FIELD))
    .cloned()
    .collect::<Vec<_>>();

  r.refresh(&bag(json!({ "showTopAreas": false })));
  assert_eq!(r.scheduler().cursor(), 0);
  assert!(matches!(r.backend().calls.last(), Some(Call::Clear(_))));
  r.finish();

  assert_eq!(r.seeds(), seeds);
  assert!(Arc::ptr_eq(&jobs, &r.plan().expect("planned").jobs));
  let after = r.backend().visible_strokes().into_iter().cloned().collect::<Vec<_>>();
  assert_eq!(after, bottom_before);
}

#[test] fn refresh_ignores_geometry_fields() {
  let mut r = renderer(120);
  r.regenerate(&bag(json!({ "tiles": 12 })));
  r.finish();
  let before = r.backend().visible_strokes().into_iter().cloned().collect::<Vec<_>>();
  let fields_before = r.backend().calls.iter()
    .filter(|c| matches!(c, Call::SetFlowField(_)))
    .count();

  r.refresh(&bag(json!({ "angleNoiseScale": 0.09, "tiles": 50, "brushWeight": 9.0 })));
  r.finish();

  assert_eq!(r.params().tiles, 12);
  assert_eq!(r.params().angle_noise_scale, Params::default().angle_noise_scale);
  assert_eq!(r.params().tiles, r.plan().expect("planned").grid.tiles);
  let fields_after = r.backend().calls.iter()
    .filter(|c| matches!(c, Call::SetFlowField(_)))
    .count();
  assert_eq!(fields_after, fields_before);
  let after = r.backend().visible_strokes().into_iter().cloned().collect::<Vec<_>>();
  assert_eq!(after, before);
}

#[test] fn regenerate_registers_flow_fields_once() {
  let mut r = renderer(40);
  let registered = |r: &Renderer<Recorder>| r.backend().calls.iter()
    .filter(|c| matches!(c, Call::SetFlowField(_)))
    .count();
  let before = registered(&r);
  r.regenerate(&bag(json!({ "tiles": 10, "angleNoiseScale": 0.05 })));
  // bottom and top field, with the new seed only
  assert_eq!(registered(&r) - before, 2);
}

#[test] fn regenerate_mid_render_replaces_queue() {
  let mut r = renderer(160);
  r.regenerate(&bag(json!({ "tiles": 160 })));
  r.tick();
  r.tick();
  assert_eq!(r.scheduler().cursor(), 2 * (160 * 160 / 80));

  r.regenerate(&bag(json!({ "tiles": 10 })));
  assert_eq!(r.scheduler().cursor(), 0);
  assert_eq!(r.scheduler().len(), 100);
  r.finish();
  // two layers per job, nothing left over from the first queue
  assert_eq!(r.backend().visible_strokes().len(), 200);
}

#[test] fn flow_strokes_follow_the_category_table() {
  let mut r = renderer(100);
  r.regenerate(&bag(json!({ "tiles": 10 })));
  r.finish();
  let palette = Palette::default();
  let jobs = r.plan().expect("planned").jobs.clone();
  let strokes = r.backend().visible_strokes();
  assert_eq!(strokes.len(), jobs.len() * 2);

  for (job, pair) in jobs.iter().zip(strokes.chunks(2)) {
    let (bottom, top) = (pair[0], pair[1]);
    let expected_bottom = match job.bottom_area {
      1 => (palette.low, BRUSH_COARSE),
      2 => (palette.high, BRUSH_FINE),
      3 => (palette.high, BRUSH_COARSE),
      _ => (palette.background, BRUSH_FINE),
    };
    let expected_top = match job.top_area {
      1 => (palette.high, BRUSH_FINE),
      2 => (palette.high, BRUSH_COARSE),
      3 => (palette.low, BRUSH_FINE),
      _ => (palette.background, BRUSH_COARSE),
    };
    assert_eq!((bottom.color, bottom.brush.as_deref()), (Some(expected_bottom.0), Some(expected_bottom.1)));
    assert_eq!((top.color, top.brush.as_deref()), (Some(expected_top.0), Some(expected_top.1)));
    assert_eq!(bottom.field.as_deref(), Some(BOTTOM_FIELD));
    assert_eq!(top.field.as_deref(), Some(TOP_FIELD));
    // one tile (10px) left of the jittered start
    assert_eq!(bottom.origin.x, job.start.x - 10.0);
    assert_eq!(bottom.origin.y, job.start.y);
    assert_eq!(bottom.length, job.bottom_length * 10.0);
    assert!((top.length - job.top_length * 0.8 * 10.0).abs() < 1e-4);
  }
}

#[test] fn jitter_length_mode() {
  let config = RendererConfig { length_mode: LengthMode::Jitter, ..Default::default() };
  let mut r = Renderer::with_seed(config, Recorder::new(100), 3);
  r.regenerate(&bag(json!({ "tiles": 10, "brushLengthBase": 2.0, "brushLengthTopMultiplier": 0.5 })));
  r.finish();
  let jobs = r.plan().expect("planned").jobs.clone();
  let strokes = r.backend().visible_strokes();
  for (job, pair) in jobs.iter().zip(strokes.chunks(2)) {
    assert!((pair[0].length - 20.0).abs() < 1e-4);
    assert!((pair[1].length - job.variation * 2.0 * 0.5 * 10.0).abs() < 1e-4);
  }
}

#[test] fn tile_outlines_when_enabled() {
  let mut r = renderer(40);
  r.regenerate(&bag(json!({ "tiles": 10, "showTiles": true, "showBottomAreas": false, "showTopAreas": false })));
  r.finish();
  let outlines = r.backend().calls.iter()
    .filter(|c| matches!(c, Call::OutlineTile(_)))
    .count();
  assert_eq!(outlines, 100);
  assert!(r.backend().visible_strokes().is_empty());
}

#[test] fn brushes_and_fields_follow_params() {
  let mut r = renderer(64);
  r.apply(&bag(json!({ "brushWeight": 7.5, "brushVibration": 0.5 })));
  let coarse = r.backend().brushes[BRUSH_COARSE];
  let fine = r.backend().brushes[BRUSH_FINE];
  assert_eq!(coarse.weight, 7.5);
  assert_eq!(fine.vibration, 0.5);
  assert_eq!(coarse.spacing, 0.1);
  assert_eq!(fine.spacing, 0.01);

  for name in [BOTTOM_FIELD, TOP_FIELD] {
    let field = r.backend().field(name).expect("field registered");
    for i in 0..20 {
      let angle = field(crate::geometry::PixelPoint::new(i as f32 * 3.0, i as f32 * 2.0));
      assert!((-90.0..=90.0).contains(&angle));
    }
  }
}

#[test] fn tick_before_generate_is_a_no_op() {
  let mut r = renderer(64);
  assert!(!r.tick());
  assert_eq!(r.finish(), 0);
  r.refresh(&bag(json!({ "showTopAreas": false })));
  assert_eq!(r.scheduler().state(), State::Idle);
}

#[test] fn handoff_is_applied_once() -> Result<()> {
  let mut store = MemoryStore::default();
  store.0.insert(SELECTION_KEY.to_string(), json!({ "tiles": 42, "brushWeight": 2.0 }).to_string());
  let mut r = renderer(64);
  assert!(r.load_handoff(&mut store));
  assert_eq!(r.params().tiles, 42);
  assert_eq!(r.params().brush_weight, 2.0);
  assert!(!r.load_handoff(&mut store));
  Ok(())
}

#[traced_test]
#[test] fn corrupt_handoff_keeps_defaults() {
  let mut store = MemoryStore::default();
  store.0.insert(SELECTION_KEY.to_string(), "tiles=42".to_string());
  let mut r = renderer(64);
  assert!(!r.load_handoff(&mut store));
  assert_eq!(r.params(), &Params::default());
  assert!(logs_contain("ignoring corrupt hand-off"));
}
