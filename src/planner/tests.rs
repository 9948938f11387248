use {
  super::*,
  crate::{
    field::{AngleRange, FieldMaps},
    noise_field::NoiseField,
    params::Params
  },
  rand::SeedableRng,
  rand_pcg::Pcg64,
};

fn maps(size: u32) -> FieldMaps {
  FieldMaps::generate(&NoiseField::new(42), &Params::default(), AngleRange::default(), size, 0.0)
}

#[test] fn job_count_is_tiles_squared() {
  let maps = maps(100);
  for tiles in [1, 7, 10, 33] {
    let grid = TileGrid::new(100, tiles);
    let plan = plan(grid, &maps, Neutral::with_length(1.5), &mut Pcg64::seed_from_u64(0));
    assert_eq!(plan.jobs.len(), (tiles * tiles) as usize);
  }
}

#[test] fn row_major_order() {
  let grid = TileGrid::new(60, 6);
  let plan = plan(grid, &maps(60), Neutral::with_length(1.5), &mut Pcg64::seed_from_u64(1));
  let tiles = plan.jobs.iter().map(|job| (job.tile.y, job.tile.x)).collect::<Vec<_>>();
  let mut sorted = tiles.clone();
  sorted.sort();
  assert_eq!(tiles, sorted);
  assert_eq!(plan.jobs[1].tile, TilePoint::new(1, 0));
}

#[test] fn starts_jitter_inside_their_tile() {
  let grid = TileGrid::new(90, 9);
  let plan = plan(grid, &maps(90), Neutral::with_length(1.5), &mut Pcg64::seed_from_u64(2));
  for job in plan.jobs.iter() {
    let b = grid.bounds(job.tile);
    assert!(job.start.x >= b.min.x && job.start.x < b.max.x);
    assert!(job.start.y >= b.min.y && job.start.y < b.max.y);
    assert!(VARIATION.contains(&job.variation));
  }
  // not all at the tile corner
  assert!(plan.jobs.iter().any(|job| job.start != grid.bounds(job.tile).min));
}

#[test] fn fields_sampled_at_floored_tile_origin() {
  let maps = maps(100);
  let grid = TileGrid::new(100, 7); // tile width 14.28..
  let plan = plan(grid, &maps, Neutral::with_length(1.5), &mut Pcg64::seed_from_u64(3));
  for job in plan.jobs.iter() {
    let x = (job.tile.x as f32 * grid.tile_width()).floor() as usize;
    let y = (job.tile.y as f32 * grid.tile_width()).floor() as usize;
    assert_eq!(Some(job.bottom_area), maps.bottom_area.get(x, y));
    assert_eq!(Some(job.top_angle), maps.top_angle.get(x, y));
    assert_eq!(Some(job.bottom_length), maps.bottom_length.get(x, y));
  }
}

#[test] fn same_seed_same_plan() {
  let maps = maps(50);
  let grid = TileGrid::new(50, 10);
  let a = plan(grid, &maps, Neutral::with_length(1.5), &mut Pcg64::seed_from_u64(9));
  let b = plan(grid, &maps, Neutral::with_length(1.5), &mut Pcg64::seed_from_u64(9));
  assert_eq!(a.jobs, b.jobs);
}

#[test] fn outside_maps_falls_back_to_neutral() {
  // maps cover 40px, grid claims 80px
  let maps = maps(40);
  let grid = TileGrid::new(80, 4);
  let neutral = Neutral::with_length(1.25);
  let plan = plan(grid, &maps, neutral, &mut Pcg64::seed_from_u64(4));
  let last = plan.jobs[plan.jobs.len() - 1];
  assert_eq!(last.tile, TilePoint::new(3, 3));
  assert_eq!(last.bottom_area, 0);
  assert_eq!(last.top_angle, 0.0);
  assert_eq!(last.top_length, 1.25);
}
