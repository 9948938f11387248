use super::*;

fn queue(len: usize) -> Vec<usize> {
  (0..len).collect()
}

#[test] fn idle_until_installed() {
  let mut scheduler = Scheduler::<usize>::new();
  assert_eq!(scheduler.state(), State::Idle);
  assert_eq!(scheduler.tick(|_| panic!("nothing to run")), 0);
}

#[test] fn ten_thousand_jobs_drain_in_eighty_ticks() {
  let mut scheduler = Scheduler::new();
  scheduler.install(queue(10_000));
  assert_eq!(scheduler.jobs_per_frame(), 125);
  let mut seen = 0;
  assert_eq!(scheduler.drain(|_| seen += 1), 80);
  assert_eq!(seen, 10_000);
  assert_eq!(scheduler.state(), State::Drained);
}

#[test] fn tick_count_is_ceil_of_len_over_batch() {
  for len in [1, 2, 79, 80, 81, 159, 160, 161, 1000, 4321] {
    let mut scheduler = Scheduler::new();
    scheduler.install(queue(len));
    let per_frame = (len / 80).max(1);
    let mut ticks = 0;
    while scheduler.is_rendering() {
      scheduler.tick(|_| ());
      assert!(scheduler.cursor() <= len);
      ticks += 1;
    }
    assert_eq!(ticks, (len + per_frame - 1) / per_frame, "len {}", len);
    assert_eq!(scheduler.cursor(), len);
  }
}

#[test] fn jobs_run_in_queue_order() {
  let mut scheduler = Scheduler::new();
  scheduler.install(queue(500));
  let mut order = vec![];
  scheduler.drain(|&j| order.push(j));
  assert_eq!(order, queue(500));
}

#[test] fn install_mid_render_abandons_old_queue() {
  let mut scheduler = Scheduler::new();
  scheduler.install(queue(800)); // 10 per frame
  scheduler.tick(|_| ());
  scheduler.tick(|_| ());
  assert_eq!(scheduler.cursor(), 20);

  scheduler.install((1000..1160).collect::<Vec<_>>());
  assert_eq!(scheduler.cursor(), 0);
  assert_eq!(scheduler.len(), 160);
  assert_eq!(scheduler.state(), State::Rendering);

  let mut ran = vec![];
  scheduler.drain(|&j| ran.push(j));
  assert!(ran.iter().all(|&j| j >= 1000));
  assert_eq!(ran.len(), 160);
}

#[test] fn replay_runs_the_same_queue_again() {
  let mut scheduler = Scheduler::new();
  scheduler.install(queue(100));
  let mut first = vec![];
  scheduler.drain(|&j| first.push(j));
  let before = scheduler.queue().clone();

  scheduler.replay();
  assert_eq!(scheduler.state(), State::Rendering);
  let mut second = vec![];
  scheduler.drain(|&j| second.push(j));
  assert_eq!(first, second);
  assert!(Arc::ptr_eq(&before, scheduler.queue()));
}

#[test] fn empty_queue_is_drained_immediately() {
  let mut scheduler = Scheduler::<u8>::new();
  scheduler.install(vec![]);
  assert_eq!(scheduler.state(), State::Drained);
  assert_eq!(scheduler.tick(|_| ()), 0);
}
