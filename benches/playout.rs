use golem_caravan::{GameConfig, GameState, PriorityPolicy, Session, DEFAULT_MAX_TURNS};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(20)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        creating_new_game,
        playing_two_seat_match,
        playing_five_seat_match,
        cloning_game_state,
}

fn creating_new_game(c: &mut criterion::Criterion) {
    c.bench_function("create a 4-seat game", |b| {
        b.iter(|| GameState::new(4, 42))
    });
}

fn playing_two_seat_match(c: &mut criterion::Criterion) {
    c.bench_function("play a 2-seat AI match", |b| {
        b.iter(|| {
            let mut session = Session::start(GameConfig::new(2), 42).unwrap();
            session.run_ai_match(&PriorityPolicy, DEFAULT_MAX_TURNS)
        })
    });
}

fn playing_five_seat_match(c: &mut criterion::Criterion) {
    c.bench_function("play a 5-seat AI match", |b| {
        b.iter(|| {
            let mut session = Session::start(GameConfig::new(5), 7).unwrap();
            session.run_ai_match(&PriorityPolicy, DEFAULT_MAX_TURNS)
        })
    });
}

fn cloning_game_state(c: &mut criterion::Criterion) {
    let mut session = Session::start(GameConfig::new(3), 11).unwrap();
    session.run_ai_match(&PriorityPolicy, 30);
    let state = session.into_state();
    c.bench_function("clone a mid-game state", |b| b.iter(|| state.clone()));
}
