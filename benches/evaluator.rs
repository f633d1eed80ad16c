use rand::rngs::SmallRng;
use rand::SeedableRng;

use nlhe_blueprint::cards::deck::Deck;
use nlhe_blueprint::cards::hand::Hand;
use nlhe_blueprint::cards::strength::Strength;
use nlhe_blueprint::game::state::GameState;
use nlhe_blueprint::mccfr::regret::RegretEntry;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_a_seven_card_hand,
        dealing_a_fresh_table,
        matching_a_current_strategy,
}

fn evaluating_a_seven_card_hand(c: &mut criterion::Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let cards = Deck::new(&mut rng).draw_n(7);
    let hand = Hand::from(cards);
    c.bench_function("evaluate a 7-card hand", |b| {
        b.iter(|| Strength::of(&hand))
    });
}

fn dealing_a_fresh_table(c: &mut criterion::Criterion) {
    let mut rng = SmallRng::seed_from_u64(2);
    c.bench_function("deal a fresh three-handed table", |b| {
        b.iter(|| GameState::deal(&mut rng))
    });
}

fn matching_a_current_strategy(c: &mut criterion::Criterion) {
    let entry = RegretEntry::default();
    let legal: Vec<usize> = (0..10).collect();
    c.bench_function("regret-match a current strategy", |b| {
        b.iter(|| entry.current_strategy(&legal))
    });
}
