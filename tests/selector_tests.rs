//! Weighted selection integration tests.

use skill_ai::engine::index_at;
use skill_ai::{
    adjust_target_weights, select_weighted, select_weighted_index, AiRng, Battler, BattlerId,
    Battlefield, ConditionContext, Roster, Side, Team,
};

#[test]
fn test_single_positive_weight_always_wins() {
    let mut rng = AiRng::new(12345);
    let pairs = [("a", 0.0), ("b", 0.0), ("c", 5.0)];
    for _ in 0..1000 {
        assert_eq!(select_weighted(&pairs, &mut rng), Some(&"c"));
    }
}

#[test]
fn test_uniform_weights_are_roughly_uniform() {
    let mut rng = AiRng::new(2024);
    let weights = [1.0, 1.0, 1.0, 1.0];
    let trials = 40_000;
    let mut counts = [0usize; 4];

    for _ in 0..trials {
        let index = select_weighted_index(&weights, &mut rng).unwrap();
        counts[index] += 1;
    }

    for count in counts {
        let share = count as f64 / trials as f64;
        assert!((share - 0.25).abs() < 0.02, "share {share} too far from 25%");
    }
}

#[test]
fn test_proportional_weights() {
    let mut rng = AiRng::new(77);
    let weights = [1.0, 3.0];
    let trials = 40_000;
    let hits = (0..trials)
        .filter(|_| select_weighted_index(&weights, &mut rng) == Some(1))
        .count();

    let share = hits as f64 / trials as f64;
    assert!((share - 0.75).abs() < 0.02, "share {share} too far from 75%");
}

#[test]
fn test_zero_total_yields_none() {
    let mut rng = AiRng::new(1);
    assert_eq!(select_weighted_index(&[], &mut rng), None);
    assert_eq!(select_weighted_index(&[0.0, 0.0, 0.0], &mut rng), None);
    assert_eq!(select_weighted_index(&[-1.0, f64::NAN], &mut rng), None);
}

#[test]
fn test_boundary_draw_picks_exhausting_candidate() {
    // Walk subtracts 2 then 3; remainder reaches exactly zero at index 1
    assert_eq!(index_at(&[2.0, 3.0, 5.0], 5.0), Some(1));
    assert_eq!(index_at(&[2.0, 3.0, 5.0], 5.0001), Some(2));
    assert_eq!(index_at(&[0.0, 4.0], 0.0), Some(0));
}

#[test]
fn test_same_seed_same_choices() {
    let weights = [0.5, 2.0, 1.5, 4.0];
    let mut a = AiRng::new(31337);
    let mut b = AiRng::new(31337);

    let left: Vec<_> = (0..200).map(|_| select_weighted_index(&weights, &mut a)).collect();
    let right: Vec<_> = (0..200).map(|_| select_weighted_index(&weights, &mut b)).collect();
    assert_eq!(left, right);
}

#[test]
fn test_resumed_rng_continues_sequence() {
    let weights = [1.0, 2.0, 3.0];
    let mut rng = AiRng::new(5);
    for _ in 0..10 {
        select_weighted_index(&weights, &mut rng);
    }

    let mut resumed = AiRng::from_state(&rng.state());
    let expected: Vec<_> = (0..20).map(|_| select_weighted_index(&weights, &mut rng)).collect();
    let actual: Vec<_> = (0..20).map(|_| select_weighted_index(&weights, &mut resumed)).collect();
    assert_eq!(expected, actual);
}

#[test]
fn test_exclusive_rule_restricts_selection() {
    let field = Battlefield::new()
        .with(Battler::new(BattlerId::new(100), Team::Troop))
        .with(Battler::new(BattlerId::new(1), Team::Party).with_hp(9, 10))
        .with(Battler::new(BattlerId::new(2), Team::Party).with_hp(1, 10))
        .with(Battler::new(BattlerId::new(3), Team::Party).with_hp(7, 10));
    let user = field.get(BattlerId::new(100)).unwrap();
    let ctx = ConditionContext::new(user, &field);
    let candidates = field.group(user, Side::Hostile, Roster::Living);

    let weighted = adjust_target_weights(&candidates, &[], &["target only .hp lowest"], &ctx);
    let mut rng = AiRng::new(8);
    for _ in 0..500 {
        let target = select_weighted(&weighted, &mut rng).unwrap();
        assert_eq!(target.id, BattlerId::new(2));
    }
}
