//! Property-based tests for the problem generator and level rules.

use drill_core::level::{max_mistakes, target_range};
use drill_core::problem::{generate, generate_for, OPERATIONS};
use drill_core::Operation;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    // Answers stay within (0, 5 * level] and operands are positive
    #[test]
    fn problems_stay_in_range(level in 1u32..200, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..200 {
            let p = generate(level, &mut rng);
            prop_assert!(p.num1 > 0 && p.num2 > 0, "{:?}", p);
            prop_assert!(p.answer > 0 && p.answer <= target_range(level), "{:?} level={}", p, level);
        }
    }

    // The stored answer is the exact result of the operation
    #[test]
    fn problems_are_arithmetically_exact(level in 1u32..200, op_idx in 0usize..4, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let op = OPERATIONS[op_idx];
        for _ in 0..50 {
            let p = generate_for(op, level, &mut rng);
            prop_assert!(p.is_consistent(), "{:?}", p);
            if op == Operation::Divide {
                prop_assert_eq!(p.num1, p.answer * p.num2);
            }
        }
    }

    // Mistake allowance never increases with level and never drops below 2
    #[test]
    fn mistake_allowance_is_monotone(level in 1u32..10_000) {
        prop_assert!(max_mistakes(level + 1) <= max_mistakes(level));
        prop_assert!(max_mistakes(level) >= 2);
    }
}

#[test]
fn ten_thousand_problems_per_level_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(2024);
    for level in [1, 2, 3, 10, 57] {
        for _ in 0..10_000 {
            let p = generate(level, &mut rng);
            assert!(p.num1 > 0 && p.num2 > 0);
            assert!(p.answer > 0 && p.answer <= 5 * level);
            assert!(p.is_consistent());
        }
    }
}

#[test]
fn known_mistake_allowances() {
    assert_eq!(max_mistakes(1), 5);
    assert_eq!(max_mistakes(4), 4);
    assert_eq!(max_mistakes(13), 2);
    assert_eq!(max_mistakes(100), 2);
}
