use crate::level::target_range;
use log::warn;
use rand::Rng;

pub const OPERATIONS: [Operation; 4] = [
    Operation::Add,
    Operation::Subtract,
    Operation::Multiply,
    Operation::Divide,
];

/// Draws per problem before the generator gives up and emits the fallback.
pub const MAX_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    /// Exact integer result, or `None` when the result would be negative,
    /// the divisor is zero, or the quotient has a remainder.
    pub fn apply(&self, a: u32, b: u32) -> Option<u32> {
        match self {
            Operation::Add => a.checked_add(b),
            Operation::Subtract => a.checked_sub(b),
            Operation::Multiply => a.checked_mul(b),
            Operation::Divide => {
                if b == 0 || a % b != 0 {
                    None
                } else {
                    Some(a / b)
                }
            }
        }
    }

    fn fallback(&self) -> Problem {
        match self {
            Operation::Add => Problem::new(1, 1, Operation::Add),
            Operation::Subtract => Problem::new(2, 1, Operation::Subtract),
            Operation::Multiply => Problem::new(1, 1, Operation::Multiply),
            Operation::Divide => Problem::new(2, 2, Operation::Divide),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Problem {
    pub num1: u32,
    pub num2: u32,
    pub operation: Operation,
    pub answer: u32,
}

impl Problem {
    fn new(num1: u32, num2: u32, operation: Operation) -> Self {
        let answer = operation.apply(num1, num2).unwrap_or(0);
        Self {
            num1,
            num2,
            operation,
            answer,
        }
    }

    pub fn display(&self) -> String {
        format!(
            "{} {} {} = ?",
            self.num1,
            self.operation.symbol(),
            self.num2
        )
    }

    pub fn is_consistent(&self) -> bool {
        self.operation.apply(self.num1, self.num2) == Some(self.answer)
    }
}

fn random_int<R: Rng + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> Option<u32> {
    if lo > hi {
        return None;
    }
    Some(rng.gen_range(lo..=hi))
}

// One unfiltered draw as (num1, num2, answer). `None` means an empty range
// came up and the draw has to be repeated.
fn draw<R: Rng + ?Sized>(op: Operation, target: u32, rng: &mut R) -> Option<(u32, u32, u32)> {
    match op {
        Operation::Add => {
            let num1 = random_int(rng, 0, target / 2)?;
            let num2 = random_int(rng, 0, target - num1)?;
            Some((num1, num2, num1 + num2))
        }
        Operation::Subtract => {
            let answer = random_int(rng, 0, target)?;
            let num2 = random_int(rng, 0, answer)?;
            Some((answer.checked_add(num2)?, num2, answer))
        }
        Operation::Multiply => {
            let (num1, num2) = if target <= 10 {
                (random_int(rng, 1, 5)?, random_int(rng, 1, 5)?)
            } else {
                let max_factor = (target as f64).sqrt().floor() as u32;
                let num1 = random_int(rng, 1, max_factor)?;
                (num1, random_int(rng, 1, target / num1)?)
            };
            Some((num1, num2, num1 * num2))
        }
        Operation::Divide => {
            let num2 = random_int(rng, 2, 9)?;
            // Divisors above the target still get `n ÷ n = 1`.
            let answer = random_int(rng, 1, (target / num2).max(1))?;
            Some((answer * num2, num2, answer))
        }
    }
}

pub fn random_operation<R: Rng + ?Sized>(rng: &mut R) -> Operation {
    OPERATIONS[rng.gen_range(0..OPERATIONS.len())]
}

pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Problem {
    let op = random_operation(rng);
    generate_for(op, level, rng)
}

pub fn generate_for<R: Rng + ?Sized>(op: Operation, level: u32, rng: &mut R) -> Problem {
    let target = target_range(level.max(1));

    for _ in 0..MAX_ATTEMPTS {
        let Some((num1, num2, answer)) = draw(op, target, rng) else {
            continue;
        };
        if answer > target || num1 == 0 || num2 == 0 {
            continue;
        }
        return Problem {
            num1,
            num2,
            operation: op,
            answer,
        };
    }

    warn!(
        "no valid {:?} problem for level {} after {} draws, using fallback",
        op, level, MAX_ATTEMPTS
    );
    op.fallback()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn apply_rejects_inexact_division() {
        assert_eq!(Operation::Divide.apply(7, 2), None);
        assert_eq!(Operation::Divide.apply(8, 0), None);
        assert_eq!(Operation::Divide.apply(8, 2), Some(4));
    }

    #[test]
    fn apply_rejects_negative_difference() {
        assert_eq!(Operation::Subtract.apply(3, 5), None);
        assert_eq!(Operation::Subtract.apply(5, 3), Some(2));
    }

    #[test]
    fn display_uses_operator_symbol() {
        let p = Problem::new(12, 3, Operation::Divide);
        assert_eq!(p.display(), "12 ÷ 3 = ?");
        assert_eq!(p.answer, 4);
    }

    #[test]
    fn fallbacks_are_valid_at_level_one() {
        for op in OPERATIONS {
            let p = op.fallback();
            assert!(p.is_consistent(), "{:?}", p);
            assert!(p.num1 > 0 && p.num2 > 0);
            assert!(p.answer > 0 && p.answer <= target_range(1));
        }
    }

    #[test]
    fn every_operation_stays_in_range_at_level_one() {
        let mut rng = StdRng::seed_from_u64(7);
        for op in OPERATIONS {
            for _ in 0..500 {
                let p = generate_for(op, 1, &mut rng);
                assert_eq!(p.operation, op);
                assert!(p.is_consistent(), "{:?}", p);
                assert!(p.answer >= 1 && p.answer <= 5, "{:?}", p);
            }
        }
    }

    #[test]
    fn divide_never_leaves_a_remainder() {
        let mut rng = StdRng::seed_from_u64(11);
        for level in 1..=30 {
            let p = generate_for(Operation::Divide, level, &mut rng);
            assert!((2..=9).contains(&p.num2));
            assert_eq!(p.num1, p.answer * p.num2);
        }
    }

    #[test]
    fn level_one_division_uses_every_divisor() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut divisors = std::collections::HashSet::new();
        for _ in 0..5_000 {
            let p = generate_for(Operation::Divide, 1, &mut rng);
            if p.num2 > 5 {
                assert_eq!(p.answer, 1, "{:?}", p);
            }
            divisors.insert(p.num2);
        }
        let expected: std::collections::HashSet<u32> = (2..=9).collect();
        assert_eq!(divisors, expected);
    }

    #[test]
    fn small_range_multiply_uses_factors_up_to_five() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = generate_for(Operation::Multiply, 2, &mut rng);
            assert!(p.num1 <= 5 && p.num2 <= 5);
            assert!(p.answer <= 10);
        }
    }

    #[test]
    fn level_zero_is_treated_as_level_one() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let p = generate(0, &mut rng);
            assert!(p.answer >= 1 && p.answer <= 5);
        }
    }

    #[test]
    fn all_operations_show_up() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(generate(10, &mut rng).operation);
        }
        assert_eq!(seen.len(), 4);
    }
}
