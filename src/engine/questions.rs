//! Grade-leveled question generation
//!
//! One arithmetic domain per grade, 1st through 12th. Pure: every draw comes
//! from the caller's RNG, so a seeded session always asks the same questions.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A four-option multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub text: String,
    pub options: [String; 4],
    pub correct_index: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }

    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }
}

/// Build one question for the given grade level.
///
/// Levels outside 1-12 fall back to the grade-1 domain rather than failing;
/// a corrupt save should still get playable questions.
pub fn generate(level: u8, rng: &mut impl Rng) -> QuizQuestion {
    let (text, answer) = match level {
        2 => {
            let a = rng.random_range(10..=50);
            let b = rng.random_range(1..=a);
            (format!("{a} - {b} = ?"), a - b)
        }
        3 => {
            let a = rng.random_range(2..=9);
            let b = rng.random_range(2..=9);
            (format!("{a} × {b} = ?"), a * b)
        }
        4 => {
            let b = rng.random_range(2..=9);
            let q = rng.random_range(2..=9);
            (format!("{} ÷ {b} = ?", b * q), q)
        }
        5 => {
            let a = rng.random_range(10..=50);
            let b = rng.random_range(2..=5);
            let c = rng.random_range(1..=20);
            (format!("({a} × {b}) + {c} = ?"), a * b + c)
        }
        6 => {
            let a: i32 = rng.random_range(2..=5);
            let b: u32 = rng.random_range(2..=3);
            let c = rng.random_range(1..=10);
            (format!("{a}^{b} + {c} = ?"), a.pow(b) + c)
        }
        7 => {
            let a = rng.random_range(1..=20);
            let b = rng.random_range(25..=50);
            (format!("{a} - {b} = ?"), a - b)
        }
        8 => {
            let x = rng.random_range(2..=12);
            let a = rng.random_range(2..=5);
            let b = rng.random_range(1..=20);
            (format!("Solve for x: {a}x + {b} = {}", a * x + b), x)
        }
        9 => {
            let m = rng.random_range(2..=5);
            let x = rng.random_range(2..=5);
            let b = rng.random_range(1..=10);
            (format!("If y = {m}x + {b}, what is y when x = {x}?"), m * x + b)
        }
        10 => {
            let s = rng.random_range(5..=15);
            (format!("Area of a square with side {s}?"), s * s)
        }
        11 => {
            let x = rng.random_range(2..=12);
            (format!("If x² = {} and x > 0, what is x?", x * x), x)
        }
        12 => {
            let e: u32 = rng.random_range(3..=6);
            (format!("log₂({}) = ?", 2i32.pow(e)), e as i32)
        }
        // Grade 1 and anything out of range: simple addition
        _ => {
            let a = rng.random_range(1..=10);
            let b = rng.random_range(1..=10);
            (format!("{a} + {b} = ?"), a + b)
        }
    };
    build_options(text, answer, rng)
}

/// Surround the answer with three distinct near-miss distractors, shuffle,
/// and record where the answer landed.
fn build_options(text: String, answer: i32, rng: &mut impl Rng) -> QuizQuestion {
    let mut values = vec![answer];
    while values.len() < 4 {
        let candidate = answer + rng.random_range(-5..=5);
        if !values.contains(&candidate) {
            values.push(candidate);
        }
    }
    values.shuffle(rng);

    let correct_index = values.iter().position(|&v| v == answer).unwrap_or(0);
    QuizQuestion {
        text,
        options: std::array::from_fn(|i| values[i].to_string()),
        correct_index,
    }
}

/// Built-in warmup questions, used when the hosted question service fails
pub fn fallback_survey() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            text: "To earn your ninja headband, solve this: 5 Ninjas + 7 Ninjas = ?"
                .to_string(),
            options: ["10", "11", "12", "13"].map(String::from),
            correct_index: 2,
        },
        QuizQuestion {
            text: "Sensei has 20 throwing stars. He gives 4 to each of his students. How many students does he have?"
                .to_string(),
            options: ["4", "5", "6", "8"].map(String::from),
            correct_index: 1,
        },
        QuizQuestion {
            text: "A ninja jumps 3 meters high. How high would he reach in 3 jumps stacked together?"
                .to_string(),
            options: ["6 meters", "9 meters", "12 meters", "3 meters"].map(String::from),
            correct_index: 1,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn gen_one(level: u8, seed: u64) -> QuizQuestion {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate(level, &mut rng)
    }

    #[test]
    fn test_same_seed_same_question() {
        for level in 1..=12 {
            assert_eq!(gen_one(level, 42), gen_one(level, 42));
        }
    }

    #[test]
    fn test_subtraction_band_stays_non_negative() {
        for seed in 0..200 {
            let q = gen_one(2, seed);
            let answer: i32 = q.correct_answer().parse().unwrap();
            assert!(answer >= 0, "grade 2 never goes negative: {}", q.text);
        }
    }

    #[test]
    fn test_negative_band_goes_negative() {
        for seed in 0..200 {
            let q = gen_one(7, seed);
            let answer: i32 = q.correct_answer().parse().unwrap();
            assert!(answer < 0, "grade 7 is the negative-result band: {}", q.text);
        }
    }

    #[test]
    fn test_division_band_divides_evenly() {
        for seed in 0..200 {
            let q = gen_one(4, seed);
            let (lhs, _) = q.text.split_once(" = ").unwrap();
            let (dividend, divisor) = lhs.split_once(" ÷ ").unwrap();
            let dividend: i32 = dividend.parse().unwrap();
            let divisor: i32 = divisor.parse().unwrap();
            let answer: i32 = q.correct_answer().parse().unwrap();
            assert_eq!(answer * divisor, dividend, "{}", q.text);
        }
    }

    #[test]
    fn test_log_band_range() {
        for seed in 0..100 {
            let q = gen_one(12, seed);
            assert!(q.text.starts_with("log₂("));
            let answer: i32 = q.correct_answer().parse().unwrap();
            assert!((3..=6).contains(&answer));
        }
    }

    #[test]
    fn test_out_of_range_level_falls_back_to_addition() {
        for level in [0u8, 13, 99] {
            let q = gen_one(level, 7);
            assert!(q.text.contains(" + "), "fallback is the grade-1 domain");
            let answer: i32 = q.correct_answer().parse().unwrap();
            assert!((2..=20).contains(&answer));
        }
    }

    #[test]
    fn test_fallback_survey_shape() {
        let questions = fallback_survey();
        assert_eq!(questions.len(), 3);
        for q in &questions {
            assert!(q.correct_index < 4);
        }
        assert_eq!(questions[0].correct_answer(), "12");
        assert_eq!(questions[1].correct_answer(), "5");
        assert_eq!(questions[2].correct_answer(), "9 meters");
    }

    proptest! {
        /// Every band at every seed yields 4 distinct near-miss options with
        /// the answer present exactly once.
        #[test]
        fn test_options_well_formed(level in 0u8..=14, seed in any::<u64>()) {
            let q = gen_one(level, seed);
            prop_assert!(q.correct_index < 4);

            let values: Vec<i32> = q
                .options
                .iter()
                .map(|o| o.parse().expect("options are integers"))
                .collect();
            let answer = values[q.correct_index];

            for (i, v) in values.iter().enumerate() {
                prop_assert!((v - answer).abs() <= 5, "distractors stay close");
                for w in &values[i + 1..] {
                    prop_assert!(v != w, "options are distinct");
                }
            }
            prop_assert_eq!(values.iter().filter(|&&v| v == answer).count(), 1);
        }
    }
}
