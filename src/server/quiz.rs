use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

use super::error::CatalogError;

/// Drops every candidate whose id is in `previous` and picks one of the rest
/// uniformly at random.
pub fn pick_question<R>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Result<Question, CatalogError>
where
    R: Rng + ?Sized,
{
    let pool: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    pool.choose(rng).cloned().ok_or(CatalogError::EmptyPool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: format!("answer {id}"),
            category: 1,
            difficulty: 1,
        }
    }

    fn candidates(ids: &[i64]) -> Vec<Question> {
        ids.iter().copied().map(question).collect()
    }

    #[test]
    fn never_returns_previous_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let picked = pick_question(candidates(&[1, 2, 3, 4]), &[1, 3], &mut rng).unwrap();
            assert!(picked.id == 2 || picked.id == 4);
        }
    }

    #[test]
    fn only_remaining_question_is_picked() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = pick_question(candidates(&[5, 9]), &[5], &mut rng).unwrap();
        assert_eq!(picked, question(9));
    }

    #[test]
    fn exhausted_pool_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = pick_question(candidates(&[5, 9]), &[9, 5], &mut rng);
        assert!(matches!(result, Err(CatalogError::EmptyPool)));

        let result = pick_question(Vec::new(), &[], &mut rng);
        assert!(matches!(result, Err(CatalogError::EmptyPool)));
    }

    #[test]
    fn selection_covers_the_whole_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen: HashMap<i64, usize> = HashMap::new();
        for _ in 0..3000 {
            let picked = pick_question(candidates(&[1, 2, 3]), &[], &mut rng).unwrap();
            *seen.entry(picked.id).or_default() += 1;
        }
        assert_eq!(seen.len(), 3);
        // each of three should land near 1000
        assert!(seen.values().all(|&n| (800..1200).contains(&n)));
    }
}
