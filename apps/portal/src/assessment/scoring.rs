use std::collections::BTreeMap;

use crate::models::Question;

/// Counts questions whose recorded answer is the correct option.
///
/// `answers` maps question index to selected option index. Unanswered
/// questions and answers for indices past the question list never count.
pub fn score_answers(questions: &[Question], answers: &BTreeMap<usize, usize>) -> u32 {
    questions
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            answers
                .get(index)
                .is_some_and(|&selected| question.is_answered_by(selected))
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(correct: &str) -> Question {
        Question {
            question: "?".to_string(),
            options: ["a", "b", "c", "d"].map(String::from),
            correct_answer: correct.to_string(),
        }
    }

    fn answers(pairs: &[(usize, usize)]) -> BTreeMap<usize, usize> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_only_matching_answers_score() {
        let questions = vec![q("1"), q("0")];
        assert_eq!(score_answers(&questions, &answers(&[(0, 1), (1, 1)])), 1);
    }

    #[test]
    fn test_all_correct() {
        let questions = vec![q("1"), q("0"), q("3")];
        let a = answers(&[(0, 1), (1, 0), (2, 3)]);
        assert_eq!(score_answers(&questions, &a), 3);
    }

    #[test]
    fn test_unanswered_never_match() {
        let questions = vec![q("0"), q("0")];
        assert_eq!(score_answers(&questions, &answers(&[])), 0);
        assert_eq!(score_answers(&questions, &answers(&[(1, 0)])), 1);
    }

    #[test]
    fn test_answers_beyond_questions_ignored() {
        let questions = vec![q("2")];
        assert_eq!(score_answers(&questions, &answers(&[(5, 2)])), 0);
    }

    #[test]
    fn test_question_with_unset_answer_never_matches() {
        let questions = vec![q("")];
        assert_eq!(score_answers(&questions, &answers(&[(0, 0)])), 0);
    }
}
