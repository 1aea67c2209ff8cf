//! Quiz navigation state.
//!
//! A [`QuizSession`] owns everything a front end needs to walk through the
//! bank: the active category filter, the filtered view and the current
//! position. All changes go through its methods.

use rand::Rng;

use crate::model::{CategoryFilter, Question, QuestionBank};

#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    filter: CategoryFilter,
    /// Indices into `bank.questions` matching `filter`.
    view: Vec<usize>,
    position: usize,
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        let mut session = Self {
            bank,
            filter: CategoryFilter::All,
            view: Vec::new(),
            position: 0,
        };
        session.apply_filter();
        session
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Switch category and go back to the first question.
    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.position = 0;
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.view = self
            .bank
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| self.filter.matches(q))
            .map(|(i, _)| i)
            .collect();
        self.position = self.position.min(self.view.len().saturating_sub(1));
    }

    /// The question at the current position, if the view is not empty.
    pub fn current(&self) -> Option<&Question> {
        self.view
            .get(self.position)
            .map(|&i| &self.bank.questions[i])
    }

    /// Number of questions in the current view.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// `(1-based position, total)`; `(0, 0)` for an empty view.
    pub fn progress(&self) -> (usize, usize) {
        if self.view.is_empty() {
            (0, 0)
        } else {
            (self.position + 1, self.view.len())
        }
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.view.len()
    }

    /// Move forward. Returns `false` at the end of the view.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Move back. Returns `false` at the start of the view.
    pub fn go_back(&mut self) -> bool {
        if self.has_previous() {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a uniformly chosen question other than the current one.
    /// Returns `false` when the view holds fewer than two questions.
    pub fn random<R: Rng>(&mut self, rng: &mut R) -> bool {
        let len = self.view.len();
        if len <= 1 {
            return false;
        }
        // Draw among the other len - 1 positions, skipping the current one.
        let pick = rng.random_range(0..len - 1);
        self.position = if pick >= self.position { pick + 1 } else { pick };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> QuestionBank {
        let make = |id: &str, cat: &str| Question {
            id: id.into(),
            category: cat.into(),
            question: format!("question {id}"),
            expected_answer: "réponse".into(),
            key_points: vec![],
        };
        QuestionBank::new(vec![
            make("1", "interieur"),
            make("2", "exterieur"),
            make("3", "interieur"),
            make("4", "secours"),
        ])
    }

    #[test]
    fn starts_at_first_question() {
        let session = QuizSession::new(bank());
        assert_eq!(session.current().unwrap().id, "1");
        assert_eq!(session.progress(), (1, 4));
        assert!(!session.has_previous());
        assert!(session.has_next());
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut session = QuizSession::new(bank());
        assert!(!session.go_back());
        assert!(session.advance());
        assert!(session.advance());
        assert!(session.advance());
        assert!(!session.advance());
        assert_eq!(session.current().unwrap().id, "4");
        assert!(session.go_back());
        assert_eq!(session.current().unwrap().id, "3");
    }

    #[test]
    fn category_filter_resets_position() {
        let mut session = QuizSession::new(bank());
        session.advance();
        session.advance();
        session.set_category(CategoryFilter::Only("interieur".into()));
        assert_eq!(session.len(), 2);
        assert_eq!(session.current().unwrap().id, "1");
        session.advance();
        assert_eq!(session.current().unwrap().id, "3");
        assert_eq!(session.progress(), (2, 2));
    }

    #[test]
    fn unknown_category_is_empty() {
        let mut session = QuizSession::new(bank());
        session.set_category(CategoryFilter::Only("moto".into()));
        assert!(session.is_empty());
        assert!(session.current().is_none());
        assert_eq!(session.progress(), (0, 0));
        assert!(!session.advance());
        assert!(!session.random(&mut StdRng::seed_from_u64(1)));
    }

    #[test]
    fn empty_bank_is_valid() {
        let session = QuizSession::new(QuestionBank::default());
        assert!(session.current().is_none());
    }

    #[test]
    fn random_never_repeats_current() {
        let mut session = QuizSession::new(bank());
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let before = session.current().unwrap().id.clone();
            assert!(session.random(&mut rng));
            assert_ne!(session.current().unwrap().id, before);
        }
    }

    #[test]
    fn random_single_question_is_noop() {
        let mut session = QuizSession::new(bank());
        session.set_category(CategoryFilter::Only("secours".into()));
        assert!(!session.random(&mut StdRng::seed_from_u64(7)));
        assert_eq!(session.current().unwrap().id, "4");
    }
}
