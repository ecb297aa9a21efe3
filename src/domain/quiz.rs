//! Multiple-choice quiz and scoring.

use crate::domain::error::AcademyError;
use crate::domain::stepper::Stepper;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; OPTIONS_PER_QUESTION],
    pub correct: usize,
    pub explanation: &'static str,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        prompt: "According to Alan Farley, what is the maximum percentage of your account you \
            should risk on a single trade?",
        options: ["1%", "2%", "5%", "10%"],
        correct: 1,
        explanation: "The 2% rule is fundamental to capital preservation. Risking more increases \
            the chance of significant drawdowns.",
    },
    Question {
        prompt: "In a Head and Shoulders pattern, what does the pattern signal?",
        options: [
            "Bullish continuation",
            "Bearish reversal",
            "Neutral consolidation",
            "Bullish reversal",
        ],
        correct: 1,
        explanation: "Head and Shoulders is a bearish reversal pattern that forms after an \
            uptrend, signaling a potential trend change.",
    },
    Question {
        prompt: "What is the recommended reward-to-risk ratio for swing trades?",
        options: ["1:1", "2:1 or better", "3:1 or better", "Any positive ratio"],
        correct: 1,
        explanation: "Farley recommends targeting at least 2:1 reward-to-risk. This allows you \
            to be profitable even with a 40% win rate.",
    },
    Question {
        prompt: "When using multiple timeframe analysis, which timeframe should you check first?",
        options: ["1-hour chart", "4-hour chart", "Daily chart", "Weekly chart"],
        correct: 3,
        explanation: "Always start with the weekly chart to identify the primary trend and major \
            support/resistance levels.",
    },
    Question {
        prompt: "What is the best setup for a swing trade according to multiple timeframe analysis?",
        options: [
            "All timeframes showing the same trend",
            "Daily and weekly in conflict",
            "Only the daily chart matters",
            "Short-term counter to long-term trend",
        ],
        correct: 0,
        explanation: "The highest probability setups occur when all timeframes align in the same \
            direction - these are \"power zones\".",
    },
    Question {
        prompt: "Where should you place your stop loss on a pullback entry in an uptrend?",
        options: [
            "At the entry price",
            "Just below support level",
            "10% below entry",
            "At the recent high",
        ],
        correct: 1,
        explanation: "Place stops just below the support level that you used for entry. If \
            support breaks, your trade thesis is invalid.",
    },
    Question {
        prompt: "What is a Bull Flag pattern?",
        options: [
            "A reversal pattern",
            "A topping pattern",
            "A continuation pattern during uptrend",
            "A bottoming pattern",
        ],
        correct: 2,
        explanation: "Bull Flag is a continuation pattern - a brief consolidation during an \
            uptrend before the trend resumes higher.",
    },
    Question {
        prompt: "When should you move your stop loss to breakeven?",
        options: [
            "Immediately after entry",
            "When profit equals your initial risk (1R)",
            "Never move stops",
            "Only at the profit target",
        ],
        correct: 1,
        explanation: "Move your stop to breakeven once the trade has moved in your favor by 1R \
            (one times your initial risk).",
    },
    Question {
        prompt: "What does Farley mean by \"3D charting\"?",
        options: [
            "Three-dimensional charts",
            "Analyzing price, volume, and time together",
            "Using three indicators",
            "Three different stocks",
        ],
        correct: 1,
        explanation: "3D charting means analyzing price action, volume patterns, and time cycles \
            together for complete market understanding.",
    },
    Question {
        prompt: "What is the primary benefit of scaling out of winning positions?",
        options: [
            "It guarantees profits",
            "It locks in partial gains while keeping exposure to larger moves",
            "It avoids all risk",
            "It increases position size",
        ],
        correct: 1,
        explanation: "Scaling out locks in partial profits while leaving some position to capture \
            larger moves if the trend continues.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Excellent,
    Good,
    KeepLearning,
}

impl FeedbackTier {
    /// Lower bounds are inclusive: 80 is excellent, 60 is good.
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 80 {
            FeedbackTier::Excellent
        } else if percent >= 60 {
            FeedbackTier::Good
        } else {
            FeedbackTier::KeepLearning
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Excellent => {
                "Excellent! You have a strong understanding of Alan Farley's swing trading principles."
            }
            FeedbackTier::Good => {
                "Good job! Review the modules to strengthen your understanding of key concepts."
            }
            FeedbackTier::KeepLearning => {
                "Keep learning! Go back through the modules to better understand the core principles."
            }
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackTier::Excellent => "tier-excellent",
            FeedbackTier::Good => "tier-good",
            FeedbackTier::KeepLearning => "tier-low",
        }
    }
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub selected: usize,
    pub correct: usize,
    pub is_correct: bool,
}

/// `round(100 * score / total)`; zero questions scores 0.
pub fn score_percent(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (score as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub struct QuizSession {
    stepper: Stepper,
    selected: Option<usize>,
    submitted: bool,
    score: usize,
    answers: Vec<bool>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            stepper: Stepper::new(QUESTIONS.len()),
            selected: None,
            submitted: false,
            score: 0,
            answers: Vec::with_capacity(QUESTIONS.len()),
        }
    }

    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.stepper.index()]
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.stepper.len()
    }

    /// Questions answered so far, counting the current one once submitted.
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    /// Picks an option. Ignored once the current answer is submitted.
    pub fn select(&mut self, option: usize) -> Result<bool, AcademyError> {
        if option >= OPTIONS_PER_QUESTION {
            return Err(AcademyError::invalid_input(
                "option",
                format!("choose 1-{OPTIONS_PER_QUESTION}"),
            ));
        }
        if self.submitted {
            return Ok(false);
        }
        self.selected = Some(option);
        Ok(true)
    }

    /// Locks in the selected option. `None` without a selection or when
    /// already submitted.
    pub fn submit(&mut self) -> Option<AnswerOutcome> {
        if self.submitted {
            return None;
        }
        let selected = self.selected?;
        let correct = self.current().correct;
        let is_correct = selected == correct;
        self.submitted = true;
        self.answers.push(is_correct);
        if is_correct {
            self.score += 1;
        }
        Some(AnswerOutcome {
            selected,
            correct,
            is_correct,
        })
    }

    /// Outcome of the current question once submitted.
    pub fn outcome(&self) -> Option<AnswerOutcome> {
        if !self.submitted {
            return None;
        }
        let selected = self.selected?;
        let correct = self.current().correct;
        Some(AnswerOutcome {
            selected,
            correct,
            is_correct: selected == correct,
        })
    }

    /// Moves to the next question after submission. Returns false on the
    /// last question or before submitting.
    pub fn next(&mut self) -> bool {
        if !self.submitted || self.stepper.is_last() {
            return false;
        }
        self.stepper.next();
        self.selected = None;
        self.submitted = false;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.submitted && self.stepper.is_last()
    }

    pub fn score_percent(&self) -> u32 {
        score_percent(self.score, self.total())
    }

    pub fn tier(&self) -> FeedbackTier {
        FeedbackTier::from_percent(self.score_percent())
    }

    /// Every question with whether it was answered correctly.
    pub fn breakdown(&self) -> Vec<(&'static Question, bool)> {
        QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, q)| (q, self.answers.get(i).copied().unwrap_or(false)))
            .collect()
    }
}
