pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;

pub use checker::dictionary::Dictionary;
pub use checker::{Correction, Corrector, Verdict};
pub use config::Config;

/// Corrections for a batch of queries, in input order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub corrections: Vec<Correction>,
}

impl Report {
    pub fn ok_count(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Ok))
    }

    pub fn corrected_count(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Suggestions(_)))
    }

    pub fn unknown_count(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Unknown))
    }

    fn count(&self, pred: impl Fn(&Verdict) -> bool) -> usize {
        self.corrections.iter().filter(|c| pred(&c.verdict)).count()
    }
}
