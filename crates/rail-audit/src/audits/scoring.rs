//! Bottom-up completion scoring over an audit tree.
//!
//! A score counts the selected, non-informational answers below a node.
//! `score` always recomputes from the answer leaves; `annotate_scores`
//! computes once and caches the value on each node of the in-memory tree so
//! the projection can expose per-node scores without walking the tree twice.

use super::domain::{Answer, Audit, Platform, Section, SubSection};

/// Contribution of a single answer: 1 when selected and not informational.
pub fn answer_score(answer: &Answer) -> u32 {
    if answer.selected.unwrap_or(false) && !answer.is_informational() {
        1
    } else {
        0
    }
}

/// Score aggregation over the nodes of an audit tree.
pub trait Scored {
    /// Recompute the score from the answer leaves, ignoring any cached value.
    fn score(&self) -> u32;

    /// Compute the score once per node, caching it (and all descendant
    /// scores) on the tree.
    fn annotate_scores(&mut self) -> u32;
}

impl Scored for SubSection {
    fn score(&self) -> u32 {
        self.answers.iter().map(answer_score).sum()
    }

    fn annotate_scores(&mut self) -> u32 {
        if let Some(score) = self.score {
            return score;
        }
        let score = Scored::score(self);
        self.score = Some(score);
        score
    }
}

impl Scored for Platform {
    fn score(&self) -> u32 {
        self.sub_sections.iter().map(Scored::score).sum()
    }

    fn annotate_scores(&mut self) -> u32 {
        if let Some(score) = self.score {
            return score;
        }
        let score = annotate_all(&mut self.sub_sections);
        self.score = Some(score);
        score
    }
}

impl Scored for Section {
    fn score(&self) -> u32 {
        let direct: u32 = self.sub_sections.iter().map(Scored::score).sum();
        let partitioned: u32 = self.platforms.iter().map(Scored::score).sum();
        direct + partitioned
    }

    fn annotate_scores(&mut self) -> u32 {
        if let Some(score) = self.score {
            return score;
        }
        // Both branches count; nothing guarantees a section only uses one.
        let score = annotate_all(&mut self.sub_sections) + annotate_all(&mut self.platforms);
        self.score = Some(score);
        score
    }
}

fn annotate_all<T: Scored>(nodes: &mut [T]) -> u32 {
    nodes.iter_mut().map(Scored::annotate_scores).sum()
}

impl Audit {
    /// Annotate every section of this audit, returning the per-section scores
    /// in section order.
    pub fn annotate_scores(&mut self) -> Vec<u32> {
        self.sections
            .iter_mut()
            .map(Scored::annotate_scores)
            .collect()
    }
}
