//! Chronological transcript of statements and user questions.

use crate::meeting::{RosterEntry, Statement, UserQuestion};
use crate::conversation::UNKNOWN_SPEAKER;
use chrono::{DateTime, Utc};

/// One line of the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptItem {
    Statement {
        speaker_name: String,
        speaker_title: String,
        content: String,
        at: DateTime<Utc>,
    },
    Question {
        asker_name: String,
        question: String,
        at: DateTime<Utc>,
    },
}

impl TranscriptItem {
    fn at(&self) -> DateTime<Utc> {
        match self {
            TranscriptItem::Statement { at, .. } | TranscriptItem::Question { at, .. } => *at,
        }
    }
}

/// Statements and questions merged by creation time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub items: Vec<TranscriptItem>,
}

impl Transcript {
    /// Merge in chronological order. Inputs may be in any order; `directors`
    /// should include inactive participants so every speaker is named.
    pub fn build(
        statements: &[Statement],
        questions: &[UserQuestion],
        directors: &[RosterEntry],
    ) -> Self {
        let mut items: Vec<TranscriptItem> = statements
            .iter()
            .map(|s| {
                let entry = directors.iter().find(|e| e.director_id() == &s.director_id);
                TranscriptItem::Statement {
                    speaker_name: entry
                        .map(|e| e.director.name.clone())
                        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
                    speaker_title: entry.map(|e| e.director.title.clone()).unwrap_or_default(),
                    content: s.content.clone(),
                    at: s.created_at,
                }
            })
            .chain(questions.iter().map(|q| TranscriptItem::Question {
                asker_name: q.asker_name.clone(),
                question: q.question.clone(),
                at: q.created_at,
            }))
            .collect();
        // Stable sort keeps input order for equal timestamps
        items.sort_by_key(TranscriptItem::at);
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Distinct speaker names in order of first appearance
    pub fn speakers(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for item in &self.items {
            if let TranscriptItem::Statement { speaker_name, .. } = item
                && !names.contains(speaker_name)
            {
                names.push(speaker_name.clone());
            }
        }
        names
    }

    /// Numbered plain-text rendering
    pub fn render(&self) -> String {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                TranscriptItem::Statement {
                    speaker_name,
                    speaker_title,
                    content,
                    ..
                } => format!("{}. {} ({}):\n{}", i + 1, speaker_name, speaker_title, content),
                TranscriptItem::Question {
                    asker_name,
                    question,
                    ..
                } => format!("{}. User question ({}):\n{}", i + 1, asker_name, question),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
