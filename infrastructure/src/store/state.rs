//! Serializable store state shared by the store adapters.
//!
//! Every operation validates before it mutates, so a rejected call leaves
//! the state untouched.

use boardroom_application::StoreError;
use boardroom_domain::{
    CommitRejection, Director, DirectorId, Meeting, MeetingId, Participant, QuestionId,
    QuestionResponse, QuestionStatus, ReconcileReport, RosterEntry, Statement, TurnCommit,
    UserQuestion, reconcile,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A meeting and everything recorded under it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub meeting: Meeting,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub questions: Vec<UserQuestion>,
    #[serde(default)]
    pub responses: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub directors: BTreeMap<DirectorId, Director>,
    #[serde(default)]
    pub meetings: BTreeMap<MeetingId, MeetingRecord>,
}

impl StoreState {
    fn record(&self, id: &MeetingId) -> Result<&MeetingRecord, StoreError> {
        self.meetings
            .get(id)
            .ok_or_else(|| StoreError::meeting_not_found(id))
    }

    fn record_mut(&mut self, id: &MeetingId) -> Result<&mut MeetingRecord, StoreError> {
        self.meetings
            .get_mut(id)
            .ok_or_else(|| StoreError::meeting_not_found(id))
    }

    pub fn upsert_directors(&mut self, directors: &[Director]) {
        for director in directors {
            self.directors.insert(director.id.clone(), director.clone());
        }
    }

    pub fn list_directors(&self) -> Vec<Director> {
        self.directors.values().cloned().collect()
    }

    pub fn get_director(&self, id: &DirectorId) -> Result<Director, StoreError> {
        self.directors
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::director_not_found(id))
    }

    pub fn insert_meeting(
        &mut self,
        meeting: &Meeting,
        participants: &[Participant],
    ) -> Result<(), StoreError> {
        if self.meetings.contains_key(&meeting.id) {
            return Err(StoreError::Duplicate {
                entity: "meeting",
                id: meeting.id.to_string(),
            });
        }
        let mut participants = participants.to_vec();
        participants.sort_by_key(|p| p.join_order);
        self.meetings.insert(
            meeting.id.clone(),
            MeetingRecord {
                meeting: meeting.clone(),
                participants,
                statements: Vec::new(),
                questions: Vec::new(),
                responses: Vec::new(),
            },
        );
        Ok(())
    }

    pub fn get_meeting(&self, id: &MeetingId) -> Result<Meeting, StoreError> {
        Ok(self.record(id)?.meeting.clone())
    }

    /// Newest first
    pub fn list_meetings(&self) -> Vec<Meeting> {
        let mut meetings: Vec<Meeting> =
            self.meetings.values().map(|r| r.meeting.clone()).collect();
        meetings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        meetings
    }

    /// Replace lifecycle fields; turn aggregates stay as stored
    pub fn update_meeting(&mut self, meeting: &Meeting) -> Result<(), StoreError> {
        let record = self.record_mut(&meeting.id)?;
        let stored = &record.meeting;
        let mut updated = meeting.clone();
        updated.total_statements = stored.total_statements;
        updated.current_round = stored.current_round.max(meeting.current_round);
        record.meeting = updated;
        Ok(())
    }

    /// Seats in `join_order`. A seat whose director profile is gone is
    /// named after its id.
    pub fn roster(&self, meeting_id: &MeetingId) -> Result<Vec<RosterEntry>, StoreError> {
        let record = self.record(meeting_id)?;
        Ok(record
            .participants
            .iter()
            .map(|p| {
                let director = self.directors.get(&p.director_id).cloned().unwrap_or_else(|| {
                    Director::new(p.director_id.clone(), p.director_id.to_string(), "", "")
                });
                RosterEntry::new(p.clone(), director)
            })
            .collect())
    }

    /// `(round_number desc, sequence_in_round desc)`
    pub fn statements(&self, meeting_id: &MeetingId) -> Result<Vec<Statement>, StoreError> {
        let mut statements = self.record(meeting_id)?.statements.clone();
        statements.sort_by(|a, b| {
            (b.round_number, b.sequence_in_round).cmp(&(a.round_number, a.sequence_in_round))
        });
        Ok(statements)
    }

    pub fn insert_question(&mut self, question: &UserQuestion) -> Result<(), StoreError> {
        let record = self.record_mut(&question.meeting_id)?;
        if record.questions.iter().any(|q| q.id == question.id) {
            return Err(StoreError::Duplicate {
                entity: "question",
                id: question.id.to_string(),
            });
        }
        record.questions.push(question.clone());
        Ok(())
    }

    pub fn get_question(
        &self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
    ) -> Result<UserQuestion, StoreError> {
        self.record(meeting_id)?
            .questions
            .iter()
            .find(|q| &q.id == question_id)
            .cloned()
            .ok_or_else(|| StoreError::question_not_found(question_id))
    }

    /// Newest first; insertion order breaks timestamp ties
    pub fn questions(&self, meeting_id: &MeetingId) -> Result<Vec<UserQuestion>, StoreError> {
        let mut questions = self.record(meeting_id)?.questions.clone();
        questions.reverse();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }

    pub fn record_question_responses(
        &mut self,
        meeting_id: &MeetingId,
        question_id: &QuestionId,
        responses: &[QuestionResponse],
        answered_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let record = self.record_mut(meeting_id)?;
        let question = record
            .questions
            .iter_mut()
            .find(|q| &q.id == question_id)
            .ok_or_else(|| StoreError::question_not_found(question_id))?;
        question.status = QuestionStatus::Answered;
        question.answered_at = Some(answered_at);
        record.responses.extend_from_slice(responses);
        Ok(())
    }

    pub fn question_responses(&self, question_id: &QuestionId) -> Vec<QuestionResponse> {
        let mut responses: Vec<QuestionResponse> = self
            .meetings
            .values()
            .flat_map(|r| r.responses.iter())
            .filter(|r| &r.question_id == question_id)
            .cloned()
            .collect();
        responses.sort_by_key(|r| r.response_order);
        responses
    }

    pub fn commit_turn(&mut self, commit: &TurnCommit) -> Result<(), StoreError> {
        let record = self.record_mut(commit.meeting_id())?;
        commit.validate(&record.meeting)?;

        let speaker = record
            .participants
            .iter()
            .position(|p| p.director_id == commit.statement.director_id)
            .ok_or_else(|| {
                CommitRejection::UnknownSpeaker(commit.statement.director_id.to_string())
            })?;
        let question = match &commit.answered_question {
            Some(id) => Some(
                record
                    .questions
                    .iter()
                    .position(|q| &q.id == id)
                    .ok_or_else(|| StoreError::question_not_found(id))?,
            ),
            None => None,
        };

        let MeetingRecord {
            meeting,
            participants,
            statements,
            questions,
            ..
        } = record;
        let answered = match question {
            Some(i) => Some(&mut questions[i]),
            None => None,
        };
        commit.apply(meeting, &mut participants[speaker], answered);
        statements.push(commit.statement.clone());
        Ok(())
    }

    pub fn reconcile(&mut self, meeting_id: &MeetingId) -> Result<ReconcileReport, StoreError> {
        let record = self.record_mut(meeting_id)?;
        Ok(reconcile(
            &mut record.meeting,
            &mut record.participants,
            &record.statements,
        ))
    }

    /// Reconcile every meeting, returning the ones that needed repair
    pub fn reconcile_all(&mut self) -> Vec<(MeetingId, ReconcileReport)> {
        self.meetings
            .values_mut()
            .filter_map(|record| {
                let report = reconcile(
                    &mut record.meeting,
                    &mut record.participants,
                    &record.statements,
                );
                (!report.is_clean()).then(|| (record.meeting.id.clone(), report))
            })
            .collect()
    }
}
