//! Console output formatter for meetings, turns and summaries

use boardroom_application::{
    AdvanceTurnOutput, AnsweredQuestion, CreateDirectorOutput, MeetingView, SummarizeOutput,
};
use boardroom_domain::{
    Director, DirectorId, Meeting, MeetingSummary, QuestionStatus, RosterEntry, UserQuestion,
};
use colored::Colorize;
use serde::Serialize;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format any result as pretty JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_directors(directors: &[Director]) -> String {
        let mut output = Self::section_header("Directors");
        if directors.is_empty() {
            output.push_str(&format!("{}\n", "No directors configured.".dimmed()));
            return output;
        }
        for director in directors {
            output.push_str(&format!(
                "  {} {} {}\n",
                director.id.to_string().yellow().bold(),
                director.name.bold(),
                format!("({})", director.title).dimmed()
            ));
            if !director.background.is_empty() {
                output.push_str(&format!("{}\n", Self::indent(&director.background, "      ")));
            }
        }
        output
    }

    pub fn format_created_director(created: &CreateDirectorOutput) -> String {
        let mut output = Self::format_directors(std::slice::from_ref(&created.director));
        if created.fallback_used {
            output.push_str(&format!(
                "{}\n",
                "Persona draft was unreadable; name and title are placeholders.".yellow()
            ));
        }
        output
    }

    pub fn format_meeting_list(meetings: &[Meeting]) -> String {
        let mut output = Self::section_header("Meetings");
        if meetings.is_empty() {
            output.push_str(&format!("{}\n", "No meetings yet.".dimmed()));
            return output;
        }
        for meeting in meetings {
            output.push_str(&format!(
                "  {}  {:<11} {} {}\n",
                meeting.id.to_string().yellow(),
                meeting.status.to_string(),
                meeting.title.bold(),
                format!(
                    "[{}, round {}/{}, {} statements]",
                    meeting.discussion_mode,
                    meeting.current_round,
                    meeting.max_rounds,
                    meeting.total_statements
                )
                .dimmed()
            ));
        }
        output
    }

    /// One-line status after create/start/finish
    pub fn format_meeting_status(meeting: &Meeting) -> String {
        format!(
            "{} {} {}\n  {} {}\n  {} {} ({})\n",
            "Meeting".cyan().bold(),
            meeting.id.to_string().yellow(),
            meeting.status.to_string().green().bold(),
            "Topic:".cyan(),
            meeting.topic,
            "Mode:".cyan(),
            meeting.discussion_mode,
            meeting.discussion_mode.description()
        )
    }

    pub fn format_turn(turn: &AdvanceTurnOutput) -> String {
        let mut heading = format!(
            "── R{}.{} {} ({}) ──",
            turn.round_number, turn.sequence_in_round, turn.director.name, turn.director.title
        );
        if turn.is_rebuttal {
            heading.push_str(" rebuttal");
        }
        let mut output = format!("\n{}\n", heading.yellow().bold());
        if turn.answered_question.is_some() {
            output.push_str(&format!("{}\n", "(answering a user question)".magenta()));
        }
        output.push_str(&turn.content);
        output.push('\n');
        output
    }

    pub fn format_question(question: &UserQuestion) -> String {
        format!(
            "{} {} asked: {}\n  {} {}\n",
            "?".magenta().bold(),
            question.asker_name.bold(),
            question.question,
            "id:".dimmed(),
            question.id
        )
    }

    /// Direct answers; `roster` names the responders
    pub fn format_answered(answered: &AnsweredQuestion, roster: &[RosterEntry]) -> String {
        let mut output = Self::format_question(&answered.question);
        if answered.responses.is_empty() {
            output.push_str(&format!("{}\n", "No director could answer.".red()));
        }
        for response in &answered.responses {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!(
                    "── {}. {} ──",
                    response.response_order,
                    Self::name_of(roster, &response.director_id)
                )
                .yellow()
                .bold(),
                response.content
            ));
        }
        output
    }

    pub fn format_summary(result: &SummarizeOutput) -> String {
        let mut output = Self::header("Meeting Summary");
        output.push('\n');
        if result.fallback_used {
            output.push_str(&format!(
                "{}\n",
                "The generated summary could not be parsed; showing a default.".yellow()
            ));
        }
        output.push_str(&Self::summary_body(&result.summary));
        output.push_str(&Self::footer());
        output
    }

    fn summary_body(summary: &MeetingSummary) -> String {
        let mut output = format!("\n{}\n", summary.executive_summary);

        let lists = [
            ("Key Points:", &summary.key_points),
            ("Agreements:", &summary.agreements),
            ("Disagreements:", &summary.disagreements),
            ("Insights:", &summary.insights),
            ("Next Steps:", &summary.next_steps),
        ];
        for (title, items) in lists {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}\n", title.cyan().bold()));
            for item in items {
                output.push_str(&format!("  * {}\n", item));
            }
        }

        if !summary.participant_highlights.is_empty() {
            output.push_str(&format!("\n{}\n", "Highlights:".green().bold()));
            for highlight in &summary.participant_highlights {
                output.push_str(&format!(
                    "  * {}: {}\n",
                    highlight.director.bold(),
                    highlight.key_contribution
                ));
            }
        }

        output.push_str(&format!(
            "\n{} depth {}/10, controversy {}/10, insight {}/10\n",
            "Rating:".cyan().bold(),
            summary.rating.depth,
            summary.rating.controversy,
            summary.rating.insight
        ));
        output
    }

    /// Full meeting view: roster, transcript, questions and summary
    pub fn format_view(view: &MeetingView) -> String {
        let meeting = &view.meeting;
        let mut output = Self::header(&meeting.title);
        output.push('\n');
        output.push_str(&Self::format_meeting_status(meeting));
        if !meeting.description.is_empty() {
            output.push_str(&format!("\n{}\n", meeting.description));
        }

        output.push_str(&Self::section_header("Roster"));
        for entry in &view.roster {
            let seat = format!(
                "  {}. {} ({}) - {} statements",
                entry.participant.join_order,
                entry.name(),
                entry.director.title,
                entry.participant.statements_count
            );
            if entry.participant.is_active {
                output.push_str(&format!("{}\n", seat));
            } else {
                output.push_str(&format!("{} {}\n", seat.dimmed(), "(left)".dimmed()));
            }
        }

        output.push_str(&Self::section_header("Transcript"));
        if view.statements.is_empty() {
            output.push_str(&format!("{}\n", "Nobody has spoken yet.".dimmed()));
        }
        for statement in &view.statements {
            let director = view.director(&statement.director_id);
            let mut heading = format!(
                "── R{}.{} {} ──",
                statement.round_number,
                statement.sequence_in_round,
                director.map_or(statement.director_id.as_str(), |d| d.name.as_str())
            );
            if statement.is_rebuttal() {
                heading.push_str(" rebuttal");
            }
            output.push_str(&format!("\n{}\n{}\n", heading.yellow().bold(), statement.content));
        }

        if !view.questions.is_empty() {
            output.push_str(&Self::section_header("Questions"));
            for answered in &view.questions {
                let status = match answered.question.status {
                    QuestionStatus::Pending => "pending".yellow(),
                    QuestionStatus::Answered => "answered".green(),
                };
                output.push_str(&format!(
                    "\n[{}] {}",
                    status,
                    Self::format_question(&answered.question)
                ));
                for response in &answered.responses {
                    output.push_str(&format!(
                        "    {} {}\n",
                        format!("{}:", Self::name_of(&view.roster, &response.director_id)).bold(),
                        response.content
                    ));
                }
            }
        }

        if let Some(summary) = &meeting.summary {
            output.push_str(&Self::section_header("Summary"));
            output.push_str(&Self::summary_body(summary));
        }

        output.push_str(&Self::footer());
        output
    }

    fn name_of<'a>(roster: &'a [RosterEntry], id: &'a DirectorId) -> &'a str {
        roster
            .iter()
            .find(|e| e.director_id() == id)
            .map_or(id.as_str(), |e| e.name())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
