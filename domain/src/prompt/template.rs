//! Prompt templates for discussion turns, question answers and summaries

use crate::meeting::{Director, DiscussionMode};

/// Placeholder shown when nothing has been said yet
pub const OPENING_CONTEXT: &str = "(This is the opening of the meeting.)";

/// Fixed text blocks used by the composer
pub struct PromptTemplate;

impl PromptTemplate {
    /// Who the model is speaking as
    pub fn persona(director: &Director) -> String {
        format!(
            "You are {}, {}.\n\nPersona background: {}",
            director.name, director.title, director.background
        )
    }

    /// One-line behavioral instruction for a mode
    pub fn mode_instruction(mode: &DiscussionMode, is_rebuttal: bool, round: u32) -> String {
        match mode {
            DiscussionMode::Debate if is_rebuttal => {
                "Forcefully rebut the point the other side just made and argue your case."
                    .to_string()
            }
            DiscussionMode::Debate => {
                "State your position clearly and be ready for the other side's challenge."
                    .to_string()
            }
            DiscussionMode::Focus => {
                format!("Analyse the core issue in depth; this is layer {round} of the discussion.")
            }
            DiscussionMode::Free => {
                "Join the discussion naturally and respond to any point you find interesting."
                    .to_string()
            }
            DiscussionMode::RoundRobin | DiscussionMode::Other(_) => {
                "Speak in your turn and set out your view in an orderly way.".to_string()
            }
        }
    }

    /// Mode-specific paragraph appended to the discussion so far
    pub fn mode_context(mode: &DiscussionMode, round: u32) -> String {
        match mode {
            DiscussionMode::Debate => {
                "State your position clearly and be prepared to defend it. Do not try to please everyone."
                    .to_string()
            }
            DiscussionMode::Focus => format!(
                "This is layer {round} of the discussion. Drawing on your expertise, raise angles that may have been overlooked or challenge the views already stated."
            ),
            DiscussionMode::Free => {
                "You may speak freely, including questioning or disagreeing with earlier statements. Show your distinctive perspective."
                    .to_string()
            }
            DiscussionMode::RoundRobin | DiscussionMode::Other(_) => {
                "Speak in turn, but keep your own view; you do not need to agree with the others."
                    .to_string()
            }
        }
    }

    /// Paragraph quoting the statement to rebut
    pub fn rebuttal_context(speaker_name: &str, content: &str) -> String {
        format!(
            "[Point to rebut]\n{speaker_name} just said: \"{content}\"\n\nRebut this point forcefully from your own values and expertise. Do not compromise your position for the sake of harmony."
        )
    }

    /// Closing requirements for a regular turn
    pub fn turn_requirements(mode: &DiscussionMode) -> String {
        format!(
            r#"Following your persona, give your view on the current topic in {mode} mode. Your statement should:
1. Take an independent position grounded in your history, values and expertise
2. Relate to the earlier discussion without blindly following others
3. Keep your distinctive speaking style and the limits of your worldview
4. Hold your ground when other directors disagree with you
5. Fit the current discussion mode and dare to voice controversial views
6. Be between 100 and 300 words

Important: stay true to your persona, including the limits and biases of your era.

Reply with the statement text only, without any formatting markup."#
        )
    }

    /// Closing requirements when answering a user question inside a turn
    pub fn question_requirements(mode: &DiscussionMode) -> String {
        format!(
            r#"Following your persona and expertise, answer this question in {mode} mode. Your answer should:
1. Give a genuine position rooted in your background and values
2. Politely but firmly disagree if the question conflicts with your beliefs
3. Reflect your field and your era rather than contemporary expectations
4. Keep your distinctive speaking style and way of thinking
5. Fit the current discussion mode; you may disagree with other directors
6. Be between 100 and 300 words

Important: answer from your own standpoint rather than simply agreeing with the asker. You are an independent thinker.

Reply with the answer text only, without any formatting markup."#
        )
    }

    /// Standalone prompt for a director answering a user question directly
    pub fn question_answer(director: &Director, question: &str) -> String {
        format!(
            r#"{persona}

A user raised a question during the meeting: "{question}"

Following your persona and expertise, answer concisely. Your answer should:
1. State a genuine position grounded in your background and core values
2. Express a different view if the question conflicts with your beliefs or era
3. Keep your distinctive speaking style and way of thinking
4. Not cater to the asker's expectations; stay in character
5. Be between 50 and 150 words

Important: you are an independent figure with your own standpoint and limits.

Reply with the answer text only, without any formatting markup."#,
            persona = Self::persona(director),
        )
    }

    /// Summary request asking for a JSON object
    pub fn summary(
        title: &str,
        topic: &str,
        participant_names: &[String],
        item_count: usize,
        transcript: &str,
    ) -> String {
        format!(
            r#"Write a professional summary of the following board meeting.

Meeting title: {title}
Topic: {topic}
Participating directors: {participants}
Total contributions: {item_count} (director statements and user questions)

Full discussion:
{transcript}

Return the summary as JSON:
{{
  "executive_summary": "core takeaways of the meeting (under 150 words)",
  "key_points": ["point 1", "point 2", "point 3"],
  "agreements": ["points of consensus"],
  "disagreements": ["points of contention"],
  "insights": ["deeper insights"],
  "participant_highlights": [
    {{ "director": "director name", "key_contribution": "main contribution" }}
  ],
  "next_steps": ["directions worth exploring next"],
  "rating": {{ "depth": 8, "controversy": 6, "insight": 9 }}
}}

Return only the JSON, nothing else."#,
            participants = participant_names.join(", "),
        )
    }

    /// Persona extraction request asking for a JSON object
    pub fn persona_profile(character_prompt: &str) -> String {
        format!(
            r#"Read the following character description and extract the persona as JSON.

Character description:
{character_prompt}

Return the persona as JSON:
{{
  "name": "the character's name",
  "title": "role or occupation",
  "era": "historical period",
  "personality_traits": ["trait 1", "trait 2", "trait 3"],
  "core_beliefs": ["belief 1", "belief 2"],
  "speaking_style": "how the character talks",
  "expertise_areas": ["area 1", "area 2"]
}}

Return only the JSON, nothing else."#,
            character_prompt = character_prompt.trim(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_profile_embeds_description() {
        let text = PromptTemplate::persona_profile("  A Roman stoic emperor.\n");
        assert!(text.contains("Character description:\nA Roman stoic emperor.\n\n"));
        assert!(text.contains("\"speaking_style\""));
    }

    #[test]
    fn test_persona_includes_profile() {
        let d = Director::new("lincoln", "Abraham Lincoln", "16th US President", "Rail-splitter");
        let text = PromptTemplate::persona(&d);
        assert!(text.contains("Abraham Lincoln"));
        assert!(text.contains("16th US President"));
        assert!(text.contains("Rail-splitter"));
    }

    #[test]
    fn test_debate_instruction_depends_on_rebuttal() {
        let rebut = PromptTemplate::mode_instruction(&DiscussionMode::Debate, true, 1);
        let assert = PromptTemplate::mode_instruction(&DiscussionMode::Debate, false, 1);
        assert!(rebut.contains("rebut"));
        assert!(assert.contains("State your position"));
    }

    #[test]
    fn test_focus_mentions_layer() {
        let text = PromptTemplate::mode_instruction(&DiscussionMode::Focus, false, 3);
        assert!(text.contains("layer 3"));
        assert!(PromptTemplate::mode_context(&DiscussionMode::Focus, 4).contains("layer 4"));
    }

    #[test]
    fn test_unknown_mode_uses_round_robin_text() {
        let other = DiscussionMode::Other("panel".into());
        assert_eq!(
            PromptTemplate::mode_instruction(&other, false, 1),
            PromptTemplate::mode_instruction(&DiscussionMode::RoundRobin, false, 1)
        );
    }

    #[test]
    fn test_summary_lists_participants() {
        let text = PromptTemplate::summary(
            "Board",
            "AI",
            &["Ada".to_string(), "Ben".to_string()],
            2,
            "1. Ada: hi",
        );
        assert!(text.contains("Ada, Ben"));
        assert!(text.contains("\"executive_summary\""));
    }
}
