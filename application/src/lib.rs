//! Application layer for boardroom
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, DiscussionParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    discussion_store::{DiscussionStore, StoreError},
    progress::{NoProgress, TurnProgressNotifier},
    text_generator::{GenerationError, TextGenerator},
};
pub use use_cases::advance_turn::{
    AdvanceTurnError, AdvanceTurnOutput, AdvanceTurnUseCase, SpeakerInfo, TurnPlan,
};
pub use use_cases::create_director::{
    CreateDirectorError, CreateDirectorOutput, CreateDirectorUseCase,
};
pub use use_cases::manage_meeting::{
    AnsweredQuestion, CreateMeetingInput, ManageMeetingUseCase, MeetingError, MeetingView,
};
pub use use_cases::shared::{MeetingGuard, MeetingLocks};
pub use use_cases::summarize_meeting::{
    SummarizeError, SummarizeMeetingUseCase, SummarizeOutput,
};
pub use use_cases::user_questions::UserQuestionUseCase;
