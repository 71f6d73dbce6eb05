//! CLI entrypoint for boardroom
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use boardroom_application::{
    AdvanceTurnError, AdvanceTurnUseCase, ConversationLogger, CreateDirectorUseCase,
    CreateMeetingInput, DiscussionStore,
    ManageMeetingUseCase, NoConversationLogger, NoProgress, SummarizeMeetingUseCase,
    TextGenerator, TurnProgressNotifier, UserQuestionUseCase,
};
use boardroom_domain::{Director, DirectorId, MeetingId, QuestionId};
use boardroom_infrastructure::{
    AnthropicGenerator, ConfigLoader, FileConfig, JsonFileStore, JsonlConversationLogger,
};
use boardroom_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use clap::Parser;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Config = cli.command {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let _log_guard = init_logging(cli.verbose, config.logging.log_dir.as_deref());

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            warn!("Config: {}", issue);
        }
        bail!(
            "Invalid configuration: {}",
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        );
    }

    info!("Starting boardroom");

    // === Dependency Injection ===
    let store_path = config.store.resolved_path();
    let store = Arc::new(
        JsonFileStore::open(&store_path)
            .with_context(|| format!("Failed to open store at {}", store_path.display()))?,
    );
    let directors: Vec<Director> = config.directors.iter().map(|d| d.to_director()).collect();
    store.upsert_directors(&directors).await?;

    let conversation_logger: Arc<dyn ConversationLogger> = match config
        .logging
        .conversation_log
        .as_ref()
        .and_then(|path| JsonlConversationLogger::new(path))
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; stopping after the current step");
                token.cancel();
            }
        });
    }

    let app = App {
        cli: &cli,
        config: &config,
        store,
        conversation_logger,
        cancellation,
    };
    app.dispatch().await
}

/// Initialize logging based on verbosity level, with an optional daily file log
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "boardroom.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console)
        .with(file)
        .init();
    guard
}

/// Wired dependencies for one command
struct App<'a> {
    cli: &'a Cli,
    config: &'a FileConfig,
    store: Arc<JsonFileStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation: CancellationToken,
}

impl App<'_> {
    async fn dispatch(&self) -> Result<()> {
        let manage = ManageMeetingUseCase::new(Arc::clone(&self.store))
            .with_conversation_logger(Arc::clone(&self.conversation_logger));

        match &self.cli.command {
            Command::Directors => {
                let directors = manage.directors().await?;
                self.emit(&directors, || ConsoleFormatter::format_directors(&directors));
            }
            Command::Hire { prompt, id } => {
                let generator = Arc::new(self.generator()?);
                let hire = CreateDirectorUseCase::new(Arc::clone(&self.store), generator)
                    .with_behavior(self.config.generation.behavior())
                    .with_conversation_logger(Arc::clone(&self.conversation_logger))
                    .with_cancellation(self.cancellation.clone());
                let id = id.as_deref().map(DirectorId::from);
                let created = hire.execute(prompt, id).await?;
                self.emit(&created, || ConsoleFormatter::format_created_director(&created));
            }
            Command::Create {
                title,
                topic,
                directors,
                mode,
                max_rounds,
                description,
            } => {
                let ids = directors.iter().map(|d| DirectorId::from(d.as_str())).collect();
                let input = CreateMeetingInput::new(title.as_str(), topic.as_str(), ids)
                    .with_mode((*mode).into())
                    .with_max_rounds(*max_rounds)
                    .with_description(description.as_str());
                let meeting = manage.create(input).await?;
                self.emit(&meeting, || ConsoleFormatter::format_meeting_status(&meeting));
            }
            Command::Start { meeting } => {
                let meeting = manage.start(&MeetingId::from(meeting.as_str())).await?;
                self.emit(&meeting, || ConsoleFormatter::format_meeting_status(&meeting));
            }
            Command::Finish { meeting } => {
                let meeting = manage.finish(&MeetingId::from(meeting.as_str())).await?;
                self.emit(&meeting, || ConsoleFormatter::format_meeting_status(&meeting));
            }
            Command::List => {
                let meetings = manage.list().await?;
                self.emit(&meetings, || ConsoleFormatter::format_meeting_list(&meetings));
            }
            Command::Show { meeting } => {
                let view = manage.show(&MeetingId::from(meeting.as_str())).await?;
                self.emit(&view, || ConsoleFormatter::format_view(&view));
            }
            Command::Turn { meeting } => {
                let turns = self.advance_turn(Arc::new(self.generator()?));
                let progress = self.progress();
                let turn = turns
                    .execute_with_progress(&MeetingId::from(meeting.as_str()), progress.as_ref())
                    .await?;
                self.emit(&turn, || ConsoleFormatter::format_turn(&turn));
            }
            Command::Run {
                meeting,
                turns,
                no_finish,
            } => {
                self.run(&MeetingId::from(meeting.as_str()), *turns, *no_finish, &manage)
                    .await?;
            }
            Command::Ask {
                meeting,
                question,
                asker,
            } => {
                let question = manage
                    .ask(&MeetingId::from(meeting.as_str()), question, asker.clone())
                    .await?;
                self.emit(&question, || ConsoleFormatter::format_question(&question));
            }
            Command::Respond { meeting, question } => {
                let meeting_id = MeetingId::from(meeting.as_str());
                let questions = self.user_questions(Arc::new(self.generator()?));
                let progress = self.progress();
                let answered = questions
                    .respond_with_progress(
                        &meeting_id,
                        &QuestionId::from(question.as_str()),
                        progress.as_ref(),
                    )
                    .await?;
                let roster = self.store.roster(&meeting_id).await?;
                self.emit(&answered, || {
                    ConsoleFormatter::format_answered(&answered, &roster)
                });
            }
            Command::Summary { meeting } => {
                let generator = Arc::new(self.generator()?);
                let summarize = SummarizeMeetingUseCase::new(Arc::clone(&self.store), generator)
                    .with_behavior(self.config.generation.behavior())
                    .with_conversation_logger(Arc::clone(&self.conversation_logger))
                    .with_cancellation(self.cancellation.clone());
                let result = summarize.execute(&MeetingId::from(meeting.as_str())).await?;
                self.emit(&result, || ConsoleFormatter::format_summary(&result));
            }
            Command::Config => {}
        }
        Ok(())
    }

    /// Advance turns until the round budget, the turn limit or Ctrl-C stops the loop.
    ///
    /// The scheduler never enforces `max_rounds`, so the next turn is
    /// previewed and the meeting finished once it would open a round past
    /// the budget.
    async fn run(
        &self,
        meeting_id: &MeetingId,
        limit: Option<u32>,
        no_finish: bool,
        manage: &ManageMeetingUseCase<JsonFileStore>,
    ) -> Result<()> {
        let turns = self.advance_turn(Arc::new(self.generator()?));
        let progress = self.progress();
        let max_rounds = self.store.get_meeting(meeting_id).await?.max_rounds;

        let mut recorded = Vec::new();
        let mut budget_spent = false;
        while limit.is_none_or(|n| (recorded.len() as u32) < n) {
            if self.cancellation.is_cancelled() {
                break;
            }
            let plan = turns.plan(meeting_id).await?;
            if plan.decision.round > max_rounds {
                budget_spent = true;
                break;
            }

            match turns
                .execute_with_progress(meeting_id, progress.as_ref())
                .await
            {
                Ok(turn) => {
                    if self.cli.output == OutputFormat::Text {
                        print!("{}", ConsoleFormatter::format_turn(&turn));
                    }
                    recorded.push(turn);
                }
                Err(AdvanceTurnError::Cancelled) => break,
                Err(e) => return Err(e.into()),
            }
        }

        info!("Recorded {} turns for meeting {}", recorded.len(), meeting_id);
        match self.cli.output {
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&recorded)),
            OutputFormat::Text if recorded.is_empty() => println!("No turns recorded."),
            OutputFormat::Text => {}
        }

        if budget_spent && !no_finish {
            let meeting = manage.finish(meeting_id).await?;
            if self.cli.output == OutputFormat::Text {
                println!(
                    "\nRound budget of {} spent; meeting {} is {}.",
                    max_rounds, meeting.id, meeting.status
                );
            }
        }
        Ok(())
    }

    fn generator(&self) -> Result<AnthropicGenerator> {
        let generation = &self.config.generation;
        let Some(api_key) = generation.api_key() else {
            bail!(
                "No API key found; set the {} environment variable",
                generation.api_key_env
            );
        };
        Ok(AnthropicGenerator::new(api_key, generation.model.as_str())?
            .with_base_url(generation.base_url.as_str()))
    }

    fn advance_turn<G: TextGenerator + 'static>(
        &self,
        generator: Arc<G>,
    ) -> AdvanceTurnUseCase<JsonFileStore, G> {
        AdvanceTurnUseCase::new(Arc::clone(&self.store), generator)
            .with_behavior(self.config.generation.behavior())
            .with_params(self.config.discussion.params())
            .with_conversation_logger(Arc::clone(&self.conversation_logger))
            .with_cancellation(self.cancellation.clone())
    }

    fn user_questions<G: TextGenerator + 'static>(
        &self,
        generator: Arc<G>,
    ) -> UserQuestionUseCase<JsonFileStore, G> {
        UserQuestionUseCase::new(Arc::clone(&self.store), generator)
            .with_behavior(self.config.generation.behavior())
            .with_conversation_logger(Arc::clone(&self.conversation_logger))
    }

    fn progress(&self) -> Box<dyn TurnProgressNotifier> {
        if self.cli.quiet || self.cli.output == OutputFormat::Json {
            Box::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        }
    }

    /// Print `value` as JSON or through the text formatter
    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) {
        match self.cli.output {
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(value)),
            OutputFormat::Text => print!("{}", text()),
        }
    }
}
