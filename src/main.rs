use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use gift_survey::cli::{self, Config, cursor, render};
use gift_survey::storage::{FjallStore, Storage};
use gift_survey::{Catalog, Session, SessionError, SurveyError, Theme};

#[derive(Parser)]
#[command(name = "gift-survey")]
#[command(about = "Answer a Likert questionnaire and rank the categories it scores")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "gift-survey.toml", env = "GIFT_SURVEY_CONFIG")]
    config: PathBuf,

    /// Store path (overrides the config file)
    #[arg(long, env = "GIFT_SURVEY_PATH")]
    path: Option<PathBuf>,

    /// Question catalog (overrides the config file)
    #[arg(long, env = "GIFT_SURVEY_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new store
    Init,

    /// Show progress and the question map
    Status,

    /// Show a question (the current one if no number is given)
    Show {
        /// Question number, 1-based
        number: Option<usize>,
    },

    /// Rate a question
    Answer {
        /// Rating, clamped to 0..=3
        #[arg(allow_negative_numbers = true)]
        rating: i64,

        /// Question number, 1-based (defaults to the current question)
        #[arg(long, short)]
        question: Option<usize>,

        /// Move to the next question afterwards
        #[arg(long)]
        advance: bool,
    },

    /// Jump to a question
    Goto {
        /// Question number, 1-based
        number: usize,
    },

    /// Move to the next question
    Next,

    /// Move to the previous question
    Prev,

    /// Submit the answers and show the ranking
    Submit {
        /// Print category descriptions
        #[arg(long)]
        definitions: bool,
    },

    /// Discard the current answers and start over
    Restart,

    /// Show a saved result (the latest if no id is given)
    Results {
        /// History entry id
        id: Option<i64>,

        /// Print category descriptions
        #[arg(long)]
        definitions: bool,
    },

    /// Inspect or clear saved results
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or change the display theme
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved results, most recent first
    List,

    /// Show one saved result
    Show {
        id: i64,

        /// Print category descriptions
        #[arg(long)]
        definitions: bool,
    },

    /// Delete every saved result
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_file_or_default(&cli.config)?;
    if let Some(path) = cli.path {
        config.store.path = path;
    }
    if let Some(catalog) = cli.catalog {
        config.store.catalog = catalog;
    }
    cli::init_logging(&config.logging)?;

    if let Commands::Init = cli.command {
        FjallStore::init(&config.store.path)
            .with_context(|| format!("initializing store at {}", config.store.path.display()))?;
        println!("Initialized survey store at {}", config.store.path.display());
        return Ok(());
    }

    let catalog = Catalog::load(&config.store.catalog).with_context(|| {
        format!(
            "Could not load the survey questions from {}",
            config.store.catalog.display()
        )
    })?;
    let mut store = FjallStore::open(&config.store.path)
        .with_context(|| format!("opening store at {}", config.store.path.display()))?;
    let saved_cursor = cursor::load(&store)?;
    let mut session = Session::open(catalog, &mut store)?;
    cursor::restore(&mut session, saved_cursor);

    run(&mut session, cli.command)?;

    let index = session.current_index();
    drop(session);
    cursor::save(&mut store, index)?;
    Ok(())
}

fn run<S: Storage>(session: &mut Session<S>, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => {}
        Commands::Status => {
            let answered = session.survey().answers().answered_count();
            println!("{}", render::progress_bar(answered, session.question_count()));
            print!("{}", render::question_map(session));
            println!("theme: {}, saved results: {}", session.theme(), session.history().len());
        }
        Commands::Show { number } => {
            if let Some(number) = number {
                go_to_number(session, number)?;
            }
            print!("{}", render::question(session));
        }
        Commands::Answer {
            rating,
            question,
            advance,
        } => {
            match question {
                Some(number) => {
                    let index = number
                        .checked_sub(1)
                        .context("question numbers start at 1")?;
                    session.select_rating(index, rating)?;
                }
                None => session.select_current(rating)?,
            }
            if advance {
                session.next();
            }
            print!("{}", render::question(session));
        }
        Commands::Goto { number } => {
            go_to_number(session, number)?;
            print!("{}", render::question(session));
        }
        Commands::Next => {
            session.next();
            print!("{}", render::question(session));
        }
        Commands::Prev => {
            session.prev();
            print!("{}", render::question(session));
        }
        Commands::Submit { definitions } => match session.submit() {
            Ok(entry) => {
                println!("Survey complete.\n");
                print!("{}", render::history_entry(&entry, session.catalog(), definitions));
            }
            Err(SessionError::Survey(SurveyError::Incomplete(incomplete))) => {
                eprint!("{}", render::incomplete(&incomplete));
                std::process::exit(2);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Restart => {
            session.restart()?;
            println!("Answers cleared.");
            print!("{}", render::question(session));
        }
        Commands::Results { id, definitions } => {
            let entry = match id {
                Some(id) => session.show_history_entry(id)?.clone(),
                None => session
                    .history()
                    .first()
                    .cloned()
                    .context("no saved results yet; answer every question and run `submit`")?,
            };
            print!("{}", render::history_entry(&entry, session.catalog(), definitions));
        }
        Commands::History { action } => match action {
            HistoryAction::List => {
                session.show_history();
                print!("{}", render::history_list(session.history()));
            }
            HistoryAction::Show { id, definitions } => {
                let entry = session.show_history_entry(id)?.clone();
                print!("{}", render::history_entry(&entry, session.catalog(), definitions));
            }
            HistoryAction::Clear { yes } => {
                if !yes {
                    anyhow::bail!("refusing to delete saved results without --yes");
                }
                let count = session.history().len();
                session.clear_history()?;
                println!("Deleted {} saved result(s).", count);
            }
        },
        Commands::Theme { choice } => {
            let theme = match choice {
                None => session.theme(),
                Some(ThemeChoice::Toggle) => session.toggle_theme()?,
                Some(ThemeChoice::Light) => {
                    session.set_theme(Theme::Light)?;
                    Theme::Light
                }
                Some(ThemeChoice::Dark) => {
                    session.set_theme(Theme::Dark)?;
                    Theme::Dark
                }
            };
            println!("{}", theme);
        }
    }

    Ok(())
}

/// Navigate to a 1-based question number; out-of-range numbers are
/// reported rather than silently ignored.
fn go_to_number<S: Storage>(
    session: &mut Session<S>,
    number: usize,
) -> anyhow::Result<()> {
    let count = session.question_count();
    if number == 0 || number > count {
        anyhow::bail!("question {} does not exist (1..={})", number, count);
    }
    session.go_to(number - 1);
    Ok(())
}
