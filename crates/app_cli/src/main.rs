use std::io::{self, Write};
use std::sync::Arc;
use std::{env, fs, path::Path, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use config::{AppConfig, ConfigStore, LocalStorage, MemoryStorage, default_preferences_path_from};
use contact::{Field, SystemMailLauncher};
use core_session::{Session, SessionError};
use core_types::{LOCALE_PREFERENCE_KEY, Locale, PreferenceStore};
use i18n::RenderMode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod render;

use render::Section;

#[derive(Debug, Parser)]
#[command(name = "portfolio", version, about = "Bilingual portfolio in the terminal")]
struct Cli {
    /// Render as a static export: always English, no stored preference.
    #[arg(long = "static")]
    static_render: bool,

    /// Language for this invocation only. Not persisted.
    #[arg(long, value_parser = parse_locale)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the page, or a single section of it.
    Show {
        #[arg(value_enum)]
        section: Option<Section>,
    },
    /// Search and filter the project gallery.
    Projects {
        #[arg(long, default_value = "")]
        query: String,
        /// Repeat to require several tags.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List every tag used by a project.
    Tags,
    /// Show the active language, or switch and remember a new one.
    Locale {
        #[arg(value_parser = parse_locale)]
        locale: Option<Locale>,
    },
    /// Validate and deliver a contact message.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Print the plain mailto link.
    Mailto,
}

fn parse_locale(value: &str) -> Result<Locale, String> {
    Locale::parse(value).ok_or_else(|| format!("unsupported locale `{value}` (expected en or zh)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    check_locale_flags(&cli)?;

    let data_dir = config::default_data_dir().unwrap_or_else(|_| PathBuf::from(".portfolio"));
    if let Err(err) = fs::create_dir_all(&data_dir) {
        eprintln!("failed to prepare data dir: {err}");
    }
    let _log_guard = init_local_logger(&data_dir.join("logs"));

    let config_store = ConfigStore::from_dir(data_dir.join("config"));
    let mut config = match config_store.load_or_init() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to load config: {err:#}");
            AppConfig::default()
        }
    };
    config.apply_env_overrides(|key| env::var(key).ok());

    let store: Arc<dyn PreferenceStore> = match cli.locale {
        Some(locale) => Arc::new(MemoryStorage::with_value(
            LOCALE_PREFERENCE_KEY,
            locale.code(),
        )),
        None => Arc::new(LocalStorage::new(default_preferences_path_from(&data_dir))),
    };
    let mode = if cli.static_render {
        RenderMode::Static
    } else {
        RenderMode::Interactive
    };
    let runtime_language = i18n::detect_system_language();

    let mut session = Session::bootstrap(
        &config,
        store,
        mode,
        runtime_language.as_deref(),
        Arc::new(SystemMailLauncher),
    )
    .context("failed to start portfolio session")?;
    info!(locale = %session.locale(), command = ?cli.command, "running command");

    let mut stdout = io::stdout().lock();
    run(&mut session, cli.command, &mut stdout).await
}

/// `--locale` lives in a throwaway store, so it cannot be combined with a
/// persistent switch.
fn check_locale_flags(cli: &Cli) -> Result<()> {
    if let (Some(flag), Command::Locale { locale: Some(target) }) = (cli.locale, &cli.command) {
        bail!(
            "`--locale {flag}` only applies to a single run and would discard the switch to \
             `{target}`; run `portfolio locale {target}` without it to save the language"
        );
    }
    Ok(())
}

async fn run<W: Write>(session: &mut Session, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Show { section } => {
            write!(out, "{}", render::render_page(session, section)?)?;
        }
        Command::Projects { query, tags } => {
            session.set_query(query);
            for tag in &tags {
                session.select_tag(tag);
            }
            let mut page = String::new();
            render::render_gallery(&mut page, session, &session.gallery())?;
            write!(out, "{page}")?;
        }
        Command::Tags => {
            for tag in session.gallery().available_tags {
                writeln!(out, "{tag}")?;
            }
        }
        Command::Locale { locale } => {
            if let Some(locale) = locale {
                session.set_locale(locale);
            }
            writeln!(out, "{}", session.locale())?;
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            session.update_contact(Field::Name, name);
            session.update_contact(Field::Email, email);
            session.update_contact(Field::Message, message);
            let result = session.submit_contact().await;
            write_toasts(session, out)?;
            match result {
                Ok(_) => {}
                Err(SessionError::Invalid(errors)) => {
                    for (field, message) in session.field_error_messages() {
                        writeln!(out, "{field:?}: {message}")?;
                    }
                    bail!("contact form has {} error(s)", errors.len());
                }
                Err(err) => {
                    writeln!(out, "{}", session.t("contact.preferEmail"))?;
                    writeln!(out, "{}", session.mailto_link())?;
                    return Err(err.into());
                }
            }
        }
        Command::Mailto => {
            writeln!(out, "{}", session.mailto_link())?;
        }
    }
    Ok(())
}

fn write_toasts<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    for toast in session.toasts().toasts() {
        writeln!(out, "{}", toast.message)?;
    }
    Ok(())
}

fn init_local_logger(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    if let Err(err) = fs::create_dir_all(log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "portfolio.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,app_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_writer(writer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use contact::MailLauncher;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingLauncher {
        opened: Mutex<Vec<String>>,
    }

    impl MailLauncher for RecordingLauncher {
        fn open(&self, uri: &str) -> io::Result<()> {
            self.opened.lock().push(uri.to_string());
            Ok(())
        }
    }

    struct BrokenLauncher;

    impl MailLauncher for BrokenLauncher {
        fn open(&self, _uri: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no mail client"))
        }
    }

    fn session_with(store: Arc<MemoryStorage>, launcher: Arc<dyn MailLauncher>) -> Session {
        Session::bootstrap(
            &AppConfig::default(),
            store,
            RenderMode::Interactive,
            None,
            launcher,
        )
        .expect("session")
    }

    fn session() -> Session {
        session_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingLauncher::default()),
        )
    }

    async fn execute(session: &mut Session, args: &[&str]) -> (Result<()>, String) {
        let cli = Cli::try_parse_from(args).expect("parse");
        let mut out = Vec::new();
        let result = run(session, cli.command, &mut out).await;
        (result, String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_tags_and_locale_override() {
        let cli = Cli::try_parse_from([
            "portfolio", "--locale", "zh", "projects", "--tag", "SQL", "--tag", "Tableau",
        ])
        .expect("parse");
        assert_eq!(cli.locale, Some(Locale::Zh));
        let Command::Projects { query, tags } = cli.command else {
            panic!("expected projects command");
        };
        assert!(query.is_empty());
        assert_eq!(tags, vec!["SQL".to_string(), "Tableau".to_string()]);
    }

    #[test]
    fn rejects_unknown_locale() {
        let err = Cli::try_parse_from(["portfolio", "locale", "fr"]).expect_err("fr rejected");
        assert!(err.to_string().contains("unsupported locale"));
    }

    #[test]
    fn static_flag_and_section_parse() {
        let cli = Cli::try_parse_from(["portfolio", "--static", "show", "skills"]).expect("parse");
        assert!(cli.static_render);
        assert!(matches!(
            cli.command,
            Command::Show {
                section: Some(Section::Skills)
            }
        ));
    }

    #[tokio::test]
    async fn repeated_tag_arguments_select_once() {
        let mut session = session();
        let (result, out) = execute(
            &mut session,
            &["portfolio", "projects", "--tag", "Tableau", "--tag", "Tableau"],
        )
        .await;
        result.expect("projects");
        assert_eq!(session.filters().selected_tags().len(), 1);
        assert!(out.contains("Filter by tags: Tableau\n"));
        assert!(out.contains("Showing 2 of 4 projects"));
    }

    #[tokio::test]
    async fn projects_query_and_tags_combine() {
        let mut session = session();
        let (result, out) = execute(
            &mut session,
            &["portfolio", "projects", "--query", "vancouver", "--tag", "Dashboard"],
        )
        .await;
        result.expect("projects");
        assert!(out.contains("Showing 1 of 4 projects"));
        assert!(out.contains("# Vancouver Public Data Trends Dashboard"));
    }

    #[tokio::test]
    async fn tags_lists_every_tag_sorted() {
        let mut session = session();
        let (result, out) = execute(&mut session, &["portfolio", "tags"]).await;
        result.expect("tags");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.contains(&"Dashboard"));
        assert!(lines.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn locale_switch_is_printed_and_persisted() {
        let store = Arc::new(MemoryStorage::new());
        let mut session = session_with(store.clone(), Arc::new(RecordingLauncher::default()));

        let (result, out) = execute(&mut session, &["portfolio", "locale"]).await;
        result.expect("show locale");
        assert_eq!(out, "en\n");

        let (result, out) = execute(&mut session, &["portfolio", "locale", "zh"]).await;
        result.expect("switch locale");
        assert_eq!(out, "zh\n");
        assert_eq!(
            store.get(LOCALE_PREFERENCE_KEY).expect("read").as_deref(),
            Some("zh")
        );
    }

    #[tokio::test]
    async fn contact_without_endpoint_opens_mail_client() {
        let launcher = Arc::new(RecordingLauncher::default());
        let mut session = session_with(Arc::new(MemoryStorage::new()), launcher.clone());
        let (result, out) = execute(
            &mut session,
            &[
                "portfolio", "contact", "--name", "Ada", "--email", "a@b.co", "--message",
                "Would love to chat about data.",
            ],
        )
        .await;
        result.expect("sent");
        assert_eq!(out, "Opening your email client...\n");
        assert_eq!(launcher.opened.lock().len(), 1);
    }

    #[tokio::test]
    async fn failed_contact_prints_mailto_fallback() {
        let mut session = session_with(Arc::new(MemoryStorage::new()), Arc::new(BrokenLauncher));
        let (result, out) = execute(
            &mut session,
            &[
                "portfolio", "contact", "--name", "Ada", "--email", "a@b.co", "--message",
                "Would love to chat about data.",
            ],
        )
        .await;
        assert!(result.is_err());
        assert!(out.starts_with("Failed to send message."));
        assert!(out.contains("Prefer email? Use the link below:\n"));
        assert!(out.contains("mailto:Lijinsheng2024@outlook.com?subject=Contact%20from"));
        assert_eq!(session.contact_form().name, "Ada");
    }

    #[tokio::test]
    async fn invalid_contact_lists_field_errors() {
        let launcher = Arc::new(RecordingLauncher::default());
        let mut session = session_with(Arc::new(MemoryStorage::new()), launcher.clone());
        let (result, out) = execute(
            &mut session,
            &[
                "portfolio", "contact", "--name", "Ada", "--email", "not-an-email", "--message",
                "short",
            ],
        )
        .await;
        let err = result.expect_err("invalid");
        assert!(err.to_string().contains("2 error(s)"));
        assert!(out.contains("Email: Please enter a valid email address\n"));
        assert!(out.contains("Message: Message must be at least 10 characters\n"));
        assert!(launcher.opened.lock().is_empty());
    }

    #[test]
    fn one_off_locale_flag_cannot_be_saved() {
        let cli = Cli::try_parse_from(["portfolio", "--locale", "zh", "locale", "en"])
            .expect("parse");
        let err = check_locale_flags(&cli).expect_err("conflicting flags");
        assert!(err.to_string().contains("portfolio locale en"));

        for args in [
            ["portfolio", "--locale", "zh", "locale"].as_slice(),
            ["portfolio", "locale", "en"].as_slice(),
            ["portfolio", "--locale", "zh", "tags"].as_slice(),
        ] {
            let cli = Cli::try_parse_from(args).expect("parse");
            check_locale_flags(&cli).expect("allowed");
        }
    }
}
