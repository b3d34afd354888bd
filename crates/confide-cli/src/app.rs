use crate::output::{format_entries, format_identity, format_mood, format_notification};
use crate::{CliError, CliResult, Commands, DiaryCommands};

use confide_backend::{BackendClient, HttpDocumentStore, HttpIdentityProvider, SessionFile};
use confide_config::Config;
use confide_core::{DiaryDraft, Identity, Mood};
use confide_diary::{DiaryRepository, DiaryView, Notification};
use confide_session::{FileAnonymousStore, SessionListener, SessionStore};

use std::sync::Arc;

use log::{debug, info, warn};

/// What a command produced: plain output lines and user-facing notifications.
#[derive(Debug, Default)]
pub struct Report {
    pub lines: Vec<String>,
    pub notifications: Vec<Notification>,
}

impl Report {
    /// True if any notification reports a failure.
    pub fn is_failure(&self) -> bool {
        self.notifications.iter().any(Notification::is_destructive)
    }

    /// Notifications rendered as `title: description`.
    pub fn rendered_notifications(&self) -> Vec<String> {
        self.notifications.iter().map(format_notification).collect()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// Runs one command against the session and the diary.
pub struct App {
    session: Arc<SessionStore>,
    diary: DiaryView,
    listener: Option<SessionListener>,
}

impl App {
    pub fn new(session: Arc<SessionStore>, diary: DiaryView) -> Self {
        Self {
            session,
            diary,
            listener: None,
        }
    }

    /// Wires the hosted backend adapters and the local stores from `config`.
    pub fn from_config(config: &Config) -> CliResult<Self> {
        let api_key = config
            .backend
            .api_key
            .as_deref()
            .ok_or_else(CliError::missing_api_key)?;
        let storage_dir = config.storage_dir()?;

        let client = Arc::new(
            BackendClient::new(&config.backend.url, api_key)
                .with_session_file(SessionFile::new(&storage_dir))?,
        );
        let provider = Arc::new(HttpIdentityProvider::new(client.clone()));
        let anonymous_store = Arc::new(FileAnonymousStore::new(&storage_dir));
        let session = Arc::new(SessionStore::new(provider, anonymous_store));

        let repository = DiaryRepository::new(Arc::new(HttpDocumentStore::new(client)));
        Ok(Self::new(session, DiaryView::new(repository)))
    }

    /// Keeps the identity in sync with provider events while the app lives.
    /// Must be called from within a tokio runtime.
    pub fn with_listener(mut self) -> Self {
        self.listener = Some(self.session.listen());
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn is_listening(&self) -> bool {
        self.listener.as_ref().is_some_and(SessionListener::is_active)
    }

    /// Restores the session, then runs `command`. Failures never abort the
    /// run; they come back as destructive notifications.
    pub async fn run(&mut self, command: Commands) -> Report {
        let mut report = Report::default();

        if let Err(e) = self.session.restore().await {
            warn!("Could not restore session: {e}");
            report.notify(Notification::destructive("Error", e.user_message()));
        }

        match command {
            Commands::Login { email, password } => {
                self.login(&email, &password, &mut report).await
            }
            Commands::Register {
                email,
                password,
                confirm_password,
            } => {
                self.register(&email, &password, confirm_password.as_deref(), &mut report)
                    .await
            }
            Commands::Anonymous => self.anonymous(&mut report).await,
            Commands::Logout => self.logout(&mut report).await,
            Commands::Whoami => {
                let identity = self.session.current().await;
                report.lines.push(format_identity(identity.as_ref()));
            }
            Commands::Moods => report.lines.extend(Mood::ALL.iter().map(format_mood)),
            Commands::Diary { action } => self.diary(action, &mut report).await,
        }

        report.notifications.extend(self.diary.take_notifications());
        report
    }

    async fn login(&self, email: &str, password: &str, report: &mut Report) {
        match self.session.login(email, password).await {
            Ok(identity) => {
                info!("Signed in as {}", identity.id);
                report.notify(Notification::success(
                    "Welcome!",
                    "You signed in successfully.",
                ));
            }
            Err(e) if e.is_authentication() => {
                debug!("Sign-in rejected: {e}");
                report.notify(Notification::destructive(
                    "Error",
                    "Invalid credentials. Please try again.",
                ));
            }
            Err(e) => report.notify(Notification::destructive("Error", e.user_message())),
        }
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: Option<&str>,
        report: &mut Report,
    ) {
        if confirm_password.is_some_and(|confirm| confirm != password) {
            report.notify(Notification::destructive("Error", "Passwords do not match."));
            return;
        }

        match self.session.register(email, password).await {
            Ok(identity) => {
                info!("Registered {}", identity.id);
                report.notify(Notification::success(
                    "Account created!",
                    "Your account was created successfully.",
                ));
            }
            Err(e) => {
                debug!("Registration failed: {e}");
                let description = if e.is_authentication() {
                    e.user_message()
                } else {
                    String::from("Could not create the account. Please try again.")
                };
                report.notify(Notification::destructive("Error", description));
            }
        }
    }

    async fn anonymous(&self, report: &mut Report) {
        match self.session.login_anonymously().await {
            Ok(identity) => {
                report.lines.push(format_identity(Some(&identity)));
                report.notify(Notification::success(
                    "Anonymous access",
                    "You are browsing as an anonymous user.",
                ));
            }
            Err(e) => report.notify(Notification::destructive("Error", e.user_message())),
        }
    }

    async fn logout(&self, report: &mut Report) {
        match self.session.logout().await {
            Ok(()) => report.notify(Notification::success(
                "Signed out",
                "You have been signed out.",
            )),
            Err(e) => report.notify(Notification::destructive("Error", e.user_message())),
        }
    }

    async fn diary(&mut self, action: DiaryCommands, report: &mut Report) {
        let identity = self.session.current().await;

        if !identity.as_ref().is_some_and(Identity::is_registered) {
            report.notify(Notification::destructive(
                "Sign-in required",
                "You need to sign in to use the private diary.",
            ));
            return;
        }

        match action {
            DiaryCommands::List => {
                if self.diary.open(identity.as_ref()).await.is_ok() {
                    report.lines.extend(format_entries(self.diary.entries()));
                }
            }
            DiaryCommands::New {
                title,
                content,
                mood,
            } => {
                let Some(draft) = Self::draft(&title, &content, mood.as_deref(), report) else {
                    return;
                };
                self.diary.start_new();
                self.submit(identity.as_ref(), &draft, report).await;
            }
            DiaryCommands::Edit {
                id,
                title,
                content,
                mood,
            } => {
                if self.diary.open(identity.as_ref()).await.is_err() {
                    return;
                }
                let Some(entry) = self.diary.find(&id).cloned() else {
                    report.notify(Notification::destructive("Error", "Entry not found."));
                    return;
                };

                let current = self.diary.start_edit(&entry);
                let mood = match mood {
                    Some(value) => value,
                    None => current.mood.map(|m| m.as_str().to_string()).unwrap_or_default(),
                };
                let Some(draft) = Self::draft(
                    title.as_deref().unwrap_or(&current.title),
                    content.as_deref().unwrap_or(&current.content),
                    Some(mood.as_str()),
                    report,
                ) else {
                    self.diary.cancel_edit();
                    return;
                };
                self.submit(identity.as_ref(), &draft, report).await;
            }
            DiaryCommands::Delete { id } => {
                if self.diary.delete(identity.as_ref(), &id).await.is_ok() {
                    report.lines.extend(format_entries(self.diary.entries()));
                }
            }
        }
    }

    async fn submit(
        &mut self,
        identity: Option<&Identity>,
        draft: &DiaryDraft,
        report: &mut Report,
    ) {
        match self.diary.submit(identity, draft).await {
            Ok(()) => report.lines.extend(format_entries(self.diary.entries())),
            Err(e) => debug!("Diary save failed: {e}"),
        }
    }

    fn draft(
        title: &str,
        content: &str,
        mood: Option<&str>,
        report: &mut Report,
    ) -> Option<DiaryDraft> {
        let mood = mood.unwrap_or_default();
        match DiaryDraft::from_form(title, content, mood) {
            Ok(draft) => Some(draft),
            Err(e) => {
                debug!("Rejected diary form: {e}");
                report.notify(Notification::destructive(
                    "Error",
                    format!(
                        "Unknown mood '{}'. Run `confide moods` for the list.",
                        mood.trim()
                    ),
                ));
                None
            }
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("listening", &self.is_listening())
            .finish_non_exhaustive()
    }
}
