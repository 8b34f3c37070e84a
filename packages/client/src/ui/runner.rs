//! Command dispatch: wires configuration, session storage, HTTP repositories
//! and use cases together for one CLI invocation.

use std::sync::Arc;

use crate::{
    config::ClientConfig,
    domain::{
        AccessToken, AnswerSheet, ExportJob, JobId, PollResponse, RoomDraft, RoomId, RoomUpdate,
        Session, SessionStore, ShareToken, SurveyId, SurveyUpdate, TimeRange, UserId,
    },
    infrastructure::{
        ApiClient,
        repository::http::{
            HttpAdminRepository, HttpAuthRepository, HttpExportRepository,
            HttpPublicSurveyRepository, HttpRoomRepository, HttpSurveyRepository,
        },
        session::{FileSessionStore, InMemorySessionStore},
    },
    usecase::{
        AdminDashboardUseCase, AuthUseCase, AuthorSurveyUseCase, ExportSurveyUseCase,
        ManageRoomsUseCase, ManageSurveysUseCase, SessionGuard, SubmitError, TakeSurveyUseCase,
        default_export_file_name, save_artifact,
    },
};

use super::{
    cli::{
        AdminCommand, AuthCommand, Cli, Command, ExportArgs, RoomCommand, SurveyCommand, TakeArgs,
    },
    error::CliError,
    input::{apply_answers, load_draft, load_settings, read_document},
    prompt::{TerminalLoginPrompt, answer_interactively, fix_errors_interactively, read_token},
    render::{Renderer, field_errors},
    signal,
};

/// Everything a command needs
struct App {
    config: ClientConfig,
    renderer: Renderer,
    client: Arc<ApiClient>,
    store: Arc<dyn SessionStore>,
    guard: SessionGuard,
}

impl App {
    fn new(cli: &Cli) -> Result<Self, CliError> {
        let mut config = ClientConfig::load_with_dotenv()?;
        if let Some(base_url) = &cli.base_url {
            config.api.base_url = base_url.clone();
            config.validate()?;
        }
        tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

        let store = session_store(&config, cli.token.as_deref())?;
        let client = Arc::new(ApiClient::new(
            &config.api.base_url,
            config.api_timeout(),
            store.clone(),
        )?);
        let guard = SessionGuard::new(store.clone(), Arc::new(TerminalLoginPrompt));

        Ok(Self {
            config,
            renderer: Renderer::new(cli.json),
            client,
            store,
            guard,
        })
    }

    fn manage_surveys(&self) -> ManageSurveysUseCase {
        ManageSurveysUseCase::new(
            Arc::new(HttpSurveyRepository::new(self.client.clone())),
            self.guard.clone(),
        )
    }

    fn manage_rooms(&self) -> ManageRoomsUseCase {
        ManageRoomsUseCase::new(
            Arc::new(HttpRoomRepository::new(self.client.clone())),
            self.guard.clone(),
        )
    }

    fn export(&self) -> ExportSurveyUseCase {
        ExportSurveyUseCase::new(
            Arc::new(HttpExportRepository::new(self.client.clone())),
            self.guard.clone(),
            self.config.poller_settings(),
        )
    }

    fn auth(&self) -> AuthUseCase {
        AuthUseCase::new(
            Arc::new(HttpAuthRepository::new(self.client.clone())),
            self.store.clone(),
            self.guard.clone(),
        )
    }
}

/// A `--token` keeps the session in memory; otherwise it lives on disk
fn session_store(
    config: &ClientConfig,
    token: Option<&str>,
) -> Result<Arc<dyn SessionStore>, CliError> {
    if let Some(token) = token {
        let token = AccessToken::new(token)
            .ok_or_else(|| CliError::Input("--token must not be empty".to_string()))?;
        return Ok(Arc::new(InMemorySessionStore::with_session(Session {
            token,
            user: None,
        })));
    }
    let dir = match &config.session.dir {
        Some(dir) => dir.clone(),
        None => FileSessionStore::default_dir()?,
    };
    tracing::debug!(dir = %dir.display(), "using file session store");
    Ok(Arc::new(FileSessionStore::new(dir)))
}

/// Run one command
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let app = App::new(&cli)?;
    match cli.command {
        Command::Auth(command) => auth(&app, command).await,
        Command::Survey(command) => survey(&app, command).await,
        Command::Take(args) => take(&app, args).await,
        Command::Export(args) => export(&app, args).await,
        Command::ExportStatus { job_id } => export_status(&app, job_id).await,
        Command::Room(command) => room(&app, command).await,
        Command::Admin(command) => admin(&app, command).await,
    }
}

/// Run a terminal prompt on a blocking thread
async fn blocking<T, F>(prompt: F) -> Result<T, CliError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, CliError> + Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .map_err(|e| CliError::Input(format!("prompt task failed: {e}")))?
}

async fn auth(app: &App, command: AuthCommand) -> Result<(), CliError> {
    let auth = app.auth();
    match command {
        AuthCommand::Login => {
            let url = auth.login_url().await?;
            let token = blocking(move || read_token(&url)).await?;
            let session = auth.login(&token).await?;
            match &session.user {
                Some(user) => println!("Signed in as {} <{}>.", user.name, user.email),
                None => println!("Signed in."),
            }
        }
        AuthCommand::Logout => {
            auth.logout()?;
            println!("Signed out.");
        }
        AuthCommand::Whoami => app.renderer.user(&auth.whoami().await?)?,
    }
    Ok(())
}

async fn survey(app: &App, command: SurveyCommand) -> Result<(), CliError> {
    let manage = app.manage_surveys();
    match command {
        SurveyCommand::Create { file } => {
            let draft = load_draft(&file)?;
            let author = AuthorSurveyUseCase::new(
                Arc::new(HttpSurveyRepository::new(app.client.clone())),
                app.guard.clone(),
            );
            app.renderer.survey(&author.execute(&draft).await?)?;
        }
        SurveyCommand::List => app.renderer.surveys(&manage.list().await?)?,
        SurveyCommand::Show { id } => {
            app.renderer.survey(&manage.get(&SurveyId::new(id)?).await?)?
        }
        SurveyCommand::Update {
            id,
            title,
            description,
            settings,
        } => {
            let settings = settings.as_deref().map(load_settings).transpose()?;
            let update = SurveyUpdate {
                title,
                description,
                settings,
            };
            let survey = manage.update(&SurveyId::new(id)?, &update).await?;
            app.renderer.survey(&survey)?;
        }
        SurveyCommand::Clone { id } => {
            app.renderer
                .survey(&manage.clone_survey(&SurveyId::new(id)?).await?)?
        }
        SurveyCommand::Archive { id } => {
            app.renderer.survey(&manage.archive(&SurveyId::new(id)?).await?)?
        }
        SurveyCommand::Delete { id } => {
            let id = SurveyId::new(id)?;
            manage.delete(&id).await?;
            println!("Deleted survey {id}.");
        }
        SurveyCommand::Publish { id } => {
            app.renderer.survey(&manage.publish(&SurveyId::new(id)?).await?)?
        }
    }
    Ok(())
}

async fn take(app: &App, args: TakeArgs) -> Result<(), CliError> {
    let take = TakeSurveyUseCase::new(
        Arc::new(HttpPublicSurveyRepository::new(app.client.clone())),
        app.config.upload.max_file_bytes,
    );
    let mut sheet = take.open(&ShareToken::new(args.share_token)?).await?;

    let interactive = args.answers.is_none();
    match &args.answers {
        Some(path) => apply_answers(&mut sheet, read_document(path)?)?,
        None => sheet = prompt_sheet(sheet, answer_interactively).await?,
    }
    if let Some(email) = args.email {
        sheet.set_respondent_email(Some(email));
    }

    loop {
        match take.submit(&mut sheet).await {
            Ok(receipt) => {
                app.renderer.receipt(&receipt);
                return Ok(());
            }
            Err(SubmitError::Validation(errors)) => {
                eprintln!("Some answers need attention:\n{}", field_errors(&errors));
                if !interactive {
                    return Err(SubmitError::Validation(errors).into());
                }
                sheet = prompt_sheet(sheet, fix_errors_interactively).await?;
            }
            Err(other) => return Err(other.into()),
        }
    }
}

async fn prompt_sheet(
    mut sheet: AnswerSheet,
    prompt: fn(&mut AnswerSheet) -> Result<(), CliError>,
) -> Result<AnswerSheet, CliError> {
    blocking(move || {
        prompt(&mut sheet)?;
        Ok(sheet)
    })
    .await
}

async fn export(app: &App, args: ExportArgs) -> Result<(), CliError> {
    let export = app.export();
    let survey_id = SurveyId::new(args.form_id)?;
    let range = TimeRange::new(args.from, args.to)?;

    let job = export.start(&survey_id, args.format, &range).await?;
    app.renderer.job(&job)?;
    if args.no_wait {
        return Ok(());
    }

    let renderer = app.renderer;
    let observer = move |job: &ExportJob| {
        if let Err(error) = renderer.job(job) {
            tracing::warn!(%error, "failed to print export status");
        }
    };
    let artifact = tokio::select! {
        result = export.wait(job, observer) => result?,
        () = signal::interrupted() => return Err(CliError::Cancelled),
    };

    let dir = args
        .out
        .unwrap_or_else(|| app.config.export.download_dir.clone());
    let fallback = default_export_file_name(&survey_id, args.format);
    let path = save_artifact(&artifact, &dir, &fallback).await?;
    println!("Saved {}", path.display());
    Ok(())
}

async fn export_status(app: &App, job_id: String) -> Result<(), CliError> {
    match app.export().status(&JobId::new(job_id)?).await? {
        PollResponse::Job(job) => app.renderer.job(&job)?,
        PollResponse::File(artifact) => {
            println!("Export ready ({} bytes).", artifact.bytes.len())
        }
    }
    Ok(())
}

async fn room(app: &App, command: RoomCommand) -> Result<(), CliError> {
    let rooms = app.manage_rooms();
    match command {
        RoomCommand::List => app.renderer.rooms(&rooms.list().await?)?,
        RoomCommand::Show { id } => app.renderer.room(&rooms.get(&RoomId::new(id)?).await?)?,
        RoomCommand::Create {
            name,
            description,
            public,
        } => {
            let draft = RoomDraft::new(name, description, public)?;
            app.renderer.room(&rooms.create(&draft).await?)?;
        }
        RoomCommand::Update {
            id,
            name,
            description,
            public,
            locked,
        } => {
            let update = RoomUpdate {
                name,
                description,
                is_public: public,
                is_locked: locked,
            };
            app.renderer
                .room(&rooms.update(&RoomId::new(id)?, &update).await?)?;
        }
        RoomCommand::Delete { id } => {
            let id = RoomId::new(id)?;
            rooms.delete(&id).await?;
            println!("Deleted room {id}.");
        }
        RoomCommand::AddMember { id, email } => {
            app.renderer
                .room(&rooms.add_member(&RoomId::new(id)?, &email).await?)?;
        }
        RoomCommand::RemoveMember { id, user_id } => {
            let room = rooms
                .remove_member(&RoomId::new(id)?, &UserId::new(user_id)?)
                .await?;
            app.renderer.room(&room)?;
        }
        RoomCommand::ShareLink { id } => {
            app.renderer
                .room(&rooms.regenerate_share_link(&RoomId::new(id)?).await?)?;
        }
    }
    Ok(())
}

async fn admin(app: &App, command: AdminCommand) -> Result<(), CliError> {
    let admin = AdminDashboardUseCase::new(
        Arc::new(HttpAdminRepository::new(app.client.clone())),
        app.guard.clone(),
    );
    let mut dashboard = admin.load().await?;
    match command {
        AdminCommand::Users { toggle } => {
            for id in toggle {
                let id = UserId::new(id)?;
                if dashboard.toggle_user(&id).is_none() {
                    eprintln!("No user {id} in the listing.");
                }
            }
            println!("{} active user(s)", dashboard.active_user_count());
            app.renderer.users(&dashboard.users)?;
        }
        AdminCommand::Surveys { toggle } => {
            for id in toggle {
                let id = SurveyId::new(id)?;
                if dashboard.toggle_survey(&id).is_none() {
                    eprintln!("No survey {id} in the listing.");
                }
            }
            app.renderer.surveys(&dashboard.surveys)?;
        }
    }
    Ok(())
}
