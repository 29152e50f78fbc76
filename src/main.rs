//! `clinic`: terminal front end for the clinic management API.
//!
//! Each subcommand plays one screen: it builds the page controllers, fills
//! form fields from flags (prompting on stdin for anything missing), and
//! prints the resulting record or list. Failures print the same message the
//! screen would show and exit non-zero.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use clinic::config::{ClinicConfig, ConfigError, home_dir};
use clinic::error::ClientError;
use clinic::net::api::{FileAttachment, Transport};
use clinic::net::http::HttpTransport;
use clinic::net::types::Doctor;
use clinic::pages::admin::{doctor_options, render_doctor, render_schedule};
use clinic::pages::appointments::{
    NO_APPOINTMENTS, PREVIEW_LIMIT, booking_confirmation, render_appointment, time_slot_options, visible,
};
use clinic::pages::dashboard::{admin_dashboard, patient_dashboard};
use clinic::pages::login::{AuthFlow, LoginForm, RegisterForm};
use clinic::pages::records::{NO_RECORDS, UPLOADED, render_record};
use clinic::state::dashboard::Tab;
use clinic::state::form::{FormController, FormSchema};
use clinic::state::list::{ListFetcher, Resource};
use clinic::state::session::{SessionReader, SessionStore};
use clinic::state::storage::FileStorage;
use clinic::util::field::{FieldInput, FieldKind, FieldSpec, SelectOption};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("not logged in; run `clinic login` first")]
    NotLoggedIn,
    #[error("input ended before `{0}` was entered")]
    InputClosed(&'static str),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cannot read attachment {}: {source}", path.display())]
    Attachment { path: PathBuf, source: io::Error },
}

#[derive(Parser, Debug)]
#[command(name = "clinic", about = "Clinic management API client")]
struct Cli {
    #[arg(long, env = "CLINIC_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "CLINIC_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a patient account and store the session.
    Register(RegisterArgs),
    Logout,
    Whoami,
    #[command(subcommand)]
    Doctors(DoctorsCommand),
    #[command(subcommand)]
    Schedules(SchedulesCommand),
    #[command(subcommand)]
    Appointments(AppointmentsCommand),
    #[command(subcommand)]
    Records(RecordsCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    mobile: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum DoctorsCommand {
    List,
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SchedulesCommand {
    List,
    Add {
        #[arg(long)]
        doctor_id: Option<String>,
        #[arg(long, help = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long, help = "HH:MM")]
        start_time: Option<String>,
        #[arg(long, help = "HH:MM")]
        end_time: Option<String>,
        #[arg(long)]
        max_appointments: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum AppointmentsCommand {
    List {
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    Book {
        #[arg(long)]
        doctor_id: Option<String>,
        #[arg(long, help = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long, help = "One of the listed time slots")]
        time: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RecordsCommand {
    List,
    Upload {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Path of the file to upload")]
        file: Option<PathBuf>,
    },
}

struct App {
    transport: Rc<dyn Transport>,
    store: Rc<SessionStore>,
}

impl App {
    fn new(config: &ClinicConfig) -> Result<Self, CliError> {
        let transport: Rc<dyn Transport> = Rc::new(HttpTransport::new(&config.api_base_url)?);
        let store = Rc::new(SessionStore::new(Rc::new(FileStorage::new(config.session_file.clone()))));
        Ok(Self { transport, store })
    }

    /// Reader for commands that need a signed-in user.
    fn signed_in(&self) -> Result<SessionReader, CliError> {
        match self.store.read() {
            Some(_) => Ok(self.store.reader()),
            None => Err(CliError::NotLoggedIn),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    if let Err(error) = dotenvy::dotenv() {
        tracing::debug!(%error, "no .env loaded");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClinicConfig::from_values(cli.base_url, cli.session_file, home_dir())?;
    tracing::debug!(base_url = %config.api_base_url, session_file = %config.session_file.display(), "configured");
    let app = App::new(&config)?;

    match cli.command {
        Command::Login { email, password } => run_login(&app, email, password).await,
        Command::Register(args) => run_register(&app, args).await,
        Command::Logout => {
            app.store.clear()?;
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => {
            let session = app.store.read().ok_or(CliError::NotLoggedIn)?;
            println!("{} ({})", session.user.display_name(), session.user_type.as_str());
            Ok(())
        }
        Command::Doctors(command) => run_doctors(&app, command).await,
        Command::Schedules(command) => run_schedules(&app, command).await,
        Command::Appointments(command) => run_appointments(&app, command).await,
        Command::Records(command) => run_records(&app, command).await,
    }
}

// =============================================================================
// AUTH
// =============================================================================

async fn run_login(app: &App, email: Option<String>, password: Option<String>) -> Result<(), CliError> {
    let flow = AuthFlow::new(LoginForm, Rc::clone(&app.transport), Rc::clone(&app.store));
    fill(flow.form(), vec![("email", email), ("password", password)], &[])?;
    let session = submitted(flow.form(), flow.submit().await)?;
    println!("Logged in as {} ({})", session.user.display_name(), session.user_type.as_str());
    Ok(())
}

async fn run_register(app: &App, args: RegisterArgs) -> Result<(), CliError> {
    let flow = AuthFlow::new(RegisterForm, Rc::clone(&app.transport), Rc::clone(&app.store));
    let provided = vec![
        ("firstName", args.first_name),
        ("lastName", args.last_name),
        ("email", args.email),
        ("mobile", args.mobile),
        ("password", args.password),
        ("confirmPassword", args.confirm_password),
    ];
    fill(flow.form(), provided, &[])?;
    let session = submitted(flow.form(), flow.submit().await)?;
    println!("Registered as {} ({})", session.user.display_name(), session.user_type.as_str());
    Ok(())
}

// =============================================================================
// ADMIN
// =============================================================================

async fn run_doctors(app: &App, command: DoctorsCommand) -> Result<(), CliError> {
    let dash = admin_dashboard(&app.transport, &app.signed_in()?);
    loaded(dash.primary().list(), dash.mount().await)?;

    if let DoctorsCommand::Add { name, specialization, email, mobile, password } = command {
        let panel = dash.primary();
        let provided = vec![
            ("name", name),
            ("specialization", specialization),
            ("email", email),
            ("mobile", mobile),
            ("password", password),
        ];
        fill(panel.form(), provided, &[])?;
        let doctor = submitted(panel.form(), panel.submit().await)?;
        println!("Added doctor {} ({})\n", doctor.name, doctor.id);
    }

    println!("Current Doctors");
    for doctor in dash.primary().list().items().iter() {
        println!("{}", render_doctor(doctor));
    }
    Ok(())
}

async fn run_schedules(app: &App, command: SchedulesCommand) -> Result<(), CliError> {
    let dash = admin_dashboard(&app.transport, &app.signed_in()?);
    loaded(dash.primary().list(), dash.mount().await)?;
    loaded(dash.secondary().list(), dash.select(Tab::Secondary).await)?;
    let doctors = dash.primary().list().items();

    if let SchedulesCommand::Add { doctor_id, date, start_time, end_time, max_appointments } = command {
        let panel = dash.secondary();
        let provided = vec![
            ("doctorId", doctor_id),
            ("date", date),
            ("startTime", start_time),
            ("endTime", end_time),
            ("maxAppointments", max_appointments.map(|max| max.to_string())),
        ];
        let doctor_choices = doctor_options(&doctors);
        fill(panel.form(), provided, &[("doctorId", doctor_choices.as_slice())])?;
        let schedule = submitted(panel.form(), panel.submit().await)?;
        println!("Added schedule {}\n", schedule.id);
    }

    println!("Current Schedules");
    for schedule in dash.secondary().list().items().iter() {
        println!("{}", render_schedule(schedule, &doctors));
    }
    Ok(())
}

// =============================================================================
// PATIENT
// =============================================================================

async fn run_appointments(app: &App, command: AppointmentsCommand) -> Result<(), CliError> {
    let session = app.signed_in()?;
    let dash = patient_dashboard(&app.transport, &session);

    match command {
        AppointmentsCommand::List { all } => {
            loaded(dash.primary().list(), dash.mount().await)?;
            let items = dash.primary().list().items();
            if items.is_empty() {
                println!("{NO_APPOINTMENTS}");
                return Ok(());
            }
            println!("Upcoming Appointments");
            for appointment in visible(&items, all) {
                println!("{}", render_appointment(appointment));
            }
            if !all && items.len() > PREVIEW_LIMIT {
                println!("({} more; pass --all to show every appointment)", items.len() - PREVIEW_LIMIT);
            }
            Ok(())
        }
        AppointmentsCommand::Book { doctor_id, date, time, reason } => {
            let doctors = ListFetcher::<Doctor>::new(Rc::clone(&app.transport), session);
            let doctors = loaded(&doctors, doctors.load().await)?;
            let panel = dash.primary();
            let provided = vec![("doctorId", doctor_id), ("date", date), ("time", time), ("reason", reason)];
            let doctor_choices = doctor_options(&doctors);
            let slot_choices = time_slot_options();
            fill(
                panel.form(),
                provided,
                &[("doctorId", doctor_choices.as_slice()), ("time", slot_choices.as_slice())],
            )?;
            let appointment = submitted(panel.form(), panel.submit().await)?;
            println!("{}", booking_confirmation(&appointment));
            Ok(())
        }
    }
}

async fn run_records(app: &App, command: RecordsCommand) -> Result<(), CliError> {
    let dash = patient_dashboard(&app.transport, &app.signed_in()?);
    loaded(dash.secondary().list(), dash.select(Tab::Secondary).await)?;

    if let RecordsCommand::Upload { title, description, file } = command {
        let panel = dash.secondary();
        let file = file.map(|path| path.to_string_lossy().into_owned());
        fill(panel.form(), vec![("title", title), ("description", description), ("file", file)], &[])?;
        submitted(panel.form(), panel.submit().await)?;
        println!("{UPLOADED}\n");
    }

    let records = dash.secondary().list().items();
    if records.is_empty() {
        println!("{NO_RECORDS}");
    }
    for record in records.iter() {
        println!("{}", render_record(record));
    }
    Ok(())
}

// =============================================================================
// FORM AND LIST PLUMBING
// =============================================================================

/// Apply flag values, then prompt for every field still blank.
///
/// Fields with a non-blank default (e.g. max appointments) are kept unless a
/// flag overrides them. Blank answers are accepted; validation reports them.
fn fill<S: FormSchema>(
    form: &FormController<S>,
    provided: Vec<(&'static str, Option<String>)>,
    options: &[(&str, &[SelectOption])],
) -> Result<(), CliError> {
    let mut provided: BTreeMap<&str, String> =
        provided.into_iter().filter_map(|(name, value)| value.map(|value| (name, value))).collect();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    for spec in form.schema().fields() {
        if let Some(raw) = provided.remove(spec.name) {
            apply(form, spec, &raw)?;
            continue;
        }
        if form.field(spec.name).is_some_and(|value| !value.is_blank()) {
            continue;
        }
        let choices = options
            .iter()
            .find(|(name, _)| *name == spec.name)
            .map(|(_, choices)| *choices)
            .unwrap_or_default();
        let field = FieldInput::new(spec).with_options(choices);
        if spec.kind == FieldKind::File {
            let mut entered = None;
            if !field.prompt(&mut input, &mut output, |raw| entered = Some(raw.to_owned()))? {
                return Err(CliError::InputClosed(spec.label));
            }
            apply(form, spec, &entered.unwrap_or_default())?;
        } else if !field.prompt(&mut input, &mut output, |raw| form.set_field(spec.name, raw))? {
            return Err(CliError::InputClosed(spec.label));
        }
    }
    Ok(())
}

fn apply<S: FormSchema>(form: &FormController<S>, spec: &FieldSpec, raw: &str) -> Result<(), CliError> {
    if spec.kind != FieldKind::File {
        form.set_field(spec.name, raw);
        return Ok(());
    }
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(());
    }
    let path = PathBuf::from(raw);
    match FileAttachment::from_path(&path) {
        Ok(file) => {
            form.set_field(spec.name, file);
            Ok(())
        }
        Err(source) => Err(CliError::Attachment { path, source }),
    }
}

/// Map a submission outcome to the message the form displays.
fn submitted<S: FormSchema, T>(form: &FormController<S>, outcome: Result<T, ClientError>) -> Result<T, CliError> {
    outcome.map_err(|error| {
        let draft = form.draft();
        for spec in form.schema().fields() {
            tracing::debug!(field = %FieldInput::new(spec).render(draft.get(spec.name)), "draft kept");
        }
        form.error().map_or(CliError::Client(error), CliError::Rejected)
    })
}

/// Map a load outcome to the message the list displays.
fn loaded<T: Resource, R>(list: &ListFetcher<T>, outcome: Result<R, ClientError>) -> Result<R, CliError> {
    outcome.map_err(|error| list.error().map_or(CliError::Client(error), CliError::Rejected))
}
