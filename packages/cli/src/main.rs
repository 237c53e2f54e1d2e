mod api;
mod output;
mod session;
mod state;
mod validate;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use api::ApiClient;
use session::{Session, SubmitOutcome};
use state::Action;
use validate::Field;

#[derive(Parser)]
#[command(name = "regdesk", about = "Client for the Regdesk registration service")]
struct Cli {
    /// Base URL of the registration server
    #[arg(
        long,
        env = "REGDESK_SERVER_URL",
        default_value = "http://127.0.0.1:5000",
        global = true
    )]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new registration
    Register(FormArgs),
    /// List all registrations
    List,
    /// Update an existing registration (replaces all fields)
    Update {
        id: i32,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete one or more registrations
    Delete {
        #[arg(required = true)]
        ids: Vec<i32>,
    },
    /// Download a stored document by its reference
    Fetch {
        file_ref: String,
        /// Write to this path instead of the reference name
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    contact: String,
    #[arg(long)]
    qualification: String,
    /// One of: male, female, other
    #[arg(long, default_value = "male")]
    gender: String,
    /// Document to upload (required when registering, optional when updating)
    #[arg(long)]
    file: Option<PathBuf>,
}

impl FormArgs {
    /// Feed the argument values through the form's field-change actions so
    /// the same validation path runs as for any other input source.
    fn apply(self, session: &mut Session) {
        session.dispatch(Action::FieldChanged(Field::FirstName, self.first_name));
        session.dispatch(Action::FieldChanged(Field::LastName, self.last_name));
        session.dispatch(Action::FieldChanged(Field::Email, self.email));
        session.dispatch(Action::FieldChanged(Field::Contact, self.contact));
        session.dispatch(Action::FieldChanged(Field::Qualification, self.qualification));
        session.dispatch(Action::FieldChanged(Field::Gender, self.gender));
        session.dispatch(Action::FileChosen(self.file));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut session = Session::new(ApiClient::new(&cli.server_url));

    match cli.command {
        Commands::Register(form) => {
            form.apply(&mut session);
            finish_submit(session.submit().await)
        }
        Commands::List => {
            session
                .refresh()
                .await
                .context("Failed to fetch registrations")?;
            output::print_registrations(&session.state.rows);
            Ok(())
        }
        Commands::Update { id, form } => {
            session
                .refresh()
                .await
                .context("Failed to fetch registrations")?;
            session.dispatch(Action::EditStart(id));
            if !matches!(session.state.mode, state::Mode::Editing(_)) {
                bail!("Registration {id} not found");
            }
            form.apply(&mut session);
            finish_submit(session.submit().await)
        }
        Commands::Delete { ids } => {
            session
                .refresh()
                .await
                .context("Failed to fetch registrations")?;
            let unique: std::collections::BTreeSet<i32> = ids.into_iter().collect();
            for id in unique {
                session.dispatch(Action::SelectToggle(id));
            }
            let selected: Vec<i32> = session.state.selected.iter().copied().collect();
            let report = session.bulk_delete(selected).await;

            for id in &report.deleted {
                output::print_success(&format!("Deleted registration {id}"));
            }
            for (id, message) in &report.failed {
                output::print_failure(&format!("Failed to delete {id}: {message}"));
            }
            if report.deleted.is_empty() && !report.failed.is_empty() {
                bail!("No registrations were deleted");
            }
            Ok(())
        }
        Commands::Fetch {
            file_ref,
            output: target,
        } => {
            let api = ApiClient::new(&cli.server_url);
            let bytes = api
                .fetch_document(&file_ref)
                .await
                .context("Failed to download document")?;
            let target = target.unwrap_or_else(|| PathBuf::from(&file_ref));
            std::fs::write(&target, bytes)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            output::print_success(&format!("Saved {}", target.display()));
            Ok(())
        }
    }
}

fn finish_submit(outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Accepted(message) => {
            output::print_success(&message);
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            output::print_field_errors(&errors);
            bail!("Validation failed; nothing was submitted")
        }
        SubmitOutcome::Failed(message) => bail!(message),
    }
}
