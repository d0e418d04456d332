use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use contacts_client::codec::excel::{XLSX_MIME, contact_rows, timestamped_filename};
use contacts_client::codec::{FileFormat, read_contacts_file};
use contacts_client::config::Config;
use contacts_client::download::{Download, DownloadSink, FileSink};
use contacts_client::export::{
    ExportOutcome, NOTHING_TO_EXPORT, export_to_csv, export_to_excel, export_to_json,
};
use contacts_client::validate::validate_contacts;
use contacts_client::{Contact, ContactsClient};

#[derive(Parser, Debug)]
#[command(name = "contacts")]
#[command(version)]
#[command(about = "Manage, import and export contacts on a contacts service")]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Generate example config and exit
    #[arg(long)]
    generate_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List contacts
    List {
        /// Only bookmarked contacts
        #[arg(long)]
        bookmarked: bool,
    },
    /// Show one contact
    Get { id: i64 },
    /// Create a contact
    Add(ContactArgs),
    /// Replace a contact's fields
    Update {
        id: i64,
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Delete a contact
    Delete { id: i64 },
    /// Search contacts by keyword
    Search { keyword: String },
    /// Bookmark a contact
    Bookmark { id: i64 },
    /// Remove a contact's bookmark
    Unbookmark { id: i64 },
    /// Flip a contact's bookmark
    Toggle { id: i64 },
    /// Parse a CSV, JSON or Excel file and optionally upload it
    Import {
        file: PathBuf,
        /// Create every parsed contact on the server
        #[arg(long)]
        upload: bool,
        /// Upload even when validation reports problems
        #[arg(long, requires = "upload")]
        force: bool,
    },
    /// Check a CSV, JSON or Excel file without uploading
    Validate { file: PathBuf },
    /// Fetch contacts from the server and save them locally
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output filename inside the configured export directory
        #[arg(short, long)]
        output: Option<String>,
        /// Only bookmarked contacts
        #[arg(long)]
        bookmarked: bool,
    },
    /// Download the workbook rendered by the server
    ServerExport {
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Upload a workbook for server-side import
    ServerImport { file: PathBuf },
}

#[derive(ClapArgs, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    wechat: Option<String>,
    #[arg(long)]
    qq: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    avatar: Option<String>,
}

impl From<ContactArgs> for Contact {
    fn from(args: ContactArgs) -> Self {
        let mut contact = Contact::new(args.name, args.phone);
        contact.email = args.email;
        contact.wechat = args.wechat;
        contact.qq = args.qq;
        contact.address = args.address;
        contact.company = args.company;
        contact.avatar = args.avatar;
        contact
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

const EXAMPLE_CONFIG: &str = include_str!("../example-config.yaml");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.generate_config {
        println!("{}", EXAMPLE_CONFIG);
        return Ok(());
    }

    let config = Config::load_or_default(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.min_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("{} v{}", contacts_client::NAME, contacts_client::VERSION);

    let Some(command) = args.command else {
        anyhow::bail!("no command given, see --help");
    };

    if let Err(e) = run(command, &config).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let client = ContactsClient::new(&config.api)?;
    let sink = FileSink::new(&config.export.output_dir);
    debug!("Service at {}, exports go to {}", client.base_url(), sink.dir().display());

    match command {
        Command::List { bookmarked } => {
            let contacts = if bookmarked {
                client.get_bookmarked_contacts().await?
            } else {
                client.get_all_contacts().await?
            };
            print_json(&contacts)?;
        }
        Command::Get { id } => print_json(&client.get_contact_by_id(id).await?)?,
        Command::Add(contact) => {
            let contact = Contact::from(contact);
            warn_invalid(std::slice::from_ref(&contact));
            print_json(&client.add_contact(&contact).await?)?;
        }
        Command::Update { id, contact } => {
            let contact = Contact::from(contact);
            warn_invalid(std::slice::from_ref(&contact));
            print_json(&client.update_contact(id, &contact).await?)?;
        }
        Command::Delete { id } => {
            client.delete_contact(id).await?;
            println!("deleted contact {}", id);
        }
        Command::Search { keyword } => print_json(&client.search_contacts(&keyword).await?)?,
        Command::Bookmark { id } => print_json(&client.bookmark_contact(id).await?)?,
        Command::Unbookmark { id } => print_json(&client.unbookmark_contact(id).await?)?,
        Command::Toggle { id } => print_json(&client.toggle_bookmark(id).await?)?,
        Command::Import { file, upload, force } => import(&client, &file, upload, force).await?,
        Command::Validate { file } => {
            let contacts = read_contacts_file(&file).await?;
            let problems = validate_contacts(&contacts);
            if problems.is_empty() {
                println!("{} contacts, no problems found", contacts.len());
            } else {
                for problem in &problems {
                    println!("{}", problem);
                }
            }
        }
        Command::Export { format, output, bookmarked } => {
            let contacts = if bookmarked {
                client.get_bookmarked_contacts().await?
            } else {
                client.get_all_contacts().await?
            };
            let output = output.as_deref();
            let outcome = match format {
                ExportFormat::Csv => export_to_csv(&contacts, output, &sink)?,
                ExportFormat::Json => export_to_json(&contacts, output, &sink)?,
                ExportFormat::Xlsx => {
                    if contacts.is_empty() {
                        ExportOutcome::NothingToExport
                    } else {
                        let filename = output.map(str::to_string).unwrap_or_else(timestamped_filename);
                        export_to_excel(&contact_rows(&contacts), Some(&filename), &sink)?
                    }
                }
            };
            report(&outcome);
        }
        Command::ServerExport { output } => {
            let bytes = client.export_excel().await?;
            if bytes.is_empty() {
                report(&ExportOutcome::NothingToExport);
            } else {
                let filename = output.unwrap_or_else(timestamped_filename);
                let path = sink.deliver(Download::new(filename, XLSX_MIME, bytes))?;
                report(&ExportOutcome::Saved(path));
            }
        }
        Command::ServerImport { file } => {
            if FileFormat::from_path(&file) != Some(FileFormat::Excel) {
                anyhow::bail!("only Excel files (.xlsx, .xls) can be imported on the server");
            }
            let filename = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "contacts.xlsx".to_string());
            let content = tokio::fs::read(&file).await?;
            println!("{}", client.import_excel(&filename, content).await?);
        }
    }

    Ok(())
}

async fn import(client: &ContactsClient, file: &Path, upload: bool, force: bool) -> anyhow::Result<()> {
    let contacts = read_contacts_file(file).await?;
    let problems = validate_contacts(&contacts);
    for problem in &problems {
        eprintln!("{}", problem);
    }

    if !upload {
        return print_json(&contacts);
    }

    if !problems.is_empty() && !force {
        anyhow::bail!("{} validation problems, nothing uploaded (use --force to upload anyway)", problems.len());
    }

    let mut created = 0usize;
    let mut failed = 0usize;
    for (index, contact) in contacts.iter().enumerate() {
        match client.add_contact(contact).await {
            Ok(_) => created += 1,
            Err(e) => {
                failed += 1;
                warn!("Row {} ({}) was not imported: {}", index + 1, contact.name, e);
            }
        }
    }

    println!("imported {} contacts, {} failed", created, failed);
    Ok(())
}

fn warn_invalid(contacts: &[Contact]) {
    for problem in validate_contacts(contacts) {
        warn!("{}", problem);
    }
}

fn report(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Saved(path) => println!("saved {}", path.display()),
        ExportOutcome::NothingToExport => eprintln!("{}", NOTHING_TO_EXPORT),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
