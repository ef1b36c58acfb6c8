//! Command-line frontend for the namerecall core.
//!
//! # Responsibility
//! - Map user actions (add/edit/list/remove, export/import) onto the core
//!   service.
//! - Own the confirmation gates for destructive actions; the core trusts them.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use clap::{Parser, Subcommand};
use namerecall_core::{
    backup_file_name, db::open_db, init_logging, is_data_uri, parse_tags, AvatarEncoder,
    ImageDecodeError, PersonDraft, PersonFilter, PersonRepository, PersonService,
    SqliteSnapshotStore,
};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "namerecall", version, about = "Single-user contact / name recall tracker")]
struct Cli {
    /// SQLite database file holding the people snapshot.
    #[arg(long, default_value = "namerecall.db")]
    db: PathBuf,
    /// Directory for rolling log files (absolute path). Logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new person.
    Add {
        name: String,
        /// Comma-separated tag labels.
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long, default_value = "")]
        memo: String,
        /// Image file to store as the avatar payload.
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Edit an existing person. Omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Comma-separated tag labels, replacing the current set.
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        memo: Option<String>,
        /// Image file replacing the current avatar.
        #[arg(long)]
        avatar: Option<PathBuf>,
        /// Remove the stored avatar payload.
        #[arg(long, conflicts_with = "avatar")]
        clear_avatar: bool,
    },
    /// Show one person in full.
    Show { id: String },
    /// List people, optionally filtered by tag and/or free-text search.
    List {
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List all distinct tags with member counts.
    Tags,
    /// Delete a person. Requires --yes.
    Remove {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Export the collection as a backup JSON file.
    Export {
        /// Output path; defaults to namerecall_backup_<date>.json.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Preview a backup file, or apply it with --merge / --overwrite.
    Import {
        file: PathBuf,
        /// Union the backup into the live collection, updating on id match.
        #[arg(long)]
        merge: bool,
        /// Replace the live collection entirely. Requires --yes.
        #[arg(long, conflicts_with = "merge")]
        overwrite: bool,
        #[arg(long)]
        yes: bool,
    },
    /// Show collection statistics.
    Stats,
}

/// Encodes avatar files as data URIs without resampling.
///
/// The full square-crop pipeline lives outside the core; this encoder only
/// guarantees a self-contained payload.
struct DataUriEncoder;

impl AvatarEncoder for DataUriEncoder {
    fn encode_file(&self, path: &Path) -> Result<String, ImageDecodeError> {
        let bytes =
            fs::read(path).map_err(|err| ImageDecodeError::Unreadable(err.to_string()))?;
        let mime = mime_guess::from_path(path).first().ok_or_else(|| {
            ImageDecodeError::Unsupported(format!("unknown file type: {}", path.display()))
        })?;
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(ImageDecodeError::Unsupported(format!(
                "not an image file: {mime}"
            )));
        }
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(namerecall_core::default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }

    let conn = open_db(&cli.db)?;
    let store = SqliteSnapshotStore::new(&conn);
    let repo = PersonRepository::load(store)?;
    let mut service = PersonService::new(repo);

    match cli.command {
        Command::Add {
            name,
            tags,
            memo,
            avatar,
        } => {
            let avatar = avatar
                .map(|path| DataUriEncoder.encode_file(&path))
                .transpose()?;
            let person = service.save_person(PersonDraft {
                id: None,
                name,
                tags: parse_tags(&tags),
                memo,
                avatar,
            })?;
            println!("added {} ({})", person.name, person.id);
        }
        Command::Edit {
            id,
            name,
            tags,
            memo,
            avatar,
            clear_avatar,
        } => {
            let existing = service
                .person(&id)
                .ok_or_else(|| format!("person not found: {id}"))?
                .clone();
            let avatar = if clear_avatar {
                None
            } else if let Some(path) = avatar {
                Some(DataUriEncoder.encode_file(&path)?)
            } else {
                existing.avatar.clone()
            };
            let person = service.save_person(PersonDraft {
                id: Some(id),
                name: name.unwrap_or(existing.name),
                tags: tags.map(|t| parse_tags(&t)).unwrap_or(existing.tags),
                memo: memo.unwrap_or(existing.memo),
                avatar,
            })?;
            println!("updated {} ({})", person.name, person.id);
        }
        Command::Show { id } => {
            let person = service
                .person(&id)
                .ok_or_else(|| format!("person not found: {id}"))?;
            println!("id:      {}", person.id);
            println!("name:    {}", person.name);
            println!("tags:    {}", format_tags(&person.tags));
            println!("memo:    {}", person.memo);
            match &person.avatar {
                Some(payload) if is_data_uri(payload) => {
                    println!("avatar:  data URI ({} bytes)", payload.len());
                }
                Some(payload) => println!("avatar:  {payload}"),
                None => println!(
                    "avatar:  none (initials {} on {})",
                    person.initials(),
                    person.color_variant.as_class()
                ),
            }
            println!("updated: {}", person.updated_at);
        }
        Command::List { tag, search } => {
            let filter = PersonFilter { tag, search };
            let view = service.list_people(&filter);
            if view.is_empty() {
                println!("no matches");
            }
            for person in view {
                println!("{}  {}  {}", person.id, person.name, format_tags(&person.tags));
            }
        }
        Command::Tags => {
            for tag in service.unique_tags() {
                println!("#{tag} ({})", service.tag_count(&tag));
            }
        }
        Command::Remove { id, yes } => {
            if !yes {
                return Err("refusing to delete without --yes".into());
            }
            if service.delete_person(&id)? {
                println!("removed {id}");
            } else {
                println!("nothing to remove: {id}");
            }
        }
        Command::Export { out } => {
            let json = service.export_backup()?;
            let path =
                out.unwrap_or_else(|| PathBuf::from(backup_file_name(Utc::now().date_naive())));
            fs::write(&path, &json)
                .map_err(|err| format!("failed to write {}: {err}", path.display()))?;
            println!(
                "exported {} people to {}",
                service.people().len(),
                path.display()
            );
        }
        Command::Import {
            file,
            merge,
            overwrite,
            yes,
        } => {
            let raw = fs::read_to_string(&file)
                .map_err(|err| format!("failed to read backup file {}: {err}", file.display()))?;
            let plan = service.preview_import(&raw)?;
            println!("backup file: {}", file.display());
            println!(
                "  exported:  {}",
                plan.parsed.export_date.as_deref().unwrap_or("unknown")
            );
            println!("  records:   {}", plan.parsed.people.len());
            println!(
                "  new: {}  update: {}",
                plan.preview.new_count, plan.preview.update_count
            );

            if merge {
                let outcome = service.import_merge(&plan.parsed.people)?;
                println!("merged: {} added, {} updated", outcome.added, outcome.updated);
            } else if overwrite {
                if !yes {
                    return Err(format!(
                        "overwrite replaces all {} current records; re-run with --yes to confirm",
                        service.people().len()
                    )
                    .into());
                }
                let replaced = service.import_overwrite(&plan.parsed.people)?;
                println!("replaced collection with {replaced} records");
            } else {
                println!("dry run; pass --merge or --overwrite --yes to apply");
            }
        }
        Command::Stats => {
            let stats = service.stats()?;
            println!("people:   {}", stats.people_count);
            println!("tags:     {}", stats.tag_count);
            println!("snapshot: {:.1} KB", stats.snapshot_bytes as f64 / 1024.0);
        }
    }

    Ok(())
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return "-".to_string();
    }
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}
