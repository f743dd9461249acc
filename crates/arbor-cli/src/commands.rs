use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use arbor_annotate::{annotate_with, AnnotateOptions, AnnotatedValue};
use arbor_diff::{diff_annotated, EditOp, EditSet};
use arbor_format::Format;
use arbor_merge::{merge_values_with, MergeOptions, MergeOutcome};
use arbor_types::Value;
use colored::Colorize;
use tracing::{debug, info};

use crate::cli::*;
use crate::config::{DriverConfig, Settings};

/// Exit status for I/O, parse, configuration and annotation failures.
pub const ERROR_EXIT: u8 = 2;

/// How a successful command finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The merge left conflicts in the written document.
    Conflicted,
}

impl Status {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Status::Success => ExitCode::SUCCESS,
            Status::Conflicted => ExitCode::from(1),
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Status> {
    let config = DriverConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Merge(args) => cmd_merge(&config, args),
        Command::Diff(args) => cmd_diff(&config, args),
        Command::Annotate(args) => cmd_annotate(&config, args),
    }
}

fn cmd_merge(config: &DriverConfig, args: MergeArgs) -> anyhow::Result<Status> {
    let settings = config.resolve(&args.document);
    let target = args.output.as_deref().unwrap_or(&args.ours);
    let mut candidates: Vec<&Path> = Vec::new();
    candidates.extend(args.path.as_deref());
    candidates.push(&args.ours);
    candidates.push(target);
    let format = settings.format_for(&candidates)?;

    let ours = read_document(&args.ours, format)?;
    let base = read_document(&args.base, format)?;
    let theirs = read_document(&args.theirs, format)?;

    let options = MergeOptions::with_reserved_field(settings.reserved_field.as_str());
    let outcome = merge_values_with(&ours, &base, &theirs, &settings.identify, &options)?;
    write_document(target, format, &outcome.tree())?;

    match args.report {
        ReportFormat::Text => print_conflicts(target, &outcome),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.report())?),
    }

    if outcome.is_clean() {
        info!(file = %target.display(), "merged cleanly");
        Ok(Status::Success)
    } else {
        info!(file = %target.display(), conflicts = outcome.conflict_count(), "merge left conflicts");
        Ok(Status::Conflicted)
    }
}

fn cmd_diff(config: &DriverConfig, args: DiffArgs) -> anyhow::Result<Status> {
    let settings = config.resolve(&args.document);
    let format = settings.format_for(&[args.old.as_path(), args.new.as_path()])?;
    let old = load_annotated(&args.old, format, &settings)?;
    let new = load_annotated(&args.new, format, &settings)?;
    let edits = diff_annotated(&old, &new);
    debug!(ops = edits.len(), reordered = edits.reordered.len(), "computed diff");

    match args.report {
        ReportFormat::Text => print_edits(&edits),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&edits)?),
    }
    Ok(Status::Success)
}

fn cmd_annotate(config: &DriverConfig, args: AnnotateArgs) -> anyhow::Result<Status> {
    let settings = config.resolve(&args.document);
    let format = settings.format_for(&[args.file.as_path()])?;
    let annotated = load_annotated(&args.file, format, &settings)?;
    let rendered = annotated.render(&settings.reserved_field);
    print!("{}", format.render(&rendered)?);
    Ok(Status::Success)
}

fn read_document(path: &Path, format: Format) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    format
        .parse(&text)
        .with_context(|| format!("failed to parse {} as {format}", path.display()))
}

fn write_document(path: &Path, format: Format, tree: &Value) -> anyhow::Result<()> {
    let text = format
        .render(tree)
        .with_context(|| format!("failed to render merged {format} document"))?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn load_annotated(path: &Path, format: Format, settings: &Settings) -> anyhow::Result<AnnotatedValue> {
    let tree = read_document(path, format)?;
    let options = AnnotateOptions::with_reserved_field(settings.reserved_field.as_str());
    annotate_with(&tree, &settings.identify, &options)
        .with_context(|| format!("failed to annotate {}", path.display()))
}

fn print_conflicts(target: &Path, outcome: &MergeOutcome) {
    if outcome.is_clean() {
        return;
    }
    eprintln!(
        "{} {} conflict(s) in {}; base values kept at:",
        "✗".red().bold(),
        outcome.conflict_count(),
        target.display().to_string().bold()
    );
    for conflict in outcome.conflicts() {
        eprintln!("  {} {}", conflict.path.to_string().yellow(), format!("({})", conflict.kind).dimmed());
        eprintln!("    ours:   {}", conflict.ours);
        eprintln!("    theirs: {}", conflict.theirs);
    }
}

fn print_edits(edits: &EditSet) {
    if edits.is_empty() {
        println!("No changes.");
        return;
    }
    for op in &edits.ops {
        let line = op.to_string();
        match op {
            EditOp::Add { .. } => println!("{} {}", "+".green().bold(), line.green()),
            EditOp::Remove { .. } => println!("{} {}", "-".red().bold(), line.red()),
            EditOp::Replace { .. } => println!("{} {}", "~".yellow().bold(), line),
        }
    }
    for path in &edits.reordered {
        println!("{} reorder {}", "↕".cyan(), path.to_string().cyan());
    }
    println!(
        "{} added, {} removed, {} replaced",
        edits.additions(),
        edits.removals(),
        edits.replacements()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn merge_args(ours: PathBuf, base: PathBuf, theirs: PathBuf) -> MergeArgs {
        MergeArgs {
            ours,
            base,
            theirs,
            path: None,
            output: None,
            report: ReportFormat::Text,
            document: DocumentArgs::default(),
        }
    }

    fn read_json(path: &Path) -> Value {
        Format::Json.parse(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn clean_merge_writes_into_ours() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), "ours.json", r#"{"name": "svc", "replicas": 3}"#);
        let base = write(dir.path(), "base.json", r#"{"name": "svc", "replicas": 2}"#);
        let theirs = write(dir.path(), "theirs.json", r#"{"name": "svc", "replicas": 2, "timeout": 30}"#);

        let status = cmd_merge(&DriverConfig::default(), merge_args(ours.clone(), base, theirs)).unwrap();
        assert_eq!(status, Status::Success);
        assert_eq!(
            read_json(&ours),
            Format::Json.parse(r#"{"name": "svc", "replicas": 3, "timeout": 30}"#).unwrap()
        );
    }

    #[test]
    fn conflicted_merge_writes_partial_tree() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), "ours.json", r#"{"port": 8080, "debug": true}"#);
        let base = write(dir.path(), "base.json", r#"{"port": 80, "debug": false}"#);
        let theirs = write(dir.path(), "theirs.json", r#"{"port": 9090, "debug": false}"#);

        let status = cmd_merge(&DriverConfig::default(), merge_args(ours.clone(), base, theirs)).unwrap();
        assert_eq!(status, Status::Conflicted);
        assert_eq!(read_json(&ours), Format::Json.parse(r#"{"port": 80, "debug": true}"#).unwrap());
    }

    #[test]
    fn output_flag_leaves_ours_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), "ours.json", r#"{"a": 1}"#);
        let base = write(dir.path(), "base.json", r#"{}"#);
        let theirs = write(dir.path(), "theirs.json", r#"{"b": 2}"#);
        let out = dir.path().join("merged.json");

        let mut args = merge_args(ours.clone(), base, theirs);
        args.output = Some(out.clone());
        cmd_merge(&DriverConfig::default(), args).unwrap();

        assert_eq!(read_json(&out), Format::Json.parse(r#"{"a": 1, "b": 2}"#).unwrap());
        assert_eq!(fs::read_to_string(&ours).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn driver_temp_files_use_repository_path_format() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), ".merge_file_a", "[[svc]]\nname = \"web\"\nport = 81\n");
        let base = write(dir.path(), ".merge_file_o", "[[svc]]\nname = \"web\"\nport = 80\n");
        let theirs = write(
            dir.path(),
            ".merge_file_b",
            "[[svc]]\nname = \"web\"\nport = 80\n\n[[svc]]\nname = \"db\"\nport = 5432\n",
        );

        let mut args = merge_args(ours.clone(), base, theirs);
        args.path = Some(PathBuf::from("deploy/services.toml"));
        let status = cmd_merge(&DriverConfig::default(), args).unwrap();
        assert_eq!(status, Status::Success);

        let merged = Format::Toml.parse(&fs::read_to_string(&ours).unwrap()).unwrap();
        let svc = merged.get("svc").and_then(Value::as_sequence).unwrap();
        assert_eq!(svc.len(), 2);
        assert_eq!(svc[0].get("port"), Some(&Value::from(81)));
        assert_eq!(svc[1].get("name"), Some(&Value::from("db")));
    }

    #[test]
    fn undetectable_format_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), "ours", "{}");
        let base = write(dir.path(), "base", "{}");
        let theirs = write(dir.path(), "theirs", "{}");
        let err = cmd_merge(&DriverConfig::default(), merge_args(ours, base, theirs)).unwrap_err();
        assert!(err.to_string().contains("--format"));
    }

    #[test]
    fn reserved_field_collision_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), "ours.json", r#"{"xs": [{"__id__": 1}]}"#);
        let base = write(dir.path(), "base.json", r#"{"xs": []}"#);
        let theirs = write(dir.path(), "theirs.json", r#"{"xs": []}"#);
        let err = cmd_merge(&DriverConfig::default(), merge_args(ours.clone(), base, theirs)).unwrap_err();
        assert!(format!("{err:#}").contains("__id__"));
        // Nothing is written on error.
        assert_eq!(fs::read_to_string(&ours).unwrap(), r#"{"xs": [{"__id__": 1}]}"#);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), "ours.json", "{");
        let base = write(dir.path(), "base.json", "{}");
        let theirs = write(dir.path(), "theirs.json", "{}");
        let err = cmd_merge(&DriverConfig::default(), merge_args(ours, base, theirs)).unwrap_err();
        assert!(err.to_string().contains("ours.json"));
    }

    #[test]
    fn config_id_fields_apply() {
        let dir = tempfile::tempdir().unwrap();
        let ours = write(dir.path(), "ours.json", r#"[{"uid": 1, "v": "ours"}, {"uid": 2, "v": "b"}]"#);
        let base = write(dir.path(), "base.json", r#"[{"uid": 1, "v": "a"}, {"uid": 2, "v": "b"}]"#);
        let theirs = write(dir.path(), "theirs.json", r#"[{"uid": 1, "v": "a"}, {"uid": 2, "v": "theirs"}]"#);
        let config = DriverConfig {
            id_fields: vec!["uid".into()],
            ..DriverConfig::default()
        };
        let status = cmd_merge(&config, merge_args(ours.clone(), base, theirs)).unwrap();
        assert_eq!(status, Status::Success);
        assert_eq!(
            read_json(&ours),
            Format::Json.parse(r#"[{"uid": 1, "v": "ours"}, {"uid": 2, "v": "theirs"}]"#).unwrap()
        );
    }

    #[test]
    fn diff_and_annotate_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let old = write(dir.path(), "old.json", r#"{"svc": [{"name": "web"}]}"#);
        let new = write(dir.path(), "new.json", r#"{"svc": [{"name": "web"}, {"name": "db"}]}"#);

        let diff = DiffArgs {
            old,
            new: new.clone(),
            report: ReportFormat::Json,
            document: DocumentArgs::default(),
        };
        assert_eq!(cmd_diff(&DriverConfig::default(), diff).unwrap(), Status::Success);

        let annotate = AnnotateArgs {
            file: new,
            document: DocumentArgs::default(),
        };
        assert_eq!(cmd_annotate(&DriverConfig::default(), annotate).unwrap(), Status::Success);
    }
}
