//! Minimal CLI: samples → merged, upgraded shape → (model | tree)
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rayon::prelude::*;
use serde_json::Value;

use crate::naming::SingularTable;
use crate::schema::Schema;
use crate::upgrade::Upgrader;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer one named, generalized shape from sample JSON documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print the type model a code renderer consumes
    Model(ModelOut),
    /// infer and print the full shape tree
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON); every line is a sample
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is a sample
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct InferSettings {
    /// name of the root type
    #[arg(long, default_value = "Root")]
    root_type: String,

    /// JSON object of plural → singular names used for array elements
    #[arg(long)]
    singulars: Option<PathBuf>,

    /// also name and promote fields nested under optional values
    #[arg(long, default_value_t = false)]
    upgrade_optionals: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// All samples, in input order: files as given (globs expanded), then
    /// documents within a file, then jq outputs within a document.
    fn load_samples(&self) -> Result<Vec<Value>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let per_file = source_paths
            .par_iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>>>()?;
        let samples: Vec<Value> = per_file.into_iter().flatten().collect();
        info!("loaded {} samples from {} files", samples.len(), source_paths.len());
        Ok(samples)
    }

    fn load_file(&self, source_path: &Path) -> Result<Vec<Value>> {
        let display = source_path.display();
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file {display}"))?;
        let parsed = if self.ndjson {
            crate::path_de::stream_with_path::<Value>(&source)
        } else {
            crate::path_de::from_str_with_path::<Value>(&source).map(|doc| vec![doc])
        };
        let documents = parsed.with_context(|| format!("failed to parse JSON source file {display}"))?;

        let mut out = Vec::with_capacity(documents.len());
        for document in documents {
            let document = match self.json_pointer.as_deref() {
                None => document,
                Some(pointer) => document
                    .pointer(pointer)
                    .cloned()
                    .ok_or_else(|| anyhow!("JSON pointer `{pointer}` matched nothing in {display}"))?,
            };
            match self.jq_expr.as_deref() {
                None => out.push(document),
                Some(jq_expr) => {
                    let results = crate::jq_exec::run_jaq(jq_expr, &document)
                        .with_context(|| format!("failed to apply jq expression to {display}"))?;
                    out.extend(results);
                }
            }
        }
        Ok(out)
    }
}

impl InferSettings {
    fn singular_table(&self) -> Result<SingularTable> {
        let Some(path) = self.singulars.as_ref() else {
            return Ok(SingularTable::default());
        };
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read singulars file {}", path.display()))?;
        let table: HashMap<String, String> = crate::path_de::from_str_with_path(&source)
            .with_context(|| format!("invalid singulars file {}", path.display()))?;
        Ok(SingularTable::new(table))
    }

    fn infer(&self, samples: &[Value]) -> Result<Schema> {
        if samples.is_empty() {
            bail!("no samples to infer from");
        }
        let seeds = crate::seed::seeds_from_values(samples, &self.root_type);
        let merged = crate::merge::reduce(seeds)
            .with_context(|| format!("failed to merge samples of `{}`", self.root_type))?;
        let upgrader = Upgrader::new()
            .with_singularizer(self.singular_table()?)
            .through_optionals(self.upgrade_optionals);
        let upgraded = upgrader
            .upgrade(&merged, &self.root_type)
            .with_context(|| format!("failed to upgrade `{}`", self.root_type))?;
        Ok(upgraded)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Model(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let samples = target.input_settings.load_samples()?;
                let shape = target.infer_settings.infer(&samples)?;
                let model = crate::emit::emit_model(&shape);
                write_output(target.out.as_deref(), &serde_json::to_string_pretty(&model)?)
            }
            Command::Tree(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let samples = target.input_settings.load_samples()?;
                let shape = target.infer_settings.infer(&samples)?;
                write_output(target.out.as_deref(), &serde_json::to_string_pretty(&shape)?)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
            info!("wrote {}", out.display());
        }
        None => println!("{src}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // sorted by the glob crate, so sample order is reproducible
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input(files: &[&Path]) -> InputSettings {
        InputSettings {
            ndjson: false,
            json_pointer: None,
            jq_expr: None,
            input: files.iter().map(|p| p.to_string_lossy().into_owned()).collect(),
        }
    }

    fn infer_settings(root: &str) -> InferSettings {
        InferSettings { root_type: root.to_string(), singulars: None, upgrade_optionals: false }
    }

    fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn glob_inputs_load_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.json", r#"{"n": 2}"#);
        write_file(dir.path(), "a.json", r#"{"n": 1}"#);
        let pattern = dir.path().join("*.json");
        let settings = input(&[pattern.as_path()]);
        let samples = settings.load_samples().unwrap();
        assert_eq!(samples, vec![serde_json::json!({"n": 1}), serde_json::json!({"n": 2})]);
    }

    #[test]
    fn ndjson_pointer_and_jq() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "pets.ndjson",
            "{\"data\": {\"pets\": [{\"id\": 1}]}}\n{\"data\": {\"pets\": [{\"id\": 2}, {\"id\": 3}]}}\n",
        );
        let mut settings = input(&[path.as_path()]);
        settings.ndjson = true;
        settings.json_pointer = Some("/data".into());
        settings.jq_expr = Some(".pets[]".into());
        let samples = settings.load_samples().unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2], serde_json::json!({"id": 3}));
    }

    #[test]
    fn missing_pointer_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.json", r#"{"a": 1}"#);
        let mut settings = input(&[path.as_path()]);
        settings.json_pointer = Some("/nope".into());
        assert!(settings.load_samples().is_err());
    }

    #[test]
    fn infer_uses_singulars_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_file(dir.path(), "singulars.json", r#"{"people": "person"}"#);
        let mut settings = infer_settings("people");
        settings.singulars = Some(table);
        let samples = vec![serde_json::json!([{"name": "ada"}])];
        let shape = settings.infer(&samples).unwrap();
        assert_eq!(shape.descriptor(), "[Person]");
    }

    #[test]
    fn incompatible_samples_fail_with_context() {
        let samples = vec![serde_json::json!({"a": true}), serde_json::json!({"a": "x"})];
        let err = infer_settings("Root").infer(&samples).unwrap_err();
        assert!(err.to_string().contains("failed to merge samples of `Root`"));
        let cause = err.downcast_ref::<crate::error::MergeError>().unwrap();
        assert_eq!(cause.sample(), Some(1));
    }

    #[test]
    fn no_samples_is_an_error() {
        assert!(infer_settings("Root").infer(&[]).is_err());
    }
}
