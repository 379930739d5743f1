use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexicon::persist::{read_lexicon, read_lexicon_json, write_lexicon, write_lexicon_json};
use lexicon::{Counts, FieldCounts, FieldId, Lexicon, OOV_TERM};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// One already-tokenized document: field id -> terms in that field.
/// Other keys such as `id` are ignored.
#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(default)]
    fields: BTreeMap<FieldId, Vec<String>>,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and inspect term statistics lexicons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a lexicon from a JSONL file or a directory of JSONL files
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output lexicon file
        #[arg(long)]
        output: String,
        /// Write JSON instead of the binary archive
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print collection-wide statistics
    Stats {
        #[arg(long)]
        index: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print id and counts for each term
    Lookup {
        #[arg(long)]
        index: String,
        #[arg(long, default_value_t = false)]
        json: bool,
        terms: Vec<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, json } => build(Path::new(&input), Path::new(&output), json),
        Commands::Stats { index, json } => {
            let lex = load(Path::new(&index), json)?;
            print!("{}", format_stats(&lex));
            Ok(())
        }
        Commands::Lookup { index, json, terms } => {
            let lex = load(Path::new(&index), json)?;
            for t in terms {
                println!("{}", format_lookup(&lex, &t)?);
            }
            Ok(())
        }
    }
}

fn format_stats(lex: &Lexicon) -> String {
    format!(
        "document_count\t{}\nterm_count\t{}\nlength\t{}\n",
        lex.document_count(),
        lex.term_count(),
        lex.length()
    )
}

/// `term<TAB>id<TAB>document_count<TAB>term_count`, or `term<TAB>oov`.
fn format_lookup(lex: &Lexicon, term: &str) -> Result<String> {
    let id = lex.term_id(term);
    if lex.is_oov(id) {
        return Ok(format!("{term}\toov"));
    }
    let stats = lex.get(id)?;
    Ok(format!("{term}\t{id}\t{}\t{}", stats.document_count(), stats.term_count()))
}

/// Per-term accumulator while ingesting documents.
#[derive(Default)]
struct Accum {
    counts: Counts,
    fields: FieldCounts,
}

#[derive(Default)]
struct Collector {
    docs: u64,
    occurrences: u64,
    terms: BTreeMap<String, Accum>,
}

impl Collector {
    fn ingest(&mut self, doc: &InputDoc) {
        self.docs += 1;
        let mut seen_in_doc: HashSet<&str> = HashSet::new();
        for (&field, tokens) in &doc.fields {
            let mut seen_in_field: HashSet<&str> = HashSet::new();
            for token in tokens {
                self.occurrences += 1;
                // the sentinel string has no entry of its own
                if token == OOV_TERM {
                    continue;
                }
                let acc = self.terms.entry(token.clone()).or_default();
                acc.counts.term_count += 1;
                let fc = acc.fields.entry(field).or_default();
                fc.term_count += 1;
                if seen_in_field.insert(token.as_str()) {
                    fc.document_count += 1;
                }
                if seen_in_doc.insert(token.as_str()) {
                    acc.counts.document_count += 1;
                }
            }
        }
    }

    /// Terms are appended in ascending string order so output is reproducible.
    fn finish(self) -> Result<Lexicon> {
        let mut lex = Lexicon::new(Counts::new(self.docs, self.occurrences));
        for (term, acc) in self.terms {
            lex.push_back(term, acc.counts, acc.fields)?;
        }
        Ok(lex)
    }
}

fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn collect(input: &Path) -> Result<Collector> {
    let mut collector = Collector::default();
    for file in input_files(input) {
        let f = File::open(&file).with_context(|| format!("opening {}", file.display()))?;
        for (lineno, line) in BufReader::new(f).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let doc: InputDoc = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
            collector.ingest(&doc);
        }
    }
    Ok(collector)
}

fn build(input: &Path, output: &Path, json: bool) -> Result<()> {
    let collector = collect(input)?;
    tracing::info!(num_docs = collector.docs, num_terms = collector.terms.len(), "ingested documents");
    let lex = collector.finish()?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(output).with_context(|| format!("creating {}", output.display()))?);
    if json {
        write_lexicon_json(&mut w, &lex)?;
    } else {
        write_lexicon(&mut w, &lex)?;
    }
    tracing::info!(output = %output.display(), "lexicon build complete");
    Ok(())
}

fn load(path: &Path, json: bool) -> Result<Lexicon> {
    let mut r = BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let lex = if json { read_lexicon_json(&mut r)? } else { read_lexicon(&mut r)? };
    Ok(lex)
}
