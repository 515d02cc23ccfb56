use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use personagen::chat::ChatSession;
use personagen::chunker::{Chunker, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE};
use personagen::completion::CompletionClient;
use personagen::dataset::{TrainingSetReader, TrainingSetWriter};
use personagen::generator::{generate_interviews, GeneratorConfig, DEFAULT_MAX_CHUNKS};
use personagen::persona::PersonaRoster;
use personagen::retrieval::SearchClient;
use personagen::source::collect_documents;

#[derive(Parser)]
#[command(
    name = "personagen",
    version,
    about = "Persona-styled QA dataset generator and terminal chat client"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate persona question/answer pairs from source documents
    Generate {
        /// Source text file or directory
        #[arg(long)]
        input: PathBuf,

        /// Persona roster JSON file
        #[arg(long)]
        personas: PathBuf,

        /// Training-set output path
        #[arg(long, default_value = "persona_qa_pairs.json")]
        output: PathBuf,

        /// Completion server endpoint
        #[arg(long, default_value = "http://localhost:18116")]
        endpoint: String,

        /// Model name requested from the completion server
        #[arg(long, default_value = "qwen3-1.7b")]
        model: String,

        /// Maximum characters per chunk
        #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
        max_chunk_size: usize,

        /// Characters carried from one chunk into the next
        #[arg(long, default_value_t = DEFAULT_OVERLAP_SIZE)]
        overlap_size: usize,

        /// Number of leading chunks sampled per document
        #[arg(long, default_value_t = DEFAULT_MAX_CHUNKS)]
        max_chunks: usize,

        /// Sampling temperature
        #[arg(long, default_value_t = 0.5)]
        temperature: f32,
    },
    /// Chat with a persona in the terminal
    Chat {
        /// Persona roster JSON file
        #[arg(long)]
        personas: PathBuf,

        /// Persona to impersonate
        #[arg(long)]
        persona: String,

        /// Completion server endpoint
        #[arg(long, default_value = "http://localhost:18116")]
        endpoint: String,

        /// Optional vector-index endpoint for context retrieval
        #[arg(long)]
        index_endpoint: Option<String>,

        /// Model name requested from the completion server
        #[arg(long, default_value = "qwen3-1.7b")]
        model: String,

        /// Sampling temperature
        #[arg(long, default_value_t = 0.7)]
        temperature: f32,
    },
    /// Probe the completion server
    Health {
        /// Completion server endpoint
        #[arg(long, default_value = "http://localhost:18116")]
        endpoint: String,
    },
    /// Print summary statistics for a training set
    Inspect {
        /// Training-set JSON file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            input,
            personas,
            output,
            endpoint,
            model,
            max_chunk_size,
            overlap_size,
            max_chunks,
            temperature,
        } => {
            run_generate(
                input,
                personas,
                output,
                endpoint,
                GeneratorConfig {
                    model,
                    temperature,
                    max_chunks,
                },
                max_chunk_size,
                overlap_size,
            )
            .await
        }
        Command::Chat {
            personas,
            persona,
            endpoint,
            index_endpoint,
            model,
            temperature,
        } => run_chat(personas, persona, endpoint, index_endpoint, model, temperature).await,
        Command::Health { endpoint } => run_health(endpoint).await,
        Command::Inspect { path } => run_inspect(path),
    }
}

async fn run_generate(
    input: PathBuf,
    personas: PathBuf,
    output: PathBuf,
    endpoint: String,
    config: GeneratorConfig,
    max_chunk_size: usize,
    overlap_size: usize,
) -> Result<()> {
    let start_time = Instant::now();
    println!("=== personagen: QA pair generation ===\n");

    let chunker = Chunker::new(max_chunk_size, overlap_size)
        .context("Invalid chunking parameters")?;

    // Step 1: Collect source documents
    let step1_start = Instant::now();
    println!("Step 1: Collecting source documents...");
    let documents = collect_documents(&input)?;
    if documents.is_empty() {
        anyhow::bail!("No source documents found under {}", input.display());
    }
    println!(
        "✓ Loaded {} documents [{:.2}s]\n",
        documents.len(),
        step1_start.elapsed().as_secs_f64()
    );

    // Step 2: Load personas
    let step2_start = Instant::now();
    println!("Step 2: Loading personas...");
    let roster = PersonaRoster::load(&personas)?;
    println!(
        "✓ Loaded {} personas: {} [{:.2}s]\n",
        roster.len(),
        roster.names().join(", "),
        step2_start.elapsed().as_secs_f64()
    );

    // Step 3: Generate interviews
    let step3_start = Instant::now();
    println!("Step 3: Generating interviews...\n");
    let backend = CompletionClient::new(endpoint);
    let mut writer = TrainingSetWriter::new(config.model.clone());

    for document in &documents {
        println!("  {}", document.path.display());
        let chunk_count = chunker.chunk(&document.text).len();
        writer.add_source(document, chunk_count.min(config.max_chunks));

        let outcome =
            generate_interviews(&backend, &chunker, roster.personas(), &document.text, &config)
                .await;
        writer.add_questions(outcome.question_count);
        writer.add_interviews(outcome.interviews);
    }
    println!(
        "\n✓ Generation complete [{:.2}s]\n",
        step3_start.elapsed().as_secs_f64()
    );

    // Step 4: Write training set
    let step4_start = Instant::now();
    println!("Step 4: Writing training set...");
    writer.write_to_file(&output)?;
    println!(
        "✓ Wrote {} [{:.2}s]\n",
        output.display(),
        step4_start.elapsed().as_secs_f64()
    );

    let manifest = writer.manifest();
    println!("=== Statistics ===");
    println!("Documents:      {}", manifest.stats.source_count);
    println!("Chunks sampled: {}", manifest.stats.chunk_count);
    println!("Questions:      {}", manifest.stats.question_count);
    println!("Personas:       {}", manifest.stats.persona_count);
    println!("QA pairs:       {}", manifest.stats.pair_count);
    println!(
        "Total time:     {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

async fn run_chat(
    personas: PathBuf,
    persona_name: String,
    endpoint: String,
    index_endpoint: Option<String>,
    model: String,
    temperature: f32,
) -> Result<()> {
    let roster = PersonaRoster::load(&personas)?;
    let persona = roster.get(&persona_name).cloned().with_context(|| {
        format!(
            "Persona '{}' not found in {} (available: {})",
            persona_name,
            personas.display(),
            roster.names().join(", ")
        )
    })?;

    let backend = CompletionClient::new(endpoint);
    let index = index_endpoint.map(SearchClient::new);
    let mut session = ChatSession::new(persona, model, temperature);

    println!(
        "Chatting with '{}'. Commands: /new, /save [path], /quit\n",
        session.persona_name()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("you> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse_repl_command(input) {
            ReplCommand::Quit => break,
            ReplCommand::New => {
                session.clear();
                println!("Started a new chat.");
            }
            ReplCommand::Save(path) => {
                let path = match path {
                    Some(path) => path.to_string(),
                    None => format!("chat_{}.txt", session.id),
                };
                std::fs::write(&path, session.transcript())
                    .with_context(|| format!("Failed to save transcript to {}", path))?;
                println!("Saved transcript to {}", path);
            }
            ReplCommand::Query(query) => {
                let reply = session.send(&backend, index.as_ref(), query).await;
                println!("{}> {}\n", session.persona_name(), reply);
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
enum ReplCommand<'a> {
    Quit,
    New,
    Save(Option<&'a str>),
    Query(&'a str),
}

/// Parse one trimmed REPL line. Only `/save` takes an argument, and only
/// with a separating space; anything else starting with `/save` (e.g.
/// `/savefoo`) is treated as a query for the model.
fn parse_repl_command(input: &str) -> ReplCommand<'_> {
    match input {
        "/quit" => ReplCommand::Quit,
        "/new" => ReplCommand::New,
        "/save" => ReplCommand::Save(None),
        _ => match input.strip_prefix("/save ") {
            Some(arg) => {
                let path = arg.trim();
                if path.is_empty() {
                    ReplCommand::Save(None)
                } else {
                    ReplCommand::Save(Some(path))
                }
            }
            None => ReplCommand::Query(input),
        },
    }
}

async fn run_health(endpoint: String) -> Result<()> {
    let client = CompletionClient::new(&endpoint);
    let health = client
        .health_check()
        .await
        .with_context(|| format!("Completion server at {} is not healthy", endpoint))?;

    println!("Status: {}", health.status);
    println!("Model:  {}", health.model);
    if !health.available_models.is_empty() {
        println!("Available: {}", health.available_models.join(", "));
    }
    Ok(())
}

fn run_inspect(path: PathBuf) -> Result<()> {
    let reader = TrainingSetReader::open(&path)?;

    println!("=== Training set: {} ===", path.display());
    for interview in &reader.interviews {
        println!("  {}: {} pairs", interview.persona, interview.interview.len());
    }

    match reader.manifest {
        Some(manifest) => {
            println!("\nGenerated by {} at {}", manifest.generator, manifest.created_at);
            println!("Model:     {}", manifest.model);
            println!("Documents: {}", manifest.stats.source_count);
            println!("Chunks:    {}", manifest.stats.chunk_count);
            println!("Questions: {}", manifest.stats.question_count);
            println!("QA pairs:  {}", manifest.stats.pair_count);
        }
        None => println!("\nNo manifest found next to the training set."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repl_commands_parse() {
        assert_eq!(parse_repl_command("/quit"), ReplCommand::Quit);
        assert_eq!(parse_repl_command("/new"), ReplCommand::New);
        assert_eq!(parse_repl_command("/save"), ReplCommand::Save(None));
        assert_eq!(
            parse_repl_command("/save chat.txt"),
            ReplCommand::Save(Some("chat.txt"))
        );
        assert_eq!(parse_repl_command("/save   "), ReplCommand::Save(None));
    }

    #[test]
    fn unknown_slash_words_go_to_the_model() {
        assert_eq!(parse_repl_command("/savefoo"), ReplCommand::Query("/savefoo"));
        assert_eq!(parse_repl_command("/saved"), ReplCommand::Query("/saved"));
        assert_eq!(
            parse_repl_command("what is an asset?"),
            ReplCommand::Query("what is an asset?")
        );
    }
}
