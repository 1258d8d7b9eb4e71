//! Command implementations for the Quanda CLI.

use std::sync::Arc;
use std::time::Instant;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dictionary::{self, Dictionary, FuzzyConfig, FuzzyDictionary};
use crate::engine::{AnswerEngine, EngineConfig};
use crate::error::Result;
use crate::graph::ExpansionLimits;
use crate::import::TsvSource;
use crate::kb::MemoryKnowledge;

/// Execute a CLI command.
pub fn execute_command(args: QuandaArgs) -> Result<()> {
    match &args.command {
        Command::Answer(answer_args) => answer_question(answer_args.clone(), &args),
        Command::Graph(graph_args) => show_graph(graph_args.clone(), &args),
        Command::Lookup(lookup_args) => lookup_phrase(lookup_args.clone(), &args),
    }
}

/// Build a dictionary backend from a surface-form file.
fn load_dictionary(
    forms_file: &std::path::Path,
    fuzzy: bool,
    max_edit_distance: usize,
    max_results: usize,
) -> Result<Box<dyn Dictionary>> {
    let mut source = TsvSource::open(forms_file)?;
    if fuzzy {
        let config = FuzzyConfig {
            max_edit_distance,
            max_results,
        };
        let dictionary = FuzzyDictionary::from_source(config, &mut source)?;
        Ok(Box::new(dictionary))
    } else {
        Ok(Box::new(dictionary::builder::build(&mut source)))
    }
}

/// Assemble the answer engine from the command inputs.
fn load_engine(args: &AnswerArgs) -> Result<AnswerEngine> {
    let dictionary = load_dictionary(
        &args.forms_file,
        args.fuzzy,
        args.max_edit_distance,
        args.max_results,
    )?;
    let knowledge = MemoryKnowledge::from_tsv(&args.triples_file)?;
    let config = EngineConfig {
        expansion: ExpansionLimits {
            max_rounds: args.max_rounds,
            max_nodes: args.max_nodes,
        },
    };
    Ok(AnswerEngine::with_config(
        dictionary,
        Arc::new(knowledge),
        config,
    ))
}

/// Answer a question.
fn answer_question(args: AnswerArgs, cli_args: &QuandaArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading dictionary from: {}", args.forms_file.display());
        println!("Loading triples from: {}", args.triples_file.display());
    }
    let engine = load_engine(&args)?;

    let start = Instant::now();
    let answer = engine.answer(&args.question);
    let duration = start.elapsed();

    let result = AnswerResult {
        question: args.question.clone(),
        answers: answer.map(|set| {
            let mut entities: Vec<String> = set.into_iter().collect();
            entities.sort();
            entities
        }),
        duration_ms: duration.as_millis() as u64,
    };
    output_result("Answer", &result, cli_args)
}

/// Print the candidate graph built for a question.
fn show_graph(args: GraphArgs, cli_args: &QuandaArgs) -> Result<()> {
    let engine = load_engine(&args.inputs)?;
    let graph = engine.graph_for(&args.inputs.question);
    let result = GraphResult::from_graph(&args.inputs.question, &graph);
    output_result("Candidate graph", &result, cli_args)
}

/// Probe the dictionary for one phrase.
fn lookup_phrase(args: LookupArgs, cli_args: &QuandaArgs) -> Result<()> {
    let dictionary = load_dictionary(
        &args.forms_file,
        args.fuzzy,
        args.max_edit_distance,
        args.max_results,
    )?;
    let mut entities: Vec<String> = dictionary.lookup(&args.phrase).into_iter().collect();
    entities.sort();
    let result = LookupResult {
        phrase: args.phrase.clone(),
        entities,
    };
    output_result("Dictionary lookup", &result, cli_args)
}
