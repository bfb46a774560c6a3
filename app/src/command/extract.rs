use anyhow::Context;
use std::io::Read;
use std::path::{Path, PathBuf};
use titr_annotate::LexiconAnnotator;
use titr_config::Config;
use titr_core::{ExtractionResult, Token};
use titr_extraction::ExtractionEngine;
use tracing::{info, warn};

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    /// Recommendation text; stdin is read when both sources are absent.
    pub text: Option<String>,
    /// JSON file holding an already annotated token stream.
    pub tokens: Option<PathBuf>,
    pub pretty: bool,
}

/// Strategy for running one extraction and printing the JSON result.
///
/// Loads configuration, enforces the input size bound, then either annotates
/// the text with the lexicon annotator or uses the supplied token stream.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let annotator = LexiconAnnotator::from_config(&config.lexicon);
        let engine = ExtractionEngine::new(annotator, config.extraction.clone());

        let result = if let Some(path) = input.tokens {
            let tokens = read_tokens(&path)?;
            info!("Extracting from {} pre-annotated tokens", tokens.len());
            engine.extract_tokens(&tokens)?
        } else {
            let text = match input.text {
                Some(text) => text,
                None => read_stdin()?,
            };
            check_size(&text, config.limits.max_input_chars)?;
            engine.extract(&text)?
        };

        if result.is_empty() {
            warn!("No directives found");
        }
        println!("{}", render(&result, input.pretty)?);
        Ok(())
    }
}

fn read_tokens(path: &Path) -> anyhow::Result<Vec<Token>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read token file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid token stream in {}", path.display()))
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read recommendation from stdin")?;
    Ok(text)
}

fn check_size(text: &str, max_chars: usize) -> anyhow::Result<()> {
    let chars = text.chars().count();
    if chars > max_chars {
        anyhow::bail!("Recommendation is {chars} characters long; the limit is {max_chars}");
    }
    Ok(())
}

fn render(result: &ExtractionResult, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
