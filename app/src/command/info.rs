use titr_annotate::LexiconAnnotator;
use titr_config::Config;
use titr_extraction::{PatternDefinition, PatternId, PatternLibrary};

/// Input parameters for the Info command strategy.
#[derive(Debug, Clone, Default)]
pub struct InfoInput {
    /// Pattern id to describe in detail instead of listing all patterns.
    pub pattern: Option<String>,
}

/// Strategy for displaying the effective configuration.
///
/// Prints the config file location, the extraction policy, the input bound,
/// the lexicon size and the registered patterns.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = InfoInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let library = PatternLibrary::global();

        if let Some(raw) = input.pattern {
            let pattern = find_pattern(library, &raw)?;
            println!("{}", describe_pattern(pattern));
            return Ok(());
        }

        let config_path = Config::config_path()?;
        let config = Config::load()?;
        let annotator = LexiconAnnotator::from_config(&config.lexicon);

        println!("=== titr Configuration ===\n");

        if config_path.exists() {
            println!("Config file: {}", config_path.display());
        } else {
            println!("Config file: {} (not found, using defaults)", config_path.display());
        }
        println!();

        println!("Extraction:");
        println!(
            "  Allow duplicate directives: {}",
            config.extraction.allow_duplicate_directives
        );
        println!("  Max input length: {} chars", config.limits.max_input_chars);
        println!();

        println!("Lexicon:");
        println!("  Forms: {}", annotator.lexicon().len());
        println!("  Configured extras: {}", config.lexicon.extra_lemmas.len());
        println!();

        println!("Patterns:");
        for pattern in library.patterns() {
            println!(
                "  {}: {} positions ({} required)",
                pattern.id,
                pattern.positions.len(),
                pattern.required_len()
            );
        }

        Ok(())
    }
}

fn find_pattern<'a>(
    library: &'a PatternLibrary,
    raw: &str,
) -> anyhow::Result<&'a PatternDefinition> {
    let id: PatternId = raw.parse().map_err(|e| anyhow::anyhow!("{e}: '{raw}'"))?;
    library
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Pattern {id} is not registered"))
}

fn describe_pattern(pattern: &PatternDefinition) -> String {
    let mut lines = vec![format!("{}:", pattern.id)];
    for (i, position) in pattern.positions.iter().enumerate() {
        let marker = if position.optional { " (optional)" } else { "" };
        lines.push(format!("  {i}: {:?}{marker}", position.predicates));
    }
    lines.join("\n")
}
