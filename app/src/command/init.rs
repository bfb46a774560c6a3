use titr_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates the default configuration file at `~/titr/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - extraction.allow_duplicate_directives: emit repeated directives");
        println!("   - lexicon.extra_lemmas: extra inflected form -> lemma entries");
        println!("   - limits.max_input_chars: longest recommendation accepted");
        println!();
        Ok(())
    }
}
