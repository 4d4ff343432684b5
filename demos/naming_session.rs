/// Naming session demo: load the bundled languages and name a small party.
///
/// Run: cargo run --example naming_session [seed]
use name_forge::core::registry::LanguageRegistry;
use name_forge::NameSession;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let seed = std::env::args().nth(1);

    let mut registry = LanguageRegistry::new();
    registry.load_dir(Path::new("languages"))?;

    for id in registry.ids() {
        let language = registry.require(id)?;
        let mut session = NameSession::new(language.clone(), seed.as_deref());

        println!("=== {} (seed: {}) ===", language.name(), session.seed());
        for category in language.categories() {
            let names: Vec<String> = session
                .batch(category, 5)?
                .into_iter()
                .map(|n| n.name)
                .collect();
            println!("  {:<14} {}", category, names.join(", "));
        }
        println!();
    }

    Ok(())
}
