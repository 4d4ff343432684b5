/// Namegen: generate names from a language file on the command line.
///
/// Usage: namegen <language_file> <category> [--seed <s>] [--count <n>]
///                [--options <options.ron>] [--verbose]
use name_forge::core::generator::{GeneratorOptions, NameGenerator};
use name_forge::core::registry::LanguageRegistry;
use std::path::Path;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let language_path = Path::new(&args[1]);
    let category = &args[2];
    let mut seed: Option<String> = None;
    let mut count: usize = 10;
    let mut options_path = None;
    let mut verbose = false;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = Some(args[i].clone());
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or(10);
            }
            "--options" if i + 1 < args.len() => {
                i += 1;
                options_path = Some(args[i].clone());
            }
            "--verbose" | "-v" => verbose = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let options = match options_path {
        Some(path) => match GeneratorOptions::load_from_ron(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("ERROR: Failed to load options: {}", e);
                process::exit(1);
            }
        },
        None => GeneratorOptions::default(),
    };

    let mut registry = LanguageRegistry::new();
    let language = match registry.load_file(language_path) {
        Ok(language) => language,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let generator = NameGenerator::builder().options(options).build();
    let names = match generator.generate(&language, category, seed.as_deref(), count) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            let categories: Vec<&str> = language.categories().collect();
            eprintln!("Available categories: {}", categories.join(", "));
            process::exit(1);
        }
    };

    for name in &names {
        if verbose {
            let flag = if name.constraint_violation { " (!)" } else { "" };
            println!("{:<24} {}{}", name.name, name.pattern, flag);
        } else {
            println!("{}", name.name);
        }
    }

    if let Some(first) = names.first() {
        println!("\nseed: {}", first.seed);
    }
}

fn print_usage() {
    println!("Usage: namegen <language_file> <category> [--seed <s>] [--count <n>]");
    println!("               [--options <options.ron>] [--verbose]");
}
