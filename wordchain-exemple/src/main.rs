use wordchain_core::io::{build_output_path, get_filename};
use wordchain_core::model::chain::{Chain, GenerateResult};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a chain from a text corpus, one sequence per line
    // (lines are split into chunks and learned on several threads)
    let corpus_path = "./data/corpus.txt";
    let mut chain = Chain::from_corpus_file(corpus_path)?;
    println!("Learned corpus '{}'", get_filename(corpus_path)?);

    // Save the chain next to the corpus as a JSON chain file
    // The document is exactly the transition table, nothing else
    let chain_path = build_output_path(corpus_path, "json")?;
    chain.save(&chain_path)?;
    println!("Chain saved to {}", chain_path.display());

    // Reseed the random source for a reproducible demonstration
    // (skip this to get different sequences on every run)
    chain.reseed(42);

    // Generate 10 sequences starting from random learned starters
    for i in 0..10 {
        println!("Generated sequence {}: {}", i + 1, chain.generate().join(" "));
    }

    // Generate from an explicit seed word; the seed must match a learned
    // word exactly, otherwise NoSuchSeed is returned
    match chain.generate_from_seed("the") {
        GenerateResult::Success(words) => println!("Seeded: {}", words.join(" ")),
        GenerateResult::NoSuchSeed => println!("The corpus never taught the word 'the'"),
    }

    // The case-insensitive variant resolves 'THE' to any learned casing,
    // weighting each candidate by how often it was observed
    match chain.generate_from_seed_ignore_case("THE") {
        GenerateResult::Success(words) => println!("Seeded (any case): {}", words.join(" ")),
        GenerateResult::NoSuchSeed => println!("No learned word matches 'THE'"),
    }

    // An unknown seed is an expected outcome, not an error
    match chain.generate_from_seed("zzzzzz") {
        GenerateResult::Success(_) => println!("Should not happen"),
        GenerateResult::NoSuchSeed => println!("This seed ('zzzzzz') is not in the chain"),
    }

    // A chain can also be restored from its JSON file later
    let restored = Chain::load(&chain_path)?;
    println!(
        "Restored chain knows {} words",
        restored.table().len()
    );

    Ok(())
}
