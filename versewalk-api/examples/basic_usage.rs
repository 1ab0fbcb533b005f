//! Basic usage of the versewalk API with an in-memory rhyme table

use std::sync::Arc;
use versewalk_api::{generate_poem, Config, PoemGenerator, StaticRhymeTable};

const CORPUS: &str = "\
Season of mists and mellow fruitfulness,
Close bosom-friend of the maturing sun;
Conspiring with him how to load and bless
With fruit the vines that round the thatch-eves run;
To bend with apples the moss'd cottage-trees,
And fill all fruit with ripeness to the core;
To swell the gourd, and plump the hazel shells
With a sweet kernel; to set budding more,
And still more, later flowers for the bees,
Until they think warm days will never cease.";

fn rhymes() -> StaticRhymeTable {
    StaticRhymeTable::new()
        .with("fruitfulness", ["bless"])
        .with("sun", ["run"])
        .with("trees", ["bees", "cease"])
        .with("core", ["more"])
        .symmetric()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: convenience function with a random seed
    println!("=== Method 1: Convenience Function ===");
    let output = generate_poem("abab", CORPUS, rhymes())?;
    println!("{}", output.text());
    println!("seed {} ({} lookups)\n", output.metadata.seed, output.metadata.lookup_calls);

    // Method 2: custom configuration, reproducible
    println!("=== Method 2: Custom Configuration ===");
    let config = Config::builder()
        .offline()
        .length_range(4, 8)
        .repeat(2)
        .seed(Some(1819))
        .build()?;
    let generator = PoemGenerator::with_config(config, Arc::new(rhymes()))?;
    let output = generator.generate_text("aabb", CORPUS)?;
    print!("{}", output.poem);

    Ok(())
}
