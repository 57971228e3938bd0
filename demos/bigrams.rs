use std::path::PathBuf;
use anyhow::Context;
use tiny_tensor::bigram::{count_bigrams, load_words, row_distribution, CharVocabulary};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "names.txt".to_string()));
    let words = load_words(&path).with_context(|| format!("Failed to read word list {}", path.display()))?;

    let vocabulary = CharVocabulary::with_boundary('.');
    let counts = count_bigrams(&words, &vocabulary, true)?;

    for i in 0..vocabulary.len() {
        for j in 0..vocabulary.len() {
            let c1 = vocabulary.itos(i).context("row index outside vocabulary")?;
            let c2 = vocabulary.itos(j).context("column index outside vocabulary")?;
            print!("({}{} {}) ", c1, c2, counts.get_cell(i, j)?.item()?);
        }
        println!();
    }

    let p0 = row_distribution(&counts, 0)?;
    println!("{p0}");
    Ok(())
}
