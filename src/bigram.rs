use std::collections::HashMap;
use std::path::Path;
use crate::dtype::DType;
use crate::numeric_tensor::{NumericTensor, NumericTensorError};

#[derive(Debug, thiserror::Error)]
pub enum BigramError {
    #[error("Character {0:?} is not in the vocabulary")]
    UnknownCharacter(char),
    #[error(transparent)]
    NumericTensorError(#[from] NumericTensorError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Character-level vocabulary mapping characters to dense indices and back.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CharVocabulary {
    itos: Vec<char>,
    stoi: HashMap<char, usize>,
    boundary: Option<char>,
}

impl CharVocabulary {
    pub fn new(chars: impl IntoIterator<Item = char>, boundary: Option<char>) -> Self {
        let mut itos = Vec::new();
        let mut stoi = HashMap::new();
        for c in boundary.into_iter().chain(chars) {
            stoi.entry(c).or_insert_with(|| {
                itos.push(c);
                itos.len() - 1
            });
        }
        Self { itos, stoi, boundary }
    }

    /// 'a' → 0 through 'z' → 25.
    pub fn alphabet() -> Self {
        Self::new('a'..='z', None)
    }

    /// `boundary` → 0, then 'a' → 1 through 'z' → 26.
    pub fn with_boundary(boundary: char) -> Self {
        Self::new('a'..='z', Some(boundary))
    }

    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    pub fn boundary(&self) -> Option<char> {
        self.boundary
    }

    pub fn stoi(&self, c: char) -> Result<usize, BigramError> {
        self.stoi.get(&c).copied().ok_or(BigramError::UnknownCharacter(c))
    }

    pub fn itos(&self, index: usize) -> Option<char> {
        self.itos.get(index).copied()
    }

    /// Indices of `word`, wrapped in the boundary token when `padded` is set and the
    /// vocabulary has one.
    pub fn encode(&self, word: &str, padded: bool) -> Result<Vec<usize>, BigramError> {
        let pad = if padded { self.boundary } else { None };
        pad.into_iter()
            .chain(word.chars())
            .chain(pad)
            .map(|c| self.stoi(c))
            .collect()
    }
}

/// Adds one to `counts[(c1, c2)]` for every consecutive character pair of every word.
pub fn count_bigrams_into<S: AsRef<str>>(
    counts: &mut NumericTensor,
    words: &[S],
    vocabulary: &CharVocabulary,
    padded: bool,
) -> Result<(), BigramError> {
    let mut pairs = 0usize;
    for word in words {
        let indices = vocabulary.encode(word.as_ref(), padded)?;
        for pair in indices.windows(2) {
            counts.add_at(pair[0], Some(pair[1]), 1)?;
            pairs += 1;
        }
    }
    log::debug!("Counted {} bigrams over {} words", pairs, words.len());
    Ok(())
}

/// Square `Int32` count tensor sized to the vocabulary.
pub fn count_bigrams<S: AsRef<str>>(
    words: &[S],
    vocabulary: &CharVocabulary,
    padded: bool,
) -> Result<NumericTensor, BigramError> {
    let mut counts = NumericTensor::zeros(vocabulary.len(), vocabulary.len(), DType::I32)?;
    count_bigrams_into(&mut counts, words, vocabulary, padded)?;
    Ok(counts)
}

/// Normalizes one row of a count tensor into a `Float32` probability distribution.
pub fn row_distribution(counts: &NumericTensor, row: usize) -> Result<NumericTensor, BigramError> {
    let p = counts.get_row(row)?.to_f32();
    Ok(p.div(p.sum())?)
}

/// Reads a newline-separated word list, skipping blank lines.
pub fn load_words(path: &Path) -> Result<Vec<String>, BigramError> {
    let text = std::fs::read_to_string(path)?;
    let words: Vec<String> = text
        .lines()
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(|x| x.to_string())
        .collect();
    log::info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
