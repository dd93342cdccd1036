//! DNA sequence utilities: composition, complement, translation.
//!
//! Sequences are treated case-insensitively; only the four standard
//! nucleotides are accepted where strictness matters (complementation and
//! translation). Composition counting is tolerant and reports unknown
//! characters separately.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for sequence operations
#[derive(Error, Debug)]
pub enum SeqError {
    #[error("invalid nucleotide '{0}'")]
    InvalidNucleotide(char),

    #[error("sequence length {0} is not a multiple of 3")]
    LengthNotTriplet(usize),

    #[error("invalid codon '{0}'")]
    InvalidCodon(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SeqError>;

/// Per-nucleotide counts for a sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composition {
    pub a: usize,
    pub t: usize,
    pub g: usize,
    pub c: usize,
    /// Characters outside ATGC (ambiguity codes, gaps, typos)
    pub other: usize,
}

impl Composition {
    /// Total count of recognized nucleotides.
    pub fn total(&self) -> usize {
        self.a + self.t + self.g + self.c
    }

    /// GC fraction over recognized nucleotides; 0 for an empty sequence.
    pub fn gc_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.g + self.c) as f64 / total as f64
    }
}

/// Count nucleotides in a sequence, case-insensitively.
pub fn composition(seq: &str) -> Composition {
    let mut comp = Composition::default();
    for ch in seq.chars() {
        match ch.to_ascii_uppercase() {
            'A' => comp.a += 1,
            'T' => comp.t += 1,
            'G' => comp.g += 1,
            'C' => comp.c += 1,
            _ => comp.other += 1,
        }
    }
    comp
}

/// GC fraction of a sequence (0.0 for an empty one).
pub fn gc_content(seq: &str) -> f64 {
    composition(seq).gc_fraction()
}

fn complement_base(ch: char) -> Result<char> {
    match ch.to_ascii_uppercase() {
        'A' => Ok('T'),
        'T' => Ok('A'),
        'G' => Ok('C'),
        'C' => Ok('G'),
        other => Err(SeqError::InvalidNucleotide(other)),
    }
}

/// Complement of a DNA sequence (same orientation).
pub fn complement(seq: &str) -> Result<String> {
    seq.chars().map(complement_base).collect()
}

/// Reverse complement of a DNA sequence.
pub fn reverse_complement(seq: &str) -> Result<String> {
    seq.chars().rev().map(complement_base).collect()
}

/// Standard genetic code; stop codons map to '*'.
fn codon_to_amino_acid(codon: &str) -> Option<char> {
    let aa = match codon {
        "TTT" | "TTC" => 'F',
        "TTA" | "TTG" | "CTT" | "CTC" | "CTA" | "CTG" => 'L',
        "ATT" | "ATC" | "ATA" => 'I',
        "ATG" => 'M',
        "GTT" | "GTC" | "GTA" | "GTG" => 'V',
        "TCT" | "TCC" | "TCA" | "TCG" | "AGT" | "AGC" => 'S',
        "CCT" | "CCC" | "CCA" | "CCG" => 'P',
        "ACT" | "ACC" | "ACA" | "ACG" => 'T',
        "GCT" | "GCC" | "GCA" | "GCG" => 'A',
        "TAT" | "TAC" => 'Y',
        "TAA" | "TAG" | "TGA" => '*',
        "CAT" | "CAC" => 'H',
        "CAA" | "CAG" => 'Q',
        "AAT" | "AAC" => 'N',
        "AAA" | "AAG" => 'K',
        "GAT" | "GAC" => 'D',
        "GAA" | "GAG" => 'E',
        "TGT" | "TGC" => 'C',
        "TGG" => 'W',
        "CGT" | "CGC" | "CGA" | "CGG" | "AGA" | "AGG" => 'R',
        "GGT" | "GGC" | "GGA" | "GGG" => 'G',
        _ => return None,
    };
    Some(aa)
}

/// Translate a DNA sequence into single-letter amino acids.
///
/// The sequence length must be a multiple of 3; stop codons appear as '*'.
pub fn translate(dna: &str) -> Result<String> {
    let upper = dna.trim().to_ascii_uppercase();
    if upper.len() % 3 != 0 {
        return Err(SeqError::LengthNotTriplet(upper.len()));
    }
    let bytes = upper.as_bytes();
    let mut protein = String::with_capacity(upper.len() / 3);
    for chunk in bytes.chunks(3) {
        // Non-ASCII input can split a character across the chunk boundary
        let codon = std::str::from_utf8(chunk)
            .map_err(|_| SeqError::InvalidCodon(String::from_utf8_lossy(chunk).into_owned()))?;
        let aa = codon_to_amino_acid(codon)
            .ok_or_else(|| SeqError::InvalidCodon(codon.to_string()))?;
        protein.push(aa);
    }
    Ok(protein)
}

/// Read a FASTA file and translate its sequence.
///
/// Header lines (starting with '>') are skipped; sequence lines may be
/// wrapped and contain whitespace.
pub fn translate_fasta(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    let sequence: String = content
        .lines()
        .filter(|line| !line.starts_with('>'))
        .flat_map(|line| line.split_whitespace())
        .collect();
    translate(&sequence)
}
