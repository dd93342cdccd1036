//! `labrat seq` subcommands: DNA composition, complement, translation.

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use labrat_sci::sequence;

#[derive(Subcommand, Debug)]
pub enum SeqAction {
    /// Report nucleotide composition and GC content
    Gc {
        /// DNA sequence (ATGC, case-insensitive)
        sequence: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the reverse complement of a sequence
    Revcomp {
        /// DNA sequence (ATGC, case-insensitive)
        sequence: String,
    },

    /// Translate DNA into single-letter amino acids
    Translate {
        /// DNA sequence; length must be a multiple of 3
        #[arg(conflicts_with = "fasta", required_unless_present = "fasta")]
        sequence: Option<String>,

        /// Read the sequence from a FASTA file instead
        #[arg(short, long)]
        fasta: Option<PathBuf>,
    },
}

pub fn run(action: SeqAction) -> Result<()> {
    match action {
        SeqAction::Gc { sequence: seq, json } => {
            let comp = sequence::composition(&seq);
            if json {
                let payload = serde_json::json!({
                    "a": comp.a,
                    "t": comp.t,
                    "g": comp.g,
                    "c": comp.c,
                    "other": comp.other,
                    "gc_fraction": comp.gc_fraction(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "A: {}  T: {}  G: {}  C: {}  other: {}",
                    comp.a, comp.t, comp.g, comp.c, comp.other
                );
                println!("GC content: {:.2}%", comp.gc_fraction() * 100.0);
            }
            Ok(())
        }

        SeqAction::Revcomp { sequence: seq } => {
            println!("{}", sequence::reverse_complement(&seq)?);
            Ok(())
        }

        SeqAction::Translate { sequence: seq, fasta } => {
            let protein = match (seq, fasta) {
                (_, Some(path)) => sequence::translate_fasta(&path)?,
                (Some(seq), None) => sequence::translate(&seq)?,
                (None, None) => unreachable!("clap enforces one of sequence/--fasta"),
            };
            println!("{}", protein);
            Ok(())
        }
    }
}

/// Whether this action prints JSON on stdout (used to keep logs off stdout).
pub fn wants_json(action: &SeqAction) -> bool {
    matches!(action, SeqAction::Gc { json, .. } if *json)
}
