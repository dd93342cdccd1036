//! Stateless science helpers for the labrat CLI.
//!
//! Pure functions only: dilution/absorbance math, PCR planning, buffer
//! recipes and DNA sequence utilities. Nothing here touches shared state
//! or the filesystem except where a FASTA path is read on behalf of the
//! caller.

pub mod buffers;
pub mod dilutions;
pub mod pcr;
pub mod sequence;

pub use buffers::{BufferComponent, BufferError, BufferRecipe};
pub use dilutions::{
    dilute_to_concentration, dilute_to_volume, serial_dilution, transmittance_to_absorbance,
    DilutionError, DilutionSeries,
};
pub use pcr::{master_mix, melting_temperature, MasterMix, PcrError, Polymerase, TmMethod};
pub use sequence::{
    composition, gc_content, reverse_complement, translate, translate_fasta, Composition, SeqError,
};
