//! PCR planning: master mix volumes and primer melting temperatures.
//!
//! Volumes are in microliters throughout. Component tables follow the
//! usual 25 µL Taq / high-fidelity reaction setups; water tops every
//! reaction up to the requested volume.

use std::fmt;
use thiserror::Error;

/// Error type for PCR calculations
#[derive(Error, Debug, PartialEq)]
pub enum PcrError {
    #[error("reaction count must be at least 1")]
    NoReactions,

    #[error("{0} must be a positive, finite number")]
    NonPositive(&'static str),

    #[error("extra volume percentage must be finite and non-negative, got {0}")]
    BadExtraPercent(f64),

    #[error("component volumes ({components:.2} uL) exceed the reaction volume ({volume} uL)")]
    ComponentsExceedVolume { components: f64, volume: f64 },

    #[error("primer sequence is empty")]
    EmptySequence,

    #[error("invalid nucleotide '{0}' in primer sequence")]
    InvalidNucleotide(char),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PcrError>;

/// Polymerase choice, selecting the component table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polymerase {
    Taq,
    HighFidelity,
}

impl Polymerase {
    pub fn label(&self) -> &'static str {
        match self {
            Polymerase::Taq => "taq",
            Polymerase::HighFidelity => "high-fidelity",
        }
    }
}

/// One master mix component with per-reaction and batch volumes
#[derive(Debug, Clone, PartialEq)]
pub struct MixComponent {
    pub name: &'static str,
    /// Volume per single reaction, in uL
    pub per_reaction: f64,
    /// Volume for the whole batch including the extra margin, in uL
    pub total: f64,
    /// Final concentration in the reaction, for display
    pub final_conc: &'static str,
}

/// A fully computed PCR master mix
#[derive(Debug, Clone, PartialEq)]
pub struct MasterMix {
    pub reactions: u32,
    pub volume_per_reaction: f64,
    pub extra_percent: f64,
    pub polymerase: Polymerase,
    pub components: Vec<MixComponent>,
    pub total_volume: f64,
}

impl fmt::Display for MasterMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PCR master mix ({} reactions + {}% extra, {})",
            self.reactions,
            self.extra_percent,
            self.polymerase.label()
        )?;
        writeln!(f, "volume per reaction: {} uL", self.volume_per_reaction)?;
        writeln!(f, "total volume: {:.2} uL", self.total_volume)?;
        for c in &self.components {
            writeln!(
                f,
                "{:<24} {:>8.2} uL  (per rxn: {:.2} uL, {})",
                c.name, c.total, c.per_reaction, c.final_conc
            )?;
        }
        Ok(())
    }
}

/// Compute a master mix for `reactions` reactions of `volume` uL each.
///
/// `extra_percent` adds pipetting margin to every component. Water is
/// added last to bring each reaction up to `volume`; the call fails if
/// the fixed components alone already exceed it.
pub fn master_mix(
    reactions: u32,
    volume: f64,
    extra_percent: f64,
    polymerase: Polymerase,
    include_template: bool,
) -> Result<MasterMix> {
    if reactions == 0 {
        return Err(PcrError::NoReactions);
    }
    if !volume.is_finite() || volume <= 0.0 {
        return Err(PcrError::NonPositive("reaction volume"));
    }
    if !extra_percent.is_finite() || extra_percent < 0.0 {
        return Err(PcrError::BadExtraPercent(extra_percent));
    }

    // Per-reaction volumes: (name, uL, final concentration)
    let mut parts: Vec<(&'static str, f64, &'static str)> = match polymerase {
        Polymerase::Taq => vec![
            ("10X Buffer", volume * 0.1, "1X"),
            ("dNTPs (10 mM each)", volume * 0.02, "200 uM"),
            ("Forward primer (10 uM)", volume * 0.02, "0.2 uM"),
            ("Reverse primer (10 uM)", volume * 0.02, "0.2 uM"),
            ("Taq polymerase (5 U/uL)", 0.25, "1.25 U"),
            ("MgCl2 (25 mM)", volume * 0.06, "1.5 mM"),
        ],
        Polymerase::HighFidelity => vec![
            ("5X HF Buffer", volume * 0.2, "1X"),
            ("dNTPs (10 mM each)", volume * 0.02, "200 uM"),
            ("Forward primer (10 uM)", volume * 0.02, "0.2 uM"),
            ("Reverse primer (10 uM)", volume * 0.02, "0.2 uM"),
            ("HF polymerase (2 U/uL)", 0.5, "1 U"),
        ],
    };
    if include_template {
        parts.push(("Template DNA", 1.0, "variable"));
    }

    let used: f64 = parts.iter().map(|(_, v, _)| v).sum();
    let water = volume - used;
    if water < 0.0 {
        return Err(PcrError::ComponentsExceedVolume {
            components: used,
            volume,
        });
    }
    parts.push(("Water", water, "-"));

    let batch = f64::from(reactions) * (1.0 + extra_percent / 100.0);
    let components = parts
        .into_iter()
        .map(|(name, per_reaction, final_conc)| MixComponent {
            name,
            per_reaction,
            total: per_reaction * batch,
            final_conc,
        })
        .collect();

    Ok(MasterMix {
        reactions,
        volume_per_reaction: volume,
        extra_percent,
        polymerase,
        components,
        total_volume: volume * batch,
    })
}

/// Melting-temperature estimation method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TmMethod {
    /// 2(A+T) + 4(G+C); best for primers under 14 bp
    Wallace,
    /// 64.9 + 41*(GC fraction - 0.41)*100/length
    GcContent,
    /// 81.5 + 16.6*GC fraction - 675/length; better for 18-30 bp
    NearestNeighbor,
}

/// Estimate the melting temperature of a primer, in degrees Celsius.
///
/// Whitespace in the sequence is ignored; the result is rounded to one
/// decimal place.
pub fn melting_temperature(sequence: &str, method: TmMethod) -> Result<f64> {
    let mut at = 0u32;
    let mut gc = 0u32;
    for ch in sequence.chars() {
        if ch.is_whitespace() {
            continue;
        }
        match ch.to_ascii_uppercase() {
            'A' | 'T' => at += 1,
            'G' | 'C' => gc += 1,
            other => return Err(PcrError::InvalidNucleotide(other)),
        }
    }
    let length = f64::from(at + gc);
    if length == 0.0 {
        return Err(PcrError::EmptySequence);
    }

    let tm = match method {
        TmMethod::Wallace => f64::from(2 * at + 4 * gc),
        TmMethod::GcContent => {
            let gc_fraction = f64::from(gc) / length;
            64.9 + 41.0 * (gc_fraction - 0.41) * 100.0 / length
        }
        TmMethod::NearestNeighbor => {
            let gc_fraction = f64::from(gc) / length;
            81.5 + 16.6 * gc_fraction - 675.0 / length
        }
    };
    Ok((tm * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taq_mix_water_tops_up_reaction() {
        let mix = master_mix(10, 25.0, 10.0, Polymerase::Taq, false).unwrap();
        let per_reaction: f64 = mix.components.iter().map(|c| c.per_reaction).sum();
        assert!((per_reaction - 25.0).abs() < 1e-9);
        // 10X buffer is a tenth of the reaction
        let buffer = mix.components.iter().find(|c| c.name == "10X Buffer").unwrap();
        assert!((buffer.per_reaction - 2.5).abs() < 1e-9);
        // batch of 11 reaction-equivalents
        assert!((mix.total_volume - 275.0).abs() < 1e-9);
        assert!((buffer.total - 27.5).abs() < 1e-9);
    }

    #[test]
    fn test_high_fidelity_mix_has_no_mgcl2() {
        let mix = master_mix(4, 50.0, 0.0, Polymerase::HighFidelity, true).unwrap();
        assert!(mix.components.iter().all(|c| !c.name.contains("MgCl2")));
        assert!(mix.components.iter().any(|c| c.name == "Template DNA"));
        let per_reaction: f64 = mix.components.iter().map(|c| c.per_reaction).sum();
        assert!((per_reaction - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_reaction_volume_rejected() {
        // fixed 0.25 uL of Taq cannot fit in 1 uL once buffer etc. scale down
        let err = master_mix(1, 1.0, 0.0, Polymerase::Taq, true).unwrap_err();
        assert!(matches!(err, PcrError::ComponentsExceedVolume { .. }));
    }

    #[test]
    fn test_mix_input_validation() {
        assert_eq!(
            master_mix(0, 25.0, 10.0, Polymerase::Taq, false),
            Err(PcrError::NoReactions)
        );
        assert!(master_mix(1, -5.0, 10.0, Polymerase::Taq, false).is_err());
        assert!(master_mix(1, 25.0, -1.0, Polymerase::Taq, false).is_err());
    }

    #[test]
    fn test_wallace_rule() {
        // 4 AT + 4 GC: 2*4 + 4*4 = 24
        let tm = melting_temperature("ATATGCGC", TmMethod::Wallace).unwrap();
        assert!((tm - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_neighbor_rounding() {
        // 20-mer, half GC: 81.5 + 8.3 - 33.75 = 56.05 -> 56.1 or 56.0 by ties
        let tm = melting_temperature("ATGCATGCATGCATGCATGC", TmMethod::NearestNeighbor).unwrap();
        assert!((tm * 10.0 - (tm * 10.0).round()).abs() < 1e-9);
        assert!(tm > 50.0 && tm < 60.0);
    }

    #[test]
    fn test_tm_accepts_lowercase_and_spaces() {
        let upper = melting_temperature("ATGC", TmMethod::Wallace).unwrap();
        let spaced = melting_temperature("at gc", TmMethod::Wallace).unwrap();
        assert_eq!(upper, spaced);
    }

    #[test]
    fn test_tm_rejects_bad_input() {
        assert_eq!(
            melting_temperature("", TmMethod::Wallace),
            Err(PcrError::EmptySequence)
        );
        assert_eq!(
            melting_temperature("ATGN", TmMethod::Wallace),
            Err(PcrError::InvalidNucleotide('N'))
        );
    }

    #[test]
    fn test_mix_display_lists_water() {
        let mix = master_mix(2, 25.0, 10.0, Polymerase::Taq, false).unwrap();
        let text = format!("{}", mix);
        assert!(text.contains("Water"));
        assert!(text.contains("2 reactions"));
    }
}
