//! `labrat calc` subcommands: wet-lab arithmetic (dilutions, PCR
//! planning, buffer recipes).

use anyhow::Result;
use clap::Subcommand;

use labrat_sci::pcr::{Polymerase, TmMethod};
use labrat_sci::{buffers, dilutions, pcr};

#[derive(Subcommand, Debug)]
pub enum CalcAction {
    /// Solve C1*V1 = C2*V2 for the missing quantity
    Dilute {
        /// Stock concentration (C1)
        #[arg(long)]
        c1: f64,

        /// Stock volume to use (V1)
        #[arg(long)]
        v1: f64,

        /// Target concentration (C2); solves for the final volume
        #[arg(long, conflicts_with = "v2", required_unless_present = "v2")]
        c2: Option<f64>,

        /// Final volume (V2); solves for the final concentration
        #[arg(long)]
        v2: Option<f64>,
    },

    /// Plan a serial dilution series
    Serial {
        /// Starting concentration
        #[arg(long)]
        initial: f64,

        /// Fold dilution per step (e.g. 10 for a 1:10 series)
        #[arg(long)]
        factor: f64,

        /// Number of dilution steps
        #[arg(long)]
        steps: usize,

        /// Volume transferred between tubes
        #[arg(long)]
        transfer: f64,

        /// Final volume per tube
        #[arg(long)]
        volume: f64,
    },

    /// Convert fractional transmittance to absorbance
    Absorbance {
        /// Transmittance as a fraction in (0, 1]
        transmittance: f64,
    },

    /// Compute PCR master mix volumes
    Mastermix {
        /// Number of reactions to prepare
        #[arg(long)]
        reactions: u32,

        /// Volume per reaction in uL
        #[arg(long, default_value_t = 25.0)]
        volume: f64,

        /// Extra volume percentage for pipetting margin
        #[arg(long, default_value_t = 10.0)]
        extra: f64,

        /// Polymerase: "taq" or "high-fidelity"
        #[arg(long, default_value = "taq", value_parser = parse_polymerase)]
        polymerase: Polymerase,

        /// Include template DNA in the mix
        #[arg(long)]
        template: bool,
    },

    /// Estimate a primer melting temperature
    Tm {
        /// Primer sequence, 5' to 3'
        sequence: String,

        /// Method: "wallace", "gc-content" or "nearest-neighbor"
        #[arg(long, default_value = "wallace", value_parser = parse_tm_method)]
        method: TmMethod,
    },

    /// Show a common buffer recipe, or list them all
    Buffer {
        /// Buffer name (e.g. PBS, TE, RIPA); omit to list all recipes
        name: Option<String>,

        /// Scale the component amounts to this volume in mL
        #[arg(long)]
        volume_ml: Option<f64>,
    },
}

fn parse_polymerase(value: &str) -> std::result::Result<Polymerase, String> {
    match value {
        "taq" => Ok(Polymerase::Taq),
        "high-fidelity" => Ok(Polymerase::HighFidelity),
        other => Err(format!(
            "unknown polymerase '{other}' (expected 'taq' or 'high-fidelity')"
        )),
    }
}

fn parse_tm_method(value: &str) -> std::result::Result<TmMethod, String> {
    match value {
        "wallace" => Ok(TmMethod::Wallace),
        "gc-content" => Ok(TmMethod::GcContent),
        "nearest-neighbor" => Ok(TmMethod::NearestNeighbor),
        other => Err(format!(
            "unknown method '{other}' (expected 'wallace', 'gc-content' or 'nearest-neighbor')"
        )),
    }
}

pub fn run(action: CalcAction) -> Result<()> {
    match action {
        CalcAction::Dilute { c1, v1, c2, v2 } => match (c2, v2) {
            (Some(c2), None) => {
                let v2 = dilutions::dilute_to_volume(c1, v1, c2)?;
                println!("V2 = {:.4}", v2);
                println!("diluent to add = {:.4}", v2 - v1);
                Ok(())
            }
            (None, Some(v2)) => {
                let c2 = dilutions::dilute_to_concentration(c1, v1, v2)?;
                println!("C2 = {:.4}", c2);
                Ok(())
            }
            // clap enforces exactly one of --c2/--v2
            _ => anyhow::bail!("provide exactly one of --c2 or --v2"),
        },

        CalcAction::Serial {
            initial,
            factor,
            steps,
            transfer,
            volume,
        } => {
            let series = dilutions::serial_dilution(initial, factor, steps, transfer, volume)?;
            println!("{}", series);
            Ok(())
        }

        CalcAction::Absorbance { transmittance } => {
            let absorbance = dilutions::transmittance_to_absorbance(transmittance)?;
            println!("A = {:.4}", absorbance);
            Ok(())
        }

        CalcAction::Mastermix {
            reactions,
            volume,
            extra,
            polymerase,
            template,
        } => {
            let mix = pcr::master_mix(reactions, volume, extra, polymerase, template)?;
            println!("{}", mix);
            Ok(())
        }

        CalcAction::Tm { sequence, method } => {
            let tm = pcr::melting_temperature(&sequence, method)?;
            println!("Tm = {:.1} C", tm);
            Ok(())
        }

        CalcAction::Buffer { name, volume_ml } => {
            let Some(name) = name else {
                for key in buffers::names() {
                    println!("{key}");
                }
                return Ok(());
            };
            let recipe = buffers::recipe(&name)?;
            match volume_ml {
                Some(volume_ml) => {
                    println!("{} scaled to {} mL:", recipe.name, volume_ml);
                    for c in recipe.scale(volume_ml / 1000.0)? {
                        println!("  {}: {:.4} {}", c.name, c.amount, c.unit);
                    }
                }
                None => println!("{}", recipe),
            }
            Ok(())
        }
    }
}
