//! Dilution and absorbance calculations.
//!
//! All functions are straight applications of C1*V1 = C2*V2 and the
//! Beer-Lambert relation; units are the caller's responsibility (the
//! result is in whatever unit the inputs were given in, as long as they
//! are consistent).

use std::fmt;
use thiserror::Error;

/// Error type for dilution math
#[derive(Error, Debug, PartialEq)]
pub enum DilutionError {
    #[error("{0} must be a positive, finite number")]
    NonPositive(&'static str),

    #[error("transmittance must be in (0, 1], got {0}")]
    TransmittanceOutOfRange(f64),

    #[error("transfer volume ({transfer}) must be smaller than the final volume ({final_volume})")]
    TransferExceedsFinal { transfer: f64, final_volume: f64 },

    #[error("dilution factor must be greater than 1, got {0}")]
    FactorTooSmall(f64),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DilutionError>;

fn require_positive(value: f64, label: &'static str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DilutionError::NonPositive(label))
    }
}

/// Final concentration after diluting `c1` at volume `v1` up to `v2`.
///
/// C2 = C1 * V1 / V2
pub fn dilute_to_concentration(c1: f64, v1: f64, v2: f64) -> Result<f64> {
    require_positive(c1, "initial concentration")?;
    require_positive(v1, "initial volume")?;
    require_positive(v2, "final volume")?;
    Ok(c1 * v1 / v2)
}

/// Final volume needed to bring `c1` at volume `v1` down to `c2`.
///
/// V2 = C1 * V1 / C2
pub fn dilute_to_volume(c1: f64, v1: f64, c2: f64) -> Result<f64> {
    require_positive(c1, "initial concentration")?;
    require_positive(v1, "initial volume")?;
    require_positive(c2, "final concentration")?;
    Ok(c1 * v1 / c2)
}

/// Convert fractional transmittance (0 < T <= 1) to absorbance.
///
/// A = -log10(T)
pub fn transmittance_to_absorbance(transmittance: f64) -> Result<f64> {
    if !transmittance.is_finite() || transmittance <= 0.0 || transmittance > 1.0 {
        return Err(DilutionError::TransmittanceOutOfRange(transmittance));
    }
    Ok(-transmittance.log10())
}

/// A serial dilution series with all per-step values computed up front.
///
/// `concentrations[0]` is the undiluted stock; each subsequent entry is
/// the previous one divided by `dilution_factor`.
#[derive(Debug, Clone, PartialEq)]
pub struct DilutionSeries {
    pub initial_concentration: f64,
    pub dilution_factor: f64,
    pub transfer_volume: f64,
    pub final_volume: f64,
    pub concentrations: Vec<f64>,
}

impl DilutionSeries {
    /// Diluent volume added to every tube after the stock.
    pub fn diluent_volume(&self) -> f64 {
        self.final_volume - self.transfer_volume
    }

    /// Number of dilution steps (excludes the stock tube).
    pub fn steps(&self) -> usize {
        self.concentrations.len().saturating_sub(1)
    }
}

impl fmt::Display for DilutionSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Serial dilution (1:{} fold)", self.dilution_factor)?;
        writeln!(
            f,
            "transfer {} per step, {} final volume per tube",
            self.transfer_volume, self.final_volume
        )?;
        for (i, conc) in self.concentrations.iter().enumerate() {
            let label = if i == 0 {
                "Stock".to_string()
            } else {
                format!("D{}", i)
            };
            let diluent = if i == 0 { 0.0 } else { self.diluent_volume() };
            writeln!(f, "{:>5}  {:>12.4}  diluent {:.1}", label, conc, diluent)?;
        }
        Ok(())
    }
}

/// Build a serial dilution series.
///
/// `steps` is the number of dilutions performed after the stock tube, so
/// the returned series holds `steps + 1` concentrations.
pub fn serial_dilution(
    initial_concentration: f64,
    factor: f64,
    steps: usize,
    transfer_volume: f64,
    final_volume: f64,
) -> Result<DilutionSeries> {
    require_positive(initial_concentration, "initial concentration")?;
    require_positive(transfer_volume, "transfer volume")?;
    require_positive(final_volume, "final volume")?;
    if !factor.is_finite() || factor <= 1.0 {
        return Err(DilutionError::FactorTooSmall(factor));
    }
    if transfer_volume >= final_volume {
        return Err(DilutionError::TransferExceedsFinal {
            transfer: transfer_volume,
            final_volume,
        });
    }

    let mut concentrations = Vec::with_capacity(steps + 1);
    let mut current = initial_concentration;
    concentrations.push(current);
    for _ in 0..steps {
        current /= factor;
        concentrations.push(current);
    }

    Ok(DilutionSeries {
        initial_concentration,
        dilution_factor: factor,
        transfer_volume,
        final_volume,
        concentrations,
    })
}
