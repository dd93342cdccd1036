//! Stock recipes for common laboratory buffers.
//!
//! Recipes are per liter; `BufferRecipe::scale` converts to any target
//! volume. Amounts stay in the unit the recipe states (grams for solids,
//! milliliters for liquid stocks).

use std::fmt;
use thiserror::Error;

/// Error type for buffer lookups
#[derive(Error, Debug, PartialEq)]
pub enum BufferError {
    #[error("unknown buffer '{name}'; available: {available}")]
    UnknownBuffer { name: String, available: String },

    #[error("volume must be a positive, finite number, got {0}")]
    BadVolume(f64),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BufferError>;

/// One ingredient of a buffer, amount per liter
#[derive(Debug, Clone, PartialEq)]
pub struct BufferComponent {
    pub name: &'static str,
    pub amount: f64,
    pub unit: &'static str,
}

/// A buffer recipe with components and preparation notes
#[derive(Debug, Clone, PartialEq)]
pub struct BufferRecipe {
    /// Lookup key, e.g. "PBS_10X"
    pub key: &'static str,
    /// Full descriptive name
    pub name: &'static str,
    pub ph: Option<f64>,
    pub components: Vec<BufferComponent>,
    pub notes: Vec<&'static str>,
}

impl BufferRecipe {
    /// Component amounts scaled to `volume_liters`.
    pub fn scale(&self, volume_liters: f64) -> Result<Vec<BufferComponent>> {
        if !volume_liters.is_finite() || volume_liters <= 0.0 {
            return Err(BufferError::BadVolume(volume_liters));
        }
        Ok(self
            .components
            .iter()
            .map(|c| BufferComponent {
                name: c.name,
                amount: c.amount * volume_liters,
                unit: c.unit,
            })
            .collect())
    }
}

impl fmt::Display for BufferRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Buffer: {}", self.name)?;
        if let Some(ph) = self.ph {
            writeln!(f, "pH: {}", ph)?;
        }
        writeln!(f, "Components (per liter):")?;
        for c in &self.components {
            writeln!(f, "  {}: {} {}", c.name, c.amount, c.unit)?;
        }
        if !self.notes.is_empty() {
            writeln!(f, "Notes:")?;
            for note in &self.notes {
                writeln!(f, "  - {}", note)?;
            }
        }
        Ok(())
    }
}

fn component(name: &'static str, amount: f64, unit: &'static str) -> BufferComponent {
    BufferComponent { name, amount, unit }
}

fn common_buffers() -> Vec<BufferRecipe> {
    vec![
        BufferRecipe {
            key: "PBS",
            name: "Phosphate Buffered Saline (PBS) 1X",
            ph: Some(7.4),
            components: vec![
                component("NaCl", 8.0, "g"),
                component("KCl", 0.2, "g"),
                component("Na2HPO4", 1.44, "g"),
                component("KH2PO4", 0.24, "g"),
            ],
            notes: vec![
                "Dissolve in 800 mL of distilled water",
                "Adjust pH to 7.4 with HCl",
                "Bring volume to 1 L with distilled water",
                "Autoclave for sterilization",
            ],
        },
        BufferRecipe {
            key: "PBS_10X",
            name: "Phosphate Buffered Saline (PBS) 10X",
            ph: Some(7.4),
            components: vec![
                component("NaCl", 80.0, "g"),
                component("KCl", 2.0, "g"),
                component("Na2HPO4", 14.4, "g"),
                component("KH2PO4", 2.4, "g"),
            ],
            notes: vec![
                "Dissolve in 800 mL of distilled water",
                "Adjust pH to 7.4 with HCl",
                "Bring volume to 1 L with distilled water",
                "Dilute 1:10 for working solution",
            ],
        },
        BufferRecipe {
            key: "TBS",
            name: "Tris Buffered Saline (TBS) 1X",
            ph: Some(7.6),
            components: vec![
                component("Tris base", 2.42, "g"),
                component("NaCl", 8.0, "g"),
            ],
            notes: vec![
                "Dissolve in 800 mL of distilled water",
                "Adjust pH to 7.6 with HCl",
                "Bring volume to 1 L with distilled water",
            ],
        },
        BufferRecipe {
            key: "TBS_10X",
            name: "Tris Buffered Saline (TBS) 10X",
            ph: Some(7.6),
            components: vec![
                component("Tris base", 24.2, "g"),
                component("NaCl", 80.0, "g"),
            ],
            notes: vec![
                "Dissolve in 800 mL of distilled water",
                "Adjust pH to 7.6 with HCl",
                "Bring volume to 1 L with distilled water",
            ],
        },
        BufferRecipe {
            key: "TBST",
            name: "Tris Buffered Saline with Tween-20 (TBST)",
            ph: Some(7.6),
            components: vec![
                component("Tris base", 2.42, "g"),
                component("NaCl", 8.0, "g"),
                component("Tween-20", 1.0, "mL"),
            ],
            notes: vec![
                "Dissolve Tris and NaCl in 800 mL of distilled water",
                "Adjust pH to 7.6 with HCl",
                "Add Tween-20 and mix gently",
                "Bring volume to 1 L with distilled water",
            ],
        },
        BufferRecipe {
            key: "TE",
            name: "Tris-EDTA (TE) Buffer",
            ph: Some(8.0),
            components: vec![
                component("Tris-HCl", 1.21, "g"),
                component("EDTA", 0.37, "g"),
            ],
            notes: vec![
                "Final concentration: 10 mM Tris, 1 mM EDTA",
                "Dissolve in 800 mL of distilled water",
                "Adjust pH to 8.0 with HCl",
                "Bring volume to 1 L with distilled water",
                "Autoclave or filter sterilize",
            ],
        },
        BufferRecipe {
            key: "TAE_50X",
            name: "Tris-Acetate-EDTA (TAE) 50X",
            ph: Some(8.3),
            components: vec![
                component("Tris base", 242.0, "g"),
                component("Glacial acetic acid", 57.1, "mL"),
                component("EDTA (0.5M, pH 8.0)", 100.0, "mL"),
            ],
            notes: vec![
                "Add Tris to 600 mL distilled water",
                "Add glacial acetic acid and EDTA solution",
                "Bring volume to 1 L with distilled water",
                "Dilute 1:50 for working solution (1X TAE)",
            ],
        },
        BufferRecipe {
            key: "TBE_10X",
            name: "Tris-Borate-EDTA (TBE) 10X",
            ph: Some(8.3),
            components: vec![
                component("Tris base", 108.0, "g"),
                component("Boric acid", 55.0, "g"),
                component("EDTA", 7.44, "g"),
            ],
            notes: vec![
                "Dissolve in 800 mL of distilled water",
                "Bring volume to 1 L with distilled water",
                "No pH adjustment needed",
                "Dilute 1:10 for working solution",
            ],
        },
        BufferRecipe {
            key: "RIPA",
            name: "RIPA Lysis Buffer",
            ph: Some(8.0),
            components: vec![
                component("NaCl", 8.76, "g"),
                component("Tris-HCl (1M, pH 8.0)", 50.0, "mL"),
                component("NP-40", 10.0, "mL"),
                component("Sodium deoxycholate", 5.0, "g"),
                component("SDS", 1.0, "g"),
            ],
            notes: vec![
                "Final: 150 mM NaCl, 50 mM Tris, 1% NP-40, 0.5% deoxycholate, 0.1% SDS",
                "Add protease inhibitors fresh before use",
                "Keep on ice during use",
            ],
        },
        BufferRecipe {
            key: "LOADING_6X",
            name: "6X DNA Loading Buffer",
            ph: None,
            components: vec![
                component("Bromophenol blue", 0.25, "g"),
                component("Xylene cyanol FF", 0.25, "g"),
                component("Glycerol", 300.0, "mL"),
            ],
            notes: vec![
                "Mix components and bring to 1 L with distilled water",
                "Store at 4C",
                "Use 1 uL per 5 uL of DNA sample",
            ],
        },
    ]
}

/// All recipe keys, in catalog order.
pub fn names() -> Vec<&'static str> {
    common_buffers().iter().map(|r| r.key).collect()
}

/// Look up a recipe by key, case-insensitively.
pub fn recipe(name: &str) -> Result<BufferRecipe> {
    let key = name.to_uppercase();
    common_buffers()
        .into_iter()
        .find(|r| r.key == key)
        .ok_or_else(|| BufferError::UnknownBuffer {
            name: name.to_string(),
            available: names().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lower = recipe("pbs").unwrap();
        let upper = recipe("PBS").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.key, "PBS");
        assert_eq!(lower.ph, Some(7.4));
    }

    #[test]
    fn test_unknown_buffer_lists_available() {
        let err = recipe("HEPES").unwrap_err();
        match err {
            BufferError::UnknownBuffer { name, available } => {
                assert_eq!(name, "HEPES");
                assert!(available.contains("PBS"));
                assert!(available.contains("RIPA"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scale_multiplies_amounts() {
        let recipe = recipe("TE").unwrap();
        // 500 mL is half a liter
        let scaled = recipe.scale(0.5).unwrap();
        let tris = scaled.iter().find(|c| c.name == "Tris-HCl").unwrap();
        assert!((tris.amount - 0.605).abs() < 1e-9);
        assert_eq!(tris.unit, "g");
    }

    #[test]
    fn test_scale_rejects_bad_volume() {
        let recipe = recipe("PBS").unwrap();
        assert!(matches!(recipe.scale(0.0), Err(BufferError::BadVolume(_))));
        assert!(matches!(
            recipe.scale(f64::NAN),
            Err(BufferError::BadVolume(_))
        ));
    }

    #[test]
    fn test_catalog_has_ten_recipes() {
        let all = names();
        assert_eq!(all.len(), 10);
        for key in all {
            assert!(recipe(key).is_ok());
        }
    }

    #[test]
    fn test_display_includes_ph_and_notes() {
        let text = format!("{}", recipe("TBST").unwrap());
        assert!(text.contains("pH: 7.6"));
        assert!(text.contains("Tween-20"));
        assert!(text.contains("Notes:"));
        // LOADING_6X has no pH line
        let text = format!("{}", recipe("LOADING_6X").unwrap());
        assert!(!text.contains("pH:"));
    }
}
