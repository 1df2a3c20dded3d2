//! quickcalc : évaluateur d’expressions localisé + calculatrice egui.
//!
//! - `noyau`    : localisation, moteur, mise en forme, règles de saisie
//! - `reglages` : langue et formule de départ

pub mod noyau;
pub mod reglages;

pub use reglages::Reglages;
