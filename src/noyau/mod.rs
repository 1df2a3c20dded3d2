//! Noyau de la calculatrice (sans interface).
//!
//! Organisation interne :
//! - locale.rs       : profils de langue (symboles, chiffres, messages)
//! - localisation.rs : table de substitution canonique <-> localisé
//! - jetons.rs       : tokenisation de la forme canonique
//! - rpn.rs          : shunting-yard + évaluation de la file RPN
//! - moteur.rs       : moteur arithmétique (trait + implémentation RPN)
//! - format.rs       : mise en forme d’un résultat f64
//! - eval.rs         : pipeline complet (localisé -> résultat localisé)
//! - saisie.rs       : règles d’édition de la formule

pub mod eval;
pub mod format;
pub mod jetons;
pub mod locale;
pub mod localisation;
pub mod moteur;
pub mod rpn;
pub mod saisie;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

pub use eval::{CodeErreur, Evaluateur, Evaluation};
pub use format::formater_resultat;
pub use locale::ProfilLocale;
pub use localisation::Localiseur;
pub use moteur::{ErreurMoteur, MoteurArithmetique, MoteurRpn};
pub use saisie::ConstructeurExpression;
