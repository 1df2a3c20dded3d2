// src/noyau/moteur.rs
//
// Moteur arithmétique : texte canonique -> f64.
//
// Contrat (le seul que l’évaluateur connaît) :
// - Ok(v)  : l’expression est bien formée ; v peut être ±∞ ou NaN.
// - Err(_) : l’expression ne se lit pas. `Indefini` est réservé aux moteurs
//            qui signalent eux-mêmes un résultat indéterminé.

use thiserror::Error;
use tracing::trace;

use super::jetons::tokenize;
use super::rpn::{evaluer_rpn, format_rpn, to_rpn};

/// Garde-fou : au-delà, on refuse (anti-gel sur entrée collée énorme).
pub const MAX_JETONS: usize = 4096;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurMoteur {
    #[error("expression vide")]
    Vide,
    #[error("caractère inattendu '{1}' à {0}")]
    CaractereInattendu(usize, char),
    #[error("identifiant inconnu '{1}' à {0}")]
    IdentifiantInconnu(usize, String),
    #[error("nombre invalide à {0}")]
    NombreInvalide(usize),
    #[error("nombre inattendu à {0} (deux nombres se suivent)")]
    NombreInattendu(usize),
    #[error("opérateur inattendu '{1}' à {0}")]
    OperateurInattendu(usize, char),
    #[error("parenthèse fermante inattendue à {0}")]
    ParentheseInattendue(usize),
    #[error("parenthèse ouverte à {0} jamais fermée")]
    ParentheseNonFermee(usize),
    #[error("opérande manquant à {0}")]
    OperandeManquant(usize),
    #[error("expression trop longue ({0} jetons)")]
    Epuise(usize),
    #[error("résultat indéterminé")]
    Indefini,
}

/// Collaborateur de l’évaluateur : n’importe quel moteur qui lit une
/// expression infixe canonique (+ - * / ^ ! ( ), sin cos tan ln log).
pub trait MoteurArithmetique {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurMoteur>;
}

/// Moteur intégré : jetons -> shunting-yard -> RPN -> f64.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoteurRpn;

impl MoteurArithmetique for MoteurRpn {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurMoteur> {
        let jetons = tokenize(expression)?;
        if jetons.is_empty() {
            return Err(ErreurMoteur::Vide);
        }
        if jetons.len() > MAX_JETONS {
            return Err(ErreurMoteur::Epuise(jetons.len()));
        }

        let rpn = to_rpn(&jetons, expression.len())?;
        trace!(expression, rpn = %format_rpn(&rpn), "RPN");

        evaluer_rpn(&rpn)
    }
}

impl<M: MoteurArithmetique + ?Sized> MoteurArithmetique for &M {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurMoteur> {
        (**self).evaluer(expression)
    }
}
