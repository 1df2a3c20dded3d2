//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : ce que l’écran affiche (formule, résultat, phase) et les événements
//! qui le font évoluer. Les transitions vivent dans reducteur.rs.

/// Phase de l’écran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Saisie en cours (résultat = aperçu).
    #[default]
    Saisie,
    /// Évaluation lancée par "=", le temps de recevoir le rappel.
    Evaluation,
    /// "=" a donné un résultat ; la formule l’affiche.
    Resultat,
    /// "=" a échoué ; le résultat affiche le message d’erreur.
    Erreur,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EtatCalc {
    /// Formule affichée (localisée).
    pub formule: String,
    /// Aperçu, résultat final, ou message d’erreur selon la phase.
    pub resultat: String,
    pub phase: Phase,
}

impl EtatCalc {
    /// La touche d’effacement devient "tout effacer".
    pub fn affiche_effacer(&self) -> bool {
        matches!(self.phase, Phase::Resultat | Phase::Erreur)
    }

    pub fn en_erreur(&self) -> bool {
        self.phase == Phase::Erreur
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evenement {
    /// Ajout d’un jeton (canonique ou localisé), suivi de "(" si demandé.
    Ajouter {
        jeton: String,
        parenthese_ouvrante: bool,
    },
    /// Retire le dernier jeton.
    Effacer,
    /// Remise à zéro.
    Vider,
    Egal,
}

impl Evenement {
    pub fn ajouter(jeton: impl Into<String>) -> Self {
        Evenement::Ajouter {
            jeton: jeton.into(),
            parenthese_ouvrante: false,
        }
    }

    /// Fonction : le nom puis sa parenthèse.
    pub fn fonction(nom: impl Into<String>) -> Self {
        Evenement::Ajouter {
            jeton: nom.into(),
            parenthese_ouvrante: true,
        }
    }
}
