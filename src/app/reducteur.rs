//! src/app/reducteur.rs
//!
//! Transitions d’état : (état précédent, événement) -> nouvel état.
//! Pur : pas d’egui ici, tout se teste sans fenêtre.

use quickcalc::noyau::{
    CodeErreur, ConstructeurExpression, Evaluateur, Localiseur, MoteurArithmetique, MoteurRpn,
};
use tracing::debug;

use super::etat::{EtatCalc, Evenement, Phase};

#[derive(Clone, Debug)]
pub struct Reducteur<M = MoteurRpn> {
    evaluateur: Evaluateur<M>,
}

impl Reducteur<MoteurRpn> {
    pub fn new(localiseur: Localiseur) -> Self {
        Self::avec_evaluateur(Evaluateur::new(localiseur))
    }
}

impl<M: MoteurArithmetique> Reducteur<M> {
    pub fn avec_evaluateur(evaluateur: Evaluateur<M>) -> Self {
        Self { evaluateur }
    }

    pub fn localiseur(&self) -> &Localiseur {
        self.evaluateur.localiseur()
    }

    /// État de départ. Formule vide (ou blanche) => état vide.
    pub fn etat_initial(&self, formule: &str, comme_resultat: bool) -> EtatCalc {
        if formule.trim().is_empty() {
            return EtatCalc::default();
        }

        let saisie = ConstructeurExpression::depuis_affichage(formule, self.localiseur(), true);
        let etat = self.pour_saisie(&saisie);
        if comme_resultat {
            self.pour_egal(&etat)
        } else {
            etat
        }
    }

    pub fn reduire(&self, precedent: &EtatCalc, evenement: Evenement) -> EtatCalc {
        debug!(?evenement, phase = ?precedent.phase, "réduction");

        match evenement {
            Evenement::Ajouter {
                jeton,
                parenthese_ouvrante,
            } => {
                let mut saisie = self.constructeur(precedent);
                if parenthese_ouvrante {
                    saisie.ajouter(&format!("{jeton}("), self.localiseur());
                } else {
                    saisie.ajouter(&jeton, self.localiseur());
                }
                self.pour_saisie(&saisie)
            }

            Evenement::Effacer => {
                if precedent.formule.is_empty() {
                    return precedent.clone();
                }
                let mut saisie = self.constructeur(precedent);
                saisie.effacer_dernier();
                self.pour_saisie(&saisie)
            }

            Evenement::Vider => {
                if precedent.formule.is_empty() {
                    precedent.clone()
                } else {
                    EtatCalc::default()
                }
            }

            Evenement::Egal => self.pour_egal(precedent),
        }
    }

    /// Un résultat affiché n’est pas encore “modifié” : la prochaine saisie le remplace.
    fn constructeur(&self, etat: &EtatCalc) -> ConstructeurExpression {
        ConstructeurExpression::depuis_affichage(
            &etat.formule,
            self.localiseur(),
            etat.phase != Phase::Resultat,
        )
    }

    /// Saisie en cours : la formule et l’aperçu du résultat (vide si aucun).
    fn pour_saisie(&self, saisie: &ConstructeurExpression) -> EtatCalc {
        let formule = saisie.texte(self.localiseur());
        let resultat = self
            .evaluateur
            .evaluer(&formule)
            .resultat()
            .unwrap_or_default()
            .to_string();

        EtatCalc {
            formule,
            resultat,
            phase: Phase::Saisie,
        }
    }

    fn pour_egal(&self, precedent: &EtatCalc) -> EtatCalc {
        if precedent.phase != Phase::Saisie {
            return precedent.clone();
        }

        let mut suivant = EtatCalc {
            phase: Phase::Evaluation,
            ..precedent.clone()
        };

        let profil = *self.localiseur().profil();
        self.evaluateur
            .evaluate(&precedent.formule, |_expression, resultat, code| {
                suivant = match (code, resultat) {
                    (CodeErreur::Syntaxe | CodeErreur::Nan, _) => EtatCalc {
                        formule: precedent.formule.clone(),
                        resultat: code.message(&profil).unwrap_or_default().to_string(),
                        phase: Phase::Erreur,
                    },
                    (CodeErreur::Aucune, Some(r)) if !r.is_empty() => EtatCalc {
                        formule: r.to_string(),
                        resultat: r.to_string(),
                        phase: Phase::Resultat,
                    },
                    (CodeErreur::Aucune, _) => EtatCalc {
                        formule: precedent.formule.clone(),
                        resultat: String::new(),
                        phase: Phase::Saisie,
                    },
                };
            });

        suivant
    }
}
