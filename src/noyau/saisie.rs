// src/noyau/saisie.rs
//
// Construction de la formule touche par touche.
//
// Règles d’ajout en fin de texte (sur la forme canonique) :
// - '.'       : ignoré si le nombre courant a déjà un point décimal
// - '+' '*' '/' : ignorés sur texte vide, sinon remplacent TOUS les opérateurs finaux
// - '-'       : remplace un '+' ou '-' final (mais "2*" puis '-' donne "2*-")
// - tant que le texte n’a pas été modifié (il affiche un résultat), la première
//   touche qui n’est pas un opérateur remplace tout le texte ; un opérateur, lui,
//   continue à partir du résultat.

use super::localisation::Localiseur;

const OPERATEURS: &str = "+-*/";

/// Jetons effacés d’un bloc par `effacer_dernier`.
const JETONS_COMPOSES: &[&str] = &["sqrt(", "sin(", "cos(", "tan(", "log(", "ln(", "Infinity"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstructeurExpression {
    canon: String,
    modifie: bool,
}

impl ConstructeurExpression {
    pub fn new(canon: impl Into<String>, modifie: bool) -> Self {
        Self {
            canon: canon.into(),
            modifie,
        }
    }

    /// Repart d’un texte affiché (localisé).
    pub fn depuis_affichage(texte: &str, localiseur: &Localiseur, modifie: bool) -> Self {
        Self::new(localiseur.vers_canonique(texte), modifie)
    }

    pub fn canonique(&self) -> &str {
        &self.canon
    }

    pub fn est_modifie(&self) -> bool {
        self.modifie
    }

    pub fn texte(&self, localiseur: &Localiseur) -> String {
        localiseur.vers_localise(&self.canon)
    }

    fn precedent(&self, fin: usize) -> Option<char> {
        self.canon[..fin].chars().next_back()
    }

    /// Ajoute une saisie (canonique ou localisée) en fin de texte.
    pub fn ajouter(&mut self, saisie: &str, localiseur: &Localiseur) {
        let mut ajout = localiseur.vers_canonique(saisie);
        let mut debut = self.canon.len();

        let mut cs = ajout.chars();
        if let (Some(c), None) = (cs.next(), cs.next()) {
            match c {
                '.' => {
                    if let Some(i) = self.canon.rfind('.') {
                        if self.canon[i + 1..].bytes().all(|b| b.is_ascii_digit()) {
                            ajout.clear();
                        }
                    }
                }
                '+' | '*' | '/' => {
                    if debut == 0 {
                        ajout.clear();
                    } else {
                        // opérateurs ASCII : un octet chacun
                        while self.precedent(debut).is_some_and(|p| OPERATEURS.contains(p)) {
                            debut -= 1;
                        }
                        self.modifie = true;
                    }
                }
                '-' => {
                    if self.precedent(debut).is_some_and(|p| p == '+' || p == '-') {
                        debut -= 1;
                    }
                    self.modifie = true;
                }
                _ => {}
            }
        }

        if ajout.is_empty() {
            return;
        }

        if !self.modifie {
            debut = 0;
            self.modifie = true;
        }

        self.canon.truncate(debut);
        self.canon.push_str(&ajout);
    }

    /// Retire le dernier jeton (une fonction et sa parenthèse partent ensemble).
    pub fn effacer_dernier(&mut self) {
        self.modifie = true;

        for pat in JETONS_COMPOSES {
            if self.canon.ends_with(pat) {
                self.canon.truncate(self.canon.len() - pat.len());
                return;
            }
        }

        self.canon.pop();
    }

    pub fn vider(&mut self) {
        self.canon.clear();
        self.modifie = true;
    }
}
