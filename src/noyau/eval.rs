//! Noyau — évaluation (pipeline réel)
//!
//! texte affiché -> canonique -> retrait des opérateurs finaux -> moteur
//!        -> classement (succès / sans résultat / syntaxe / NaN) -> mise en forme -> localisé
//!
//! L’évaluateur n’a pas d’état propre : seul le localiseur (table figée) et le
//! moteur sont conservés. Aucune erreur du moteur ne remonte à l’appelant :
//! tout est ramené à `CodeErreur`.

use tracing::debug;

use super::format::formater_resultat;
use super::locale::ProfilLocale;
use super::localisation::{Localiseur, INFINI};
use super::moteur::{ErreurMoteur, MoteurArithmetique, MoteurRpn};

const OPERATEURS_BINAIRES: [char; 4] = ['+', '-', '*', '/'];

/// Code d’erreur remis au rappel. `Aucune` est la sentinelle “pas d’erreur”.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CodeErreur {
    #[default]
    Aucune,
    Syntaxe,
    Nan,
}

impl CodeErreur {
    pub fn est_erreur(self) -> bool {
        self != CodeErreur::Aucune
    }

    /// Message affichable dans la langue du profil (None pour `Aucune`).
    pub fn message(self, profil: &ProfilLocale) -> Option<&'static str> {
        match self {
            CodeErreur::Aucune => None,
            CodeErreur::Syntaxe => Some(profil.erreur_syntaxe),
            CodeErreur::Nan => Some(profil.erreur_nan),
        }
    }
}

/// Issue d’une évaluation. `expression` est toujours la forme tronquée, localisée.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Résultat fini, ou ±∞ (affiché avec le symbole localisé).
    Succes { expression: String, resultat: String },
    /// Rien à calculer : texte vide après retrait des opérateurs finaux, ou nombre seul.
    SansResultat { expression: String },
    ErreurSyntaxe { expression: String },
    ErreurNan { expression: String },
}

impl Evaluation {
    pub fn expression(&self) -> &str {
        match self {
            Evaluation::Succes { expression, .. }
            | Evaluation::SansResultat { expression }
            | Evaluation::ErreurSyntaxe { expression }
            | Evaluation::ErreurNan { expression } => expression,
        }
    }

    pub fn resultat(&self) -> Option<&str> {
        match self {
            Evaluation::Succes { resultat, .. } => Some(resultat),
            _ => None,
        }
    }

    pub fn code(&self) -> CodeErreur {
        match self {
            Evaluation::ErreurSyntaxe { .. } => CodeErreur::Syntaxe,
            Evaluation::ErreurNan { .. } => CodeErreur::Nan,
            _ => CodeErreur::Aucune,
        }
    }
}

/// Retire tous les opérateurs binaires (et blancs) en fin d’expression canonique.
pub fn tronquer_operateurs(canon: &str) -> &str {
    canon.trim_end_matches(|c: char| OPERATEURS_BINAIRES.contains(&c) || c.is_whitespace())
}

/// Nombre seul : `-`? chiffres avec au plus un '.', exposant `E[+-]n` optionnel, ou Infinity.
fn est_nombre_simple(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    if s == INFINI {
        return true;
    }

    let (mantisse, exposant) = match s.split_once('E') {
        Some((m, e)) => (m, Some(e)),
        None => (s, None),
    };

    let mantisse_ok = mantisse.bytes().any(|b| b.is_ascii_digit())
        && mantisse.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && mantisse.bytes().filter(|&b| b == b'.').count() <= 1;

    let exposant_ok = match exposant {
        None => true,
        Some(e) => {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && e.bytes().all(|b| b.is_ascii_digit())
        }
    };

    mantisse_ok && exposant_ok
}

/// Évaluateur d’expressions : localiseur + moteur arithmétique.
#[derive(Clone, Debug)]
pub struct Evaluateur<M = MoteurRpn> {
    localiseur: Localiseur,
    moteur: M,
}

impl Evaluateur<MoteurRpn> {
    pub fn new(localiseur: Localiseur) -> Self {
        Self::avec_moteur(localiseur, MoteurRpn)
    }
}

impl Default for Evaluateur<MoteurRpn> {
    fn default() -> Self {
        Self::new(Localiseur::default())
    }
}

impl<M: MoteurArithmetique> Evaluateur<M> {
    pub fn avec_moteur(localiseur: Localiseur, moteur: M) -> Self {
        Self { localiseur, moteur }
    }

    pub fn localiseur(&self) -> &Localiseur {
        &self.localiseur
    }

    /// Évalue un texte (canonique ou localisé) et classe l’issue.
    pub fn evaluer(&self, brut: &str) -> Evaluation {
        let canon = self.localiseur.vers_canonique(brut);
        let tronque = tronquer_operateurs(&canon);
        let expression = self.localiseur.vers_localise(tronque);

        if tronque.trim().is_empty() || est_nombre_simple(tronque) {
            return Evaluation::SansResultat { expression };
        }

        let issue = match self.moteur.evaluer(tronque) {
            Ok(v) if v.is_nan() => Evaluation::ErreurNan { expression },
            Err(ErreurMoteur::Indefini) => Evaluation::ErreurNan { expression },
            Err(e) => {
                debug!(expression = tronque, erreur = %e, "erreur de syntaxe");
                Evaluation::ErreurSyntaxe { expression }
            }
            Ok(v) => {
                // formater_resultat rend déjà "Infinity" / "-Infinity" pour ±∞
                let resultat = self.localiseur.vers_localise(&formater_resultat(v));
                Evaluation::Succes {
                    expression,
                    resultat,
                }
            }
        };

        debug!(expression = tronque, code = ?issue.code(), resultat = ?issue.resultat(), "évaluation");
        issue
    }

    /// Forme “rappel” : `rappel(expression, résultat?, code)` est appelé exactement
    /// une fois, de façon synchrone, avant le retour.
    pub fn evaluate<F>(&self, brut: &str, rappel: F)
    where
        F: FnOnce(&str, Option<&str>, CodeErreur),
    {
        let issue = self.evaluer(brut);
        rappel(issue.expression(), issue.resultat(), issue.code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recu {
        expr: String,
        resultat: Option<String>,
        code: CodeErreur,
        appels: usize,
    }

    fn evaluer_avec<M: MoteurArithmetique>(ev: &Evaluateur<M>, s: &str) -> Recu {
        let mut r = Recu::default();
        ev.evaluate(s, |expr, resultat, code| {
            r.expr = expr.to_string();
            r.resultat = resultat.map(str::to_string);
            r.code = code;
            r.appels += 1;
        });
        assert_eq!(r.appels, 1, "rappel appelé {} fois pour {s:?}", r.appels);
        r
    }

    fn evaluer(s: &str) -> Recu {
        evaluer_avec(&Evaluateur::default(), s)
    }

    fn assert_valeur(s: &str, attendu: &str) {
        let r = evaluer(s);
        assert_eq!(r.code, CodeErreur::Aucune, "erreur inattendue pour {s:?}");
        assert_eq!(r.resultat.as_deref(), Some(attendu), "valeur pour {s:?}");
    }

    fn assert_erreur(s: &str, code: CodeErreur) {
        let r = evaluer(s);
        assert_eq!(r.code, code, "code pour {s:?}");
        assert!(r.resultat.is_none(), "résultat inattendu pour {s:?}");
    }

    #[test]
    fn valeurs_de_reference() {
        assert_valeur("1+2*3", "7");
        assert_valeur("(1+2)*3", "9");
        assert_valeur("sin(0)", "0");
        assert_valeur("log(100)", "2");
        assert_valeur("1/0", "∞");

        assert_erreur("0/0", CodeErreur::Nan);
        assert_erreur("1/(", CodeErreur::Syntaxe);
    }

    #[test]
    fn petits_angles() {
        assert_valeur("sin(1E-12)", "1E-12");
        assert_valeur("tan(1E-13)", "1E-13");
        assert_valeur("sin(π)", "0");
    }

    #[test]
    fn factorielle_demesuree() {
        assert_valeur("800.5!", "∞");
        assert_valeur("(-800.5)!", "0");
    }

    #[test]
    fn precedence_et_expression_affichee() {
        let r = evaluer("1+2*3");
        assert_eq!(r.expr, "1+2×3");
        assert_eq!(r.resultat.as_deref(), Some("7"));
        assert_eq!(r.code, CodeErreur::Aucune);
    }

    #[test]
    fn operateur_final_retire_sans_erreur() {
        let r = evaluer("1+");
        assert_eq!(r.expr, "1");
        assert!(r.resultat.is_none());
        assert_eq!(r.code, CodeErreur::Aucune);

        let r = evaluer("99/");
        assert_eq!(r.expr, "99");
        assert!(r.resultat.is_none());
        assert_eq!(r.code, CodeErreur::Aucune);
    }

    #[test]
    fn troncature_garde_le_resultat_du_prefixe() {
        let r = evaluer("2*3−×");
        assert_eq!(r.expr, "2×3");
        assert_eq!(r.resultat.as_deref(), Some("6"));
    }

    #[test]
    fn texte_vide_ou_nombre_seul() {
        for s in ["", "   ", "+", "*/-", "42", "-5", "3.14", "1.5E-7", "∞", "−∞"] {
            let r = evaluer(s);
            assert!(r.resultat.is_none(), "pas de résultat attendu pour {s:?}");
            assert_eq!(r.code, CodeErreur::Aucune, "pas d’erreur attendue pour {s:?}");
        }
        assert_eq!(evaluer("*/-").expr, "");
        assert_eq!(evaluer("-5").expr, "−5");
    }

    #[test]
    fn infini_negatif() {
        assert_valeur("-1/0", "−∞");
        assert_valeur("ln(0)", "−∞");
    }

    #[test]
    fn erreurs_nan() {
        assert_erreur("ln(-1)", CodeErreur::Nan);
        assert_erreur("√-4", CodeErreur::Nan);
        assert_erreur("(-2)!", CodeErreur::Nan);
        assert_erreur("Infinity-Infinity", CodeErreur::Nan);
    }

    #[test]
    fn erreurs_syntaxe() {
        assert_erreur("1+@2", CodeErreur::Syntaxe);
        assert_erreur("(1+2", CodeErreur::Syntaxe);
        assert_erreur("1+2)", CodeErreur::Syntaxe);
        assert_erreur("sin(", CodeErreur::Syntaxe);
        assert_erreur("foo", CodeErreur::Syntaxe);
        assert_erreur("1.2.3+1", CodeErreur::Syntaxe);
        assert_erreur("1 000", CodeErreur::Syntaxe);
        assert_erreur("1E20.5", CodeErreur::Syntaxe);
    }

    #[test]
    fn mutation_operateur_change_le_resultat() {
        assert_ne!(evaluer("2+3").resultat, evaluer("2-3").resultat);
        assert_ne!(evaluer("4*5").resultat, evaluer("4/5").resultat);
        assert_ne!(evaluer("sin(0)").resultat, evaluer("cos(0)").resultat);
        assert_eq!(evaluer("4/5").resultat.as_deref(), Some("0.8"));
    }

    #[test]
    fn entree_et_sortie_localisees() {
        let ev = Evaluateur::new(Localiseur::pour_langue("fr-FR", true));
        let r = evaluer_avec(&ev, "1,5×2−0,25");
        assert_eq!(r.expr, "1,5×2−0,25");
        assert_eq!(r.resultat.as_deref(), Some("2,75"));

        let ev = Evaluateur::new(Localiseur::pour_langue("fa-IR", true));
        let r = evaluer_avec(&ev, "۱÷۴");
        assert_eq!(r.resultat.as_deref(), Some("۰٫۲۵"));
    }

    /* ------------------------ Injection de pannes (moteur factice) ------------------------ */

    struct MoteurFixe(Result<f64, ErreurMoteur>);

    impl MoteurArithmetique for MoteurFixe {
        fn evaluer(&self, _expression: &str) -> Result<f64, ErreurMoteur> {
            self.0.clone()
        }
    }

    fn avec_moteur(issue: Result<f64, ErreurMoteur>) -> Evaluateur<MoteurFixe> {
        Evaluateur::avec_moteur(Localiseur::default(), MoteurFixe(issue))
    }

    #[test]
    fn toute_panne_moteur_devient_erreur_de_syntaxe() {
        let pannes = [
            ErreurMoteur::Vide,
            ErreurMoteur::Epuise(10_000),
            ErreurMoteur::OperandeManquant(0),
            ErreurMoteur::IdentifiantInconnu(0, "x".into()),
            ErreurMoteur::ParentheseNonFermee(3),
        ];
        for p in pannes {
            let r = evaluer_avec(&avec_moteur(Err(p.clone())), "1+1");
            assert_eq!(r.code, CodeErreur::Syntaxe, "panne {p:?}");
            assert_eq!(r.expr, "1+1");
            assert!(r.resultat.is_none());
        }
    }

    #[test]
    fn indefini_signale_par_le_moteur() {
        let r = evaluer_avec(&avec_moteur(Err(ErreurMoteur::Indefini)), "1+1");
        assert_eq!(r.code, CodeErreur::Nan);
        let r = evaluer_avec(&avec_moteur(Ok(f64::NAN)), "1+1");
        assert_eq!(r.code, CodeErreur::Nan);
    }

    #[test]
    fn moteur_non_appele_sans_rien_a_calculer() {
        // le moteur factice renverrait une panne : elle ne doit pas apparaître
        let ev = avec_moteur(Err(ErreurMoteur::Vide));
        assert_eq!(evaluer_avec(&ev, "12+").code, CodeErreur::Aucune);
    }

    #[test]
    fn messages_d_erreur_localises() {
        let fr = ProfilLocale::resoudre("fr");
        assert_eq!(CodeErreur::Syntaxe.message(&fr), Some("Erreur"));
        assert_eq!(CodeErreur::Nan.message(&fr), Some("Pas un nombre"));
        assert_eq!(CodeErreur::Aucune.message(&fr), None);
        assert!(!CodeErreur::Aucune.est_erreur());
    }
}
