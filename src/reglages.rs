// src/reglages.rs
//
// Réglages de lancement : langue, chiffres, formule de départ.
// En natif ils viennent de la ligne de commande (voir main.rs) ; en web, défauts.

use tracing::debug;

use crate::noyau::Localiseur;

/// Langue retenue quand l’environnement n’en donne aucune.
pub const LOCALE_DEFAUT: &str = "en";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    /// Étiquette de langue ("fr-FR", "fa_IR.UTF-8", …).
    pub locale: String,
    /// false : chiffres latins quelle que soit la langue.
    pub chiffres_localises: bool,
    pub formule_initiale: String,
    /// La formule initiale est évaluée comme après "=".
    pub comme_resultat: bool,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            locale: LOCALE_DEFAUT.to_string(),
            chiffres_localises: true,
            formule_initiale: String::new(),
            comme_resultat: false,
        }
    }
}

impl Reglages {
    pub fn localiseur(&self) -> Localiseur {
        Localiseur::pour_langue(&self.locale, self.chiffres_localises)
    }
}

/// Langue du système : LC_ALL, puis LANG. "C" / "POSIX" ne comptent pas.
pub fn locale_systeme() -> String {
    choisir_locale(
        std::env::var("LC_ALL").ok().as_deref(),
        std::env::var("LANG").ok().as_deref(),
    )
}

fn choisir_locale(lc_all: Option<&str>, lang: Option<&str>) -> String {
    let utile = |v: &&str| {
        let v = v.trim();
        !v.is_empty() && v != "C" && !v.starts_with("C.") && v != "POSIX"
    };

    match lc_all.filter(utile).or(lang.filter(utile)) {
        Some(v) => v.trim().to_string(),
        None => {
            debug!("aucune langue système, repli sur {LOCALE_DEFAUT}");
            LOCALE_DEFAUT.to_string()
        }
    }
}
