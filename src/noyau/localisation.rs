// src/noyau/localisation.rs
//
// Localiseur : canonique (ASCII) <-> affichage (langue).
//
// La table est construite une fois à partir d’un profil, puis figée.
// La substitution se fait en UNE passe, gauche -> droite, plus long motif d’abord :
// un texte déjà remplacé n’est jamais re-remplacé (pas d’effet “cascade”
// du genre '.' -> ',' puis ',' -> autre chose).

use super::locale::ProfilLocale;

/// Jeton canonique de l’infini (aussi ce que produit l’évaluateur pour ±∞).
pub const INFINI: &str = "Infinity";

/// Paires (canonique, localisé), dans l’ordre de construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSubstitution {
    paires: Vec<(String, String)>,
}

impl TableSubstitution {
    pub fn depuis_profil(profil: &ProfilLocale) -> Self {
        let mut paires: Vec<(String, String)> = Vec::with_capacity(20);

        paires.push((".".into(), profil.separateur_decimal.to_string()));

        for d in 0..10u32 {
            paires.push((d.to_string(), profil.chiffre(d).to_string()));
        }

        paires.push(("/".into(), profil.op_div.into()));
        paires.push(("*".into(), profil.op_mul.into()));
        paires.push(("-".into(), profil.op_sub.into()));

        paires.push(("cos".into(), profil.fun_cos.into()));
        paires.push(("ln".into(), profil.fun_ln.into()));
        paires.push(("log".into(), profil.fun_log.into()));
        paires.push(("sin".into(), profil.fun_sin.into()));
        paires.push(("tan".into(), profil.fun_tan.into()));

        paires.push((INFINI.into(), profil.infini.into()));

        Self { paires }
    }

    pub fn paires(&self) -> &[(String, String)] {
        &self.paires
    }

    pub fn localise(&self, canonique: &str) -> Option<&str> {
        self.paires
            .iter()
            .find(|(c, _)| c == canonique)
            .map(|(_, l)| l.as_str())
    }
}

/// Remplacements orientés (source -> cible), triés du plus long au plus court.
#[derive(Clone, Debug)]
struct Remplacements(Vec<(String, String)>);

impl Remplacements {
    fn new<'a>(iter: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let mut v: Vec<(String, String)> = iter
            .filter(|(de, _)| !de.is_empty())
            .map(|(de, vers)| (de.to_string(), vers.to_string()))
            .collect();
        // tri stable : à longueur égale, l’ordre de la table est conservé
        v.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        Self(v)
    }

    fn appliquer(&self, texte: &str) -> String {
        let mut out = String::with_capacity(texte.len());
        let mut reste = texte;

        'boucle: while !reste.is_empty() {
            for (de, vers) in &self.0 {
                if let Some(suite) = reste.strip_prefix(de.as_str()) {
                    out.push_str(vers);
                    reste = suite;
                    continue 'boucle;
                }
            }

            // aucun motif : on recopie un caractère
            let mut it = reste.chars();
            if let Some(c) = it.next() {
                out.push(c);
            }
            reste = it.as_str();
        }

        out
    }
}

/// Tokenizer/localiseur d’expressions.
#[derive(Clone, Debug)]
pub struct Localiseur {
    profil: ProfilLocale,
    table: TableSubstitution,
    vers_canon: Remplacements,
    vers_local: Remplacements,
}

impl Localiseur {
    /// `chiffres_localises == false` : chiffres latins, tout le reste selon la langue.
    pub fn new(profil: ProfilLocale, chiffres_localises: bool) -> Self {
        let profil = if chiffres_localises {
            profil
        } else {
            profil.en_chiffres_latins()
        };

        let table = TableSubstitution::depuis_profil(&profil);
        let vers_canon =
            Remplacements::new(table.paires().iter().map(|(c, l)| (l.as_str(), c.as_str())));
        let vers_local =
            Remplacements::new(table.paires().iter().map(|(c, l)| (c.as_str(), l.as_str())));

        Self {
            profil,
            table,
            vers_canon,
            vers_local,
        }
    }

    /// Raccourci : étiquette de langue ("fr-FR", "fa_IR.UTF-8", …).
    pub fn pour_langue(etiquette: &str, chiffres_localises: bool) -> Self {
        Self::new(ProfilLocale::resoudre(etiquette), chiffres_localises)
    }

    pub fn profil(&self) -> &ProfilLocale {
        &self.profil
    }

    pub fn table(&self) -> &TableSubstitution {
        &self.table
    }

    /// Texte affiché -> forme canonique. Idempotent.
    pub fn vers_canonique(&self, texte: &str) -> String {
        self.vers_canon.appliquer(texte)
    }

    /// Forme canonique -> texte affiché.
    pub fn vers_localise(&self, texte: &str) -> String {
        self.vers_local.appliquer(texte)
    }
}

impl Default for Localiseur {
    fn default() -> Self {
        Self::new(ProfilLocale::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalise_les_glyphes_operateurs() {
        let loc = Localiseur::default();
        assert_eq!(loc.vers_canonique("1÷2×3−4"), "1/2*3-4");
    }

    #[test]
    fn localise_infini() {
        let loc = Localiseur::default();
        assert_eq!(loc.vers_localise("Infinity"), "∞");
        assert_eq!(loc.vers_localise("-Infinity"), "−∞");
    }

    #[test]
    fn francais_virgule_decimale() {
        let loc = Localiseur::pour_langue("fr-FR", true);
        let l = loc.vers_localise("3.14");
        assert!(l.contains(','), "attendu une virgule: {l:?}");
        assert_eq!(loc.vers_canonique(&l), "3.14");
    }

    #[test]
    fn persan_chiffres_localises() {
        let loc = Localiseur::pour_langue("fa-IR", true);
        let l = loc.vers_localise("1234.5");
        assert_ne!(l, "1234.5");
        assert_eq!(l, "۱۲۳۴٫۵");
        assert_eq!(loc.vers_canonique(&l), "1234.5");
    }

    #[test]
    fn persan_chiffres_latins_forces() {
        let loc = Localiseur::pour_langue("fa-IR", false);
        assert_eq!(loc.vers_localise("1234.5"), "1234٫5");
        assert_eq!(loc.vers_localise("2*3"), "2×3");
    }

    #[test]
    fn texte_partiellement_canonique() {
        let loc = Localiseur::pour_langue("fr", true);
        assert_eq!(loc.vers_canonique("1,5*2−3.25"), "1.5*2-3.25");
    }

    #[test]
    fn noms_de_fonctions_localises() {
        let loc = Localiseur::pour_langue("es-ES", true);
        assert_eq!(loc.vers_localise("sin(1)+cos(2)"), "sen(1)+cos(2)");
        assert_eq!(loc.vers_canonique("sen(1)+cos(2)"), "sin(1)+cos(2)");
    }

    #[test]
    fn log_avant_ln_sans_collision() {
        let loc = Localiseur::default();
        assert_eq!(loc.vers_localise("ln(log(2))"), "ln(log(2))");
        assert_eq!(loc.vers_canonique("ln(log(2))"), "ln(log(2))");
    }

    #[test]
    fn table_ordonnee() {
        let loc = Localiseur::pour_langue("fr", true);
        let paires = loc.table().paires();
        assert_eq!(paires[0], (".".to_string(), ",".to_string()));
        assert_eq!(paires.len(), 20);
        assert_eq!(loc.table().localise("Infinity"), Some("∞"));
        assert_eq!(loc.table().localise("+"), None);
    }
}
