// src/noyau/locale.rs
//
// Profils de langue intégrés.
// Un profil décrit tout ce qui change à l’affichage selon la langue :
// séparateur décimal, chiffre zéro du système de numération, glyphes des
// opérateurs, noms de fonctions, infini, messages d’erreur.
//
// Pas d’état global : on résout une étiquette ("fr-FR", "fa_IR.UTF-8", …)
// vers un profil constant, et c’est tout.

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfilLocale {
    /// Sous-étiquette de langue (ISO 639-1, minuscules).
    pub langue: &'static str,

    pub separateur_decimal: char,
    /// Chiffre zéro du système de numération natif ('0' pour latn).
    pub zero: char,

    pub op_div: &'static str,
    pub op_mul: &'static str,
    pub op_sub: &'static str,

    pub fun_sin: &'static str,
    pub fun_cos: &'static str,
    pub fun_tan: &'static str,
    pub fun_ln: &'static str,
    pub fun_log: &'static str,

    pub infini: &'static str,

    pub erreur_syntaxe: &'static str,
    pub erreur_nan: &'static str,
}

const ANGLAIS: ProfilLocale = ProfilLocale {
    langue: "en",
    separateur_decimal: '.',
    zero: '0',
    op_div: "÷",
    op_mul: "×",
    op_sub: "−",
    fun_sin: "sin",
    fun_cos: "cos",
    fun_tan: "tan",
    fun_ln: "ln",
    fun_log: "log",
    infini: "∞",
    erreur_syntaxe: "Error",
    erreur_nan: "Not a number",
};

const FRANCAIS: ProfilLocale = ProfilLocale {
    langue: "fr",
    separateur_decimal: ',',
    erreur_syntaxe: "Erreur",
    erreur_nan: "Pas un nombre",
    ..ANGLAIS
};

const ALLEMAND: ProfilLocale = ProfilLocale {
    langue: "de",
    separateur_decimal: ',',
    erreur_syntaxe: "Fehler",
    erreur_nan: "Keine Zahl",
    ..ANGLAIS
};

const ESPAGNOL: ProfilLocale = ProfilLocale {
    langue: "es",
    separateur_decimal: ',',
    fun_sin: "sen",
    erreur_syntaxe: "Error",
    erreur_nan: "No es un número",
    ..ANGLAIS
};

const ITALIEN: ProfilLocale = ProfilLocale {
    langue: "it",
    separateur_decimal: ',',
    erreur_syntaxe: "Errore",
    erreur_nan: "Non è un numero",
    ..ANGLAIS
};

const PORTUGAIS: ProfilLocale = ProfilLocale {
    langue: "pt",
    separateur_decimal: ',',
    fun_sin: "sen",
    erreur_syntaxe: "Erro",
    erreur_nan: "Não é um número",
    ..ANGLAIS
};

const RUSSE: ProfilLocale = ProfilLocale {
    langue: "ru",
    separateur_decimal: ',',
    erreur_syntaxe: "Ошибка",
    erreur_nan: "Не число",
    ..ANGLAIS
};

const PERSAN: ProfilLocale = ProfilLocale {
    langue: "fa",
    separateur_decimal: '\u{066B}',
    zero: '\u{06F0}',
    erreur_syntaxe: "خطا",
    erreur_nan: "عدد نیست",
    ..ANGLAIS
};

const ARABE: ProfilLocale = ProfilLocale {
    langue: "ar",
    separateur_decimal: '\u{066B}',
    zero: '\u{0660}',
    erreur_syntaxe: "خطأ",
    erreur_nan: "ليس رقمًا",
    ..ANGLAIS
};

const MARATHI: ProfilLocale = ProfilLocale {
    langue: "mr",
    zero: '\u{0966}',
    erreur_syntaxe: "त्रुटी",
    erreur_nan: "संख्या नाही",
    ..ANGLAIS
};

const BENGALI: ProfilLocale = ProfilLocale {
    langue: "bn",
    zero: '\u{09E6}',
    erreur_syntaxe: "ত্রুটি",
    erreur_nan: "সংখ্যা নয়",
    ..ANGLAIS
};

/// Tous les profils connus (le premier sert de repli).
pub const PROFILS: &[ProfilLocale] = &[
    ANGLAIS, FRANCAIS, ALLEMAND, ESPAGNOL, ITALIEN, PORTUGAIS, RUSSE, PERSAN, ARABE, MARATHI,
    BENGALI,
];

impl Default for ProfilLocale {
    fn default() -> Self {
        ANGLAIS
    }
}

impl ProfilLocale {
    /// Résout une étiquette de langue vers un profil.
    ///
    /// Accepte les formes BCP-47 ("fr-FR") et POSIX ("fr_FR.UTF-8", "fr_FR@euro"),
    /// insensible à la casse. Seule la langue compte ; inconnue => anglais.
    pub fn resoudre(etiquette: &str) -> ProfilLocale {
        let langue = etiquette
            .trim()
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match PROFILS.iter().find(|p| p.langue == langue) {
            Some(p) => *p,
            None => {
                debug!(etiquette, "langue inconnue, repli sur l’anglais");
                ANGLAIS
            }
        }
    }

    /// Même profil, chiffres forcés en latin (équivalent de "-u-nu-latn").
    pub fn en_chiffres_latins(self) -> ProfilLocale {
        ProfilLocale { zero: '0', ..self }
    }

    /// Repli d’affichage sans police pour l’écriture native : chiffres latins,
    /// point décimal si le séparateur n’est pas ASCII, messages anglais.
    pub fn en_glyphes_latins(self) -> ProfilLocale {
        let separateur_decimal = if self.separateur_decimal.is_ascii() {
            self.separateur_decimal
        } else {
            '.'
        };
        ProfilLocale {
            zero: '0',
            separateur_decimal,
            erreur_syntaxe: ANGLAIS.erreur_syntaxe,
            erreur_nan: ANGLAIS.erreur_nan,
            ..self
        }
    }

    /// Chiffre `d` (0..=9) dans le système de numération du profil.
    pub fn chiffre(&self, d: u32) -> char {
        char::from_u32(self.zero as u32 + d).unwrap_or('?')
    }
}
