// src/app/polices.rs
//
// Polices système pour les écritures hors des polices par défaut d’egui
// ---------------------------------------------------------------------
// - fa / ar : chiffres arabo-persans, séparateur ٫, messages
// - mr      : devanagari
// - bn      : bengali
// Pas de police embarquée : première police système lisible, ajoutée en
// repli après les polices d’egui. Sinon l’app passe en glyphes latins.

use eframe::egui;
use quickcalc::noyau::ProfilLocale;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ecriture {
    Arabe,
    Devanagari,
    Bengali,
}

/// Écriture que les polices par défaut ne couvrent pas, s’il y en a une.
pub fn ecriture_requise(profil: &ProfilLocale) -> Option<Ecriture> {
    match profil.langue {
        "fa" | "ar" => Some(Ecriture::Arabe),
        "mr" => Some(Ecriture::Devanagari),
        "bn" => Some(Ecriture::Bengali),
        _ => None,
    }
}

fn candidats(ecriture: Ecriture) -> &'static [&'static str] {
    match ecriture {
        Ecriture::Arabe => &[
            "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
            "/usr/share/fonts/noto/NotoSansArabic-Regular.ttf",
            "/usr/share/fonts/google-noto/NotoSansArabic-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "C:\\Windows\\Fonts\\segoeui.ttf",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        ],
        Ecriture::Devanagari => &[
            "/usr/share/fonts/truetype/noto/NotoSansDevanagari-Regular.ttf",
            "/usr/share/fonts/noto/NotoSansDevanagari-Regular.ttf",
            "/usr/share/fonts/google-noto/NotoSansDevanagari-Regular.ttf",
            "/usr/share/fonts/truetype/lohit-devanagari/Lohit-Devanagari.ttf",
            "C:\\Windows\\Fonts\\Nirmala.ttf",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        ],
        Ecriture::Bengali => &[
            "/usr/share/fonts/truetype/noto/NotoSansBengali-Regular.ttf",
            "/usr/share/fonts/noto/NotoSansBengali-Regular.ttf",
            "/usr/share/fonts/google-noto/NotoSansBengali-Regular.ttf",
            "/usr/share/fonts/truetype/lohit-bengali/Lohit-Bengali.ttf",
            "C:\\Windows\\Fonts\\Nirmala.ttf",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        ],
    }
}

/// Installe une police couvrant l’écriture du profil.
/// Faux si l’écriture reste sans police (rien n’est modifié).
pub fn installer_polices(ctx: &egui::Context, profil: &ProfilLocale) -> bool {
    use egui::{FontData, FontDefinitions, FontFamily};

    let Some(ecriture) = ecriture_requise(profil) else {
        return true;
    };
    let Some((chemin, octets)) = lire_premiere(candidats(ecriture)) else {
        warn!(?ecriture, "aucune police système pour cette écriture");
        return false;
    };

    let nom = format!("systeme_{ecriture:?}");
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(nom.clone(), FontData::from_owned(octets).into());

    // après les polices d’egui : ÷ × − ∞ gardent leur dessin
    for famille in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(famille).or_default().push(nom.clone());
    }

    ctx.set_fonts(fonts);
    debug!(chemin, ?ecriture, "police installée");
    true
}

#[cfg(not(target_arch = "wasm32"))]
fn lire_premiere(chemins: &[&'static str]) -> Option<(&'static str, Vec<u8>)> {
    chemins
        .iter()
        .find_map(|c| std::fs::read(c).ok().map(|octets| (*c, octets)))
}

#[cfg(target_arch = "wasm32")]
fn lire_premiere(_chemins: &[&'static str]) -> Option<(&'static str, Vec<u8>)> {
    None
}
