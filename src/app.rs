// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs, polices.rs, reducteur.rs, vue.rs)
// - Porter l’état courant + le réducteur
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (global, pas de champ texte) :
// Enter/= évalue, Backspace efface le dernier jeton, Escape vide tout.

pub mod etat;
pub mod polices;
pub mod reducteur;
pub mod vue;

use eframe::egui;
use quickcalc::noyau::Localiseur;
use quickcalc::Reglages;
use tracing::{info, warn};

use etat::{EtatCalc, Evenement};
use reducteur::Reducteur;

pub struct AppCalc {
    pub etat: EtatCalc,
    reducteur: Reducteur,
}

impl AppCalc {
    pub fn new(reglages: &Reglages) -> Self {
        Self::avec_localiseur(reglages, reglages.localiseur())
    }

    /// Installe la police de l’écriture du profil ; à défaut, glyphes latins.
    pub fn avec_polices(ctx: &egui::Context, reglages: &Reglages) -> Self {
        let localiseur = reglages.localiseur();
        if polices::installer_polices(ctx, localiseur.profil()) {
            return Self::avec_localiseur(reglages, localiseur);
        }

        warn!(langue = localiseur.profil().langue, "affichage en glyphes latins");
        let profil = localiseur.profil().en_glyphes_latins();
        Self::avec_localiseur(reglages, Localiseur::new(profil, false))
    }

    fn avec_localiseur(reglages: &Reglages, localiseur: Localiseur) -> Self {
        let reducteur = Reducteur::new(localiseur);
        let etat = reducteur.etat_initial(&reglages.formule_initiale, reglages.comme_resultat);

        info!(
            locale = %reglages.locale,
            langue = reducteur.localiseur().profil().langue,
            chiffres_localises = reglages.chiffres_localises,
            "calculatrice prête"
        );

        Self { etat, reducteur }
    }

    pub fn reducteur(&self) -> &Reducteur {
        &self.reducteur
    }

    pub fn envoyer(&mut self, evenement: Evenement) {
        self.etat = self.reducteur.reduire(&self.etat, evenement);
    }

    /// Événements clavier de la frame, dans l’ordre.
    fn evenements_clavier(ctx: &egui::Context) -> Vec<Evenement> {
        ctx.input(|i| {
            let mut out = Vec::new();
            for e in &i.events {
                match e {
                    egui::Event::Text(t) => {
                        for c in t.chars() {
                            if let Some(ev) = evenement_pour_caractere(c) {
                                out.push(ev);
                            }
                        }
                    }
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => match key {
                        egui::Key::Enter => out.push(Evenement::Egal),
                        egui::Key::Backspace => out.push(Evenement::Effacer),
                        egui::Key::Escape => out.push(Evenement::Vider),
                        _ => {}
                    },
                    _ => {}
                }
            }
            out
        })
    }
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Reglages::default())
    }
}

/// Touche tapée -> événement. ',' et '.' valent tous deux la virgule décimale.
fn evenement_pour_caractere(c: char) -> Option<Evenement> {
    match c {
        '=' => Some(Evenement::Egal),
        '.' | ',' => Some(Evenement::ajouter(".")),
        c if c.is_ascii_digit() || "+-*/^!()×÷−π√".contains(c) => {
            Some(Evenement::ajouter(c.to_string()))
        }
        _ => None,
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for ev in Self::evenements_clavier(ctx) {
            self.envoyer(ev);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // vue.rs
        });
    }
}
