// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Écran : formule en haut, résultat (ou erreur) dessous, alignés à droite
// - Pavé : libellés dans la langue du profil (chiffres, virgule, ÷ × −, sin/sen…)
// - Les boutons émettent des jetons CANONIQUES ; l’affichage est localisé par le noyau
// - DEL devient CLR quand un résultat ou une erreur est affiché

use eframe::egui;
use quickcalc::noyau::ProfilLocale;

use super::etat::Evenement;
use super::AppCalc;

const TAILLE_FORMULE: f32 = 30.0;
const TAILLE_RESULTAT: f32 = 22.0;
const BOUTON: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_ecran(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        let profil = *self.reducteur().localiseur().profil();
        if let Some(ev) = self.ui_pave(ui, &profil) {
            self.envoyer(ev);
        }
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(
                        egui::RichText::new(&self.etat.formule)
                            .monospace()
                            .size(TAILLE_FORMULE),
                    );

                    let mut resultat = egui::RichText::new(&self.etat.resultat)
                        .monospace()
                        .size(TAILLE_RESULTAT);
                    if self.etat.en_erreur() {
                        resultat = resultat.color(ui.visuals().error_fg_color);
                    } else {
                        resultat = resultat.weak();
                    }
                    ui.label(resultat);
                });
            });
    }

    /// Pavé 5 colonnes. Renvoie l’événement du bouton cliqué, s’il y en a un.
    fn ui_pave(&self, ui: &mut egui::Ui, p: &ProfilLocale) -> Option<Evenement> {
        let mut clic = None;
        let chiffre = |d: u32| p.chiffre(d).to_string();

        egui::Grid::new("pave_quickcalc")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                bouton(ui, p.fun_sin, Evenement::fonction("sin"), &mut clic);
                bouton(ui, p.fun_cos, Evenement::fonction("cos"), &mut clic);
                bouton(ui, p.fun_tan, Evenement::fonction("tan"), &mut clic);
                bouton(ui, p.fun_ln, Evenement::fonction("ln"), &mut clic);
                bouton(ui, p.fun_log, Evenement::fonction("log"), &mut clic);
                ui.end_row();

                bouton(ui, "(", Evenement::ajouter("("), &mut clic);
                bouton(ui, ")", Evenement::ajouter(")"), &mut clic);
                bouton(ui, "√", Evenement::fonction("sqrt"), &mut clic);
                bouton(ui, "π", Evenement::ajouter("π"), &mut clic);
                bouton(ui, "^", Evenement::ajouter("^"), &mut clic);
                ui.end_row();

                for rang in [[7, 8, 9], [4, 5, 6], [1, 2, 3]] {
                    for d in rang {
                        bouton(ui, &chiffre(d), Evenement::ajouter(d.to_string()), &mut clic);
                    }
                    match rang[0] {
                        7 => {
                            bouton(ui, p.op_div, Evenement::ajouter("/"), &mut clic);
                            self.bouton_effacer(ui, &mut clic);
                        }
                        4 => {
                            bouton(ui, p.op_mul, Evenement::ajouter("*"), &mut clic);
                            bouton(ui, "!", Evenement::ajouter("!"), &mut clic);
                        }
                        _ => {
                            bouton(ui, p.op_sub, Evenement::ajouter("-"), &mut clic);
                            bouton(ui, "e", Evenement::ajouter("e"), &mut clic);
                        }
                    }
                    ui.end_row();
                }

                bouton(
                    ui,
                    &p.separateur_decimal.to_string(),
                    Evenement::ajouter("."),
                    &mut clic,
                );
                bouton(ui, &chiffre(0), Evenement::ajouter("0"), &mut clic);
                bouton(ui, p.infini, Evenement::ajouter("Infinity"), &mut clic);
                bouton(ui, "+", Evenement::ajouter("+"), &mut clic);
                bouton(ui, "=", Evenement::Egal, &mut clic);
                ui.end_row();
            });

        clic
    }

    fn bouton_effacer(&self, ui: &mut egui::Ui, clic: &mut Option<Evenement>) {
        if self.etat.affiche_effacer() {
            bouton(ui, "CLR", Evenement::Vider, clic);
        } else {
            bouton(ui, "DEL", Evenement::Effacer, clic);
        }
    }
}

fn bouton(ui: &mut egui::Ui, label: &str, ev: Evenement, clic: &mut Option<Evenement>) {
    let resp = ui.add_sized(BOUTON, egui::Button::new(egui::RichText::new(label).size(18.0)));
    if resp.clicked() {
        *clic = Some(ev);
    }
}
