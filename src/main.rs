// src/main.rs
//
// quickcalc — point d’entrée NATIF + WEB (WASM)
// ---------------------------------------------
// - NATIF (Linux/Windows/macOS) : arguments (clap) + journal (tracing-subscriber)
//                                 puis eframe::run_native
// - WEB  (wasm32)              : eframe::WebRunner sur <canvas>, réglages par défaut
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "QuickCalc";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use clap::Parser;
    use quickcalc::reglages::{locale_systeme, Reglages};
    use tracing_subscriber::EnvFilter;

    #[derive(Parser, Debug)]
    #[command(name = "quickcalc", version, about = "Calculatrice localisée")]
    pub struct Args {
        /// Langue ("fr-FR", "fa_IR.UTF-8", …) ; par défaut LC_ALL puis LANG
        #[arg(long, env = "QUICKCALC_LOCALE")]
        pub locale: Option<String>,

        /// Chiffres latins quelle que soit la langue
        #[arg(long)]
        pub chiffres_latins: bool,

        /// Formule affichée au lancement
        #[arg(long, default_value = "")]
        pub formule: String,

        /// Évaluer la formule de départ comme après "="
        #[arg(long)]
        pub resultat: bool,
    }

    impl Args {
        pub fn reglages(self) -> Reglages {
            Reglages {
                locale: self.locale.unwrap_or_else(locale_systeme),
                chiffres_localises: !self.chiffres_latins,
                formule_initiale: self.formule,
                comme_resultat: self.resultat,
            }
        }
    }

    /// RUST_LOG, sinon "info".
    pub fn init_journal() {
        let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filtre).init();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;

    natif::init_journal();
    let reglages = natif::Args::parse().reglages();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([380.0, 560.0])
            .with_min_inner_size([360.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| Ok(Box::new(AppCalc::avec_polices(&cc.egui_ctx, &reglages)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};
    use quickcalc::Reglages;

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| {
                    Ok(Box::new(AppCalc::avec_polices(
                        &cc.egui_ctx,
                        &Reglages::default(),
                    )))
                }),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
