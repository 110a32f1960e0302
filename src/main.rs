// src/main.rs
//
// Calculatrice scientifique — point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------
// - NATIF (Linux/Windows/macOS) : config TOML + tracing + eframe::run_native
// - WEB  (wasm32)              : eframe::WebRunner sur un <canvas>, config par défaut

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice scientifique";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use calculatrice_sci::Config;
    use tracing_subscriber::EnvFilter;

    // Config d’abord : elle porte le niveau de log par défaut.
    let (config, erreur_config) = match Config::charger() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let filtre = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.niveau_log))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filtre).init();

    if let Some(e) = erreur_config {
        tracing::warn!(chemin = ?Config::chemin(), "config ignorée, valeurs par défaut : {e}");
    }
    tracing::info!(mode = %config.mode_defaut, "démarrage");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([420.0, 780.0])
            .with_min_inner_size([380.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(&config)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::HtmlCanvasElement;

    use super::{AppCalc, TITRE_APP};

    /// <canvas id="the_canvas_id"> attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document indisponible"))?;
        document.set_title(TITRE_APP);

        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("canvas introuvable"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("#the_canvas_id n’est pas un <canvas>"))?;

        // Pas de système de fichiers : préférences par défaut.
        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }
}
