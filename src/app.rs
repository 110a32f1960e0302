// src/app.rs
//
// Module App (racine)
// - sous-modules : etat.rs (état + actions) et vue.rs (egui)
// - impl eframe::App (natif + web)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement l’entrée.
        // Enter est géré dans vue.rs (quand le champ a le focus).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
