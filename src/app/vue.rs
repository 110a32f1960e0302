// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : pavé 5 colonnes façon Casio, focus redonné après clic
// - Sorties : erreur, résultat, historique, démarche
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::AppCalc;

/// Pavé : 5 colonnes, une ligne par rangée.
const PAVE: [[&str; 5]; 9] = [
    ["AC", "DEL", "(", ")", "%"],
    ["sin", "cos", "tan", "ln", "log"],
    ["asin", "acos", "atan", ",", "MODE"],
    ["7", "8", "9", "÷", "√"],
    ["4", "5", "6", "×", "-"],
    ["1", "2", "3", "+", "="],
    ["0", ".", "Ans", "π", "e"],
    ["M+", "M-", "MR", "MC", "±"],
    ["nCr", "nPr", "x²", "^", "!"],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Entrée :");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mode = self.session.mode().to_string();
                let resp = ui
                    .add_sized([56.0, 24.0], egui::Button::new(mode))
                    .on_hover_text("Bascule degrés / radians");
                if resp.clicked() {
                    self.touche("MODE");
                }
            });
        });

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(self.session.entree_mut())
                .desired_width(ui.available_width())
                .hint_text("Ex: sin(30)+√(16), nCr(5,2), 50%×Ans")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter évalue seulement si le champ est focus.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.egal();
        }

        let s = &self.session;
        ui.small(format!(
            "Mémoire : {} | Ans : {}",
            calculatrice_sci::noyau::format::format_reel(s.memoire(), 6),
            calculatrice_sci::noyau::format_valeur(s.ans(), 6),
        ));
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_casio")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for t in rangee {
                        if ui.add_sized([64.0, 32.0], egui::Button::new(t)).clicked() {
                            self.touche(t);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
            ui.add_space(6.0);
        }

        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                let mut lignes = String::new();
                for e in self.session.historique() {
                    lignes.push_str(&format!(
                        "{} = {}\n",
                        e.expression,
                        self.session.afficher(&e.resultat)
                    ));
                }

                if lignes.is_empty() {
                    ui.monospace("(vide)");
                } else {
                    Self::champ_monospace(ui, "historique_out", lignes.trim_end(), 2);
                }

                if ui.button("Effacer l’historique").clicked() {
                    self.session.effacer_historique();
                    self.focus_entree = true;
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| match &self.demarche {
                Some(d) => {
                    Self::champ_demarche(ui, "Normalisée", "demarche_norm", &d.normalisee);
                    Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                    Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                    Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                }
                None => {
                    ui.monospace("indisponible");
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule : Frame + Label monospace, pas de TextEdit.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}
