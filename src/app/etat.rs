//! src/app/etat.rs
//!
//! État UI : une `Session` (noyau + Ans + mémoire + historique) et ce que
//! l’écran affiche du dernier calcul (résultat, erreur, démarche).
//!
//! Aucune logique de calcul ici : tout passe par la session.

use calculatrice_sci::noyau::Demarche;
use calculatrice_sci::{Config, ErreurEval, Session};

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub session: Session,

    // --- sorties ---
    pub resultat: String, // dernier résultat retenu (texte affiché)
    pub erreur: String,   // message d’erreur du dernier essai

    // --- démarche (panneau d’explication) ---
    pub demarche: Option<Demarche>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppCalc {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(config),
            resultat: String::new(),
            erreur: String::new(),
            demarche: None,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /// "=" (bouton ou Enter).
    pub fn egal(&mut self) {
        match self.session.egal_avec_demarche() {
            Ok((v, d)) => {
                self.resultat = self.session.afficher(&v);
                self.erreur.clear();
                self.demarche = Some(d);
            }
            Err(e) => self.set_erreur(&e),
        }
        self.focus_entree = true;
    }

    /// Une touche du pavé ; "=" passe par `egal` pour garder la démarche.
    pub fn touche(&mut self, t: &str) {
        if t == "=" {
            self.egal();
            return;
        }

        match self.session.appuyer(t) {
            Ok(()) => {
                if t == "AC" {
                    self.clear_resultats();
                }
            }
            Err(e) => self.set_erreur(&e),
        }
        self.focus_entree = true;
    }

    /// Escape : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.session.effacer();
        self.focus_entree = true;
    }

    fn clear_resultats(&mut self) {
        self.erreur.clear();
        self.demarche = None;
    }

    /// Le dernier résultat reste affiché : une faute n’efface pas l’écran.
    fn set_erreur(&mut self, e: &ErreurEval) {
        self.erreur = e.to_string();
        self.demarche = None;
    }
}
