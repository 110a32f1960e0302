//! Session de calculatrice : l’état qui survit d’un calcul à l’autre.
//!
//! Le noyau est pur ; c’est ici qu’on retient Ans, la mémoire, le mode et
//! l’historique. Une évaluation ratée ne touche à rien.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::Config;
use crate::noyau::erreur::Resultat;
use crate::noyau::format::format_reel;
use crate::noyau::{
    evaluate, evaluate_avec_demarche, format_valeur, Contexte, Demarche, ModeAngle, Valeur,
};

/// Une ligne d’historique : l’expression telle que tapée, et sa valeur.
#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: Valeur,
}

#[derive(Clone, Debug)]
pub struct Session {
    entree: String,
    mode: ModeAngle,
    ans: Valeur,
    memoire: f64,
    historique: VecDeque<EntreeHistorique>,
    historique_max: usize,
    chiffres: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let config = config.clone().bornee();
        Self {
            entree: String::new(),
            mode: config.mode_defaut,
            ans: Valeur::default(),
            memoire: 0.0,
            historique: VecDeque::with_capacity(config.historique_max),
            historique_max: config.historique_max,
            chiffres: config.chiffres,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn entree(&self) -> &str {
        &self.entree
    }

    /// Accès direct au texte (champ d’édition de la vue).
    pub fn entree_mut(&mut self) -> &mut String {
        &mut self.entree
    }

    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    pub fn ans(&self) -> &Valeur {
        &self.ans
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    pub fn chiffres(&self) -> usize {
        self.chiffres
    }

    /// Plus récent en tête.
    pub fn historique(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.historique.iter()
    }

    pub fn contexte(&self) -> Contexte {
        Contexte {
            mode: self.mode,
            ans: self.ans.clone(),
            memoire: self.memoire,
        }
    }

    pub fn afficher(&self, v: &Valeur) -> String {
        format_valeur(v, self.chiffres)
    }

    /* ------------------------ Édition ------------------------ */

    pub fn ajouter(&mut self, texte: &str) {
        self.entree.push_str(texte);
    }

    /// DEL : retire le dernier caractère (un glyphe entier, pas un octet).
    pub fn effacer_dernier(&mut self) {
        self.entree.pop();
    }

    /// AC : vide l’entrée (Ans, mémoire et historique restent).
    pub fn effacer(&mut self) {
        self.entree.clear();
    }

    pub fn basculer_mode(&mut self) {
        self.mode = self.mode.basculer();
        debug!(mode = %self.mode, "mode d’angle");
    }

    /* ------------------------ Évaluation ------------------------ */

    /// "=" : évalue l’entrée ; en cas de succès, le résultat devient Ans,
    /// part dans l’historique et remplace l’entrée.
    pub fn egal(&mut self) -> Resultat<Valeur> {
        self.egal_avec_demarche().map(|(v, _d)| v)
    }

    pub fn egal_avec_demarche(&mut self) -> Resultat<(Valeur, Demarche)> {
        let (v, demarche) = evaluate_avec_demarche(&self.entree, &self.contexte())?;

        let affiche = self.afficher(&v);
        debug!(entree = %self.entree, resultat = %affiche, "résultat retenu");

        let expression = std::mem::replace(&mut self.entree, affiche);
        self.historique.push_front(EntreeHistorique {
            expression,
            resultat: v.clone(),
        });
        self.historique.truncate(self.historique_max);
        self.ans = v.clone();

        Ok((v, demarche))
    }

    /* ------------------------ Mémoire ------------------------ */

    /// M+ : ajoute la valeur de l’entrée (vide = 0) à la mémoire.
    pub fn memoire_plus(&mut self) -> Resultat<()> {
        let x = self.valeur_entree()?;
        self.memoire = Valeur::reel(self.memoire + x, "mémoire")?.en_f64()?;
        debug!(memoire = self.memoire, "M+");
        Ok(())
    }

    /// M− : retire la valeur de l’entrée (vide = 0) de la mémoire.
    pub fn memoire_moins(&mut self) -> Resultat<()> {
        let x = self.valeur_entree()?;
        self.memoire = Valeur::reel(self.memoire - x, "mémoire")?.en_f64()?;
        debug!(memoire = self.memoire, "M-");
        Ok(())
    }

    /// MR : insère la mémoire dans l’entrée (entre parenthèses si négative).
    pub fn memoire_rappel(&mut self) {
        let txt = format_reel(self.memoire, self.chiffres);
        if self.memoire < 0.0 {
            self.ajouter(&format!("({txt})"));
        } else {
            self.ajouter(&txt);
        }
    }

    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }

    fn valeur_entree(&self) -> Resultat<f64> {
        if self.entree.trim().is_empty() {
            return Ok(0.0);
        }
        evaluate(&self.entree, &self.contexte())?.en_f64()
    }

    /* ------------------------ Pavé ------------------------ */

    /// Une touche du pavé. Les actions (AC, DEL, =, M±, MR, MC, MODE) agissent ;
    /// les fonctions ouvrent leur parenthèse ; le reste s’ajoute tel quel.
    pub fn appuyer(&mut self, touche: &str) -> Resultat<()> {
        match touche {
            "AC" => self.effacer(),
            "DEL" => self.effacer_dernier(),
            "=" => {
                self.egal()?;
            }
            "MODE" => self.basculer_mode(),
            "M+" => self.memoire_plus()?,
            "M-" | "M−" => self.memoire_moins()?,
            "MR" => self.memoire_rappel(),
            "MC" => self.memoire_effacer(),

            "√" => self.ajouter("√("),
            "x²" => self.ajouter("^2"),
            "±" => self.ajouter("(-"),
            "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "ln" | "log" | "nCr" | "nPr" => {
                self.ajouter(&format!("{touche}("))
            }

            autre => self.ajouter(autre),
        }
        Ok(())
    }
}
