//! Noyau de calcul scientifique
//!
//! Organisation interne :
//! - erreur.rs    : ErreurEval (syntaxe / domaine / division par zéro / identifiant inconnu)
//! - valeur.rs    : Valeur (entier exact ou réel) + arithmétique
//! - normalise.rs : réécritures textuelles des glyphes (×, ÷, %…)
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : AST
//! - trig.rs      : ModeAngle + trigonométrie DEG/RAD
//! - fonctions.rs : espace de noms fermé (fonctions + constantes)
//! - format.rs    : affichage des résultats
//! - eval.rs      : pipeline complet

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod normalise;
pub mod rpn;
pub mod trig;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurEval;
pub use eval::{evaluate, evaluate_avec_demarche, Contexte, Demarche};
pub use format::format_valeur;
pub use trig::ModeAngle;
pub use valeur::Valeur;
