// src/noyau/format.rs
//
// Affichage des résultats.
// - Entier : exact, tel quel
// - Reel entier (5.0) : sans décimales
// - Reel : arrondi à `chiffres` décimales, zéros finaux retirés
//
// Jamais de notation exponentielle : le texte affiché doit pouvoir être
// ré-injecté dans l’entrée (MR, résultat repris après "=").

use super::valeur::Valeur;

/// Précision d’affichage par défaut (arrondi à 12 décimales).
pub const CHIFFRES_DEFAUT: usize = 12;

/// Garde-fou : au-delà, f64 n’a plus de chiffres significatifs à montrer.
pub const CHIFFRES_MAX: usize = 15;

pub fn format_valeur(v: &Valeur, chiffres: usize) -> String {
    match v {
        Valeur::Entier(n) => n.to_string(),
        Valeur::Reel(x) => format_reel(*x, chiffres),
    }
}

pub fn format_reel(x: f64, chiffres: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }

    let chiffres = chiffres.min(CHIFFRES_MAX);
    let txt = if x.fract() == 0.0 {
        format!("{x:.0}")
    } else {
        let brut = format!("{x:.chiffres$}");
        if brut.contains('.') {
            brut.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            brut
        }
    };

    // -0.0000000000001 arrondi => "-0"
    if txt == "-0" {
        "0".to_string()
    } else {
        txt
    }
}
