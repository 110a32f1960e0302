// src/noyau/trig.rs
//
// Trigonométrie selon le mode d’angle (DEG / RAD)
// -----------------------------------------------
// - sin/cos/tan : l’argument est converti en radians seulement en DEG
// - asin/acos/atan : le résultat est reconverti en degrés seulement en DEG
// - Le mode ne touche jamais au parsing

use std::fmt;

use serde::{Deserialize, Serialize};

use super::erreur::{ErreurEval, Resultat};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    pub fn basculer(self) -> Self {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }

    fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_radians(),
            ModeAngle::Radians => x,
        }
    }

    fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_degrees(),
            ModeAngle::Radians => x,
        }
    }
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeAngle::Degres => f.write_str("DEG"),
            ModeAngle::Radians => f.write_str("RAD"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

/// Applique `f` à `x` sous le mode donné.
pub fn trig(f: TrigFn, x: f64, mode: ModeAngle) -> Resultat<f64> {
    match f {
        TrigFn::Sin => Ok(mode.vers_radians(x).sin()),
        TrigFn::Cos => Ok(mode.vers_radians(x).cos()),
        // tan(90°) donne un très grand nombre fini, pas une erreur
        TrigFn::Tan => Ok(mode.vers_radians(x).tan()),

        TrigFn::Asin | TrigFn::Acos => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(ErreurEval::domaine(format!(
                    "{} : argument hors de [-1, 1]",
                    nom(f)
                )));
            }
            let r = if f == TrigFn::Asin { x.asin() } else { x.acos() };
            Ok(mode.depuis_radians(r))
        }
        TrigFn::Atan => Ok(mode.depuis_radians(x.atan())),
    }
}

pub fn nom(f: TrigFn) -> &'static str {
    match f {
        TrigFn::Sin => "sin",
        TrigFn::Cos => "cos",
        TrigFn::Tan => "tan",
        TrigFn::Asin => "asin",
        TrigFn::Acos => "acos",
        TrigFn::Atan => "atan",
    }
}
