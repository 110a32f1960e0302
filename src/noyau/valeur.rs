// src/noyau/valeur.rs
//
// Valeur numérique du noyau.
// - Entier : exact (BigInt), tant qu’on reste dans + - * ^n ! nPr nCr
// - Reel   : f64 dès qu’une division, un décimal ou une fonction transcendante intervient
//
// Promotion: Entier (op) Reel => Reel. La division donne toujours un Reel.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use super::erreur::{ErreurEval, Resultat};
use super::format::{format_valeur, CHIFFRES_DEFAUT};

/// Garde-fou : taille max (en bits) d’un entier exact, quel que soit
/// l’opérateur qui le produit (≈ 30 000 chiffres décimaux).
pub const BITS_ENTIER_MAX: u64 = 100_000;

fn entier_borne(n: BigInt, quoi: &str) -> Resultat<Valeur> {
    if n.bits() > BITS_ENTIER_MAX {
        return Err(ErreurEval::domaine(format!("{quoi} : résultat trop grand")));
    }
    Ok(Valeur::Entier(n))
}

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Entier(BigInt),
    Reel(f64),
}

impl Default for Valeur {
    fn default() -> Self {
        Valeur::Entier(BigInt::zero())
    }
}

impl From<i64> for Valeur {
    fn from(n: i64) -> Self {
        Valeur::Entier(BigInt::from(n))
    }
}

impl From<f64> for Valeur {
    fn from(x: f64) -> Self {
        Valeur::Reel(x)
    }
}

impl From<BigInt> for Valeur {
    fn from(n: BigInt) -> Self {
        Valeur::Entier(n)
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_valeur(self, CHIFFRES_DEFAUT))
    }
}

impl Valeur {
    /// Reel fini, sinon erreur de domaine (pas d’infini ni de NaN dans le noyau).
    pub fn reel(x: f64, quoi: &str) -> Resultat<Valeur> {
        if x.is_finite() {
            Ok(Valeur::Reel(x))
        } else {
            Err(ErreurEval::domaine(format!("{quoi} : résultat hors limites")))
        }
    }

    pub fn en_f64(&self) -> Resultat<f64> {
        match self {
            Valeur::Reel(x) => Ok(*x),
            Valeur::Entier(n) => n
                .to_f64()
                .filter(|x| x.is_finite())
                .ok_or_else(|| ErreurEval::domaine("entier trop grand pour un calcul réel")),
        }
    }

    pub fn est_nul(&self) -> bool {
        match self {
            Valeur::Entier(n) => n.is_zero(),
            Valeur::Reel(x) => *x == 0.0,
        }
    }

    /// Entier naturel exigé (factorielle, nPr, nCr).
    /// Un Reel de valeur entière est accepté (ex: Ans = 5.0).
    pub fn en_naturel(&self, quoi: &str) -> Resultat<u64> {
        let n = match self {
            Valeur::Entier(n) => n.clone(),
            Valeur::Reel(x) => {
                if !x.is_finite() || x.fract() != 0.0 {
                    return Err(ErreurEval::domaine(format!(
                        "{quoi} : argument non entier"
                    )));
                }
                BigInt::from_f64(*x)
                    .ok_or_else(|| ErreurEval::domaine(format!("{quoi} : argument invalide")))?
            }
        };

        if n.is_negative() {
            return Err(ErreurEval::domaine(format!("{quoi} : argument négatif")));
        }
        n.to_u64()
            .ok_or_else(|| ErreurEval::domaine(format!("{quoi} : argument trop grand")))
    }

    pub fn oppose(&self) -> Valeur {
        match self {
            Valeur::Entier(n) => Valeur::Entier(-n),
            Valeur::Reel(x) => Valeur::Reel(-x),
        }
    }

    pub fn additionner(&self, b: &Valeur) -> Resultat<Valeur> {
        match (self, b) {
            (Valeur::Entier(x), Valeur::Entier(y)) => entier_borne(x + y, "addition"),
            _ => Valeur::reel(self.en_f64()? + b.en_f64()?, "addition"),
        }
    }

    pub fn soustraire(&self, b: &Valeur) -> Resultat<Valeur> {
        match (self, b) {
            (Valeur::Entier(x), Valeur::Entier(y)) => entier_borne(x - y, "soustraction"),
            _ => Valeur::reel(self.en_f64()? - b.en_f64()?, "soustraction"),
        }
    }

    pub fn multiplier(&self, b: &Valeur) -> Resultat<Valeur> {
        match (self, b) {
            (Valeur::Entier(x), Valeur::Entier(y)) => {
                // le produit a au moins bits(x) + bits(y) - 1 bits : refus avant calcul
                if x.bits() + y.bits() > BITS_ENTIER_MAX + 1 {
                    return Err(ErreurEval::domaine("multiplication : résultat trop grand"));
                }
                entier_borne(x * y, "multiplication")
            }
            _ => Valeur::reel(self.en_f64()? * b.en_f64()?, "multiplication"),
        }
    }

    /// Division réelle (7/2 = 3.5), comme la calculatrice d’origine.
    pub fn diviser(&self, b: &Valeur) -> Resultat<Valeur> {
        if b.est_nul() {
            return Err(ErreurEval::DivisionParZero);
        }
        Valeur::reel(self.en_f64()? / b.en_f64()?, "division")
    }

    pub fn puissance(&self, exposant: &Valeur) -> Resultat<Valeur> {
        if let (Valeur::Entier(base), Valeur::Entier(n)) = (self, exposant) {
            if !n.is_negative() {
                // base 0 ou ±1 : résultat connu quel que soit n
                if base.is_zero() {
                    let r = if n.is_zero() { 1 } else { 0 };
                    return Ok(Valeur::from(r));
                }
                if base.abs().is_one() {
                    let impair = (n % 2u32).is_one();
                    let r = if base.is_negative() && impair { -1 } else { 1 };
                    return Ok(Valeur::from(r));
                }

                let n = n
                    .to_u32()
                    .ok_or_else(|| ErreurEval::domaine("puissance : exposant trop grand"))?;
                // base^n a au moins (bits(base) - 1)·n + 1 bits : refus avant calcul
                let bits = (base.bits() - 1).saturating_mul(u64::from(n));
                if bits >= BITS_ENTIER_MAX {
                    return Err(ErreurEval::domaine("puissance : résultat trop grand"));
                }
                return entier_borne(base.pow(n), "puissance");
            }
        }

        let x = self.en_f64()?;
        let y = exposant.en_f64()?;
        if x == 0.0 && y < 0.0 {
            return Err(ErreurEval::DivisionParZero);
        }
        if x < 0.0 && y.fract() != 0.0 {
            return Err(ErreurEval::domaine(
                "puissance non entière d’un nombre négatif",
            ));
        }
        Valeur::reel(x.powf(y), "puissance")
    }
}
