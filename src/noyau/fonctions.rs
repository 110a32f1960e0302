//! Espace de noms fermé du noyau : fonctions + constantes.
//!
//! Rien d’autre n’est résolu. Un nom absent de cette table est une erreur
//! `IdentifiantInconnu`, jamais une valeur par défaut.

use num_bigint::BigInt;
use num_traits::One;

use super::erreur::{ErreurEval, Resultat};
use super::trig::{trig, ModeAngle, TrigFn};
use super::valeur::Valeur;

/// Garde-fou : n! au-delà devient inutilisable à l’affichage.
pub const FACTORIELLE_MAX: u64 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Trig(TrigFn),
    Ln,
    Log,
    Sqrt,
    Fact,
    NPr,
    NCr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
    Ans,
}

impl Fonction {
    /// `nom` est déjà en minuscules (jetons.rs).
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        let f = match nom {
            "sin" => Fonction::Trig(TrigFn::Sin),
            "cos" => Fonction::Trig(TrigFn::Cos),
            "tan" => Fonction::Trig(TrigFn::Tan),
            "asin" => Fonction::Trig(TrigFn::Asin),
            "acos" => Fonction::Trig(TrigFn::Acos),
            "atan" => Fonction::Trig(TrigFn::Atan),
            "ln" => Fonction::Ln,
            "log" => Fonction::Log,
            "sqrt" => Fonction::Sqrt,
            "fact" => Fonction::Fact,
            "npr" => Fonction::NPr,
            "ncr" => Fonction::NCr,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Trig(t) => super::trig::nom(t),
            Fonction::Ln => "ln",
            Fonction::Log => "log",
            Fonction::Sqrt => "sqrt",
            Fonction::Fact => "fact",
            Fonction::NPr => "nPr",
            Fonction::NCr => "nCr",
        }
    }

    pub fn arite(self) -> usize {
        match self {
            Fonction::NPr | Fonction::NCr => 2,
            _ => 1,
        }
    }

    /// `args.len() == self.arite()` est garanti par rpn::from_rpn.
    pub fn appliquer(self, args: &[Valeur], mode: ModeAngle) -> Resultat<Valeur> {
        let [x, ..] = args else {
            return Err(ErreurEval::syntaxe(format!("{} sans argument", self.nom())));
        };

        match self {
            Fonction::Trig(t) => Valeur::reel(trig(t, x.en_f64()?, mode)?, self.nom()),

            Fonction::Ln | Fonction::Log => {
                let v = x.en_f64()?;
                if v <= 0.0 {
                    return Err(ErreurEval::domaine(format!(
                        "{} : argument négatif ou nul",
                        self.nom()
                    )));
                }
                let r = if self == Fonction::Ln { v.ln() } else { v.log10() };
                Valeur::reel(r, self.nom())
            }

            Fonction::Sqrt => {
                let v = x.en_f64()?;
                if v < 0.0 {
                    return Err(ErreurEval::domaine("racine carrée d’un nombre négatif"));
                }
                Valeur::reel(v.sqrt(), "racine carrée")
            }

            Fonction::Fact => factorielle(x),

            Fonction::NPr | Fonction::NCr => {
                let r = args
                    .get(1)
                    .ok_or_else(|| ErreurEval::syntaxe(format!("{} attend 2 arguments", self.nom())))?;
                if self == Fonction::NPr {
                    permutations(x, r)
                } else {
                    combinaisons(x, r)
                }
            }
        }
    }
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "pi" => Some(Constante::Pi),
            "e" => Some(Constante::E),
            "ans" => Some(Constante::Ans),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "π",
            Constante::E => "e",
            Constante::Ans => "Ans",
        }
    }

    pub fn valeur(self, ans: &Valeur) -> Valeur {
        match self {
            Constante::Pi => Valeur::Reel(std::f64::consts::PI),
            Constante::E => Valeur::Reel(std::f64::consts::E),
            Constante::Ans => ans.clone(),
        }
    }
}

/* ------------------------ Dénombrement (exact) ------------------------ */

fn naturel_borne(v: &Valeur, quoi: &str) -> Resultat<u64> {
    let n = v.en_naturel(quoi)?;
    if n > FACTORIELLE_MAX {
        return Err(ErreurEval::domaine(format!(
            "{quoi} : argument trop grand (max {FACTORIELLE_MAX})"
        )));
    }
    Ok(n)
}

/// Produit (a+1)·(a+2)·…·b, 1 si a >= b.
fn produit(a: u64, b: u64) -> BigInt {
    let mut acc = BigInt::one();
    for k in (a + 1)..=b {
        acc *= k;
    }
    acc
}

pub fn factorielle(x: &Valeur) -> Resultat<Valeur> {
    let n = naturel_borne(x, "factorielle")?;
    Ok(Valeur::Entier(produit(0, n)))
}

/// nPr = n! / (n-r)!
pub fn permutations(n: &Valeur, r: &Valeur) -> Resultat<Valeur> {
    let n = naturel_borne(n, "nPr")?;
    let r = naturel_borne(r, "nPr")?;
    if r > n {
        return Err(ErreurEval::domaine("nPr : r plus grand que n"));
    }
    Ok(Valeur::Entier(produit(n - r, n)))
}

/// nCr = n! / (r!(n-r)!)
pub fn combinaisons(n: &Valeur, r: &Valeur) -> Resultat<Valeur> {
    let n = naturel_borne(n, "nCr")?;
    let r = naturel_borne(r, "nCr")?;
    if r > n {
        return Err(ErreurEval::domaine("nCr : r plus grand que n"));
    }
    let r = r.min(n - r);
    Ok(Valeur::Entier(produit(n - r, n) / produit(0, r)))
}
