// src/noyau/expr.rs
//
// AST du noyau.
// - Chaque nom est déjà résolu (Constante / Fonction) : pas de Var ici,
//   un identifiant inconnu n’atteint jamais l’AST.
// - L’évaluation (eval.rs) est une simple descente récursive.

use std::fmt;

use super::fonctions::{Constante, Fonction};
use super::valeur::Valeur;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(Valeur),
    Constante(Constante),

    Neg(Box<Expr>),
    Fact(Box<Expr>), // x!

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Vec<Expr>),
}

/// Affichage entièrement parenthésé (démarche) : la structure se lit sans
/// connaître les priorités.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(v) => write!(f, "{v}"),
            Expr::Constante(c) => f.write_str(c.nom()),
            Expr::Neg(x) => write!(f, "(-{x})"),
            Expr::Fact(x) => write!(f, "({x})!"),
            Expr::Add(a, b) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b) => write!(f, "({a} - {b})"),
            Expr::Mul(a, b) => write!(f, "({a} * {b})"),
            Expr::Div(a, b) => write!(f, "({a} / {b})"),
            Expr::Pow(a, b) => write!(f, "({a} ^ {b})"),
            Expr::Appel(fonction, args) => {
                write!(f, "{}(", fonction.nom())?;
                for (k, a) in args.iter().enumerate() {
                    if k > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
