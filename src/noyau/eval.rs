//! Noyau — évaluation (pipeline réel)
//!
//! normalise (glyphes, `%`) -> jetons -> RPN -> Expr (noms résolus) -> valeur
//!
//! Fonction pure de (entrée, mode, Ans, mémoire) : aucun état caché, aucune
//! mise à jour de session ici. C’est l’appelant qui décide de retenir le
//! résultat comme nouvel Ans et de l’ajouter à l’historique.

use tracing::debug;

use super::erreur::{ErreurEval, Resultat};
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};
use super::normalise::normaliser;
use super::rpn::{from_rpn, to_rpn};
use super::trig::ModeAngle;
use super::valeur::Valeur;

/// Garde-fou : nombre max de jetons d’une entrée (profondeur de récursion).
pub const JETONS_MAX: usize = 1000;

/// Garde-fou : longueur max du texte brut. Doit contenir le plus grand
/// résultat affichable (entier de `BITS_ENTIER_MAX` bits ≈ 30 103 chiffres),
/// puisque "=" le remet dans l’entrée.
pub const ENTREE_MAX: usize = 40_000;

/// Ce dont une évaluation dépend, en plus du texte.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contexte {
    pub mode: ModeAngle,
    pub ans: Valeur,
    pub memoire: f64,
}

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub normalisee: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// API publique : évalue une entrée de calculatrice.
pub fn evaluate(entree: &str, ctx: &Contexte) -> Resultat<Valeur> {
    evaluate_avec_demarche(entree, ctx).map(|(v, _d)| v)
}

/// Comme `evaluate`, avec la démarche (jetons, RPN, arbre) pour l’affichage.
pub fn evaluate_avec_demarche(entree: &str, ctx: &Contexte) -> Resultat<(Valeur, Demarche)> {
    let s = entree.trim();
    if s.is_empty() {
        return Err(ErreurEval::syntaxe("entrée vide"));
    }
    if s.chars().count() > ENTREE_MAX {
        return Err(ErreurEval::syntaxe(format!(
            "entrée trop longue (max {ENTREE_MAX} caractères)"
        )));
    }

    // 1) Glyphes + `%` (réécriture textuelle, ordre fixe)
    let normalisee = normaliser(s);

    // 2) Jetons
    let jetons = tokenize(&normalisee)?;
    if jetons.len() > JETONS_MAX {
        return Err(ErreurEval::syntaxe(format!(
            "expression trop longue (max {JETONS_MAX} jetons)"
        )));
    }

    // 3) RPN
    let rpn = to_rpn(&jetons)?;

    // 4) AST (noms résolus)
    let expr = from_rpn(&rpn)?;

    // 5) Valeur
    let resultat = evaluer_expr(&expr, ctx);

    debug!(
        entree = s,
        mode = %ctx.mode,
        ans = %ctx.ans,
        memoire = ctx.memoire,
        resultat = ?resultat,
        "évaluation"
    );

    let d = Demarche {
        normalisee,
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        arbre: expr.to_string(),
    };

    Ok((resultat?, d))
}

fn evaluer_expr(expr: &Expr, ctx: &Contexte) -> Resultat<Valeur> {
    match expr {
        Expr::Nombre(v) => Ok(v.clone()),
        Expr::Constante(c) => Ok(c.valeur(&ctx.ans)),

        Expr::Neg(x) => Ok(evaluer_expr(x, ctx)?.oppose()),
        Expr::Fact(x) => super::fonctions::factorielle(&evaluer_expr(x, ctx)?),

        Expr::Add(a, b) => evaluer_expr(a, ctx)?.additionner(&evaluer_expr(b, ctx)?),
        Expr::Sub(a, b) => evaluer_expr(a, ctx)?.soustraire(&evaluer_expr(b, ctx)?),
        Expr::Mul(a, b) => evaluer_expr(a, ctx)?.multiplier(&evaluer_expr(b, ctx)?),
        Expr::Div(a, b) => evaluer_expr(a, ctx)?.diviser(&evaluer_expr(b, ctx)?),
        Expr::Pow(a, b) => evaluer_expr(a, ctx)?.puissance(&evaluer_expr(b, ctx)?),

        Expr::Appel(f, args) => {
            let valeurs = args
                .iter()
                .map(|a| evaluer_expr(a, ctx))
                .collect::<Resultat<Vec<_>>>()?;
            f.appliquer(&valeurs, ctx.mode)
        }
    }
}
