// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr en résolvant chaque nom dans l’espace fermé
//
// Règles:
// - Ident(name) suivi de '(' => appel de fonction, arité = 1 + nombre de ','
// - Ident(name) seul => constante (pi, e, Ans), sinon identifiant inconnu
// - Moins unaire => Tok::Neg (préfixe), plus faible que '^' : -2^2 = -(2^2)
// - '!' postfixe => sort directement (son opérande est déjà complet)
// - Deux valeurs côte à côte ("2π", "2(3)") => erreur : pas de produit implicite
//
// Priorités: + - (1) < * / (2) < neg √ (3) < ^ (4, droite)

use super::erreur::{ErreurEval, Resultat};
use super::expr::Expr;
use super::fonctions::{Constante, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg | Tok::Racine => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn operateur_manquant() -> ErreurEval {
    ErreurEval::syntaxe("opérateur manquant entre deux valeurs")
}

/// Dépile vers `out` jusqu’à la '(' la plus proche (laissée sur la pile).
/// Retourne false s’il n’y en a aucune.
fn depile_jusqu_a_lpar(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) -> bool {
    while let Some(top) = ops.pop() {
        if matches!(top, Tok::LPar) {
            ops.push(top);
            return true;
        }
        out.push(top);
    }
    false
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("ncr"), LPar, Num(5), Virgule, Num(2), RPar]
///   rpn:    [Num(5), Num(2), Appel("ncr", 2)]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // Un compteur d’arguments par appel de fonction ouvert.
    let mut arites: Vec<usize> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et le produit implicite.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().cloned().peekable();

    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) | Tok::Pi => {
                if prev_was_value {
                    return Err(operateur_manquant());
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(operateur_manquant());
                }
                if matches!(iter.peek(), Some(Tok::LPar)) {
                    // appel : la fonction attend sous sa parenthèse
                    iter.next();
                    ops.push(Tok::Appel(name, 0));
                    ops.push(Tok::LPar);
                    arites.push(1);
                    prev_was_value = false;
                } else {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(operateur_manquant());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe(
                        "parenthèses vides ou argument manquant",
                    ));
                }
                if !depile_jusqu_a_lpar(&mut ops, &mut out) {
                    return Err(ErreurEval::syntaxe("parenthèse fermante sans ouvrante"));
                }
                ops.pop();

                // si la parenthèse était celle d’un appel, on sort la fonction
                if let Some(Tok::Appel(..)) = ops.last() {
                    if let Some(Tok::Appel(name, _)) = ops.pop() {
                        let n = arites.pop().unwrap_or(1);
                        out.push(Tok::Appel(name, n));
                    }
                }

                prev_was_value = true;
            }

            Tok::Virgule => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("argument manquant avant ','"));
                }
                let trouve = depile_jusqu_a_lpar(&mut ops, &mut out);
                let dans_appel =
                    trouve && ops.len() >= 2 && matches!(ops[ops.len() - 2], Tok::Appel(..));
                if !dans_appel {
                    return Err(ErreurEval::syntaxe("',' hors d’un appel de fonction"));
                }
                if let Some(n) = arites.last_mut() {
                    *n += 1;
                }
                prev_was_value = false;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    match tok {
                        Tok::Minus => ops.push(Tok::Neg),
                        Tok::Plus => {} // plus unaire : neutre
                        _ => {
                            return Err(ErreurEval::syntaxe(format!(
                                "opérateur '{}' sans opérande gauche",
                                super::jetons::format_tokens(std::slice::from_ref(&tok))
                            )))
                        }
                    }
                    continue;
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou un appel (précédence 0)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    let p_top = precedence(top);
                    if p_top == 0 {
                        break;
                    }
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    match (doit_pop, ops.pop()) {
                        (true, Some(op)) => out.push(op),
                        (false, Some(op)) => {
                            ops.push(op);
                            break;
                        }
                        (_, None) => break,
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Racine => {
                if prev_was_value {
                    return Err(operateur_manquant());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Bang => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("'!' sans opérande"));
                }
                out.push(tok);
            }

            Tok::Neg | Tok::Appel(..) => {
                return Err(ErreurEval::syntaxe("jeton inattendu"));
            }
        }
    }

    if !prev_was_value {
        return Err(if tokens.is_empty() {
            ErreurEval::syntaxe("entrée vide")
        } else {
            ErreurEval::syntaxe("expression incomplète")
        });
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::Appel(..)) {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

fn depile(st: &mut Vec<Expr>) -> Resultat<Expr> {
    st.pop()
        .ok_or_else(|| ErreurEval::syntaxe("expression invalide"))
}

/// Construit une Expr à partir d’une RPN, en résolvant les noms.
pub fn from_rpn(rpn: &[Tok]) -> Resultat<Expr> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),
            Tok::Pi => st.push(Expr::Constante(Constante::Pi)),

            Tok::Ident(name) => {
                if Fonction::depuis_nom(&name).is_some() {
                    return Err(ErreurEval::syntaxe(format!(
                        "{name} doit être suivi de '('"
                    )));
                }
                let c = Constante::depuis_nom(&name).ok_or(ErreurEval::IdentifiantInconnu(name))?;
                st.push(Expr::Constante(c));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = Box::new(depile(&mut st)?);
                let a = Box::new(depile(&mut st)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push(e);
            }

            Tok::Neg => {
                let x = depile(&mut st)?;
                st.push(Expr::Neg(Box::new(x)));
            }
            Tok::Bang => {
                let x = depile(&mut st)?;
                st.push(Expr::Fact(Box::new(x)));
            }
            Tok::Racine => {
                let x = depile(&mut st)?;
                st.push(Expr::Appel(Fonction::Sqrt, vec![x]));
            }

            Tok::Appel(name, n) => {
                let Some(f) = Fonction::depuis_nom(&name) else {
                    if Constante::depuis_nom(&name).is_some() {
                        return Err(ErreurEval::syntaxe(format!(
                            "{name} n’est pas une fonction"
                        )));
                    }
                    return Err(ErreurEval::IdentifiantInconnu(name));
                };
                if n != f.arite() {
                    return Err(ErreurEval::syntaxe(format!(
                        "{} attend {} argument(s), {n} reçu(s)",
                        f.nom(),
                        f.arite()
                    )));
                }
                if st.len() < n {
                    return Err(ErreurEval::syntaxe("expression invalide"));
                }
                let args = st.split_off(st.len() - n);
                st.push(Expr::Appel(f, args));
            }

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(ErreurEval::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurEval::syntaxe("expression invalide"));
    }
    depile(&mut st)
}
