// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::erreur::{ErreurEval, Resultat};
use super::format::format_valeur;
use super::valeur::Valeur;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Valeur),
    Pi,

    // Fonctions + constantes nommées (normalisées en minuscules).
    // NOTE: rpn.rs décide si c’est un appel (suivi de '(') ou une constante.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,  // ^
    Bang,   // ! (postfixe)
    Racine, // √ (préfixe)
    Virgule,

    LPar,
    RPar,

    // Produits seulement par to_rpn
    Neg,
    Appel(String, usize),
}

/// Tokenize une chaîne (déjà normalisée) en jetons.
/// Supporte:
/// - entiers (ex: 12) -> exacts
/// - décimaux (ex: 3.14, .5, 2.) -> réels
/// - opérateurs + - * / ^ ! et la virgule d’arguments
/// - parenthèses ( )
/// - π ou pi
/// - √ (préfixe)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            ',' => Some(Tok::Virgule),
            '√' => Some(Tok::Racine),
            'π' => Some(Tok::Pi),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : mot entier, jamais de sous-chaîne
        // ("asin" ne contient pas "sin" du point de vue du lexer).
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Nombre : entier exact ou décimal
        let debut_decimal =
            c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
        if c.is_ascii_digit() || debut_decimal {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }

            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let txt: String = chars[start..i].iter().collect();
                let x: f64 = txt
                    .parse()
                    .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide: '{txt}'")))?;
                out.push(Tok::Num(Valeur::Reel(x)));
            } else {
                let txt: String = chars[start..i].iter().collect();
                let n = BigInt::parse_bytes(txt.as_bytes(), 10)
                    .ok_or_else(|| ErreurEval::syntaxe(format!("nombre invalide: '{txt}'")))?;
                out.push(Tok::Num(Valeur::Entier(n)));
            }
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format_valeur(v, 15),
            Tok::Pi => "π".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),
            Tok::Racine => "√".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),

            Tok::Neg => "neg".to_string(),
            Tok::Appel(name, n) => format!("{name}/{n}"),
        };
        out.push(s);
    }
    out.join(" ")
}
