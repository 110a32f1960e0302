// src/noyau/normalise.rs
//
// Réécritures textuelles AVANT tokenisation, dans un ordre fixe.
// Seuls les glyphes qui sont de purs alias d’opérateurs passent ici ;
// les noms (sin, ln, Ans…) sont reconnus mot par mot dans jetons.rs.
//
// `%` est remplacé littéralement par `/100` partout où il apparaît :
// "50%+10" devient "50/100+10" (= 10.5), pas "(50+10)/100".

const REECRITURES: [(&str, &str); 5] = [
    ("×", "*"),
    ("÷", "/"),
    ("−", "-"),
    ("**", "^"),
    ("%", "/100"),
];

pub fn normaliser(s: &str) -> String {
    REECRITURES
        .iter()
        .fold(s.to_string(), |acc, (glyphe, op)| acc.replace(glyphe, op))
}
