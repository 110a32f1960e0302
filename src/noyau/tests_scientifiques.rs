//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés mathématiques du noyau, pas seulement des
//! valeurs isolées.
//! - identités trig dans les deux modes
//! - cohérence DEG/RAD (le mode ne touche que la trig)
//! - identités de dénombrement (Pascal, symétrie, nPr = nCr·r!)
//! - priorités standard sur + - * /
//! - stress borné (taille, profondeur) sous budget temps

use std::time::{Duration, Instant};

use super::{evaluate, Contexte, ErreurEval, ModeAngle, Valeur};

const EPS: f64 = 1e-9;

fn ctx(mode: ModeAngle) -> Contexte {
    Contexte {
        mode,
        ..Contexte::default()
    }
}

fn eval_ok(expr: &str, mode: ModeAngle) -> Valeur {
    evaluate(expr, &ctx(mode)).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn reel(expr: &str, mode: ModeAngle) -> f64 {
    eval_ok(expr, mode)
        .en_f64()
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, mode: ModeAngle, attendu: f64) {
    let x = reel(expr, mode);
    assert!(
        (x - attendu).abs() < EPS,
        "expr={expr:?} : {x} != {attendu}"
    );
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de référence ------------------------ */

#[test]
fn sci_proprietes_de_reference() {
    use ModeAngle::*;

    assert_eq!(eval_ok("2^10", Radians), Valeur::from(1024));
    assert_proche("sin(90)", Degres, 1.0);
    assert_proche("sin(90)", Radians, 0.8939966636);
    assert_eq!(eval_ok("nCr(5,2)", Degres), Valeur::from(10));
    assert_eq!(eval_ok("nPr(5,2)", Degres), Valeur::from(20));
    assert_eq!(eval_ok("5!", Degres), Valeur::from(120));
    assert!(matches!(
        evaluate("(-1)!", &ctx(Degres)),
        Err(ErreurEval::Domaine(_))
    ));
    assert_eq!(
        evaluate("1/0", &ctx(Degres)),
        Err(ErreurEval::DivisionParZero)
    );
    assert_proche("50%", Degres, 0.5);
    assert_proche("50%+10", Degres, 10.5);
}

/* ------------------------ Invariants trig ------------------------ */

#[test]
fn sci_pythagore_deux_modes() {
    for mode in [ModeAngle::Degres, ModeAngle::Radians] {
        for a in ["0", "1", "30", "45", "60", "90", "123.456", "-77"] {
            let expr = format!("sin({a})^2 + cos({a})^2");
            assert_proche(&expr, mode, 1.0);
        }
    }
}

#[test]
fn sci_coherence_deg_rad() {
    // sin(x°) == sin(x·π/180 rad)
    for a in [15, 30, 72, 135, 250] {
        let d = reel(&format!("sin({a})"), ModeAngle::Degres);
        let r = reel(&format!("sin({a}*π/180)"), ModeAngle::Radians);
        assert!((d - r).abs() < EPS, "a={a}");
    }
}

#[test]
fn sci_inverses() {
    // asin(sin(x)) == x sur [-90°, 90°]
    for a in ["-60", "-15", "0", "20", "89"] {
        let expr = format!("asin(sin({a}))");
        assert_proche(&expr, ModeAngle::Degres, a.parse().unwrap_or(0.0));
    }
    assert_proche("atan(tan(1))", ModeAngle::Radians, 1.0);
    assert_proche("acos(cos(2))", ModeAngle::Radians, 2.0);
}

#[test]
fn sci_periodicite() {
    assert_proche("sin(30) - sin(390)", ModeAngle::Degres, 0.0);
    assert_proche("cos(60) - cos(-60)", ModeAngle::Degres, 0.0);
    assert_proche("tan(1) - tan(1 + π)", ModeAngle::Radians, 0.0);
}

/* ------------------------ Logarithmes ------------------------ */

#[test]
fn sci_logarithmes() {
    assert_proche("ln(e^3)", ModeAngle::Degres, 3.0);
    assert_proche("log(10^5)", ModeAngle::Degres, 5.0);
    assert_proche("ln(100) / ln(10) - log(100)", ModeAngle::Degres, 0.0);
}

/* ------------------------ Dénombrement ------------------------ */

#[test]
fn sci_pascal_et_symetrie() {
    for n in 1..15 {
        for r in 1..n {
            let gauche = eval_ok(&format!("nCr({n},{r})"), ModeAngle::Degres);
            let droite = eval_ok(
                &format!("nCr({},{}) + nCr({},{r})", n - 1, r - 1, n - 1),
                ModeAngle::Degres,
            );
            assert_eq!(gauche, droite, "Pascal n={n} r={r}");

            let sym = eval_ok(&format!("nCr({n},{})", n - r), ModeAngle::Degres);
            assert_eq!(gauche, sym, "symétrie n={n} r={r}");

            let npr = eval_ok(&format!("nPr({n},{r})"), ModeAngle::Degres);
            let via_ncr = eval_ok(&format!("nCr({n},{r}) * {r}!"), ModeAngle::Degres);
            assert_eq!(npr, via_ncr, "nPr = nCr·r! n={n} r={r}");
        }
    }
}

#[test]
fn sci_factorielle_exacte() {
    // 25! dépasse u64 : doit rester exact
    let v = eval_ok("25!", ModeAngle::Degres);
    assert_eq!(v.to_string(), "15511210043330985984000000");
    assert_proche("25! / 24!", ModeAngle::Degres, 25.0);
}

/* ------------------------ Arithmétique standard ------------------------ */

#[test]
fn sci_priorites_standard() {
    let cas: [(&str, f64); 6] = [
        ("1 + 2 * 3 - 4 / 2", 1.0 + 2.0 * 3.0 - 4.0 / 2.0),
        ("1.5 - 2.25 * 4 + 10 / 4", 1.5 - 2.25 * 4.0 + 10.0 / 4.0),
        ("(1 + 2) * (3 - 4) / 2", (1.0 + 2.0) * (3.0 - 4.0) / 2.0),
        ("100 / 10 / 5", 100.0 / 10.0 / 5.0),
        ("7 - 3 - 2", 7.0 - 3.0 - 2.0),
        ("-3 * -2 + -1", -3.0 * -2.0 + -1.0),
    ];
    for (expr, attendu) in cas {
        assert_proche(expr, ModeAngle::Radians, attendu);
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..200 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push('1');
        budget(t0, max);
    }

    assert_eq!(eval_ok(&expr, ModeAngle::Degres), Valeur::from(200));
}

#[test]
fn sci_stress_profondeur_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // ((((1+1)+1)+1)…) : profondeur bornée par JETONS_MAX
    let mut expr = "1".to_string();
    for _ in 0..80 {
        expr = format!("({expr}+1)");
        budget(t0, max);
    }
    assert_eq!(eval_ok(&expr, ModeAngle::Degres), Valeur::from(81));
}

#[test]
fn sci_stress_grands_entiers_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let v = eval_ok("1000!", ModeAngle::Degres);
    budget(t0, max);
    assert_eq!(v.to_string().len(), 2568);

    assert!(matches!(
        evaluate("9^9^9", &ctx(ModeAngle::Degres)),
        Err(ErreurEval::Domaine(_))
    ));
    budget(t0, max);

    // produits et sommes d’entiers géants : même borne que la puissance
    for expr in ["4000! * 4000! * 4000!", "5000!^2", "2^99999 + 2^99999"] {
        assert!(
            matches!(evaluate(expr, &ctx(ModeAngle::Degres)), Err(ErreurEval::Domaine(_))),
            "{expr:?}"
        );
        budget(t0, max);
    }
}
