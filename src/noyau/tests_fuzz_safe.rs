//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur est acceptée (le domaine est volontairement fermé),
//!   mais jamais de panique
//! - invariants clés :
//!   * même (entrée, mode, Ans, mémoire) => même résultat
//!   * un Reel retourné est toujours fini
//!   * le texte affiché d’un résultat, ré-évalué, redonne ce résultat

use std::time::{Duration, Instant};

use super::{evaluate, format_valeur, Contexte, ErreurEval, ModeAngle, Valeur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choix<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => rng.choix(&["π", "pi", "e", "Ans"]).to_string(),
        1 => format!("{}.{}", rng.pick(20), rng.pick(100)),
        2 => format!("{}%", rng.pick(200)),
        _ => format!("{}", rng.pick(13)),
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return gen_atome(rng);
    }

    match rng.pick(9) {
        0 => gen_atome(rng),
        1 => {
            let f = rng.choix(&["sin", "cos", "tan", "asin", "acos", "atan", "ln", "log", "sqrt"]);
            format!("{f}({})", gen_expr(rng, profondeur - 1))
        }
        2 => {
            let f = rng.choix(&["nCr", "nPr"]);
            format!("{f}({}, {})", rng.pick(12), rng.pick(12))
        }
        3 => format!("({})!", gen_expr(rng, profondeur - 1)),
        4 => format!("-{}", gen_expr(rng, profondeur - 1)),
        5 => format!("√({})", gen_expr(rng, profondeur - 1)),
        _ => {
            let op = rng.choix(&["+", "-", "*", "/", "^", "×", "÷"]);
            let a = gen_expr(rng, profondeur - 1);
            let b = gen_expr(rng, profondeur - 1);
            if rng.coin() {
                format!("({a}) {op} ({b})")
            } else {
                format!("{a} {op} {b}")
            }
        }
    }
}

/// Texte “cassé” : on garde des morceaux valides mélangés à du bruit.
fn gen_bruit(rng: &mut Rng) -> String {
    let morceaux = [
        "(", ")", "+", "*", "^", "!", ",", "sin", "nCr(", "√", "%", "Ans", "x", "7", ".", "π", "#",
        "**", " ",
    ];
    let n = 1 + rng.pick(12);
    (0..n).map(|_| rng.choix(&morceaux)).collect()
}

fn ctx_aleatoire(rng: &mut Rng) -> Contexte {
    Contexte {
        mode: if rng.coin() {
            ModeAngle::Degres
        } else {
            ModeAngle::Radians
        },
        ans: if rng.coin() {
            Valeur::from(i64::from(rng.pick(10)))
        } else {
            Valeur::Reel(f64::from(rng.pick(1000)) / 8.0)
        },
        memoire: f64::from(rng.pick(100)),
    }
}

fn proches(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

fn check_invariants(expr: &str, ctx: &Contexte) {
    let r1 = evaluate(expr, ctx);
    let r2 = evaluate(expr, ctx);
    assert_eq!(r1, r2, "non déterministe: {expr:?}");

    match r1 {
        Ok(Valeur::Reel(x)) => {
            assert!(x.is_finite(), "réel non fini: {expr:?}");

            let txt = format_valeur(&Valeur::Reel(x), 12);
            let relu = evaluate(&txt, ctx)
                .unwrap_or_else(|e| panic!("relecture de {txt:?} ({expr:?}): {e}"));
            let y = relu.en_f64().unwrap_or(f64::NAN);
            assert!(proches(x, y), "relecture {expr:?}: {x} -> {txt:?} -> {y}");
        }
        Ok(v @ Valeur::Entier(_)) => {
            let txt = format_valeur(&v, 12);
            let relu = evaluate(&txt, ctx)
                .unwrap_or_else(|e| panic!("relecture de {txt:?} ({expr:?}): {e}"));
            assert_eq!(relu, v, "relecture exacte {expr:?}");
        }
        Err(e) => {
            assert!(!e.to_string().is_empty(), "message vide: {expr:?}");
        }
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..600 {
        let expr = gen_expr(&mut rng, 3);
        let ctx = ctx_aleatoire(&mut rng);
        check_invariants(&expr, &ctx);
        budget(t0, max);
    }
}

#[test]
fn fuzz_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);
    let mut rng = Rng::new(42);

    for _ in 0..1500 {
        let expr = gen_bruit(&mut rng);
        let ctx = ctx_aleatoire(&mut rng);
        check_invariants(&expr, &ctx);
        budget(t0, max);
    }
}

#[test]
fn fuzz_mode_ne_touche_que_la_trig() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);
    let mut rng = Rng::new(7);

    for _ in 0..400 {
        let expr = gen_expr(&mut rng, 3);
        let sans_trig = ["sin", "cos", "tan"].iter().all(|f| !expr.contains(f));
        if !sans_trig {
            continue;
        }
        let deg = Contexte {
            mode: ModeAngle::Degres,
            ..Contexte::default()
        };
        let rad = Contexte {
            mode: ModeAngle::Radians,
            ..Contexte::default()
        };
        assert_eq!(evaluate(&expr, &deg), evaluate(&expr, &rad), "{expr:?}");
        budget(t0, max);
    }
}

#[test]
fn fuzz_erreurs_typees() {
    // Quelques entrées cassées connues : la catégorie doit être stable.
    let ctx = Contexte::default();
    let cas: [(&str, fn(&ErreurEval) -> bool); 6] = [
        ("((", |e| matches!(e, ErreurEval::Syntaxe(_))),
        ("nCr(", |e| matches!(e, ErreurEval::Syntaxe(_))),
        ("7!!!!!!!", |e| matches!(e, ErreurEval::Domaine(_))),
        ("x", |e| matches!(e, ErreurEval::IdentifiantInconnu(_))),
        ("7/(Ans-Ans)", |e| matches!(e, ErreurEval::DivisionParZero)),
        ("√(-π)", |e| matches!(e, ErreurEval::Domaine(_))),
    ];
    for (expr, attendu) in cas {
        let err = evaluate(expr, &ctx).expect_err(expr);
        assert!(attendu(&err), "{expr:?} => {err:?}");
    }
}
