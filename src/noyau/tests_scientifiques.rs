//! Tests scientifiques (campagne) : propriétés transverses du noyau.
//!
//! - précédence / associativité sur des expressions sans fonction
//! - multiplication implicite équivalente à l’explicite
//! - factorielle / gamma
//! - "Error" comme unique sortie d’échec à l’affichage
//! - formateur idempotent (relecture de sa propre sortie)
//! - grille + tracé sur des fenêtres variées
//!
//! Budget temps court : on vérifie, on ne chauffe pas.

use std::time::{Duration, Instant};

use super::eval::{evaluer, evaluer_affichage, evaluer_en, Resultat};
use super::expr::ModeAngle;
use super::fenetre::Fenetre;
use super::format::format_nombre;
use super::gamma::factorial;
use super::grille::{pas_grille, planifier};
use super::trace::tracer_texte;

const RAD: ModeAngle = ModeAngle::Radians;
const DEG: ModeAngle = ModeAngle::Degres;

fn eval_ok(expr: &str, mode: ModeAngle) -> f64 {
    match evaluer(expr, mode) {
        Resultat::Valeur(v) => v,
        autre => panic!("expr={expr:?} => {autre:?}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Grammaire ------------------------ */

#[test]
fn sci_precedence_table() {
    let cas = [
        ("2+3*4", 14.0),
        ("2*3+4", 10.0),
        ("2^3^2", 512.0),
        ("(2^3)^2", 64.0),
        ("2*3^2", 18.0),
        ("18/3/3", 2.0),
        ("1-2+3", 2.0),
        ("2^2*3", 12.0),
        ("-3^2", 9.0),
        ("-(3^2)", -9.0),
        ("2--2", 4.0),
        ("4!/3!", 4.0),
        ("(1+2)(3+4)", 21.0),
        ("2(3)(4)", 24.0),
    ];
    for (expr, attendu) in cas {
        assert_eq!(eval_ok(expr, RAD), attendu, "expr={expr:?}");
    }
}

#[test]
fn sci_implicite_egal_explicite() {
    for x in [-2.5, 0.0, 1.0, 3.0, 10.0] {
        let paires = [
            ("2x", "2*x"),
            ("x2", "x*2"),
            ("3(x+1)", "3*(x+1)"),
            ("x(x-1)", "x*(x-1)"),
            ("(x+1)(x-1)", "(x+1)*(x-1)"),
            ("(x)2", "(x)*2"),
            ("(2)x", "(2)*x"),
        ];
        for (implicite, explicite) in paires {
            assert_eq!(
                evaluer_en(implicite, x, RAD),
                evaluer_en(explicite, x, RAD),
                "{implicite} vs {explicite} en x={x}"
            );
        }
    }
}

#[test]
fn sci_mode_angle_parametre_unique() {
    // même texte, deux modes : un seul évaluateur
    let d = eval_ok("sin(90)", DEG);
    let r = eval_ok("sin(90)", RAD);
    assert!((d - 1.0).abs() < 1e-12);
    assert!((r - 90f64.sin()).abs() < 1e-12);

    // trig inverse : le résultat est converti, pas l’argument
    assert!((eval_ok("acos(0)", DEG) - 90.0).abs() < 1e-9);
    assert!((eval_ok("acos(0)", RAD) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

/* ------------------------ Factorielle / gamma ------------------------ */

#[test]
fn sci_factorielle_reference() {
    assert_eq!(factorial(5.0), 120.0);
    assert_eq!(factorial(0.0), 1.0);
    assert!((factorial(0.5) - 0.886_226_9).abs() < 1e-6);
    assert!(factorial(171.0).is_infinite());
    assert_eq!(evaluer_affichage("171!", DEG), "Error");
    assert_eq!(evaluer_affichage("170!", DEG), "7.257416e+306");
}

#[test]
fn sci_gamma_recurrence() {
    // Γ(z+1) = z·Γ(z) <=> (z)! = z·(z-1)!
    for k in 1..40 {
        let z = k as f64 * 0.37 + 0.01;
        let gauche = factorial(z);
        let droite = z * factorial(z - 1.0);
        assert!(
            ((gauche - droite) / gauche).abs() < 1e-9,
            "z={z} {gauche} vs {droite}"
        );
    }
}

/* ------------------------ Affichage ------------------------ */

#[test]
fn sci_erreurs_toujours_error() {
    for expr in [
        "1/0", "0/0", "ln(0)", "sqrt(-4)", "asin(3)", "(-2)!", "10^400", "((2)", "2**3", "",
    ] {
        let r = evaluer(expr, DEG);
        assert!(r.est_erreur(), "expr={expr:?} => {r:?}");
        assert_eq!(r.to_string(), "Error", "expr={expr:?}");
    }
}

#[test]
fn sci_division_par_zero_brute_infinie() {
    assert_eq!(evaluer("5/0", DEG), Resultat::Infini { negatif: false });
    assert_eq!(evaluer_affichage("5/0", DEG), "Error");
}

#[test]
fn sci_formateur_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // balayage de magnitudes, signes alternés
    let mut v = 1.234_567_891_234_5e-14;
    let mut signe = 1.0;
    while v < 1e20 {
        budget(t0, max);
        let x = v * signe;
        let une = format_nombre(x);
        let deux = evaluer_affichage(&une, DEG);
        assert_eq!(deux, une, "x={x}");
        v *= 7.3;
        signe = -signe;
    }
}

/* ------------------------ Grille + tracé ------------------------ */

#[test]
fn sci_pas_deux_axes_independants() {
    let f = Fenetre::new(-1.0, 1.0, -500.0, 500.0).unwrap();
    let p = planifier(&f, 300.0, 300.0);
    assert_eq!(Some(p.pas_x), pas_grille(2.0));
    assert_eq!(Some(p.pas_y), pas_grille(1000.0));
    assert_ne!(p.pas_x, p.pas_y);
    assert!((2..=11).contains(&p.verticales.len()));
    assert!((2..=11).contains(&p.horizontales.len()));
}

#[test]
fn sci_trace_inverse_deux_cotes() {
    let f = Fenetre::default();
    let segs = tracer_texte("1/x", &f, 640, 480).unwrap();
    assert!(segs.len() >= 2);
    let zero = f.vers_ecran_x(0.0, 640.0);
    assert!(segs.iter().any(|s| s.iter().all(|p| p.x < zero)));
    assert!(segs.iter().any(|s| s.iter().all(|p| p.x > zero)));
}

#[test]
fn sci_trace_ne_saute_jamais() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let f = Fenetre::new(-7.0, 7.0, -3.0, 3.0).unwrap();
    for expr in ["tan(x)", "1/(x^2-1)", "x!", "ln(x)", "sqrt(4-x^2)", "exp(x)", "abs(x)-2"] {
        budget(t0, max);
        let h = 240u32;
        for seg in tracer_texte(expr, &f, 320, h).unwrap() {
            assert!(!seg.is_empty());
            for w in seg.windows(2) {
                assert!(
                    (w[1].y - w[0].y).abs() <= f64::from(h),
                    "expr={expr:?} saut {} -> {}",
                    w[0].y,
                    w[1].y
                );
                assert_eq!(w[1].x - w[0].x, 1.0, "expr={expr:?} colonnes contiguës");
            }
        }
    }
}
