//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * jamais de panique, quel que soit le texte
//!   * affichage == "Error" <=> Resultat n’est pas une valeur finie
//!   * une valeur affichée se relit à l’identique
//!   * un tracé ne contient jamais de saut > hauteur

use std::time::{Duration, Instant};

use super::eval::{evaluer, Resultat};
use super::expr::ModeAngle;
use super::fenetre::Fenetre;
use super::format::format_nombre;
use super::trace::tracer_texte;

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
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        3 => "π".to_string(),
        4 => "e".to_string(),
        _ => format!("{}", rng.pick(200)),
    }
}

fn gen_atome(rng: &mut Rng, avec_x: bool) -> String {
    if avec_x && rng.pick(3) == 0 {
        return "x".to_string();
    }
    gen_nombre(rng)
}

fn gen_expr(rng: &mut Rng, depth: usize, avec_x: bool) -> String {
    if depth == 0 {
        return gen_atome(rng, avec_x);
    }

    let d = depth - 1;
    match rng.pick(12) {
        0 => gen_atome(rng, avec_x),
        1 => format!("({}+{})", gen_expr(rng, d, avec_x), gen_expr(rng, d, avec_x)),
        2 => format!("({}−{})", gen_expr(rng, d, avec_x), gen_expr(rng, d, avec_x)),
        3 => format!("{}×{}", gen_expr(rng, d, avec_x), gen_expr(rng, d, avec_x)),
        4 => format!("({})÷({})", gen_expr(rng, d, avec_x), gen_expr(rng, d, avec_x)),
        5 => format!("({})^{}", gen_expr(rng, d, avec_x), rng.pick(4)),
        6 => format!("({})!", gen_expr(rng, d, avec_x)),
        7 => format!("-{}", gen_expr(rng, d, avec_x)),
        8 => {
            let f = ["sin", "cos", "tan", "asin", "acos", "atan", "log", "ln", "sqrt", "abs", "exp"]
                [rng.pick(11) as usize];
            format!("{f}({})", gen_expr(rng, d, avec_x))
        }
        // multiplication implicite
        9 => format!("{}({})", rng.pick(9) + 1, gen_expr(rng, d, avec_x)),
        10 => format!("({})({})", gen_expr(rng, d, avec_x), gen_expr(rng, d, avec_x)),
        _ => format!("{}!", rng.pick(12)),
    }
}

/// Texte quelconque (souvent invalide) tiré d’un alphabet "dangereux".
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[&str] = &[
        "(", ")", "+", "-", "*", "/", "^", "!", ".", "e", "x", "π", "sin", "ln", "1", "2", "9",
        " ", "×", "÷", "−", ",", ";", "$", "E", "exp", "√", "é",
    ];
    let n = rng.pick(16) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_classification() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4, false);
        let r1 = evaluer(&expr, ModeAngle::Degres);
        let r2 = evaluer(&expr, ModeAngle::Degres);

        // déterminisme (NaN != NaN : on compare l’affichage)
        assert_eq!(r1.to_string(), r2.to_string(), "expr={expr:?}");

        match &r1 {
            Resultat::Valeur(v) => {
                assert!(v.is_finite());
                assert_ne!(r1.to_string(), "Error", "expr={expr:?}");
                seen_ok += 1;
            }
            _ => {
                assert_eq!(r1.to_string(), "Error", "expr={expr:?}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_relecture_affichage() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xBADC0DE_u64);
    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3, false);
        if let Resultat::Valeur(v) = evaluer(&expr, ModeAngle::Radians) {
            let affiche = format_nombre(v);
            let relu = evaluer(&affiche, ModeAngle::Radians);
            let v2 = relu
                .valeur()
                .unwrap_or_else(|| panic!("expr={expr:?} affiché={affiche:?} relu={relu:?}"));

            // même texte, sauf bruit d’arrondi juste sur un seuil de notation
            let a = v.abs();
            let pres_seuil = (a - 1e12).abs() / 1e12 < 1e-6 || (a - 1e-10).abs() / 1e-10 < 1e-6;
            if !pres_seuil {
                assert_eq!(format_nombre(v2), affiche, "expr={expr:?}");
            }
        }
    }
}

#[test]
fn fuzz_safe_bruit_ne_panique_pas() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);
    for _ in 0..1000 {
        budget(t0, max);
        let texte = gen_bruit(&mut rng);
        // seul invariant : une réponse bien formée, jamais de panique
        let r = evaluer(&texte, ModeAngle::Degres);
        let s = r.to_string();
        assert!(!s.is_empty(), "texte={texte:?}");
    }
}

#[test]
fn fuzz_safe_trace_sans_saut() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);

    let mut rng = Rng::new(0xF00D_u64);
    let f = Fenetre::new(-6.0, 6.0, -4.0, 4.0).unwrap();
    let (largeur, hauteur) = (160u32, 120u32);

    for _ in 0..60 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3, true);
        let Ok(segments) = tracer_texte(&expr, &f, largeur, hauteur) else {
            continue;
        };

        let total: usize = segments.iter().map(Vec::len).sum();
        assert!(total <= largeur as usize + 1, "expr={expr:?}");

        for seg in &segments {
            for w in seg.windows(2) {
                assert!(w[0].y.is_finite() && w[1].y.is_finite());
                assert!(
                    (w[1].y - w[0].y).abs() <= f64::from(hauteur),
                    "expr={expr:?}"
                );
            }
        }
    }
}

#[test]
fn fuzz_safe_longue_somme_sous_la_borne() {
    // 800 termes : profondeur 800, sous la borne de l’arbre
    let somme = vec!["0.5"; 800].join("+");
    assert_eq!(evaluer(&somme, ModeAngle::Degres).to_string(), "400");

    // parenthèses imbriquées : pas de nœud, pas de profondeur
    let s = format!("{}2{}!", "(".repeat(2000), ")".repeat(2000));
    assert_eq!(evaluer(&s, ModeAngle::Degres).to_string(), "2");
}
