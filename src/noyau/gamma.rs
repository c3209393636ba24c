// src/noyau/gamma.rs
//
// Factorielle étendue :
// - entiers 0..=170 : produit exact (BigUint) arrondi une seule fois en f64, table en cache
// - n > 170         : +inf (même politique que le débordement f64)
// - entiers < 0     : NaN
// - non entiers     : Γ(n+1) par Lanczos (g = 7, 9 coefficients), réflexion pour z < 0.5

use std::f64::consts::PI;
use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

/// Plus grand n tel que n! reste fini en f64.
pub const FACTORIELLE_MAX: u32 = 170;

const LANCZOS_G: f64 = 7.0;

const LANCZOS_C: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

static TABLE_FACTORIELLES: OnceLock<Vec<f64>> = OnceLock::new();

/// Table n! pour n ∈ 0..=170, calculée une fois (itératif, pas de récursion).
fn table_factorielles() -> &'static [f64] {
    TABLE_FACTORIELLES.get_or_init(|| {
        let mut t = Vec::with_capacity(FACTORIELLE_MAX as usize + 1);
        let mut acc = BigUint::one();
        t.push(1.0);
        for k in 1..=FACTORIELLE_MAX {
            acc *= k;
            t.push(acc.to_f64().unwrap_or(f64::INFINITY));
        }
        t
    })
}

/// n! pour tout réel (voir politique en tête de fichier).
pub fn factorial(n: f64) -> f64 {
    if n.is_nan() {
        return f64::NAN;
    }
    if n > FACTORIELLE_MAX as f64 {
        return f64::INFINITY;
    }

    let entier = n.fract() == 0.0;
    if n < 0.0 {
        if entier {
            return f64::NAN;
        }
        return gamma(n + 1.0);
    }

    if entier {
        // 0 <= n <= 170 ici
        return table_factorielles()[n as usize];
    }

    gamma(n + 1.0)
}

/// Γ(z) pour z réel. Aux pôles (0, -1, -2, …) le résultat est énorme ou non fini :
/// l’appelant doit le tolérer. Loin à gauche, Γ(1-z) déborde et la réflexion donne ±0.
pub fn gamma(z: f64) -> f64 {
    if z < 0.5 {
        // Γ(z) = π / (sin(πz) · Γ(1-z)), avec 1-z >= 0.5 : un seul niveau
        PI / ((PI * z).sin() * lanczos(1.0 - z))
    } else {
        lanczos(z)
    }
}

fn lanczos(z: f64) -> f64 {
    let z = z - 1.0;
    let mut somme = LANCZOS_C[0];
    for (i, c) in LANCZOS_C.iter().enumerate().skip(1) {
        somme += c / (z + i as f64);
    }
    let t = z + LANCZOS_G + 0.5;
    // t^(z+1/2)·e^(-t) en un seul exp : +inf au débordement, jamais inf·0
    (2.0 * PI).sqrt() * ((z + 0.5) * t.ln() - t).exp() * somme
}
