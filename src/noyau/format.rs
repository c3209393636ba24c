// src/noyau/format.rs
//
// Affichage d’un résultat flottant (pur, sans état).
// Règles, dans l’ordre :
// 1) non fini                          -> "Error"
// 2) |v| >= 1e12 ou 0 < |v| < 1e-10    -> exponentiel, 6 décimales ("1.000000e+12")
// 3) entier exact                      -> entier sans point
// 4) sinon                             -> 12 chiffres significatifs, zéros de fin retirés

/// Texte unique pour toute erreur (syntaxe, domaine, débordement).
pub const TEXTE_ERREUR: &str = "Error";

const SEUIL_GRAND: f64 = 1e12;
const SEUIL_PETIT: f64 = 1e-10;
const DECIMALES_EXPONENTIEL: usize = 6;
const CHIFFRES_SIGNIFICATIFS: usize = 12;

pub fn format_nombre(v: f64) -> String {
    if !v.is_finite() {
        return TEXTE_ERREUR.to_string();
    }

    let a = v.abs();
    if a >= SEUIL_GRAND || (a < SEUIL_PETIT && v != 0.0) {
        return format_exponentiel(v, DECIMALES_EXPONENTIEL);
    }

    if v.fract() == 0.0 {
        // |v| < 1e12 : tient dans i64 ; -0 devient "0"
        return format!("{}", v as i64);
    }

    format_sans_zeros(arrondi_significatif(v, CHIFFRES_SIGNIFICATIFS))
}

/// Mantisse à `decimales` décimales + exposant signé : 1.500000e+12, 3e-3.
pub fn format_exponentiel(v: f64, decimales: usize) -> String {
    let s = format!("{:.*e}", decimales, v);
    match s.split_once('e') {
        Some((mantisse, exposant)) => match exposant.strip_prefix('-') {
            Some(chiffres) => format!("{mantisse}e-{chiffres}"),
            None => format!("{mantisse}e+{exposant}"),
        },
        None => s,
    }
}

/// Arrondi décimal à `chiffres` chiffres significatifs (via l’écriture exponentielle).
pub fn arrondi_significatif(v: f64, chiffres: usize) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let s = format!("{:.*e}", chiffres.saturating_sub(1), v);
    s.parse::<f64>().unwrap_or(v)
}

/// Écriture décimale la plus courte (pas de zéros de fin, pas de point final).
fn format_sans_zeros(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}
